// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style descriptors and the styling collaborator trait.

use kurbo::Vec2;

use crate::feature::Feature;

/// 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 255 is opaque.
    pub a: u8,
}

impl Rgba {
    /// An opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Paint style for path-classed shapes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathStyle {
    /// Stroke color; `None` disables stroking.
    pub stroke: Option<Rgba>,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Fill color; `None` disables filling.
    pub fill: Option<Rgba>,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            stroke: Some(Rgba::rgb(0, 0, 0)),
            stroke_width: 1.0,
            fill: None,
        }
    }
}

/// Marker shape for point-like features.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkerStyle {
    /// A circle of the given radius in pixels.
    Circle {
        /// Radius in pixels.
        radius: f64,
    },
    /// An axis-aligned square of the given half-extent in pixels.
    Square {
        /// Half the side length in pixels.
        half_extent: f64,
    },
}

impl MarkerStyle {
    /// The marker's hit radius: the farthest painted point from its center.
    pub(crate) fn extent(&self) -> f64 {
        match *self {
            Self::Circle { radius } => radius,
            // Corner distance.
            Self::Square { half_extent } => half_extent * core::f64::consts::SQRT_2,
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::Circle { radius: 4.0 }
    }
}

/// Per-feature, per-zoom output of style resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleResult {
    /// Paint style for the feature's shape.
    pub path: PathStyle,
    /// Marker shape used by point-like geometry.
    pub marker: MarkerStyle,
    /// Overall opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Whether the feature is drawn at all at this zoom.
    pub visible: bool,
    /// Paint-order key; lower paints first.
    pub z_index: f64,
    /// Perpendicular line offset in pixels; zero disables offsetting.
    pub offset: f64,
}

impl Default for StyleResult {
    fn default() -> Self {
        Self {
            path: PathStyle::default(),
            marker: MarkerStyle::default(),
            opacity: 1.0,
            visible: true,
            z_index: 0.0,
            offset: 0.0,
        }
    }
}

/// Text style for labels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LabelStyle {
    /// Text color.
    pub color: Rgba,
    /// Font size in pixels.
    pub font_size: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: Rgba::rgb(0, 0, 0),
            font_size: 12.0,
        }
    }
}

/// A resolved feature label.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// Text content.
    pub content: String,
    /// Text style.
    pub style: LabelStyle,
}

/// Resolved popup content for a clicked feature.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    /// Popup body content.
    pub content: String,
    /// Offset from the feature's anchor, in pixels.
    pub offset: Vec2,
}

/// External styling collaborator: maps a feature at a zoom level to style,
/// label, and popup descriptors. The rule engine behind it is out of scope
/// here.
pub trait Styler {
    /// Resolve the feature's style at the given zoom.
    fn apply_style(&self, feature: &Feature, zoom: f64) -> StyleResult;

    /// Resolve the feature's label, if any.
    fn label(&self, _feature: &Feature, _zoom: f64) -> Option<Label> {
        None
    }

    /// Resolve the feature's popup content, if any.
    fn popup(&self, _feature: &Feature, _zoom: f64) -> Option<Popup> {
        None
    }
}

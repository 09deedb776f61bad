// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport collaborator trait and a flat test/demo implementation.

use kurbo::Point;

use crate::feature::LngLat;

/// The host map viewport, consumed through a narrow read-only interface.
///
/// The viewport owns pan/zoom state and the geographic projection. All
/// projected coordinates are "zoom pixels": screen pixels at the current
/// zoom's world scale, before the view translation is applied.
pub trait Viewport {
    /// Current zoom level.
    fn zoom(&self) -> f64;

    /// Top-left corner of the visible area, in zoom pixels.
    fn pixel_origin(&self) -> Point;

    /// Project a geographic position to zoom pixels at the given zoom.
    fn project(&self, position: LngLat, zoom: f64) -> Point;
}

/// Equirectangular viewport over a square world of `256 * 2^zoom` pixels.
///
/// Good enough for tests and demos; a real host projects through its own
/// CRS machinery.
#[derive(Copy, Clone, Debug)]
pub struct FlatViewport {
    /// Current zoom level.
    pub zoom: f64,
    /// Top-left corner of the visible area, in zoom pixels.
    pub origin: Point,
}

impl FlatViewport {
    /// Create a viewport at the given zoom with the given top-left corner.
    pub const fn new(zoom: f64, origin: Point) -> Self {
        Self { zoom, origin }
    }
}

impl Viewport for FlatViewport {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn pixel_origin(&self) -> Point {
        self.origin
    }

    fn project(&self, position: LngLat, zoom: f64) -> Point {
        let scale = 256.0 * 2.0_f64.powf(zoom);
        Point::new(
            (position.lng + 180.0) / 360.0 * scale,
            (90.0 - position.lat) / 180.0 * scale,
        )
    }
}

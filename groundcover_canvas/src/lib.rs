// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Groundcover Canvas: a canvas rendering and spatial-interaction engine for
//! vector geographic features.
//!
//! The engine turns abstract features (points, lines, polygons with
//! properties) into z-ordered, screen-space scenes — one per canvas surface —
//! and dispatches pointer interaction back to the correct rendered feature.
//! The host map is an external collaborator: it owns pan/zoom state, the
//! geographic projection, and the actual painting, consumed here through the
//! [`Viewport`] trait and the [`DrawCommand`] lists a composited
//! [`SceneLayer`] emits. Styling is likewise external, behind the [`Styler`]
//! trait.
//!
//! The moving parts:
//!
//! - [`CanvasRenderer::render_canvas`] resolves styles (cached per feature
//!   until a zoom change dirties them), stable-sorts a z-buffer, projects and
//!   simplifies geometry, applies perpendicular line offsets, and composites
//!   one [`SceneLayer`] per render context.
//! - A screen-space index over rendered canvas surfaces (from
//!   [`groundcover_index`]) maps pointer positions to candidate contexts;
//!   [`CanvasRenderer::on_click`] and [`CanvasRenderer::on_mouse_move`] then
//!   hit-test the composited scene precisely and return typed results.
//! - [`CanvasRenderer::handle_viewport_event`] runs the lifecycle state
//!   machine: zoom changes dirty features and rebuild the index, drags gate
//!   rendering and hover dispatch, settled moves reinsert surface nodes.
//!
//! # Example
//!
//! ```rust
//! use groundcover_canvas::{
//!     CanvasRenderer, CtxId, Feature, FeatureId, FlatViewport, Geometry, LngLat, RenderContext,
//!     RenderOptions, StyleResult, Styler,
//! };
//! use kurbo::Point;
//!
//! struct PlainStyler;
//! impl Styler for PlainStyler {
//!     fn apply_style(&self, _: &Feature, _: f64) -> StyleResult {
//!         StyleResult::default()
//!     }
//! }
//!
//! let viewport = FlatViewport::new(0.0, Point::ZERO);
//! let mut features = vec![Feature::new(
//!     FeatureId(1),
//!     Geometry::Point(LngLat::new(0.0, 0.0)),
//! )];
//! let mut renderer = CanvasRenderer::new(RenderOptions::default());
//! renderer.add_to_view();
//!
//! let mut ctx = RenderContext::new(CtxId(1), 800.0, 600.0);
//! renderer
//!     .render_canvas(&mut ctx, &mut features, &viewport, &PlainStyler)
//!     .unwrap();
//! let scene = renderer.scene(CtxId(1)).unwrap();
//! assert_eq!(scene.len(), 1);
//! ```

pub mod context;
pub mod dispatch;
pub mod error;
pub mod feature;
#[cfg(feature = "geojson")]
pub mod geojson;
pub mod lifecycle;
pub mod pipeline;
pub mod scene;
pub mod style;
pub mod viewport;

#[cfg(test)]
mod testutil;

pub use context::{CtxId, RenderContext, TileCoord};
pub use dispatch::{Cursor, FeatureClick, PointerEvent};
pub use error::RenderError;
pub use feature::{Feature, FeatureId, Geometry, LngLat};
#[cfg(feature = "geojson")]
pub use geojson::features_from_geojson;
pub use lifecycle::{EventKind, LifecycleAction, ListenerTable, ViewportEvent};
pub use pipeline::{
    CanvasRenderer, HIT_TOLERANCE, RenderOptions, RenderStatus, SIMPLIFY_TOLERANCE,
};
pub use scene::{
    DrawCommand, HitKind, HitResult, ItemFlags, SceneItem, SceneLayer, SceneShape, ShapePath,
};
pub use style::{Label, LabelStyle, MarkerStyle, PathStyle, Popup, Rgba, StyleResult, Styler};
pub use viewport::{FlatViewport, Viewport};

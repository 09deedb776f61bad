// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-event dispatch: surface-index candidate lookup, precise scene
//! hit-testing, and the typed interaction results.

use kurbo::Point;
use tracing::trace;

use crate::feature::{Feature, FeatureId, LngLat};
use crate::lifecycle::EventKind;
use crate::pipeline::{CanvasRenderer, HIT_TOLERANCE};
use crate::scene::{HitKind, HitResult};
use crate::style::{Popup, Styler};
use crate::viewport::Viewport;

/// A pointer event, carrying both coordinate spaces the dispatcher needs.
#[derive(Copy, Clone, Debug)]
pub struct PointerEvent {
    /// Pointer position in container pixels, measured from the viewport's
    /// top-left corner.
    pub container_point: Point,
    /// The geographic position under the pointer.
    pub position: LngLat,
}

/// Cursor affordance the host should show after a pointer move.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    /// The default arrow cursor.
    #[default]
    Default,
    /// The pointer (hand) cursor, shown over an interactive feature.
    Pointer,
}

/// Result of dispatching a click to a rendered feature.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureClick {
    /// The clicked feature.
    pub feature: FeatureId,
    /// What part of the shape was hit.
    pub kind: HitKind,
    /// Popup content, freshly resolved from the styler at click time.
    pub popup: Option<Popup>,
}

impl CanvasRenderer {
    /// Dispatch a click. Returns the topmost hit feature together with its
    /// refreshed popup content, or `None` when nothing interactive was hit
    /// (or the renderer is not attached to a view).
    pub fn on_click<V: Viewport, S: Styler>(
        &self,
        event: &PointerEvent,
        features: &[Feature],
        viewport: &V,
        styler: &S,
    ) -> Option<FeatureClick> {
        if !self.listeners.is_attached(EventKind::Click, None) {
            return None;
        }
        let hit = self.hit_test(event, viewport)?;
        let feature = features.iter().find(|f| f.id == hit.feature)?;
        // Popup content may be zoom-dependent; refresh it on every click.
        let popup = styler.popup(feature, viewport.zoom());
        Some(FeatureClick {
            feature: hit.feature,
            kind: hit.kind,
            popup,
        })
    }

    /// Dispatch a pointer move. Returns the cursor affordance: a pointer
    /// over an interactive feature, the default otherwise. Disabled while
    /// dragging and when the `mouse_over` option is off.
    pub fn on_mouse_move<V: Viewport>(&self, event: &PointerEvent, viewport: &V) -> Cursor {
        if self.dragging
            || !self.options.mouse_over
            || !self.listeners.is_attached(EventKind::MouseMove, None)
        {
            return Cursor::Default;
        }
        match self.hit_test(event, viewport) {
            Some(_) => Cursor::Pointer,
            None => Cursor::Default,
        }
    }

    /// Precise hit-test: query the surface index with the container point
    /// (a degenerate rectangle), then test each candidate's composited
    /// scene with the projected geographic coordinate.
    pub fn hit_test<V: Viewport>(&self, event: &PointerEvent, viewport: &V) -> Option<HitResult> {
        let tree = self.tree.as_ref()?;
        let candidates: Vec<_> = tree
            .query_point(event.container_point.x, event.container_point.y)
            .collect();
        trace!(candidates = candidates.len(), "surfaces under pointer");
        let scene_point = viewport.project(event.position, viewport.zoom());
        for (_, ctx_id) in candidates {
            if let Some(scene) = self.scene(ctx_id)
                && let Some(hit) = scene.hit_test(scene_point, HIT_TOLERANCE)
            {
                return Some(hit);
            }
        }
        None
    }
}

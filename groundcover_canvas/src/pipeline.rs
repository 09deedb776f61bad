// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style/render pipeline and the viewport lifecycle state machine.

use std::collections::BTreeMap;
use std::rc::Rc;

use groundcover_geom::{offset_polyline, simplify_polyline};
use groundcover_index::{Key, TileIndex};
use kurbo::{Point, Vec2};
use tracing::{debug, debug_span, trace};

use crate::context::{CtxId, RenderContext};
use crate::error::RenderError;
use crate::feature::{Feature, FeatureId, Geometry, LngLat};
use crate::lifecycle::{EventKind, LifecycleAction, ListenerTable, ViewportEvent};
use crate::scene::{ItemFlags, SceneItem, SceneLayer, SceneShape, ShapePath};
use crate::style::{Label, LabelStyle, PathStyle, Rgba, StyleResult, Styler};
use crate::viewport::Viewport;

/// Pixel tolerance for precise hit-testing.
pub const HIT_TOLERANCE: f64 = 5.0;

/// Pixel tolerance for projected polyline simplification.
pub const SIMPLIFY_TOLERANCE: f64 = 1.0;

/// Feature id carried by debug overlay items; never pickable.
const DEBUG_FEATURE: FeatureId = FeatureId(u64::MAX);

/// Rendering policy options.
#[derive(Copy, Clone, Debug)]
pub struct RenderOptions {
    /// Whether canvases repaint while a drag is in progress. When `false`,
    /// renders during a drag are skipped and a deferred render is requested
    /// at drag end.
    pub dragging_updates: bool,
    /// Whether pointer moves drive the cursor affordance.
    pub mouse_over: bool,
    /// Paint a per-surface debug overlay: a border and the tile coordinate.
    pub debug: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dragging_updates: true,
            mouse_over: false,
            debug: false,
        }
    }
}

/// What a render call did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    /// The scene was rebuilt and composited.
    Rendered,
    /// Skipped: a drag is in progress and dragging updates are off.
    SkippedDragging,
}

/// The canvas rendering and spatial-interaction engine.
///
/// One renderer serves many render contexts (one per canvas surface). It
/// owns the surface index, the per-context composited scenes, the listener
/// table, and the drag/zoom bookkeeping. Feature and context state stay with
/// the host; the renderer only annotates caches on them.
#[derive(Debug, Default)]
pub struct CanvasRenderer {
    pub(crate) options: RenderOptions,
    pub(crate) listeners: ListenerTable,
    pub(crate) tree: Option<TileIndex<CtxId>>,
    nodes: BTreeMap<CtxId, Key>,
    scenes: BTreeMap<CtxId, SceneLayer>,
    last_zoom: Option<f64>,
    pub(crate) dragging: bool,
    force_styles: bool,
}

impl CanvasRenderer {
    /// Create a renderer with the given options. Call
    /// [`add_to_view`](Self::add_to_view) before delivering events.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Attach the renderer-wide viewport listeners. Pointer events and
    /// lifecycle events are ignored until this is called.
    pub fn add_to_view(&mut self) {
        self.listeners.attach(EventKind::Click, None);
        self.listeners.attach(EventKind::DragStart, None);
        self.listeners.attach(EventKind::MoveEnd, None);
        if self.options.mouse_over {
            self.listeners.attach(EventKind::MouseMove, None);
        }
    }

    /// Detach every viewport listener and drop all per-view state. After
    /// this, viewport and pointer events are no-ops until the renderer is
    /// added again.
    pub fn remove_from_view(&mut self) {
        self.listeners.clear();
        self.tree = None;
        self.nodes.clear();
        self.scenes.clear();
        self.last_zoom = None;
        self.dragging = false;
    }

    /// The rendering options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The attached viewport listeners.
    pub fn listeners(&self) -> &ListenerTable {
        &self.listeners
    }

    /// Whether a drag is currently in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The composited scene of a context, if it has been rendered.
    pub fn scene(&self, ctx: CtxId) -> Option<&SceneLayer> {
        self.scenes.get(&ctx)
    }

    /// Number of canvas surfaces currently registered in the spatial index.
    pub fn surface_count(&self) -> usize {
        self.tree.as_ref().map_or(0, TileIndex::len)
    }

    /// Force style resolution on the next render pass, e.g. after a
    /// style-sheet change. Features whose resolved style actually changed
    /// get their scene item rebuilt; the rest keep their caches.
    pub fn invalidate_styles(&mut self) {
        self.force_styles = true;
    }

    /// Render one context's scene from the given features.
    ///
    /// Resolves styles (reusing caches on clean features), stable-sorts a
    /// z-buffer ascending by z-index, builds or reuses one scene item per
    /// feature, and composites them into the context's [`SceneLayer`]
    /// translated by the context origin. Degenerate geometry is skipped
    /// silently; a zero-area canvas is a precondition error.
    pub fn render_canvas<V: Viewport, S: Styler>(
        &mut self,
        ctx: &mut RenderContext,
        features: &mut [Feature],
        viewport: &V,
        styler: &S,
    ) -> Result<RenderStatus, RenderError> {
        if ctx.width <= 0.0 || ctx.height <= 0.0 {
            return Err(RenderError::CanvasUnavailable {
                ctx: ctx.id,
                width: ctx.width,
                height: ctx.height,
            });
        }
        let span = debug_span!("render_canvas", ctx = ctx.id.0);
        let _guard = span.enter();

        self.init_ctx(ctx, viewport);

        // Hard policy guard: no repaint while dragging.
        if !self.options.dragging_updates && self.dragging {
            debug!("render skipped: drag in progress");
            return Ok(RenderStatus::SkippedDragging);
        }

        ctx.origin = ctx.current_origin(viewport);
        let zoom = viewport.zoom();
        let force = self.force_styles;
        self.force_styles = false;

        // Z-buffer pass: resolve (or reuse) every feature's style. The sort
        // is stable, so equal z-indices keep their source order.
        let mut zbuf: Vec<(f64, usize)> = Vec::with_capacity(features.len());
        for (i, feature) in features.iter_mut().enumerate() {
            let style = resolve_style(feature, styler, zoom, force);
            zbuf.push((style.z_index, i));
        }
        zbuf.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut layer = SceneLayer::new(ctx.origin);
        let mut rebuilt = 0_usize;
        for &(_, i) in &zbuf {
            let feature = &mut features[i];
            if let Some(item) = reusable_item(feature) {
                layer.push(item);
            } else if let Some(item) = build_item(feature, styler, viewport, zoom) {
                rebuilt += 1;
                layer.push(item);
            }
        }
        if self.options.debug {
            push_debug_overlay(&mut layer, ctx);
        }
        trace!(items = layer.len(), rebuilt, "scene composited");
        self.scenes.insert(ctx.id, layer);
        Ok(RenderStatus::Rendered)
    }

    /// Handle a viewport lifecycle event. Events without a matching attached
    /// listener are no-ops. Returns the actions the host must apply.
    pub fn handle_viewport_event<V: Viewport>(
        &mut self,
        event: ViewportEvent,
        ctxs: &mut [RenderContext],
        features: &mut [Feature],
        viewport: &V,
    ) -> Vec<LifecycleAction> {
        match event {
            ViewportEvent::ZoomStart => {
                // Force a full rebuild (index included) on the next render.
                for ctx in ctxs.iter_mut() {
                    if self.listeners.is_attached(EventKind::ZoomStart, Some(ctx.id)) {
                        ctx.initialized = false;
                    }
                }
                Vec::new()
            }
            ViewportEvent::ZoomEnd => {
                if !self.listeners.any(EventKind::ZoomEnd) {
                    return Vec::new();
                }
                debug!("zoom ended: dirtying features, dropping surface nodes");
                for feature in features.iter_mut() {
                    feature.mark_dirty();
                }
                self.clear_nodes();
                Vec::new()
            }
            ViewportEvent::DragStart => {
                if !self.listeners.is_attached(EventKind::DragStart, None) {
                    return Vec::new();
                }
                self.dragging = true;
                self.clear_nodes();
                // Hover dispatch is pointless mid-drag.
                self.listeners.detach(EventKind::MouseMove, None);
                Vec::new()
            }
            ViewportEvent::DragEnd => {
                if !self.listeners.any(EventKind::DragEnd) {
                    return Vec::new();
                }
                self.finish_drag(ctxs, viewport)
            }
            ViewportEvent::MoveEnd => {
                if !self.listeners.is_attached(EventKind::MoveEnd, None) {
                    return Vec::new();
                }
                // A settled pan stales node geometry exactly like a drag;
                // drop the nodes and relay into the drag-end path so every
                // context reinserts itself.
                self.clear_nodes();
                self.finish_drag(ctxs, viewport)
            }
        }
    }

    fn finish_drag<V: Viewport>(
        &mut self,
        ctxs: &[RenderContext],
        viewport: &V,
    ) -> Vec<LifecycleAction> {
        self.dragging = false;
        if self.options.mouse_over {
            self.listeners.attach(EventKind::MouseMove, None);
        }
        let mut actions = Vec::new();
        for ctx in ctxs {
            if !ctx.initialized || !self.listeners.is_attached(EventKind::DragEnd, Some(ctx.id)) {
                continue;
            }
            self.insert_node(ctx, viewport);
            if !self.options.dragging_updates {
                actions.push(LifecycleAction::RenderRequested(ctx.id));
            }
        }
        actions
    }

    /// Lazy per-context initialization on first render (and again after a
    /// zoom start reset it).
    fn init_ctx<V: Viewport>(&mut self, ctx: &mut RenderContext, viewport: &V) {
        if ctx.initialized {
            return;
        }
        ctx.initialized = true;
        let zoom = viewport.zoom();
        if self.tree.is_none() || self.last_zoom != Some(zoom) {
            // Node boxes are in current-zoom pixels; they are meaningless
            // across zoom levels.
            debug!(zoom, "building surface index");
            self.tree = Some(TileIndex::new());
            self.nodes.clear();
            self.last_zoom = Some(zoom);
        }
        self.insert_node(ctx, viewport);
        self.listeners.attach(EventKind::ZoomStart, Some(ctx.id));
        self.listeners.attach(EventKind::ZoomEnd, Some(ctx.id));
        self.listeners.attach(EventKind::DragEnd, Some(ctx.id));
    }

    fn insert_node<V: Viewport>(&mut self, ctx: &RenderContext, viewport: &V) {
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        // At most one live node per context between clears.
        if let Some(key) = self.nodes.get(&ctx.id)
            && tree.get(*key).is_some()
        {
            return;
        }
        let key = tree.insert(ctx.screen_bounds(viewport), ctx.id);
        self.nodes.insert(ctx.id, key);
    }

    fn clear_nodes(&mut self) {
        if let Some(tree) = self.tree.as_mut() {
            tree.clear();
        }
        self.nodes.clear();
    }
}

/// Resolve a feature's style, reusing the cache when the feature is clean
/// and recomputation is not forced. A forced recomputation that changes the
/// style drops the cached scene item so the change becomes visible.
fn resolve_style<S: Styler>(
    feature: &mut Feature,
    styler: &S,
    zoom: f64,
    force: bool,
) -> StyleResult {
    if !force
        && feature.cache.clean
        && let Some(style) = &feature.cache.style
    {
        return style.clone();
    }
    let style = styler.apply_style(feature, zoom);
    if feature.cache.style.as_ref() != Some(&style) {
        feature.cache.item = None;
    }
    feature.cache.style = Some(style.clone());
    style
}

/// The cached scene item, if it is still valid: the feature must be clean
/// and the item's baked-in selection state must match the feature's.
fn reusable_item(feature: &Feature) -> Option<Rc<SceneItem>> {
    if !feature.cache.clean {
        return None;
    }
    let item = feature.cache.item.clone()?;
    (item.flags.contains(ItemFlags::SELECTED) == feature.selected).then_some(item)
}

/// Build the scene item for one feature and mark the feature clean.
/// Degenerate geometry (empty multi-parts, sub-2-point paths) produces no
/// item and leaves the feature dirty.
fn build_item<S: Styler, V: Viewport>(
    feature: &mut Feature,
    styler: &S,
    viewport: &V,
    zoom: f64,
) -> Option<Rc<SceneItem>> {
    // Always present: `resolve_style` ran in the z-buffer pass.
    let style = feature.cache.style.clone()?;
    let shape = match &feature.geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {
            let position = feature.geometry.primary_position()?;
            let center = match feature.cache.projected {
                Some(p) => p,
                None => {
                    let p = viewport.project(position, zoom);
                    feature.cache.projected = Some(p);
                    p
                }
            };
            SceneShape::Marker {
                center,
                marker: style.marker,
            }
        }
        Geometry::LineString(_) | Geometry::MultiLineString(_) => SceneShape::Path(project_path(
            feature.geometry.primary_path()?,
            false,
            style.offset,
            viewport,
            zoom,
        )?),
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => SceneShape::Path(project_path(
            feature.geometry.primary_path()?,
            true,
            0.0,
            viewport,
            zoom,
        )?),
    };
    let mut flags = ItemFlags::PICKABLE;
    flags.set(ItemFlags::VISIBLE, style.visible);
    flags.set(ItemFlags::SELECTED, feature.selected);
    let label = styler
        .label(feature, zoom)
        .map(|label| (shape_anchor(&shape), label));
    let popup = styler.popup(feature, zoom);
    let item = Rc::new(SceneItem {
        feature: feature.id,
        z_index: style.z_index,
        shape,
        style: style.path,
        opacity: style.opacity,
        flags,
        label,
        popup,
    });
    feature.cache.item = Some(item.clone());
    feature.cache.clean = true;
    Some(item)
}

/// Project, simplify, and (for lines) offset a coordinate sequence.
fn project_path<V: Viewport>(
    coords: &[LngLat],
    closed: bool,
    offset: f64,
    viewport: &V,
    zoom: f64,
) -> Option<ShapePath> {
    if coords.len() < 2 {
        return None;
    }
    let projected: Vec<Point> = coords.iter().map(|c| viewport.project(*c, zoom)).collect();
    let mut points = simplify_polyline(&projected, SIMPLIFY_TOLERANCE);
    if closed && points.len() > 1 && points.first() == points.last() {
        // Rings repeat the first position; the closing edge is implicit.
        points.pop();
    }
    if offset != 0.0 {
        points = offset_polyline(&points, offset);
    }
    if points.len() < 2 {
        return None;
    }
    Some(ShapePath { points, closed })
}

fn shape_anchor(shape: &SceneShape) -> Point {
    match shape {
        SceneShape::Marker { center, .. } => *center,
        SceneShape::Path(path) => path.anchor(),
    }
}

/// Extra non-pickable items visualizing the surface: a border and, for
/// tiled surfaces, the tile coordinate.
fn push_debug_overlay(layer: &mut SceneLayer, ctx: &RenderContext) {
    let o = ctx.origin;
    let border = ShapePath {
        points: vec![
            o,
            o + Vec2::new(ctx.width, 0.0),
            o + Vec2::new(ctx.width, ctx.height),
            o + Vec2::new(0.0, ctx.height),
        ],
        closed: true,
    };
    let label = ctx.tile.map(|tile| {
        (
            o + Vec2::new(4.0, 14.0),
            Label {
                content: format!("{}/{}", tile.x, tile.y),
                style: LabelStyle::default(),
            },
        )
    });
    layer.push(Rc::new(SceneItem {
        feature: DEBUG_FEATURE,
        z_index: f64::INFINITY,
        shape: SceneShape::Path(border),
        style: PathStyle {
            stroke: Some(Rgba::rgb(255, 0, 0)),
            stroke_width: 1.0,
            fill: None,
        },
        opacity: 1.0,
        flags: ItemFlags::VISIBLE,
        label,
        popup: None,
    }));
}

// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer dispatch walkthrough.
//!
//! Renders a marker and a line, then replays a small pointer session against
//! the renderer: a hover over each feature, a click on the marker, and a
//! drag that temporarily disables hover dispatch.
//!
//! Run:
//! - `cargo run -p groundcover_demos --example hit_dispatch`

use groundcover_canvas::{
    CanvasRenderer, CtxId, Feature, FeatureId, FlatViewport, Geometry, Label, LabelStyle, LngLat,
    PointerEvent, Popup, RenderContext, RenderOptions, StyleResult, Styler, Viewport,
    ViewportEvent,
};
use kurbo::{Point, Vec2};

struct PoiStyler;

impl Styler for PoiStyler {
    fn apply_style(&self, _feature: &Feature, _zoom: f64) -> StyleResult {
        StyleResult::default()
    }

    fn label(&self, feature: &Feature, _zoom: f64) -> Option<Label> {
        feature.properties.get("name").map(|name| Label {
            content: name.clone(),
            style: LabelStyle::default(),
        })
    }

    fn popup(&self, feature: &Feature, _zoom: f64) -> Option<Popup> {
        feature.properties.get("name").map(|name| Popup {
            content: format!("You clicked {name}"),
            offset: Vec2::ZERO,
        })
    }
}

fn pointer_at(vp: &FlatViewport, lng: f64, lat: f64) -> PointerEvent {
    let position = LngLat::new(lng, lat);
    PointerEvent {
        container_point: vp.project(position, vp.zoom) - vp.origin.to_vec2(),
        position,
    }
}

fn main() {
    let vp = FlatViewport::new(0.0, Point::ZERO);

    let mut cafe = Feature::new(FeatureId(1), Geometry::Point(LngLat::new(0.0, 0.0)));
    cafe.properties.insert("name".into(), "Cafe".into());
    let river = Feature::new(
        FeatureId(2),
        Geometry::LineString(vec![
            LngLat::new(-20.0, 10.0),
            LngLat::new(0.0, 12.0),
            LngLat::new(20.0, 10.0),
        ]),
    );
    let mut features = vec![cafe, river];

    let mut renderer = CanvasRenderer::new(RenderOptions {
        mouse_over: true,
        ..RenderOptions::default()
    });
    renderer.add_to_view();

    let mut ctx = RenderContext::new(CtxId(1), 800.0, 600.0);
    renderer
        .render_canvas(&mut ctx, &mut features, &vp, &PoiStyler)
        .unwrap();

    for (what, lng, lat) in [("marker", 0.0, 0.0), ("line", 0.0, 12.0), ("water", -90.0, -45.0)] {
        let cursor = renderer.on_mouse_move(&pointer_at(&vp, lng, lat), &vp);
        println!("hover over {what}: cursor = {cursor:?}");
    }

    if let Some(click) = renderer.on_click(&pointer_at(&vp, 0.0, 0.0), &features, &vp, &PoiStyler) {
        println!(
            "click: feature {:?} ({:?}), popup = {:?}",
            click.feature,
            click.kind,
            click.popup.map(|p| p.content)
        );
    }

    // Hover goes quiet for the duration of a drag.
    let mut ctxs = [ctx];
    renderer.handle_viewport_event(ViewportEvent::DragStart, &mut ctxs, &mut features, &vp);
    let cursor = renderer.on_mouse_move(&pointer_at(&vp, 0.0, 0.0), &vp);
    println!("hover mid-drag: cursor = {cursor:?}");

    let actions = renderer.handle_viewport_event(ViewportEvent::DragEnd, &mut ctxs, &mut features, &vp);
    let cursor = renderer.on_mouse_move(&pointer_at(&vp, 0.0, 0.0), &vp);
    println!("hover after drag: cursor = {cursor:?} (lifecycle actions: {actions:?})");
}

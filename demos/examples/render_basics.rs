// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render pipeline basics.
//!
//! Styles a handful of features, renders them into one canvas context, and
//! dumps the resulting draw commands in paint order. Run with
//! `RUST_LOG=debug` to see the pipeline's tracing output.
//!
//! Run:
//! - `cargo run -p groundcover_demos --example render_basics`

use groundcover_canvas::{
    CanvasRenderer, CtxId, DrawCommand, Feature, FlatViewport, RenderContext, RenderOptions,
    StyleResult, Styler, features_from_geojson,
};
use kurbo::Point;

struct DemoStyler;

impl Styler for DemoStyler {
    fn apply_style(&self, feature: &Feature, _zoom: f64) -> StyleResult {
        let mut style = StyleResult::default();
        // Roads paint above waterways, which paint above land cover.
        style.z_index = match feature.properties.get("kind").map(String::as_str) {
            Some("road") => 2.0,
            Some("waterway") => 1.0,
            _ => 0.0,
        };
        style
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let body = r#"{"type":"FeatureCollection","features":[
      {"type":"Feature","id":1,
       "geometry":{"type":"Polygon","coordinates":[[[-5,-5],[5,-5],[5,5],[-5,5],[-5,-5]]]},
       "properties":{"kind":"landcover"}},
      {"type":"Feature","id":2,
       "geometry":{"type":"LineString","coordinates":[[-10,0],[0,2],[10,0]]},
       "properties":{"kind":"waterway"}},
      {"type":"Feature","id":3,
       "geometry":{"type":"LineString","coordinates":[[-10,-1],[10,-1]]},
       "properties":{"kind":"road"}},
      {"type":"Feature","id":4,
       "geometry":{"type":"Point","coordinates":[0,0]},
       "properties":{"kind":"poi"}}
    ]}"#;
    let parsed: geojson::GeoJson = body.parse().unwrap();
    let collection = geojson::FeatureCollection::try_from(parsed).unwrap();
    let mut features = features_from_geojson(&collection);

    let viewport = FlatViewport::new(2.0, Point::ZERO);
    let mut renderer = CanvasRenderer::new(RenderOptions::default());
    renderer.add_to_view();

    let mut ctx = RenderContext::new(CtxId(1), 1024.0, 1024.0);
    renderer
        .render_canvas(&mut ctx, &mut features, &viewport, &DemoStyler)
        .unwrap();

    let scene = renderer.scene(CtxId(1)).unwrap();
    println!("== Scene ({} items, origin {:?}) ==", scene.len(), scene.origin());
    for cmd in scene.draw_commands() {
        match cmd {
            DrawCommand::Marker { center, marker, .. } => {
                println!("  marker {marker:?} at {center:?}");
            }
            DrawCommand::Path { points, closed, .. } => {
                println!("  path ({} pts, closed={closed}) from {:?}", points.len(), points[0]);
            }
            DrawCommand::Text { anchor, label } => {
                println!("  text {:?} at {anchor:?}", label.content);
            }
        }
    }
}

// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene items and the composited per-context scene layer.

use std::rc::Rc;

use bitflags::bitflags;
use groundcover_geom::point_segment_distance;
use kurbo::Point;

use crate::feature::FeatureId;
use crate::style::{Label, MarkerStyle, PathStyle, Popup};

bitflags! {
    /// Behavior flags of a scene item.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ItemFlags: u8 {
        /// The item is painted.
        const VISIBLE = 1 << 0;
        /// The item participates in hit-testing.
        const PICKABLE = 1 << 1;
        /// The source feature is selected; hosts may paint a highlight.
        const SELECTED = 1 << 2;
    }
}

/// A polyline or polygon outline in zoom pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapePath {
    /// Vertices in zoom pixels.
    pub points: Vec<Point>,
    /// Whether the last vertex connects back to the first.
    pub closed: bool,
}

impl ShapePath {
    /// Even-odd point-in-polygon test. Always `false` for open paths.
    pub fn contains(&self, p: Point) -> bool {
        if !self.closed || self.points.len() < 3 {
            return false;
        }
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Distance from `p` to the nearest point on the outline, including the
    /// closing edge of a closed path.
    pub fn stroke_distance(&self, p: Point) -> f64 {
        let n = self.points.len();
        match n {
            0 => return f64::INFINITY,
            1 => return (p - self.points[0]).hypot(),
            _ => {}
        }
        let mut best = f64::INFINITY;
        for pair in self.points.windows(2) {
            best = best.min(point_segment_distance(p, pair[0], pair[1]));
        }
        if self.closed {
            best = best.min(point_segment_distance(p, self.points[n - 1], self.points[0]));
        }
        best
    }

    /// Anchor point for labels: the vertex centroid.
    pub(crate) fn anchor(&self) -> Point {
        if self.points.is_empty() {
            return Point::ZERO;
        }
        let sum = self
            .points
            .iter()
            .fold(Point::ZERO, |acc, p| Point::new(acc.x + p.x, acc.y + p.y));
        let n = self.points.len() as f64;
        Point::new(sum.x / n, sum.y / n)
    }
}

/// The drawable shape of a scene item.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneShape {
    /// A point marker.
    Marker {
        /// Marker center in zoom pixels.
        center: Point,
        /// Marker shape and size.
        marker: MarkerStyle,
    },
    /// A stroked and/or filled path.
    Path(ShapePath),
}

/// What part of a shape a hit landed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitKind {
    /// On or near the stroked outline.
    Stroke,
    /// Inside a filled area or within a marker's extent.
    Fill,
}

/// A positive hit-test result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HitResult {
    /// The feature backing the hit item.
    pub feature: FeatureId,
    /// What part of the shape was hit.
    pub kind: HitKind,
}

/// The drawable unit produced for one feature: shape plus optional label,
/// grouped so z-order and visibility act on the pair atomically.
///
/// Items back-reference their source feature for hit-testing; the feature in
/// turn caches an `Rc` of its current item, dropped when it goes dirty.
#[derive(Clone, Debug)]
pub struct SceneItem {
    /// Back-reference to the source feature.
    pub feature: FeatureId,
    /// Paint-order key; lower paints first.
    pub z_index: f64,
    /// The drawable shape, in zoom pixels.
    pub shape: SceneShape,
    /// Paint style.
    pub style: PathStyle,
    /// Overall opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Behavior flags.
    pub flags: ItemFlags,
    /// Label anchored in zoom pixels, if the styler produced one.
    pub label: Option<(Point, Label)>,
    /// Popup content resolved at build time, if any.
    pub popup: Option<Popup>,
}

impl SceneItem {
    /// Precise hit-test with a pixel tolerance. `None` for invisible or
    /// non-pickable items and for misses.
    pub fn hit_test(&self, p: Point, tolerance: f64) -> Option<HitKind> {
        if !self.flags.contains(ItemFlags::VISIBLE | ItemFlags::PICKABLE) {
            return None;
        }
        match &self.shape {
            SceneShape::Marker { center, marker } => {
                ((p - *center).hypot() <= marker.extent() + tolerance).then_some(HitKind::Fill)
            }
            SceneShape::Path(path) => {
                if self.style.fill.is_some() && path.contains(p) {
                    return Some(HitKind::Fill);
                }
                if self.style.stroke.is_some()
                    && path.stroke_distance(p) <= self.style.stroke_width / 2.0 + tolerance
                {
                    return Some(HitKind::Stroke);
                }
                None
            }
        }
    }
}

/// One drawing instruction in canvas-local pixels, produced by
/// [`SceneLayer::draw_commands`].
#[derive(Clone, Debug)]
pub enum DrawCommand {
    /// Paint a point marker.
    Marker {
        /// Marker center in canvas-local pixels.
        center: Point,
        /// Marker shape and size.
        marker: MarkerStyle,
        /// Paint style.
        style: PathStyle,
        /// Overall opacity.
        opacity: f64,
        /// Whether to paint a selection highlight.
        selected: bool,
    },
    /// Paint a path.
    Path {
        /// Vertices in canvas-local pixels.
        points: Vec<Point>,
        /// Whether to close the path before painting.
        closed: bool,
        /// Paint style.
        style: PathStyle,
        /// Overall opacity.
        opacity: f64,
        /// Whether to paint a selection highlight.
        selected: bool,
    },
    /// Paint a text label.
    Text {
        /// Label anchor in canvas-local pixels.
        anchor: Point,
        /// Label content and style.
        label: Label,
    },
}

/// The composited scene for one render context: items in paint order,
/// translated by the negated origin at draw time.
#[derive(Clone, Debug, Default)]
pub struct SceneLayer {
    origin: Point,
    items: Vec<Rc<SceneItem>>,
}

impl SceneLayer {
    pub(crate) fn new(origin: Point) -> Self {
        Self {
            origin,
            items: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, item: Rc<SceneItem>) {
        self.items.push(item);
    }

    /// Screen-space translation origin of this layer, in zoom pixels.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Items in paint order (ascending z-index, stable for ties).
    pub fn items(&self) -> impl Iterator<Item = &SceneItem> {
        self.items.iter().map(Rc::as_ref)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the layer holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Hit-test against the scene, topmost item first. `p` is in zoom
    /// pixels, the same space items are built in.
    pub fn hit_test(&self, p: Point, tolerance: f64) -> Option<HitResult> {
        for item in self.items.iter().rev() {
            if let Some(kind) = item.hit_test(p, tolerance) {
                return Some(HitResult {
                    feature: item.feature,
                    kind,
                });
            }
        }
        None
    }

    /// Drawing instructions in paint order, translated into canvas-local
    /// pixels by the negated layer origin. Invisible items are skipped; a
    /// label follows its shape immediately so the pair stacks atomically.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let shift = -self.origin.to_vec2();
        let mut out = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if !item.flags.contains(ItemFlags::VISIBLE) {
                continue;
            }
            let selected = item.flags.contains(ItemFlags::SELECTED);
            match &item.shape {
                SceneShape::Marker { center, marker } => out.push(DrawCommand::Marker {
                    center: *center + shift,
                    marker: *marker,
                    style: item.style,
                    opacity: item.opacity,
                    selected,
                }),
                SceneShape::Path(path) => out.push(DrawCommand::Path {
                    points: path.points.iter().map(|p| *p + shift).collect(),
                    closed: path.closed,
                    style: item.style,
                    opacity: item.opacity,
                    selected,
                }),
            }
            if let Some((anchor, label)) = &item.label {
                out.push(DrawCommand::Text {
                    anchor: *anchor + shift,
                    label: label.clone(),
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Rgba;

    fn path_item(points: Vec<Point>, closed: bool, fill: bool) -> SceneItem {
        SceneItem {
            feature: FeatureId(1),
            z_index: 0.0,
            shape: SceneShape::Path(ShapePath { points, closed }),
            style: PathStyle {
                stroke: Some(Rgba::rgb(0, 0, 0)),
                stroke_width: 2.0,
                fill: fill.then_some(Rgba::rgb(200, 0, 0)),
            },
            opacity: 1.0,
            flags: ItemFlags::VISIBLE | ItemFlags::PICKABLE,
            label: None,
            popup: None,
        }
    }

    #[test]
    fn point_in_polygon_even_odd() {
        let square = ShapePath {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            closed: true,
        };
        assert!(square.contains(Point::new(5.0, 5.0)));
        assert!(!square.contains(Point::new(15.0, 5.0)));
        // Open paths never contain anything.
        let open = ShapePath {
            closed: false,
            ..square
        };
        assert!(!open.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn stroke_distance_includes_closing_edge() {
        let square = ShapePath {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            closed: true,
        };
        // Nearest edge is the closing one from (0, 10) back to (0, 0).
        let d = square.stroke_distance(Point::new(-3.0, 5.0));
        assert!((d - 3.0).abs() < 1e-12, "got {d}");
    }

    #[test]
    fn fill_hit_beats_stroke_hit() {
        let item = path_item(
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            true,
            true,
        );
        assert_eq!(item.hit_test(Point::new(5.0, 5.0), 5.0), Some(HitKind::Fill));
        // Just outside: stroke tolerance catches it.
        assert_eq!(
            item.hit_test(Point::new(12.0, 5.0), 5.0),
            Some(HitKind::Stroke)
        );
        assert_eq!(item.hit_test(Point::new(50.0, 5.0), 5.0), None);
    }

    #[test]
    fn non_pickable_items_never_hit() {
        let mut item = path_item(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            false,
            false,
        );
        item.flags = ItemFlags::VISIBLE;
        assert_eq!(item.hit_test(Point::new(5.0, 0.0), 5.0), None);
    }

    #[test]
    fn layer_hit_test_prefers_topmost() {
        let mut layer = SceneLayer::new(Point::ZERO);
        let mut bottom = path_item(
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            true,
            true,
        );
        bottom.feature = FeatureId(1);
        let mut top = bottom.clone();
        top.feature = FeatureId(2);
        layer.push(Rc::new(bottom));
        layer.push(Rc::new(top));
        let hit = layer.hit_test(Point::new(5.0, 5.0), 5.0);
        assert_eq!(hit.map(|h| h.feature), Some(FeatureId(2)));
    }

    #[test]
    fn draw_commands_translate_by_negated_origin() {
        let mut layer = SceneLayer::new(Point::new(100.0, 50.0));
        layer.push(Rc::new(path_item(
            vec![Point::new(110.0, 60.0), Point::new(120.0, 60.0)],
            false,
            false,
        )));
        let cmds = layer.draw_commands();
        match &cmds[0] {
            DrawCommand::Path { points, .. } => {
                assert_eq!(points[0], Point::new(10.0, 10.0));
                assert_eq!(points[1], Point::new(20.0, 10.0));
            }
            other => panic!("expected a path command, got {other:?}"),
        }
    }

    #[test]
    fn invisible_items_are_not_drawn() {
        let mut layer = SceneLayer::new(Point::ZERO);
        let mut item = path_item(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)], false, false);
        item.flags = ItemFlags::PICKABLE;
        layer.push(Rc::new(item));
        assert!(layer.draw_commands().is_empty());
    }
}

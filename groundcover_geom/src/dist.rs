// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point/segment distance.

use kurbo::Point;

/// Distance from `p` to the closest point on the segment `a -> b`.
///
/// A zero-length segment degrades to the distance to `a`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    (p - closest_on_segment(p, a, b)).hypot()
}

/// Squared distance variant, used where only comparisons are needed.
pub(crate) fn point_segment_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    (p - closest_on_segment(p, a, b)).hypot2()
}

fn closest_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a.lerp(b, t)
}

// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parallel polyline offsetting with mitred joins.

use alloc::vec::Vec;
use kurbo::{Point, Vec2};

/// Determinant magnitude below which two translated segments are treated as
/// parallel and the mitre intersection is skipped.
pub const COLLINEAR_EPS: f64 = 1e-12;

/// Displace a polyline perpendicular to its local direction by `distance`.
///
/// The output has the same number of points as the input. Endpoints are
/// displaced along the normal of their single adjacent segment. Each interior
/// vertex is placed at the intersection of the lines through its two adjacent
/// segments, both translated sideways by `distance`, which produces a mitred
/// join. Positive `distance` displaces to the left of the direction of travel
/// in a y-down coordinate system.
///
/// Degenerate joins recover locally: when the translated segments are parallel
/// (collinear vertices, or a segment that doubles back), the vertex falls back
/// to a single-normal displacement; a zero-length segment borrows the normal
/// of its neighbour. Inputs with fewer than two points, or a zero `distance`,
/// are returned unchanged.
pub fn offset_polyline(points: &[Point], distance: f64) -> Vec<Point> {
    if points.len() < 2 || distance == 0.0 {
        return points.to_vec();
    }
    let last = points.len() - 1;
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0] + segment_normal(points[0], points[1]) * distance);
    for i in 1..last {
        out.push(offset_vertex(
            points[i - 1],
            points[i],
            points[i + 1],
            distance,
        ));
    }
    out.push(points[last] + segment_normal(points[last - 1], points[last]) * distance);
    out
}

/// Unit normal of the segment `a -> b`, or zero for a zero-length segment.
fn segment_normal(a: Point, b: Point) -> Vec2 {
    let v = b - a;
    let len = v.hypot();
    if len == 0.0 {
        Vec2::ZERO
    } else {
        Vec2::new(-v.y, v.x) / len
    }
}

/// Mitre join for the interior vertex `p` between segments `prev -> p` and
/// `p -> next`.
fn offset_vertex(prev: Point, p: Point, next: Point, distance: f64) -> Point {
    let n_in = segment_normal(prev, p);
    let n_out = segment_normal(p, next);
    if n_in == Vec2::ZERO || n_out == Vec2::ZERO {
        // A zero-length segment has no normal of its own; borrow the
        // neighbour's so the vertex still moves with the line.
        let n = if n_in == Vec2::ZERO { n_out } else { n_in };
        return p + n * distance;
    }

    // Corner points of both adjacent segments after sideways translation.
    let a0 = prev + n_in * distance;
    let a1 = p + n_in * distance;
    let b0 = p + n_out * distance;
    let b1 = next + n_out * distance;

    let det = (a0.x - a1.x) * (b0.y - b1.y) - (a0.y - a1.y) * (b0.x - b1.x);
    if det.abs() < COLLINEAR_EPS {
        // Parallel translated segments: the intersection is at infinity (or
        // everywhere). A single normal keeps the vertex finite.
        return p + n_in * distance;
    }

    // Line-line intersection in determinant form over the translated corners.
    let c_in = a0.x * a1.y - a0.y * a1.x;
    let c_out = b0.x * b1.y - b0.y * b1.x;
    Point::new(
        (c_in * (b0.x - b1.x) - (a0.x - a1.x) * c_out) / det,
        (c_in * (b0.y - b1.y) - (a0.y - a1.y) * c_out) / det,
    )
}

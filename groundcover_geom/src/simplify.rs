// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polyline simplification: radial-distance pre-pass, then Douglas-Peucker.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::Point;

use crate::dist::point_segment_distance_sq;

/// Reduce the vertex count of a polyline while keeping its shape within
/// `tolerance` (in the same units as the points, typically pixels).
///
/// Two passes, both on squared distances: a cheap radial scan drops runs of
/// near-coincident points, then Douglas-Peucker drops vertices that deviate
/// from the chord through their neighbours by at most `tolerance`. The first
/// and last points are always retained. Inputs with fewer than three points
/// are returned as-is.
pub fn simplify_polyline(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let sq_tolerance = tolerance * tolerance;
    let reduced = reduce_radial(points, sq_tolerance);
    douglas_peucker(&reduced, sq_tolerance)
}

/// Drop points closer than the tolerance radius to the last kept point.
fn reduce_radial(points: &[Point], sq_tolerance: f64) -> Vec<Point> {
    let mut out = vec![points[0]];
    for &p in &points[1..] {
        // `out` is never empty here.
        let kept = out[out.len() - 1];
        if (p - kept).hypot2() > sq_tolerance {
            out.push(p);
        }
    }
    let last = points[points.len() - 1];
    if out[out.len() - 1] != last {
        out.push(last);
    }
    out
}

fn douglas_peucker(points: &[Point], sq_tolerance: f64) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;
    let mut stack = vec![(0_usize, n - 1)];
    while let Some((first, last)) = stack.pop() {
        let mut max_sq = sq_tolerance;
        let mut split = None;
        for i in first + 1..last {
            let sq = point_segment_distance_sq(points[i], points[first], points[last]);
            if sq > max_sq {
                max_sq = sq;
                split = Some(i);
            }
        }
        if let Some(i) = split {
            keep[i] = true;
            stack.push((first, i));
            stack.push((i, last));
        }
    }
    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

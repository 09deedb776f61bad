// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types.

/// Axis-aligned rectangle in screen pixels, y-down.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum x (left)
    pub min_x: f64,
    /// Minimum y (top)
    pub min_y: f64,
    /// Maximum x (right)
    pub max_x: f64,
    /// Maximum y (bottom)
    pub max_y: f64,
}

impl Aabb {
    /// Create a new rectangle from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a rectangle from origin and size.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// A degenerate rectangle covering exactly one point, for point queries.
    pub const fn point(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Whether this rectangle contains the point. Boundaries are inclusive.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Whether this rectangle and `other` overlap, touching edges included.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

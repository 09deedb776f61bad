// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Groundcover Geom: screen-space polyline helpers for canvas feature layers.
//!
//! This crate holds the pure geometry that the render pipeline applies to
//! projected feature coordinates before they become scene items:
//!
//! - [`offset_polyline`]: displace a polyline perpendicular to its local
//!   direction, with mitred joins at interior vertices.
//! - [`simplify_polyline`]: two-pass vertex reduction (radial distance, then
//!   Douglas-Peucker) so dense projected lines draw and hit-test cheaply.
//! - [`point_segment_distance`]: closest distance from a point to a segment,
//!   shared with stroke hit testing.
//!
//! Everything is total over finite input: degenerate polylines (too few
//! points, zero-length segments, collinear joins) are handled locally and
//! never produce NaN or infinite coordinates.
//!
//! # Example
//!
//! ```rust
//! use groundcover_geom::{offset_polyline, simplify_polyline};
//! use kurbo::Point;
//!
//! let line = [Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(10.0, 0.0)];
//! // The interior vertex is collinear and drops out under a 1 px tolerance.
//! assert_eq!(simplify_polyline(&line, 1.0).len(), 2);
//! // Offsetting keeps the vertex count and shifts the line sideways.
//! let shifted = offset_polyline(&line, 2.0);
//! assert_eq!(shifted.len(), 3);
//! assert_eq!(shifted[0], Point::new(0.0, 2.0));
//! ```

#![no_std]

extern crate alloc;

pub mod dist;
pub mod offset;
pub mod simplify;

pub use dist::point_segment_distance;
pub use offset::{COLLINEAR_EPS, offset_polyline};
pub use simplify::simplify_polyline;

// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial backends.
//!
//! - [`linear::LinearScan`]: a flat vector with linear scans. Smallest and
//!   simplest; fine for a handful of surfaces.
//! - [`rtree::RTreeBackend`]: an [`rstar`] R-tree. The default; pays off once
//!   a tiled view registers tens of surfaces.

pub mod linear;
pub mod rtree;

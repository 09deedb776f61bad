// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Groundcover Index: a screen-space rectangle index for rendered canvas
//! surfaces.
//!
//! The render pipeline registers one axis-aligned rectangle per canvas
//! surface (a tile, or the single full-view canvas) and later asks which
//! surfaces lie under a pointer position. The lifetime of the index is
//! coarse: rectangles are only ever inserted between wholesale clears, which
//! happen when the view pans, drags, or changes zoom. There is no per-entry
//! removal and no batched update pass; the backend is synchronized eagerly on
//! every insert.
//!
//! - Insert axis-aligned rectangles with user payloads, receiving
//!   generational [`Key`]s that go stale across clears.
//! - Query by intersecting rectangle or by point (a degenerate rectangle).
//! - Swap the spatial strategy through the [`Backend`] trait: a linear scan
//!   for tiny sets, or the default [`RTreeBackend`] built on [`rstar`].
//!
//! # Example
//!
//! ```rust
//! use groundcover_index::{Aabb, TileIndex};
//!
//! let mut idx: TileIndex<u32> = TileIndex::new();
//! idx.insert(Aabb::from_xywh(0.0, 0.0, 256.0, 256.0), 1);
//! idx.insert(Aabb::from_xywh(256.0, 0.0, 256.0, 256.0), 2);
//!
//! let hits: Vec<_> = idx.query_point(300.0, 40.0).collect();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].1, 2);
//!
//! idx.clear();
//! assert!(idx.is_empty());
//! ```
//!
//! Coordinates are `f64` screen pixels and are assumed to be finite; NaNs are
//! not supported.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::linear::LinearScan;
pub use backends::rtree::RTreeBackend;
pub use index::{Key, TileIndex, TileIndexGeneric};
pub use types::Aabb;

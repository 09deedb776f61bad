// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::Aabb;

/// Spatial backend abstraction used by `TileIndexGeneric`.
///
/// Slots are dense indices assigned by the index; a backend never sees
/// removals of individual slots, only wholesale [`clear`](Backend::clear)s.
pub trait Backend {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, aabb: Aabb);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Query slots whose rectangle intersects the given rectangle.
    fn query_rect<'a>(&'a self, rect: Aabb) -> Box<dyn Iterator<Item = usize> + 'a>;
}

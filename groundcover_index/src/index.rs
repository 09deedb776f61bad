// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `TileIndex` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::rtree::RTreeBackend;
use crate::types::Aabb;

/// Generational handle for entries. Keys issued before a
/// [`clear`](TileIndexGeneric::clear) never resolve afterwards, even when the
/// slot is reoccupied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(u32, u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index keys are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug)]
struct Entry<P> {
    generation: u32,
    aabb: Aabb,
    payload: P,
}

/// A rectangle index parameterized by a spatial backend.
#[derive(Debug)]
pub struct TileIndexGeneric<P: Copy + Debug, B: Backend> {
    entries: Vec<Entry<P>>,
    // One counter per slot, surviving clears so stale keys cannot alias a
    // reoccupied slot.
    generations: Vec<u32>,
    backend: B,
}

impl<P, B> TileIndexGeneric<P, B>
where
    P: Copy + Debug,
    B: Backend + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            backend: B::default(),
        }
    }
}

impl<P: Copy + Debug, B: Backend + Default> Default for TileIndexGeneric<P, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, B> TileIndexGeneric<P, B>
where
    P: Copy + Debug,
    B: Backend,
{
    /// Insert a rectangle with payload. Returns a generational `Key` that
    /// stays valid until the next [`clear`](Self::clear).
    ///
    /// The backend is synchronized eagerly; the entry is queryable right away.
    pub fn insert(&mut self, aabb: Aabb, payload: P) -> Key {
        let slot = self.entries.len();
        let generation = if let Some(g) = self.generations.get_mut(slot) {
            *g += 1;
            *g
        } else {
            self.generations.push(1);
            1
        };
        self.entries.push(Entry {
            generation,
            aabb,
            payload,
        });
        self.backend.insert(slot, aabb);
        Key::new(slot, generation)
    }

    /// Drop all entries. Keys issued so far become stale.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.backend.clear();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no live entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a key to its payload, or `None` if the key is stale.
    pub fn get(&self, key: Key) -> Option<P> {
        let e = self.entries.get(key.idx())?;
        (e.generation == key.1).then_some(e.payload)
    }

    /// The rectangle stored under a key, or `None` if the key is stale.
    pub fn bounds(&self, key: Key) -> Option<Aabb> {
        let e = self.entries.get(key.idx())?;
        (e.generation == key.1).then_some(e.aabb)
    }

    /// Query for entries whose rectangle intersects the given rectangle.
    pub fn search(&self, rect: Aabb) -> impl Iterator<Item = (Key, P)> + '_ {
        let slots = self.backend.query_rect(rect);
        let mut out = Vec::new();
        for i in slots {
            if let Some(e) = self.entries.get(i) {
                out.push((Key::new(i, e.generation), e.payload));
            }
        }
        out.into_iter()
    }

    /// Query for entries whose rectangle contains the point.
    pub fn query_point(&self, x: f64, y: f64) -> impl Iterator<Item = (Key, P)> + '_ {
        self.search(Aabb::point(x, y))
    }
}

/// Default index using the R-tree backend.
pub type TileIndex<P> = TileIndexGeneric<P, RTreeBackend>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::linear::LinearScan;
    use alloc::vec::Vec;

    #[test]
    fn insert_then_query_point_and_rect() {
        let mut idx: TileIndex<u32> = TileIndex::new();
        let k1 = idx.insert(Aabb::from_xywh(0.0, 0.0, 256.0, 256.0), 1);
        let k2 = idx.insert(Aabb::from_xywh(256.0, 0.0, 256.0, 256.0), 2);

        let hits: Vec<_> = idx.query_point(300.0, 40.0).collect();
        assert_eq!(hits, alloc::vec![(k2, 2)]);

        // A rect straddling both tiles hits both.
        let mut hits: Vec<_> = idx
            .search(Aabb::from_xywh(250.0, 10.0, 12.0, 12.0))
            .collect();
        hits.sort_by_key(|(_, p)| *p);
        assert_eq!(hits, alloc::vec![(k1, 1), (k2, 2)]);
    }

    #[test]
    fn clear_empties_queries_and_stales_keys() {
        let mut idx: TileIndex<u32> = TileIndex::new();
        let k = idx.insert(Aabb::from_xywh(0.0, 0.0, 10.0, 10.0), 7);
        idx.clear();

        assert!(idx.is_empty());
        assert_eq!(idx.query_point(5.0, 5.0).count(), 0);
        assert_eq!(idx.get(k), None);
    }

    #[test]
    fn stale_key_does_not_alias_reoccupied_slot() {
        let mut idx: TileIndex<u32> = TileIndex::new();
        let old = idx.insert(Aabb::from_xywh(0.0, 0.0, 10.0, 10.0), 1);
        idx.clear();
        let new = idx.insert(Aabb::from_xywh(0.0, 0.0, 10.0, 10.0), 2);

        assert_ne!(old, new);
        assert_eq!(idx.get(old), None);
        assert_eq!(idx.get(new), Some(2));
    }

    #[test]
    fn degenerate_point_entry_is_hit_exactly() {
        let mut idx: TileIndex<u32> = TileIndex::new();
        idx.insert(Aabb::point(5.0, 5.0), 1);
        assert_eq!(idx.query_point(5.0, 5.0).count(), 1);
        assert_eq!(idx.query_point(5.1, 5.0).count(), 0);
    }

    #[test]
    fn linear_and_rtree_backends_agree() {
        let rects = [
            Aabb::from_xywh(0.0, 0.0, 100.0, 100.0),
            Aabb::from_xywh(50.0, 50.0, 100.0, 100.0),
            Aabb::from_xywh(300.0, 300.0, 10.0, 10.0),
            Aabb::point(75.0, 75.0),
        ];
        let mut linear: TileIndexGeneric<u32, LinearScan> = TileIndexGeneric::new();
        let mut rtree: TileIndex<u32> = TileIndex::new();
        for (i, r) in (0_u32..).zip(rects.iter()) {
            linear.insert(*r, i);
            rtree.insert(*r, i);
        }
        for (x, y) in [(75.0, 75.0), (10.0, 10.0), (305.0, 305.0), (200.0, 200.0)] {
            let mut a: Vec<u32> = linear.query_point(x, y).map(|(_, p)| p).collect();
            let mut b: Vec<u32> = rtree.query_point(x, y).map(|(_, p)| p).collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b, "backends disagree at ({x}, {y})");
        }
    }

    #[test]
    fn bounds_resolves_live_keys_only() {
        let mut idx: TileIndex<u32> = TileIndex::new();
        let r = Aabb::from_xywh(1.0, 2.0, 3.0, 4.0);
        let k = idx.insert(r, 9);
        assert_eq!(idx.bounds(k), Some(r));
        idx.clear();
        assert_eq!(idx.bounds(k), None);
    }
}

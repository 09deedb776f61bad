// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree backend built on [`rstar`].

use alloc::boxed::Box;
use core::fmt::Debug;

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

use crate::backend::Backend;
use crate::types::Aabb;

type Leaf = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// R-tree backend. The default spatial strategy.
#[derive(Default)]
pub struct RTreeBackend {
    tree: RTree<Leaf>,
}

impl Debug for RTreeBackend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTreeBackend")
            .field("size", &self.tree.size())
            .finish_non_exhaustive()
    }
}

impl Backend for RTreeBackend {
    fn insert(&mut self, slot: usize, aabb: Aabb) {
        let rect = Rectangle::from_corners([aabb.min_x, aabb.min_y], [aabb.max_x, aabb.max_y]);
        self.tree.insert(Leaf::new(rect, slot));
    }

    fn clear(&mut self) {
        self.tree = RTree::new();
    }

    fn query_rect<'a>(&'a self, rect: Aabb) -> Box<dyn Iterator<Item = usize> + 'a> {
        let envelope = AABB::from_corners([rect.min_x, rect.min_y], [rect.max_x, rect.max_y]);
        Box::new(
            self.tree
                .locate_in_envelope_intersecting(&envelope)
                .map(|leaf| leaf.data),
        )
    }
}

// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb;

/// Flat vector backend with linear scans. Small and simple; good for tiny sets.
#[derive(Default)]
pub struct LinearScan {
    entries: Vec<Option<Aabb>>,
}

impl Debug for LinearScan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.entries.len();
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("LinearScan")
            .field("total_slots", &total)
            .field("alive", &alive)
            .finish_non_exhaustive()
    }
}

impl Backend for LinearScan {
    fn insert(&mut self, slot: usize, aabb: Aabb) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.entries[slot] = Some(aabb);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn query_rect<'a>(&'a self, rect: Aabb) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        for (i, slot) in self.entries.iter().enumerate() {
            if let Some(a) = slot.as_ref()
                && a.intersects(&rect)
            {
                out.push(i);
            }
        }
        Box::new(out.into_iter())
    }
}

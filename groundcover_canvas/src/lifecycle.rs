// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport lifecycle: event kinds, listener bookkeeping, and the actions a
//! host applies after an event is handled.

use std::collections::BTreeSet;

use crate::context::CtxId;

/// Viewport event kinds a renderer listens to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// Pointer click.
    Click,
    /// Pointer move.
    MouseMove,
    /// Drag started.
    DragStart,
    /// Drag ended.
    DragEnd,
    /// View finished moving (pan or drag settled).
    MoveEnd,
    /// Zoom animation started.
    ZoomStart,
    /// Zoom animation ended.
    ZoomEnd,
}

/// A viewport event delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewportEvent {
    /// Zoom animation started.
    ZoomStart,
    /// Zoom animation ended at a new zoom level.
    ZoomEnd,
    /// Drag started.
    DragStart,
    /// Drag ended.
    DragEnd,
    /// View finished moving.
    MoveEnd,
}

/// An action the host must apply after a lifecycle event was handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Re-render the given context; emitted after a drag ends when renders
    /// were suppressed during the drag.
    RenderRequested(CtxId),
}

/// Tracks which viewport listeners are attached, keyed by event kind and an
/// optional owning context.
///
/// Renderer-wide listeners (click, move, drag start, move end) carry no
/// context; per-context listeners (zoom start/end, drag end) carry the
/// context they were registered for. Tracking them explicitly makes teardown
/// symmetric: [`clear`](Self::clear) detaches everything, and a listener that
/// was never attached makes its event a no-op.
#[derive(Clone, Debug, Default)]
pub struct ListenerTable {
    entries: BTreeSet<(EventKind, Option<CtxId>)>,
}

impl ListenerTable {
    /// Attach a listener. Idempotent.
    pub(crate) fn attach(&mut self, kind: EventKind, ctx: Option<CtxId>) {
        self.entries.insert((kind, ctx));
    }

    /// Detach a listener. Detaching an absent listener is a no-op.
    pub(crate) fn detach(&mut self, kind: EventKind, ctx: Option<CtxId>) {
        self.entries.remove(&(kind, ctx));
    }

    /// Whether the exact listener is attached.
    pub fn is_attached(&self, kind: EventKind, ctx: Option<CtxId>) -> bool {
        self.entries.contains(&(kind, ctx))
    }

    /// Whether any listener of this kind is attached, for any owner.
    pub fn any(&self, kind: EventKind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    /// Detach everything.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listeners are attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render context: one canvas surface plus its rendering state.

use groundcover_index::Aabb;
use kurbo::Point;

use crate::viewport::Viewport;

/// Identity of a render context, assigned by the host when it creates the
/// canvas surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CtxId(pub u32);

/// Tile coordinate of a tiled canvas surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileCoord {
    /// Column, growing east.
    pub x: i64,
    /// Row, growing south.
    pub y: i64,
}

impl TileCoord {
    /// Top-left corner of this tile in zoom pixels, for square tiles of
    /// `tile_size` pixels.
    pub fn pixel_origin(&self, tile_size: f64) -> Point {
        Point::new(self.x as f64 * tile_size, self.y as f64 * tile_size)
    }
}

/// Binds one canvas surface to one rendering session.
///
/// Created once per canvas by the host and reused across re-renders until
/// the canvas is destroyed. All rendering state lives here explicitly; no
/// hidden fields on foreign objects.
#[derive(Copy, Clone, Debug)]
pub struct RenderContext {
    /// Context identity.
    pub id: CtxId,
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Tile coordinate for a tiled surface; `None` for a single full-view
    /// canvas.
    pub tile: Option<TileCoord>,
    pub(crate) initialized: bool,
    pub(crate) origin: Point,
}

impl RenderContext {
    /// Create a context for a single (untiled) canvas surface.
    pub fn new(id: CtxId, width: f64, height: f64) -> Self {
        Self {
            id,
            width,
            height,
            tile: None,
            initialized: false,
            origin: Point::ZERO,
        }
    }

    /// Create a context for a tiled canvas surface. The tile edge length is
    /// the canvas width.
    pub fn tiled(id: CtxId, width: f64, height: f64, tile: TileCoord) -> Self {
        Self {
            id,
            width,
            height,
            tile: Some(tile),
            initialized: false,
            origin: Point::ZERO,
        }
    }

    /// Whether the first render has initialized this context. A zoom start
    /// resets this, forcing a full rebuild on the next render.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Screen-space translation origin established by the last render, in
    /// zoom pixels.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The origin this context renders at right now: the tile's pixel origin
    /// for a tiled surface, the viewport's top-left for a single canvas.
    pub(crate) fn current_origin<V: Viewport>(&self, viewport: &V) -> Point {
        match self.tile {
            Some(tile) => tile.pixel_origin(self.width),
            None => viewport.pixel_origin(),
        }
    }

    /// Bounding box of this canvas surface in container space (pixels from
    /// the viewport's top-left corner).
    pub(crate) fn screen_bounds<V: Viewport>(&self, viewport: &V) -> Aabb {
        let top_left = self.current_origin(viewport) - viewport.pixel_origin().to_vec2();
        Aabb::from_xywh(top_left.x, top_left.y, self.width, self.height)
    }
}

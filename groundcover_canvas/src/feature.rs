// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feature data model: geographic geometry plus render-cache annotations.

use std::collections::BTreeMap;
use std::rc::Rc;

use kurbo::Point;

use crate::scene::SceneItem;
use crate::style::StyleResult;

/// A geographic position, degrees, longitude first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LngLat {
    /// Longitude in degrees, positive east.
    pub lng: f64,
    /// Latitude in degrees, positive north.
    pub lat: f64,
}

impl LngLat {
    /// Create a position from longitude and latitude in degrees.
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Closed set of supported geometry types, exhaustively matched by the render
/// pipeline.
///
/// Coordinate sequences follow GeoJSON conventions: polygon rings list the
/// exterior ring first and repeat the first position at the end.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A single position.
    Point(LngLat),
    /// Multiple positions.
    MultiPoint(Vec<LngLat>),
    /// An open sequence of positions.
    LineString(Vec<LngLat>),
    /// Multiple open sequences.
    MultiLineString(Vec<Vec<LngLat>>),
    /// Rings, exterior first.
    Polygon(Vec<Vec<LngLat>>),
    /// Multiple polygons.
    MultiPolygon(Vec<Vec<Vec<LngLat>>>),
}

impl Geometry {
    /// The coordinate sequence the pipeline renders for line and polygon
    /// variants: the first line of a multi-line, the exterior ring of the
    /// first polygon. `None` when the sequence is absent.
    pub(crate) fn primary_path(&self) -> Option<&[LngLat]> {
        match self {
            Self::Point(_) | Self::MultiPoint(_) => None,
            Self::LineString(line) => Some(line),
            Self::MultiLineString(lines) => lines.first().map(Vec::as_slice),
            Self::Polygon(rings) => rings.first().map(Vec::as_slice),
            Self::MultiPolygon(polys) => polys
                .first()
                .and_then(|rings| rings.first())
                .map(Vec::as_slice),
        }
    }

    /// The position a point-like variant renders at. `None` for an empty
    /// multi-point or a non-point variant.
    pub(crate) fn primary_position(&self) -> Option<LngLat> {
        match self {
            Self::Point(p) => Some(*p),
            Self::MultiPoint(ps) => ps.first().copied(),
            _ => None,
        }
    }
}

/// Stable feature identity, assigned by the feature source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub u64);

/// Lazily invalidated per-feature render state.
///
/// `clean` is the sole guard against showing stale scene items after a zoom
/// change: marking dirty drops the cached style, scene item, and projected
/// point together.
#[derive(Clone, Debug, Default)]
pub struct RenderCache {
    pub(crate) clean: bool,
    pub(crate) style: Option<StyleResult>,
    pub(crate) item: Option<Rc<SceneItem>>,
    pub(crate) projected: Option<Point>,
}

impl RenderCache {
    fn invalidate(&mut self) {
        self.clean = false;
        self.style = None;
        self.item = None;
        self.projected = None;
    }
}

/// One geographic map entity with properties and render-cache annotations.
///
/// The feature source owns these; the render pipeline only reads the geometry
/// and annotates the cache fields.
#[derive(Clone, Debug)]
pub struct Feature {
    /// Identity used for hit-test back-references and interaction results.
    pub id: FeatureId,
    /// Geographic geometry.
    pub geometry: Geometry,
    /// Arbitrary key/value properties, available to the styling collaborator.
    pub properties: BTreeMap<String, String>,
    /// Whether the feature is currently selected.
    pub selected: bool,
    pub(crate) cache: RenderCache,
}

impl Feature {
    /// Create a feature with empty properties.
    pub fn new(id: FeatureId, geometry: Geometry) -> Self {
        Self {
            id,
            geometry,
            properties: BTreeMap::new(),
            selected: false,
            cache: RenderCache::default(),
        }
    }

    /// Create a feature with the given properties.
    pub fn with_properties(
        id: FeatureId,
        geometry: Geometry,
        properties: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id,
            geometry,
            properties,
            selected: false,
            cache: RenderCache::default(),
        }
    }

    /// Whether the cached style and scene item are valid for the current
    /// zoom.
    pub fn is_clean(&self) -> bool {
        self.cache.clean
    }

    /// Invalidate the cached style, scene item, and projected coordinate.
    /// The next render resolves and rebuilds them.
    pub fn mark_dirty(&mut self) {
        self.cache.invalidate();
    }

    /// The scene item produced by the last render, if still valid.
    pub fn cached_item(&self) -> Option<&Rc<SceneItem>> {
        self.cache.item.as_ref()
    }
}

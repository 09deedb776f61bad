// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the crate's tests.

use std::cell::Cell;

use kurbo::Vec2;

use crate::feature::{Feature, FeatureId, Geometry, LngLat};
use crate::style::{Label, LabelStyle, Popup, StyleResult, Styler};

/// Styler driven by feature properties, counting `apply_style` invocations.
///
/// Recognized properties: `z` (z-index), `offset` (line offset), `hidden`
/// (visibility off), `label`, and `popup`.
#[derive(Debug, Default)]
pub(crate) struct TestStyler {
    calls: Cell<usize>,
}

impl TestStyler {
    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Styler for TestStyler {
    fn apply_style(&self, feature: &Feature, _zoom: f64) -> StyleResult {
        self.calls.set(self.calls.get() + 1);
        let mut style = StyleResult::default();
        if let Some(z) = feature.properties.get("z") {
            style.z_index = z.parse().unwrap_or(0.0);
        }
        if let Some(offset) = feature.properties.get("offset") {
            style.offset = offset.parse().unwrap_or(0.0);
        }
        if feature.properties.contains_key("hidden") {
            style.visible = false;
        }
        style
    }

    fn label(&self, feature: &Feature, _zoom: f64) -> Option<Label> {
        feature.properties.get("label").map(|content| Label {
            content: content.clone(),
            style: LabelStyle::default(),
        })
    }

    fn popup(&self, feature: &Feature, _zoom: f64) -> Option<Popup> {
        feature.properties.get("popup").map(|content| Popup {
            content: content.clone(),
            offset: Vec2::ZERO,
        })
    }
}

/// A point feature at lng/lat (0, 0) with the given properties.
pub(crate) fn feature_with(id: u64, props: &[(&str, &str)]) -> Feature {
    let mut f = point_feature(id, 0.0, 0.0);
    for (k, v) in props {
        f.properties.insert((*k).to_owned(), (*v).to_owned());
    }
    f
}

pub(crate) fn point_feature(id: u64, lng: f64, lat: f64) -> Feature {
    Feature::new(FeatureId(id), Geometry::Point(LngLat::new(lng, lat)))
}

pub(crate) fn line_feature(id: u64, coords: &[(f64, f64)], props: &[(&str, &str)]) -> Feature {
    let line = coords
        .iter()
        .map(|&(lng, lat)| LngLat::new(lng, lat))
        .collect();
    let mut f = Feature::new(FeatureId(id), Geometry::LineString(line));
    for (k, v) in props {
        f.properties.insert((*k).to_owned(), (*v).to_owned());
    }
    f
}

pub(crate) fn polygon_feature(id: u64, ring: &[(f64, f64)]) -> Feature {
    let ring = ring
        .iter()
        .map(|&(lng, lat)| LngLat::new(lng, lat))
        .collect();
    Feature::new(FeatureId(id), Geometry::Polygon(vec![ring]))
}

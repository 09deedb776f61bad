// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoJSON ingestion. Requires the `geojson` cargo feature.

use std::collections::BTreeMap;

use geojson::feature::Id;
use geojson::{FeatureCollection, Value};

use crate::feature::{Feature, FeatureId, Geometry, LngLat};

/// Convert a GeoJSON feature collection into renderable features.
///
/// Features without geometry, with malformed positions, or with an
/// unsupported geometry type (`GeometryCollection`) are skipped. Identities
/// come from numeric GeoJSON ids when present, otherwise from the feature's
/// position in the collection. Property values are stringified: strings pass
/// through, everything else keeps its JSON rendering.
pub fn features_from_geojson(collection: &FeatureCollection) -> Vec<Feature> {
    collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(index, gf)| {
            let geometry = convert_geometry(&gf.geometry.as_ref()?.value)?;
            let mut properties = BTreeMap::new();
            if let Some(props) = &gf.properties {
                for (key, value) in props {
                    properties.insert(key.clone(), stringify(value));
                }
            }
            Some(Feature::with_properties(
                feature_id(gf, index),
                geometry,
                properties,
            ))
        })
        .collect()
}

fn feature_id(gf: &geojson::Feature, index: usize) -> FeatureId {
    if let Some(Id::Number(n)) = &gf.id
        && let Some(id) = n.as_u64()
    {
        return FeatureId(id);
    }
    FeatureId(index as u64)
}

fn convert_geometry(value: &Value) -> Option<Geometry> {
    Some(match value {
        Value::Point(p) => Geometry::Point(position(p)?),
        Value::MultiPoint(ps) => Geometry::MultiPoint(positions(ps)?),
        Value::LineString(ps) => Geometry::LineString(positions(ps)?),
        Value::MultiLineString(lines) => {
            Geometry::MultiLineString(lines.iter().map(|l| positions(l)).collect::<Option<_>>()?)
        }
        Value::Polygon(rings) => {
            Geometry::Polygon(rings.iter().map(|r| positions(r)).collect::<Option<_>>()?)
        }
        Value::MultiPolygon(polygons) => Geometry::MultiPolygon(
            polygons
                .iter()
                .map(|rings| rings.iter().map(|r| positions(r)).collect::<Option<_>>())
                .collect::<Option<_>>()?,
        ),
        Value::GeometryCollection(_) => return None,
    })
}

fn position(p: &[f64]) -> Option<LngLat> {
    Some(LngLat::new(*p.first()?, *p.get(1)?))
}

fn positions(ps: &[Vec<f64>]) -> Option<Vec<LngLat>> {
    ps.iter().map(|p| position(p)).collect()
}

fn stringify(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

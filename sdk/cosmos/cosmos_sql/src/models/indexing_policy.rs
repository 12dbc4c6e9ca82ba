// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The indexing policy of a container.
///
/// Collections default to empty and are omitted from the request body when empty.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexingPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatic: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_mode: Option<IndexingMode>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_paths: Vec<PropertyPath>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_paths: Vec<PropertyPath>,

    /// Each inner list is one composite index, in property order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub composite_indexes: Vec<Vec<CompositeIndexProperty>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spatial_indexes: Vec<SpatialIndex>,

    /// Policy settings without a field here. Kept so a read-modify-replace doesn't drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndexingMode {
    Consistent,
    Lazy,
    None,
}

/// A path in an included or excluded path list, such as `/*` or `/miscellaneous/rating/?`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PropertyPath {
    pub path: String,
}

impl PropertyPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CompositeIndexProperty {
    pub path: String,
    #[serde(default)]
    pub order: CompositeIndexOrder,
}

impl CompositeIndexProperty {
    pub fn ascending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            order: CompositeIndexOrder::Ascending,
        }
    }

    pub fn descending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            order: CompositeIndexOrder::Descending,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompositeIndexOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SpatialIndex {
    pub path: String,
    pub types: Vec<SpatialType>,
}

impl SpatialIndex {
    pub fn new(path: impl Into<String>, types: impl IntoIterator<Item = SpatialType>) -> Self {
        Self {
            path: path.into(),
            types: types.into_iter().collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum SpatialType {
    Point,
    Polygon,
    LineString,
    MultiPolygon,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn excluded_paths_policy() {
        let policy = IndexingPolicy {
            included_paths: vec![
                PropertyPath::new("/*"),
                PropertyPath::new("/miscellaneous/rating/?"),
            ],
            excluded_paths: vec![PropertyPath::new("/miscellaneous/*")],
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&policy).unwrap(),
            json!({
                "includedPaths": [{ "path": "/*" }, { "path": "/miscellaneous/rating/?" }],
                "excludedPaths": [{ "path": "/miscellaneous/*" }],
            })
        );
    }

    #[test]
    fn composite_and_spatial_indexes() {
        let policy = IndexingPolicy {
            composite_indexes: vec![vec![
                CompositeIndexProperty::ascending("/address/location/stateProvinceName"),
                CompositeIndexProperty::descending("/name"),
            ]],
            spatial_indexes: vec![SpatialIndex::new("/geo1/?", [SpatialType::Point])],
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&policy).unwrap(),
            json!({
                "compositeIndexes": [[
                    { "path": "/address/location/stateProvinceName", "order": "ascending" },
                    { "path": "/name", "order": "descending" },
                ]],
                "spatialIndexes": [{ "path": "/geo1/?", "types": ["Point"] }],
            })
        );
    }

    #[test]
    fn service_policy_round_trips_mode() {
        let policy: IndexingPolicy =
            serde_json::from_value(json!({ "indexingMode": "consistent", "automatic": true }))
                .unwrap();
        assert_eq!(policy.indexing_mode, Some(IndexingMode::Consistent));
        assert_eq!(policy.automatic, Some(true));
    }
}

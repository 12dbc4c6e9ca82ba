// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{IndexingPolicy, SystemProperties};

/// Properties of a Cosmos DB container.
///
/// A container can be created from just an id and a partition key path:
///
/// ```rust
/// # use cosmos_sql::models::ContainerProperties;
/// let properties = ContainerProperties::new("Container1", "/state");
/// assert_eq!(properties.partition_key.paths, vec!["/state".to_string()]);
/// ```
#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProperties {
    pub id: String,

    pub partition_key: PartitionKeyDefinition,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_policy: Option<IndexingPolicy>,

    #[serde(flatten)]
    pub system_properties: SystemProperties,

    /// Properties without a field here, such as `defaultTtl` or `uniqueKeyPolicy`.
    ///
    /// They are sent back unchanged by [`ContainerClient::replace`](crate::clients::ContainerClient::replace).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContainerProperties {
    pub fn new(id: impl Into<String>, partition_key_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            partition_key: PartitionKeyDefinition::from(partition_key_path.into()),
            ..Default::default()
        }
    }

    pub fn with_indexing_policy(mut self, indexing_policy: IndexingPolicy) -> Self {
        self.indexing_policy = Some(indexing_policy);
        self
    }

    /// The first partition key path, which is the only one for non-hierarchical keys.
    pub fn partition_key_path(&self) -> Option<&str> {
        self.partition_key.paths.first().map(String::as_str)
    }
}

/// Describes how a container's items are partitioned.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PartitionKeyDefinition {
    pub paths: Vec<String>,

    #[serde(default)]
    pub kind: PartitionKeyKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl Default for PartitionKeyDefinition {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            kind: PartitionKeyKind::Hash,
            version: Some(2),
        }
    }
}

impl From<String> for PartitionKeyDefinition {
    fn from(path: String) -> Self {
        Self {
            paths: vec![path],
            ..Default::default()
        }
    }
}

impl From<&str> for PartitionKeyDefinition {
    fn from(path: &str) -> Self {
        Self::from(path.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum PartitionKeyKind {
    #[default]
    Hash,
    MultiHash,
}

// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Model types sent to and received from the Cosmos DB API.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

mod container_properties;
mod indexing_policy;
mod script_properties;
mod throughput_properties;

pub use container_properties::*;
pub use indexing_policy::*;
pub use script_properties::*;
pub use throughput_properties::*;

/// Properties the service maintains on every resource.
#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SystemProperties {
    #[serde(rename = "_rid", default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    #[serde(rename = "_self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// When the resource was last modified, from the `_ts` property.
    #[serde(
        rename = "_ts",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub last_modified: Option<OffsetDateTime>,
}

/// Properties of a Cosmos DB database.
#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatabaseProperties {
    pub id: String,

    #[serde(flatten)]
    pub system_properties: SystemProperties,
}

impl DatabaseProperties {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn database_properties_from_service() {
        let db: DatabaseProperties = serde_json::from_str(
            r#"{"id":"mydb","_rid":"8jFyAA==","_self":"dbs/8jFyAA==/","_etag":"\"0000e\"","_colls":"colls/","_users":"users/","_ts":1493254272}"#,
        )
        .unwrap();

        assert_eq!(db.id, "mydb");
        assert_eq!(db.system_properties.resource_id.as_deref(), Some("8jFyAA=="));
        assert_eq!(
            db.system_properties.last_modified,
            Some(datetime!(2017-04-27 00:51:12 UTC))
        );
    }

    #[test]
    fn new_database_serializes_only_id() {
        let json = serde_json::to_value(DatabaseProperties::new("mydb")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "mydb" }));
    }
}

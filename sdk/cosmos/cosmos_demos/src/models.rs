// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Document shapes used by the demos.

use serde::{Deserialize, Serialize};

/// A customer document in the store container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Customer {
    pub fn city(&self) -> Option<&str> {
        self.location()?.city.as_deref()
    }

    pub fn state_province_name(&self) -> Option<&str> {
        self.location()?.state_province_name.as_deref()
    }

    fn location(&self) -> Option<&Location> {
        self.address.as_ref()?.location.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_region_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_province_name: Option<String>,
}

/// The projection returned by the UK customers query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerCity {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
}

/// The id and partition key of a document, as projected by the delete queries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentKey {
    pub id: String,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// What `spBulkDelete` hands back: how many documents it removed, and whether it ran out of time before finishing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub count: u32,
    pub continuation_flag: bool,
}

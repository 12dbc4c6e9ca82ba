// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};

use crate::models::SystemProperties;

/// A throughput offer attached to a database or container.
#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputProperties {
    #[serde(default)]
    resource: String,
    #[serde(rename = "content")]
    offer: Offer,
    #[serde(rename = "id")]
    pub(crate) offer_id: String,
    offer_resource_id: String,
    #[serde(default)]
    offer_type: String,
    #[serde(default)]
    offer_version: String,
    #[serde(flatten)]
    pub(crate) system_properties: SystemProperties,
}

impl ThroughputProperties {
    /// The provisioned throughput in RU/s. For autoscale offers this is the maximum throughput.
    pub fn throughput(&self) -> Option<u32> {
        self.offer.offer_throughput.or_else(|| {
            self.offer
                .offer_autopilot_settings
                .as_ref()
                .map(|s| s.max_throughput)
        })
    }

    /// Returns `true` if the offer scales automatically.
    pub fn is_autoscale(&self) -> bool {
        self.offer.offer_autopilot_settings.is_some()
    }

    /// The `_rid` of the database or container this offer belongs to.
    pub fn offer_resource_id(&self) -> &str {
        &self.offer_resource_id
    }
}

#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Offer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_throughput: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_autopilot_settings: Option<AutoscaleSettings>,
}

#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct AutoscaleSettings {
    pub max_throughput: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn manual_offer() {
        let offer: ThroughputProperties = serde_json::from_value(json!({
            "resource": "dbs/8jFyAA==/colls/8jFyAJbQUvs=/",
            "offerType": "Invalid",
            "offerResourceId": "8jFyAJbQUvs=",
            "offerVersion": "V2",
            "content": { "offerThroughput": 400, "offerIsRUPerMinuteThroughputEnabled": false },
            "id": "qmYl",
            "_rid": "qmYl",
            "_self": "offers/qmYl/",
            "_etag": "\"00002\"",
            "_ts": 1493254272
        }))
        .unwrap();

        assert_eq!(offer.throughput(), Some(400));
        assert!(!offer.is_autoscale());
        assert_eq!(offer.offer_resource_id(), "8jFyAJbQUvs=");
        assert_eq!(offer.offer_id, "qmYl");
    }

    #[test]
    fn autoscale_offer() {
        let offer: ThroughputProperties = serde_json::from_value(json!({
            "offerResourceId": "abc",
            "content": { "offerAutopilotSettings": { "maxThroughput": 4000 } },
            "id": "x"
        }))
        .unwrap();

        assert_eq!(offer.throughput(), Some(4000));
        assert!(offer.is_autoscale());
    }
}

// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Header names and values used by the Cosmos DB REST API.

use azure_core::headers::HeaderName;

/// The REST API version every request is pinned to.
pub const API_VERSION: &str = "2018-12-31";

pub const AUTHORIZATION: HeaderName = HeaderName::from_static("authorization");
pub const CONTENT_TYPE: HeaderName = HeaderName::from_static("content-type");
pub const MS_DATE: HeaderName = HeaderName::from_static("x-ms-date");
pub const VERSION: HeaderName = HeaderName::from_static("x-ms-version");

pub const ACTIVITY_ID: HeaderName = HeaderName::from_static("x-ms-activity-id");
pub const CONTINUATION: HeaderName = HeaderName::from_static("x-ms-continuation");
pub const MAX_ITEM_COUNT: HeaderName = HeaderName::from_static("x-ms-max-item-count");
pub const REQUEST_CHARGE: HeaderName = HeaderName::from_static("x-ms-request-charge");
pub const ETAG: HeaderName = HeaderName::from_static("etag");

pub const PARTITION_KEY: HeaderName = HeaderName::from_static("x-ms-documentdb-partitionkey");
pub const QUERY: HeaderName = HeaderName::from_static("x-ms-documentdb-isquery");
pub const QUERY_ENABLE_CROSS_PARTITION: HeaderName =
    HeaderName::from_static("x-ms-documentdb-query-enablecrosspartition");
pub const IS_UPSERT: HeaderName = HeaderName::from_static("x-ms-documentdb-is-upsert");
pub const OFFER_THROUGHPUT: HeaderName = HeaderName::from_static("x-ms-offer-throughput");
pub const PRE_TRIGGER_INCLUDE: HeaderName =
    HeaderName::from_static("x-ms-documentdb-pre-trigger-include");
pub const POST_TRIGGER_INCLUDE: HeaderName =
    HeaderName::from_static("x-ms-documentdb-post-trigger-include");

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_QUERY_JSON: &str = "application/query+json";

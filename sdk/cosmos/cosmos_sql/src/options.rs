// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::{ClientOptions, Request};

use crate::{constants, PartitionKey};

/// Options used when creating a [`CosmosClient`](crate::CosmosClient).
///
/// The transport, retry and telemetry settings live in the wrapped [`ClientOptions`].
#[derive(Clone, Debug, Default)]
pub struct CosmosClientOptions {
    pub client_options: ClientOptions,
}

/// Options to be passed to [`CosmosClient::create_database()`](crate::CosmosClient::create_database()).
#[derive(Clone, Debug, Default)]
pub struct CreateDatabaseOptions {
    /// Dedicated manual throughput for the database, in RU/s.
    pub throughput: Option<u32>,
}

/// Options to be passed to [`DatabaseClient::create_container()`](crate::clients::DatabaseClient::create_container()).
#[derive(Clone, Debug, Default)]
pub struct CreateContainerOptions {
    /// Dedicated manual throughput for the container, in RU/s.
    pub throughput: Option<u32>,
}

impl CreateContainerOptions {
    pub(crate) fn apply(&self, request: &mut Request) {
        if let Some(throughput) = self.throughput {
            request.insert_header(constants::OFFER_THROUGHPUT, throughput.to_string());
        }
    }
}

impl CreateDatabaseOptions {
    pub(crate) fn apply(&self, request: &mut Request) {
        if let Some(throughput) = self.throughput {
            request.insert_header(constants::OFFER_THROUGHPUT, throughput.to_string());
        }
    }
}

/// Options to be passed to the item operations of a [`ContainerClient`](crate::clients::ContainerClient).
#[derive(Clone, Debug, Default)]
pub struct ItemOptions {
    /// Pre-triggers to run before the operation. Triggers only run when named here.
    pub pre_triggers: Vec<String>,

    /// Post-triggers to run after the operation, in the same transaction.
    pub post_triggers: Vec<String>,
}

impl ItemOptions {
    pub(crate) fn apply(&self, request: &mut Request) {
        if !self.pre_triggers.is_empty() {
            request.insert_header(constants::PRE_TRIGGER_INCLUDE, self.pre_triggers.join(","));
        }
        if !self.post_triggers.is_empty() {
            request.insert_header(
                constants::POST_TRIGGER_INCLUDE,
                self.post_triggers.join(","),
            );
        }
    }
}

/// Options to be passed to queries.
#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    /// The maximum number of items per page. The service picks a default when unset.
    pub max_item_count: Option<u32>,

    /// Scope the query to a single logical partition. When unset, the query runs cross-partition.
    pub partition_key: Option<PartitionKey>,

    /// Resume the query from a continuation token returned with an earlier page.
    pub continuation: Option<String>,
}

impl QueryOptions {
    /// These options for the page after `continuation`, or unchanged for the first page.
    pub(crate) fn resume_from(&self, continuation: Option<String>) -> Self {
        Self {
            continuation: continuation.or_else(|| self.continuation.clone()),
            ..self.clone()
        }
    }

    pub(crate) fn apply(&self, request: &mut Request) {
        if let Some(max) = self.max_item_count {
            request.insert_header(constants::MAX_ITEM_COUNT, max.to_string());
        }
        match &self.partition_key {
            Some(pk) => request.insert_header(constants::PARTITION_KEY, pk.to_header_value()),
            None => request.insert_header(constants::QUERY_ENABLE_CROSS_PARTITION, "True"),
        }
        if let Some(continuation) = &self.continuation {
            request.insert_header(constants::CONTINUATION, continuation.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azure_core::{headers::HeaderName, Method};

    fn request() -> Request {
        Request::new("https://localhost/dbs".parse().unwrap(), Method::Post)
    }

    fn header<'a>(request: &'a Request, name: &HeaderName) -> Option<&'a str> {
        request.headers().get_optional_str(name)
    }

    #[test]
    fn cross_partition_when_no_key() {
        let mut req = request();
        QueryOptions::default().apply(&mut req);
        assert_eq!(
            header(&req, &constants::QUERY_ENABLE_CROSS_PARTITION),
            Some("True")
        );
        assert_eq!(header(&req, &constants::PARTITION_KEY), None);
        assert_eq!(header(&req, &constants::CONTINUATION), None);
    }

    #[test]
    fn single_partition_with_continuation() {
        let mut req = request();
        QueryOptions {
            max_item_count: Some(5),
            partition_key: Some("11229".into()),
            continuation: Some("token".into()),
        }
        .apply(&mut req);

        assert_eq!(header(&req, &constants::PARTITION_KEY), Some(r#"["11229"]"#));
        assert_eq!(header(&req, &constants::MAX_ITEM_COUNT), Some("5"));
        assert_eq!(header(&req, &constants::CONTINUATION), Some("token"));
        assert_eq!(header(&req, &constants::QUERY_ENABLE_CROSS_PARTITION), None);
    }

    #[test]
    fn resuming_prefers_the_latest_token() {
        let options = QueryOptions {
            continuation: Some("stored".into()),
            ..Default::default()
        };
        assert_eq!(options.resume_from(None).continuation.as_deref(), Some("stored"));
        assert_eq!(
            options.resume_from(Some("next".into())).continuation.as_deref(),
            Some("next")
        );
    }

    #[test]
    fn triggers_are_joined() {
        let mut req = request();
        ItemOptions {
            pre_triggers: vec!["trgValidateDocument".into()],
            post_triggers: vec!["a".into(), "b".into()],
        }
        .apply(&mut req);

        assert_eq!(
            header(&req, &constants::PRE_TRIGGER_INCLUDE),
            Some("trgValidateDocument")
        );
        assert_eq!(header(&req, &constants::POST_TRIGGER_INCLUDE), Some("a,b"));
    }

    #[test]
    fn throughput_header() {
        let mut req = request();
        CreateContainerOptions {
            throughput: Some(400),
        }
        .apply(&mut req);
        assert_eq!(header(&req, &constants::OFFER_THROUGHPUT), Some("400"));
    }
}

// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::{Method, Request, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::clients::ScriptsClient;
use crate::models::{ContainerProperties, ThroughputProperties};
use crate::pipeline::{set_json_body, CosmosPipeline};
use crate::{
    constants, CosmosClient, FeedPage, FeedPager, ItemOptions, PartitionKey, Query, QueryOptions,
    RawFeedPage, RawFeedPager, ResourceLink, ResourceType, ResponseExt,
};

#[cfg(doc)]
use crate::clients::DatabaseClient;

/// A client for working with a specific container in a Cosmos DB account.
///
/// You can get a `ContainerClient` by calling [`DatabaseClient::container_client()`].
#[derive(Debug, Clone)]
pub struct ContainerClient {
    database_id: String,
    container_id: String,
    link: ResourceLink,
    items_link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl ContainerClient {
    pub(crate) fn new(
        pipeline: CosmosPipeline,
        database_link: &ResourceLink,
        database_id: &str,
        container_id: &str,
    ) -> Self {
        let link = database_link
            .feed(ResourceType::Containers)
            .item(container_id);
        let items_link = link.feed(ResourceType::Items);

        Self {
            database_id: database_id.to_string(),
            container_id: container_id.to_string(),
            link,
            items_link,
            pipeline,
        }
    }

    pub fn id(&self) -> &str {
        &self.container_id
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Gets a [`ScriptsClient`] for the stored procedures, triggers and user-defined functions of this container.
    pub fn scripts(&self) -> ScriptsClient {
        ScriptsClient::new(self.pipeline.clone(), &self.link)
    }

    /// Reads the properties of the container. The response body deserializes into [`ContainerProperties`].
    pub async fn read(&self) -> azure_core::Result<Response> {
        let mut request = self.pipeline.request(&self.link, Method::Get);
        self.pipeline.send(&mut request, &self.link).await
    }

    /// Replaces the container's properties, which is how its indexing policy is changed.
    ///
    /// The id and partition key of a container cannot change.
    pub async fn replace(&self, properties: &ContainerProperties) -> azure_core::Result<Response> {
        let mut request = self.pipeline.request(&self.link, Method::Put);
        set_json_body(&mut request, properties)?;
        self.pipeline.send(&mut request, &self.link).await
    }

    /// Deletes the container and all of its items.
    pub async fn delete(&self) -> azure_core::Result<Response> {
        let mut request = self.pipeline.request(&self.link, Method::Delete);
        self.pipeline.send(&mut request, &self.link).await
    }

    /// Reads the container's dedicated throughput offer.
    ///
    /// Returns `None` for containers that share their database's throughput.
    pub async fn read_throughput(&self) -> azure_core::Result<Option<ThroughputProperties>> {
        let properties: ContainerProperties = self.read().await?.deserialize_body().await?;
        let Some(rid) = properties.system_properties.resource_id else {
            return Ok(None);
        };
        self.account_client().read_offer_for(&rid).await
    }

    /// Creates a new item in the container. The response body is the item as stored.
    ///
    /// # Arguments
    /// * `partition_key` - The partition key of the new item, which must match the value at the container's partition key path.
    /// * `item` - The item to create. Anything that serializes to a JSON object with an `id` works.
    /// * `options` - Optional parameters for the request, such as triggers to run.
    pub async fn create_item<T: Serialize>(
        &self,
        partition_key: impl Into<PartitionKey>,
        item: T,
        options: Option<ItemOptions>,
    ) -> azure_core::Result<Response> {
        let mut request = self.item_request(&self.items_link, Method::Post, partition_key, options);
        set_json_body(&mut request, &item)?;
        self.pipeline.send(&mut request, &self.items_link).await
    }

    /// Creates an item, or replaces the existing item with the same id.
    pub async fn upsert_item<T: Serialize>(
        &self,
        partition_key: impl Into<PartitionKey>,
        item: T,
        options: Option<ItemOptions>,
    ) -> azure_core::Result<Response> {
        let mut request = self.item_request(&self.items_link, Method::Post, partition_key, options);
        request.insert_header(constants::IS_UPSERT, "True");
        set_json_body(&mut request, &item)?;
        self.pipeline.send(&mut request, &self.items_link).await
    }

    /// Replaces an existing item.
    pub async fn replace_item<T: Serialize>(
        &self,
        partition_key: impl Into<PartitionKey>,
        item_id: &str,
        item: T,
        options: Option<ItemOptions>,
    ) -> azure_core::Result<Response> {
        let link = self.items_link.item(item_id);
        let mut request = self.item_request(&link, Method::Put, partition_key, options);
        set_json_body(&mut request, &item)?;
        self.pipeline.send(&mut request, &link).await
    }

    /// Reads a single item by id.
    pub async fn read_item(
        &self,
        partition_key: impl Into<PartitionKey>,
        item_id: &str,
        options: Option<ItemOptions>,
    ) -> azure_core::Result<Response> {
        let link = self.items_link.item(item_id);
        let mut request = self.item_request(&link, Method::Get, partition_key, options);
        self.pipeline.send(&mut request, &link).await
    }

    /// Deletes a single item by id.
    pub async fn delete_item(
        &self,
        partition_key: impl Into<PartitionKey>,
        item_id: &str,
        options: Option<ItemOptions>,
    ) -> azure_core::Result<Response> {
        let link = self.items_link.item(item_id);
        let mut request = self.item_request(&link, Method::Delete, partition_key, options);
        self.pipeline.send(&mut request, &link).await
    }

    /// Executes a query against the items in the container, following continuation tokens as the pager is polled.
    ///
    /// ```rust,no_run
    /// # async fn doc(container: cosmos_sql::clients::ContainerClient) -> azure_core::Result<()> {
    /// use futures::TryStreamExt;
    ///
    /// let mut pager = container.query_items::<serde_json::Value>("SELECT * FROM c", None);
    /// while let Some(page) = pager.try_next().await? {
    ///     println!("{} items", page.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn query_items<T>(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> FeedPager<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.pipeline.query_pager(
            query.into(),
            self.items_link.clone(),
            options.unwrap_or_default(),
        )
    }

    /// Fetches a single page of query results.
    ///
    /// Pass the page's continuation token back in [`QueryOptions::continuation`] to get the next page.
    /// Nothing is kept between calls, so the token can be stored and used later.
    pub async fn query_items_page<T: DeserializeOwned>(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> azure_core::Result<FeedPage<T>> {
        let response = self
            .pipeline
            .send_query(&query.into(), &self.items_link, &options.unwrap_or_default())
            .await?;
        FeedPage::try_from_response(response).await
    }

    /// Like [`query_items`](Self::query_items), but yields each page's raw JSON.
    pub fn query_items_stream(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> RawFeedPager {
        self.pipeline.raw_query_pager(
            query.into(),
            self.items_link.clone(),
            options.unwrap_or_default(),
        )
    }

    /// Like [`query_items_page`](Self::query_items_page), but returns the page's raw JSON.
    pub async fn query_items_stream_page(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> azure_core::Result<RawFeedPage> {
        let response = self
            .pipeline
            .send_query(&query.into(), &self.items_link, &options.unwrap_or_default())
            .await?;
        RawFeedPage::try_from_response(response).await
    }

    fn item_request(
        &self,
        link: &ResourceLink,
        method: Method,
        partition_key: impl Into<PartitionKey>,
        options: Option<ItemOptions>,
    ) -> Request {
        let mut request = self.pipeline.request(link, method);
        request.insert_header(constants::PARTITION_KEY, partition_key.into().to_header_value());
        if let Some(options) = options {
            options.apply(&mut request);
        }
        request
    }

    fn account_client(&self) -> CosmosClient {
        CosmosClient::from_pipeline(self.pipeline.clone())
    }
}

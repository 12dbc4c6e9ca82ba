// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::{Method, Response};

use crate::clients::ContainerClient;
use crate::models::ContainerProperties;
use crate::pipeline::{set_json_body, CosmosPipeline};
use crate::{
    CreateContainerOptions, ErrorExt, FeedPager, Query, QueryOptions, ResourceLink, ResourceType,
};

/// A client for working with a specific database in a Cosmos DB account.
///
/// You can get a `DatabaseClient` by calling [`CosmosClient::database_client()`](crate::CosmosClient::database_client()).
#[derive(Debug, Clone)]
pub struct DatabaseClient {
    database_id: String,
    link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl DatabaseClient {
    pub(crate) fn new(pipeline: CosmosPipeline, databases_link: &ResourceLink, database_id: &str) -> Self {
        Self {
            database_id: database_id.to_string(),
            link: databases_link.item(database_id),
            pipeline,
        }
    }

    /// Returns the identifier of the Cosmos database.
    pub fn id(&self) -> &str {
        &self.database_id
    }

    /// Gets a [`ContainerClient`] that can be used to access the container with the specified name.
    pub fn container_client(&self, name: &str) -> ContainerClient {
        ContainerClient::new(self.pipeline.clone(), &self.link, &self.database_id, name)
    }

    /// Reads the properties of the database, which the response body deserializes into.
    pub async fn read(&self) -> azure_core::Result<Response> {
        let mut request = self.pipeline.request(&self.link, Method::Get);
        self.pipeline.send(&mut request, &self.link).await
    }

    /// Deletes the database, along with all of its containers and items.
    pub async fn delete(&self) -> azure_core::Result<Response> {
        let mut request = self.pipeline.request(&self.link, Method::Delete);
        self.pipeline.send(&mut request, &self.link).await
    }

    /// Creates a new container.
    ///
    /// # Arguments
    /// * `properties` - The id, partition key and (optionally) indexing policy of the new container.
    /// * `options` - Optional parameters for the request, such as dedicated throughput.
    pub async fn create_container(
        &self,
        properties: ContainerProperties,
        options: Option<CreateContainerOptions>,
    ) -> azure_core::Result<Response> {
        let link = self.link.feed(ResourceType::Containers);
        let mut request = self.pipeline.request(&link, Method::Post);
        options.unwrap_or_default().apply(&mut request);
        set_json_body(&mut request, &properties)?;

        self.pipeline.send(&mut request, &link).await
    }

    /// Creates a container, or reads the existing one with the same id.
    ///
    /// An existing container is returned as-is; its partition key and indexing policy are not compared.
    pub async fn create_container_if_not_exists(
        &self,
        properties: ContainerProperties,
        options: Option<CreateContainerOptions>,
    ) -> azure_core::Result<Response> {
        let id = properties.id.clone();
        match self.create_container(properties, options).await {
            Err(e) if e.is_conflict() => self.container_client(&id).read().await,
            result => result,
        }
    }

    /// Executes a query against the containers in the database.
    pub fn query_containers(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> FeedPager<ContainerProperties> {
        self.pipeline.query_pager(
            query.into(),
            self.link.feed(ResourceType::Containers),
            options.unwrap_or_default(),
        )
    }
}

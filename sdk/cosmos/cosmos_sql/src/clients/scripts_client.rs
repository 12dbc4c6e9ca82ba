// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::{Method, Response};
use serde::Serialize;

use crate::models::{StoredProcedureProperties, TriggerProperties, UserDefinedFunctionProperties};
use crate::pipeline::{set_json_body, CosmosPipeline};
use crate::{constants, FeedPager, PartitionKey, Query, QueryOptions, ResourceLink, ResourceType};

/// A client for the server-side JavaScript of a container: stored procedures, triggers and user-defined functions.
///
/// You can get a `ScriptsClient` by calling [`ContainerClient::scripts()`](crate::clients::ContainerClient::scripts()).
#[derive(Debug, Clone)]
pub struct ScriptsClient {
    container_link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl ScriptsClient {
    pub(crate) fn new(pipeline: CosmosPipeline, container_link: &ResourceLink) -> Self {
        Self {
            container_link: container_link.clone(),
            pipeline,
        }
    }

    fn feed(&self, resource_type: ResourceType) -> ResourceLink {
        self.container_link.feed(resource_type)
    }

    async fn create<T: Serialize>(
        &self,
        resource_type: ResourceType,
        properties: &T,
    ) -> azure_core::Result<Response> {
        let link = self.feed(resource_type);
        let mut request = self.pipeline.request(&link, Method::Post);
        set_json_body(&mut request, properties)?;
        self.pipeline.send(&mut request, &link).await
    }

    async fn delete(&self, resource_type: ResourceType, id: &str) -> azure_core::Result<Response> {
        let link = self.feed(resource_type).item(id);
        let mut request = self.pipeline.request(&link, Method::Delete);
        self.pipeline.send(&mut request, &link).await
    }

    /// Registers a stored procedure.
    pub async fn create_stored_procedure(
        &self,
        properties: &StoredProcedureProperties,
    ) -> azure_core::Result<Response> {
        self.create(ResourceType::StoredProcedures, properties).await
    }

    pub fn query_stored_procedures(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> FeedPager<StoredProcedureProperties> {
        self.pipeline.query_pager(
            query.into(),
            self.feed(ResourceType::StoredProcedures),
            options.unwrap_or_default(),
        )
    }

    pub async fn delete_stored_procedure(&self, id: &str) -> azure_core::Result<Response> {
        self.delete(ResourceType::StoredProcedures, id).await
    }

    /// Executes a stored procedure inside the given logical partition.
    ///
    /// `parameters` are passed positionally to the JavaScript function.
    /// Whatever the procedure hands to `setBody` comes back as the response body.
    ///
    /// ```rust,no_run
    /// # async fn doc(container: cosmos_sql::clients::ContainerClient) -> azure_core::Result<()> {
    /// use cosmos_sql::ResponseExt;
    ///
    /// let greeting: String = container
    ///     .scripts()
    ///     .execute_stored_procedure("spHelloWorld", cosmos_sql::PartitionKey::undefined(), &[])
    ///     .await?
    ///     .deserialize_body()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute_stored_procedure(
        &self,
        id: &str,
        partition_key: impl Into<PartitionKey>,
        parameters: &[serde_json::Value],
    ) -> azure_core::Result<Response> {
        let link = self.feed(ResourceType::StoredProcedures).item(id);
        let mut request = self.pipeline.request(&link, Method::Post);
        request.insert_header(constants::PARTITION_KEY, partition_key.into().to_header_value());
        set_json_body(&mut request, &parameters)?;
        self.pipeline.send(&mut request, &link).await
    }

    /// Registers a trigger. Triggers only run for requests that name them in [`ItemOptions`](crate::ItemOptions).
    pub async fn create_trigger(
        &self,
        properties: &TriggerProperties,
    ) -> azure_core::Result<Response> {
        self.create(ResourceType::Triggers, properties).await
    }

    pub fn query_triggers(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> FeedPager<TriggerProperties> {
        self.pipeline.query_pager(
            query.into(),
            self.feed(ResourceType::Triggers),
            options.unwrap_or_default(),
        )
    }

    pub async fn delete_trigger(&self, id: &str) -> azure_core::Result<Response> {
        self.delete(ResourceType::Triggers, id).await
    }

    /// Registers a user-defined function.
    pub async fn create_user_defined_function(
        &self,
        properties: &UserDefinedFunctionProperties,
    ) -> azure_core::Result<Response> {
        self.create(ResourceType::UserDefinedFunctions, properties)
            .await
    }

    pub fn query_user_defined_functions(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> FeedPager<UserDefinedFunctionProperties> {
        self.pipeline.query_pager(
            query.into(),
            self.feed(ResourceType::UserDefinedFunctions),
            options.unwrap_or_default(),
        )
    }

    pub async fn delete_user_defined_function(&self, id: &str) -> azure_core::Result<Response> {
        self.delete(ResourceType::UserDefinedFunctions, id).await
    }
}

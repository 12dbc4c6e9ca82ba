// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::{
    error::{Error, ErrorKind},
    Method, Response,
};
use url::Url;

use crate::auth::AuthorizationPolicy;
use crate::clients::DatabaseClient;
use crate::models::{DatabaseProperties, ThroughputProperties};
use crate::pipeline::{set_json_body, CosmosPipeline};
use crate::{
    CosmosClientOptions, CreateDatabaseOptions, ErrorExt, FeedPager, Query, QueryOptions,
    ResourceLink, ResourceType,
};

/// Client for Azure Cosmos DB.
#[derive(Debug, Clone)]
pub struct CosmosClient {
    databases_link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl CosmosClient {
    /// Creates a new CosmosClient, using key authentication.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The full URL of the Cosmos DB account, for example `https://myaccount.documents.azure.com/`.
    /// * `key` - The account's primary or secondary master key, base64-encoded.
    /// * `options` - Optional configuration for the client.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use cosmos_sql::CosmosClient;
    ///
    /// let client = CosmosClient::with_key("https://myaccount.documents.azure.com/", "c2VjcmV0", None).unwrap();
    /// ```
    pub fn with_key(
        endpoint: &str,
        key: impl Into<String>,
        options: Option<CosmosClientOptions>,
    ) -> azure_core::Result<Self> {
        let endpoint = Url::parse(endpoint)
            .ok()
            .filter(|url| !url.cannot_be_a_base() && matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| {
                Error::message(
                    ErrorKind::DataConversion,
                    format!("'{endpoint}' is not a valid Cosmos DB endpoint"),
                )
            })?;
        let auth_policy = AuthorizationPolicy::from_key(key)?;
        let options = options.unwrap_or_default();

        Ok(Self::from_pipeline(CosmosPipeline::new(
            endpoint,
            auth_policy,
            options.client_options,
        )))
    }

    pub(crate) fn from_pipeline(pipeline: CosmosPipeline) -> Self {
        Self {
            databases_link: ResourceLink::root(ResourceType::Databases),
            pipeline,
        }
    }

    /// The account endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        self.pipeline.endpoint()
    }

    /// Gets a [`DatabaseClient`] that can be used to access the database with the specified ID.
    pub fn database_client(&self, id: &str) -> DatabaseClient {
        DatabaseClient::new(self.pipeline.clone(), &self.databases_link, id)
    }

    /// Creates a new database.
    ///
    /// Fails with HTTP 409 if a database with the same id already exists.
    /// The body of the response deserializes into [`DatabaseProperties`].
    pub async fn create_database(
        &self,
        id: &str,
        options: Option<CreateDatabaseOptions>,
    ) -> azure_core::Result<Response> {
        let mut request = self.pipeline.request(&self.databases_link, Method::Post);
        options.unwrap_or_default().apply(&mut request);
        set_json_body(&mut request, &DatabaseProperties::new(id))?;

        self.pipeline.send(&mut request, &self.databases_link).await
    }

    /// Creates a database, or reads it if it already exists.
    ///
    /// The response status is `201 Created` for a new database and `200 OK` for an existing one.
    pub async fn create_database_if_not_exists(
        &self,
        id: &str,
        options: Option<CreateDatabaseOptions>,
    ) -> azure_core::Result<Response> {
        match self.create_database(id, options).await {
            Err(e) if e.is_conflict() => self.database_client(id).read().await,
            result => result,
        }
    }

    /// Executes a query against the databases in the account.
    ///
    /// ```rust,no_run
    /// # async fn doc(client: cosmos_sql::CosmosClient) -> azure_core::Result<()> {
    /// use futures::TryStreamExt;
    ///
    /// let mut pager = client.query_databases("SELECT * FROM dbs", None);
    /// while let Some(page) = pager.try_next().await? {
    ///     for db in page {
    ///         println!("{}", db.id);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn query_databases(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> FeedPager<DatabaseProperties> {
        self.pipeline.query_pager(
            query.into(),
            self.databases_link.clone(),
            options.unwrap_or_default(),
        )
    }

    /// Finds the throughput offer of the resource with the given `_rid`, if it has a dedicated one.
    pub async fn read_offer_for(
        &self,
        resource_id: &str,
    ) -> azure_core::Result<Option<ThroughputProperties>> {
        use futures::TryStreamExt;

        let query = Query::from("SELECT * FROM root r WHERE r.offerResourceId = @rid")
            .with_parameter("@rid", resource_id)?;
        let mut pager = self.pipeline.query_pager::<ThroughputProperties>(
            query,
            ResourceLink::root(ResourceType::Offers),
            QueryOptions::default(),
        );

        while let Some(page) = pager.try_next().await? {
            if let Some(offer) = page.into_items().into_iter().next() {
                return Ok(Some(offer));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "c2VjcmV0LWtleQ==";

    #[test]
    fn rejects_non_http_endpoints() {
        let error = CosmosClient::with_key("mailto:someone@example.com", KEY, None).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::DataConversion));

        let error = CosmosClient::with_key("not a url", KEY, None).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::DataConversion));
    }

    #[test]
    fn rejects_bad_key() {
        let error = CosmosClient::with_key("https://localhost:8081/", "%%%", None).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::Credential));
    }

    #[test]
    fn child_clients_do_not_need_network() {
        let client = CosmosClient::with_key("https://localhost:8081/", KEY, None).unwrap();
        let container = client.database_client("mydb").container_client("mystore");
        assert_eq!(container.id(), "mystore");
        assert_eq!(container.database_id(), "mydb");
        assert_eq!(client.endpoint().as_str(), "https://localhost:8081/");
    }
}

// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::Result;
use cosmos_sql::{
    clients::{ContainerClient, DatabaseClient},
    models::ContainerProperties,
    CosmosClient, CosmosClientOptions, CreateContainerOptions,
};

use crate::DemoConfig;

/// The partition key path of the customer container.
pub const STORE_PARTITION_KEY_PATH: &str = "/address/postalCode";

/// State shared by every demo. Built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Shared {
    pub client: CosmosClient,
    pub database_id: String,
    pub container_id: String,
}

impl Shared {
    pub fn new(config: &DemoConfig) -> Result<Self> {
        Self::with_options(config, CosmosClientOptions::default())
    }

    /// Like [`Shared::new`], with client options such as a custom transport.
    pub fn with_options(config: &DemoConfig, options: CosmosClientOptions) -> Result<Self> {
        Ok(Self {
            client: CosmosClient::with_key(&config.endpoint, &config.key, Some(options))?,
            database_id: config.database.clone(),
            container_id: config.container.clone(),
        })
    }

    pub fn database(&self) -> DatabaseClient {
        self.client.database_client(&self.database_id)
    }

    /// The customer container.
    pub fn store(&self) -> ContainerClient {
        self.database().container_client(&self.container_id)
    }

    pub fn container(&self, id: &str) -> ContainerClient {
        self.database().container_client(id)
    }

    /// Creates the database and the customer container if they don't exist yet.
    pub async fn ensure_store(&self) -> Result<ContainerClient> {
        self.client
            .create_database_if_not_exists(&self.database_id, None)
            .await?;
        self.database()
            .create_container_if_not_exists(
                ContainerProperties::new(&self.container_id, STORE_PARTITION_KEY_PATH),
                Some(CreateContainerOptions {
                    throughput: Some(400),
                }),
            )
            .await?;
        Ok(self.store())
    }
}

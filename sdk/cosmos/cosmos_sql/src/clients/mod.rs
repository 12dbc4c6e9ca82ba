// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Clients used to communicate with Azure Cosmos DB
//!
//! Clients form a hierarchy that mirrors the account's resources:
//! [`CosmosClient`] hands out [`DatabaseClient`]s, which hand out [`ContainerClient`]s,
//! which expose a [`ScriptsClient`] for stored procedures, triggers and user-defined functions.
//! Creating a child client never makes a request.

mod container_client;
mod cosmos_client;
mod database_client;
mod scripts_client;

pub use container_client::ContainerClient;
pub use cosmos_client::CosmosClient;
pub use database_client::DatabaseClient;
pub use scripts_client::ScriptsClient;

// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod auth;
pub mod clients;
pub mod constants;
mod ext;
mod feed;
pub mod models;
mod options;
mod partition_key;
pub(crate) mod pipeline;
pub mod query;
mod resource_link;
pub(crate) mod utils;

#[doc(inline)]
pub use clients::CosmosClient;

pub use auth::generate_authorization;
pub use ext::{ErrorExt, ResponseExt};
pub use feed::{FeedPage, FeedPager, RawFeedPage, RawFeedPager};
pub use options::*;
pub use partition_key::PartitionKey;
pub use query::Query;
pub use resource_link::{ResourceLink, ResourceType};

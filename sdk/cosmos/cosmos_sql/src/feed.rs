// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::{Continuable, Pageable, Response};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Deserialize};

use crate::ResponseExt;

/// The response body of a feed. The array name depends on the resource type, and only one is ever present.
#[derive(Deserialize)]
struct FeedBody<T> {
    #[serde(
        rename = "Documents",
        alias = "Databases",
        alias = "DocumentCollections",
        alias = "StoredProcedures",
        alias = "Triggers",
        alias = "UserDefinedFunctions",
        alias = "Offers"
    )]
    items: Vec<T>,
}

/// A page of typed items.
#[derive(Debug, Clone)]
pub struct FeedPage<T> {
    items: Vec<T>,
    continuation: Option<String>,
    request_charge: f64,
    activity_id: Option<String>,
}

/// A stream of [`FeedPage`]s that follows continuation tokens until the feed is exhausted.
///
/// No request is sent until the stream is polled.
pub type FeedPager<T> = Pageable<FeedPage<T>, azure_core::Error>;

/// A stream of [`RawFeedPage`]s.
pub type RawFeedPager = Pageable<RawFeedPage, azure_core::Error>;

impl<T: DeserializeOwned> FeedPage<T> {
    pub(crate) async fn try_from_response(response: Response) -> azure_core::Result<Self> {
        let continuation = response.continuation();
        let request_charge = response.request_charge();
        let activity_id = response.activity_id().map(str::to_string);
        let body: FeedBody<T> = response.deserialize_body().await?;
        Ok(Self {
            items: body.items,
            continuation,
            request_charge,
            activity_id,
        })
    }
}

impl<T> FeedPage<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn continuation(&self) -> Option<&str> {
        self.continuation.as_deref()
    }

    /// The request units charged for this page.
    pub fn request_charge(&self) -> f64 {
        self.request_charge
    }

    pub fn activity_id(&self) -> Option<&str> {
        self.activity_id.as_deref()
    }
}

impl<T> Continuable for FeedPage<T> {
    type Continuation = String;

    fn continuation(&self) -> Option<Self::Continuation> {
        self.continuation.clone()
    }
}

impl<T> IntoIterator for FeedPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// A page of a feed whose body has not been deserialized.
#[derive(Debug, Clone)]
pub struct RawFeedPage {
    body: Bytes,
    continuation: Option<String>,
    request_charge: f64,
}

impl RawFeedPage {
    pub(crate) async fn try_from_response(response: Response) -> azure_core::Result<Self> {
        let continuation = response.continuation();
        let request_charge = response.request_charge();
        Ok(Self {
            body: response.into_body().collect().await?,
            continuation,
            request_charge,
        })
    }

    /// The raw JSON returned by the service.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Deserializes the item array (`Documents`, `Databases`, ...) out of the body.
    pub fn documents<T: DeserializeOwned>(&self) -> azure_core::Result<Vec<T>> {
        let body: FeedBody<T> = azure_core::from_json(&self.body)?;
        Ok(body.items)
    }

    pub fn continuation(&self) -> Option<&str> {
        self.continuation.as_deref()
    }

    pub fn request_charge(&self) -> f64 {
        self.request_charge
    }
}

impl Continuable for RawFeedPage {
    type Continuation = String;

    fn continuation(&self) -> Option<Self::Continuation> {
        self.continuation.clone()
    }
}

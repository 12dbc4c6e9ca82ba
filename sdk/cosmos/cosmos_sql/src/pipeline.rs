// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::{ClientOptions, Context, Method, Pageable, Policy, Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::auth::AuthorizationPolicy;
use crate::{
    constants, ErrorExt, FeedPage, FeedPager, Query, QueryOptions, RawFeedPage, RawFeedPager,
    ResourceLink, ResponseExt,
};

/// Sends requests for every client derived from one [`CosmosClient`](crate::CosmosClient).
///
/// Signing, retries and the transport all come from the wrapped [`azure_core::Pipeline`].
#[derive(Debug, Clone)]
pub(crate) struct CosmosPipeline {
    endpoint: Url,
    pipeline: azure_core::Pipeline,
}

impl CosmosPipeline {
    pub fn new(endpoint: Url, auth_policy: AuthorizationPolicy, options: ClientOptions) -> Self {
        let auth_policy: Arc<dyn Policy> = Arc::new(auth_policy);
        Self {
            endpoint,
            pipeline: azure_core::Pipeline::new(
                option_env!("CARGO_PKG_NAME"),
                option_env!("CARGO_PKG_VERSION"),
                options,
                Vec::new(),
                vec![auth_policy],
            ),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn url(&self, link: &ResourceLink) -> Url {
        link.url(&self.endpoint)
    }

    /// Starts a request against `link`.
    pub fn request(&self, link: &ResourceLink, method: Method) -> Request {
        Request::new(self.url(link), method)
    }

    /// Sends a request for the resource at `link`. Non-success status codes come back as errors.
    pub async fn send(&self, request: &mut Request, link: &ResourceLink) -> azure_core::Result<Response> {
        let mut ctx = Context::new();
        ctx.insert(link.clone());

        debug!(method = ?request.method(), url = %request.url(), "sending request");
        match self.pipeline.send(&ctx, request).await {
            Ok(response) => {
                debug!(
                    status = ?response.status(),
                    request_charge = response.request_charge(),
                    activity_id = response.activity_id().unwrap_or_default(),
                    "received response"
                );
                Ok(response)
            }
            Err(error) => {
                warn!(
                    method = ?request.method(),
                    url = %request.url(),
                    status = ?error.http_status(),
                    "request failed"
                );
                Err(error)
            }
        }
    }

    /// Sends a query to a feed. The query options select the partition and continuation.
    pub async fn send_query(
        &self,
        query: &Query,
        link: &ResourceLink,
        options: &QueryOptions,
    ) -> azure_core::Result<Response> {
        let mut request = self.request(link, Method::Post);
        request.insert_header(constants::QUERY, "True");
        options.apply(&mut request);
        request.set_body(azure_core::to_json(query)?);
        request.insert_header(constants::CONTENT_TYPE, constants::APPLICATION_QUERY_JSON);
        self.send(&mut request, link).await
    }

    /// Builds a pager that runs `query` against the feed at `link`.
    pub fn query_pager<T>(&self, query: Query, link: ResourceLink, options: QueryOptions) -> FeedPager<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let pipeline = self.clone();
        Pageable::new(move |continuation: Option<String>| {
            let pipeline = pipeline.clone();
            let query = query.clone();
            let link = link.clone();
            let options = options.resume_from(continuation);
            async move {
                let response = pipeline.send_query(&query, &link, &options).await?;
                FeedPage::try_from_response(response).await
            }
        })
    }

    /// Like [`query_pager`](Self::query_pager), but leaves each page's body undeserialized.
    pub fn raw_query_pager(&self, query: Query, link: ResourceLink, options: QueryOptions) -> RawFeedPager {
        let pipeline = self.clone();
        Pageable::new(move |continuation: Option<String>| {
            let pipeline = pipeline.clone();
            let query = query.clone();
            let link = link.clone();
            let options = options.resume_from(continuation);
            async move {
                let response = pipeline.send_query(&query, &link, &options).await?;
                RawFeedPage::try_from_response(response).await
            }
        })
    }
}

/// Serializes `body` as the JSON payload of `request`.
pub(crate) fn set_json_body<T: Serialize>(
    request: &mut Request,
    body: &T,
) -> azure_core::Result<()> {
    request.set_body(azure_core::to_json(body)?);
    request.insert_header(constants::CONTENT_TYPE, constants::APPLICATION_JSON);
    Ok(())
}

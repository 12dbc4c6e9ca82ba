// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Master-key request signing.

use async_trait::async_trait;
use azure_core::{
    auth::Secret,
    date,
    error::{Error, ErrorKind},
    hmac::hmac_sha256,
    Context, Method, Policy, PolicyResult, Request,
};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::trace;
use url::form_urlencoded;

use crate::{constants, ResourceLink, ResourceType};

const AUTH_VERSION: &str = "1.0";

/// Signs every request with the account master key.
///
/// The [`ResourceLink`] being addressed must be in the request [`Context`]; the pipeline puts it there.
#[derive(Debug)]
pub(crate) struct AuthorizationPolicy {
    key: Secret,
}

impl AuthorizationPolicy {
    /// Validates the base64 master key shown in the Azure portal.
    pub fn from_key(key: impl Into<String>) -> azure_core::Result<Self> {
        let key = Secret::new(key.into().trim().to_string());
        hmac_sha256("", &key)
            .map_err(|e| Error::full(ErrorKind::Credential, e, "master key is not valid base64"))?;
        Ok(Self { key })
    }
}

#[async_trait]
impl Policy for AuthorizationPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> PolicyResult {
        let link = ctx.get::<ResourceLink>().ok_or_else(|| {
            Error::message(
                ErrorKind::Other,
                "the resource link must be in the context to sign a request",
            )
        })?;

        let now = date::to_rfc1123(&OffsetDateTime::now_utc());
        let authorization = generate_authorization(
            &self.key,
            request.method(),
            link.resource_type(),
            &link.link_for_signing(),
            &now,
        )?;
        trace!(link = %link.path(), "signed request");

        request.insert_header(constants::MS_DATE, now);
        request.insert_header(constants::VERSION, constants::API_VERSION);
        request.insert_header(constants::AUTHORIZATION, authorization);

        next[0].send(ctx, request, &next[1..]).await
    }
}

/// Builds the value of the `authorization` header for a request.
///
/// `resource_link` is the link returned by [`ResourceLink::link_for_signing`]
/// and `date` must be the exact value sent in `x-ms-date`.
pub fn generate_authorization(
    key: &Secret,
    method: &Method,
    resource_type: ResourceType,
    resource_link: &str,
    date: &str,
) -> azure_core::Result<String> {
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}\n\n",
        match *method {
            Method::Get => "get",
            Method::Put => "put",
            Method::Post => "post",
            Method::Delete => "delete",
            Method::Head => "head",
            Method::Patch => "patch",
            Method::Options => "options",
            _ => "extension",
        },
        resource_type.path_segment(),
        resource_link,
        date.to_lowercase(),
    );
    let signature = hmac_sha256(&string_to_sign, key)?;

    let token = format!("type=master&ver={AUTH_VERSION}&sig={signature}");
    Ok(form_urlencoded::byte_serialize(token.as_bytes()).collect())
}

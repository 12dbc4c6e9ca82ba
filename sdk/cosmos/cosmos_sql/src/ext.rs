// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Cosmos DB specific accessors for [`azure_core`] responses and errors.

use async_trait::async_trait;
use azure_core::{error::ErrorKind, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::constants;

/// Reads the headers every Cosmos DB response carries, and deserializes its body.
///
/// ```rust,no_run
/// # async fn doc(container: cosmos_sql::clients::ContainerClient) -> azure_core::Result<()> {
/// use cosmos_sql::ResponseExt;
///
/// let response = container.read_item("11229", "WakefieldFamily", None).await?;
/// println!("read cost {} RUs", response.request_charge());
/// let family: serde_json::Value = response.deserialize_body().await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ResponseExt: Sized {
    /// The request units charged for the operation.
    fn request_charge(&self) -> f64;

    fn activity_id(&self) -> Option<&str>;

    fn etag(&self) -> Option<&str>;

    /// The token to fetch the next page of a feed with, if there is one.
    fn continuation(&self) -> Option<String>;

    /// Reads the whole body and deserializes it from JSON.
    async fn deserialize_body<T: DeserializeOwned>(self) -> azure_core::Result<T>;
}

#[async_trait]
impl ResponseExt for Response {
    fn request_charge(&self) -> f64 {
        self.headers()
            .get_optional_str(&constants::REQUEST_CHARGE)
            .and_then(|charge| charge.parse().ok())
            .unwrap_or_default()
    }

    fn activity_id(&self) -> Option<&str> {
        self.headers().get_optional_str(&constants::ACTIVITY_ID)
    }

    fn etag(&self) -> Option<&str> {
        self.headers().get_optional_str(&constants::ETAG)
    }

    fn continuation(&self) -> Option<String> {
        self.headers()
            .get_optional_string(&constants::CONTINUATION)
            .filter(|token| !token.is_empty())
    }

    async fn deserialize_body<T: DeserializeOwned>(self) -> azure_core::Result<T> {
        let body = self.into_body().collect().await?;
        azure_core::from_json(body)
    }
}

/// Classifies the errors returned for failed requests.
pub trait ErrorExt {
    /// The HTTP status the service answered with, if the error came from a response.
    fn http_status(&self) -> Option<StatusCode>;

    fn is_not_found(&self) -> bool {
        self.http_status() == Some(StatusCode::NotFound)
    }

    fn is_conflict(&self) -> bool {
        self.http_status() == Some(StatusCode::Conflict)
    }
}

impl ErrorExt for azure_core::Error {
    fn http_status(&self) -> Option<StatusCode> {
        match self.kind() {
            ErrorKind::HttpResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azure_core::{error::Error, headers::Headers};
    use bytes::Bytes;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Greeting {
        message: String,
    }

    fn response(headers: Headers, body: &'static str) -> Response {
        let body = Bytes::from_static(body.as_bytes());
        Response::new(
            StatusCode::Created,
            headers,
            Box::pin(futures::stream::once(futures::future::ready(Ok::<_, Error>(body)))),
        )
    }

    #[tokio::test]
    async fn reads_cosmos_headers_and_body() {
        let mut headers = Headers::new();
        headers.insert(constants::REQUEST_CHARGE, "6.29");
        headers.insert(constants::ETAG, "\"0000\"");
        headers.insert(constants::CONTINUATION, "");
        let response = response(headers, r#"{"message":"Hello, World"}"#);

        assert_eq!(response.request_charge(), 6.29);
        assert_eq!(response.etag(), Some("\"0000\""));
        assert_eq!(response.activity_id(), None);
        assert_eq!(response.continuation(), None);
        let greeting: Greeting = response.deserialize_body().await.unwrap();
        assert_eq!(greeting.message, "Hello, World");
    }

    #[test]
    fn classifies_http_errors() {
        let not_found = Error::message(
            ErrorKind::HttpResponse {
                status: StatusCode::NotFound,
                error_code: Some("NotFound".into()),
            },
            "Resource Not Found",
        );
        assert!(not_found.is_not_found());
        assert!(!not_found.is_conflict());

        let other = Error::message(ErrorKind::Io, "connection reset");
        assert_eq!(other.http_status(), None);
    }
}

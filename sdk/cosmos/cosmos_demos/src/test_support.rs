// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! An in-memory Cosmos DB endpoint for the demo tests.

use async_trait::async_trait;
use azure_core::{
    headers::{HeaderName, Headers},
    Body, ClientOptions, HttpClient, Method, Request, Response, StatusCode, TransportOptions,
};
use bytes::Bytes;
use cosmos_sql::{constants, CosmosClientOptions};
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::{DemoConfig, Shared};

/// Demos that loop on the service's answer must stop well before this many requests.
const REQUEST_LIMIT: usize = 250;

pub struct MockResponse {
    status: StatusCode,
    body: Bytes,
}

pub fn respond(status: StatusCode, body: &str) -> MockResponse {
    MockResponse {
        status,
        body: Bytes::from(body.to_string()),
    }
}

pub fn ok(body: &str) -> MockResponse {
    respond(StatusCode::Ok, body)
}

pub fn not_found() -> MockResponse {
    respond(
        StatusCode::NotFound,
        r#"{"code":"NotFound","message":"Resource Not Found"}"#,
    )
}

pub fn bad_request(message: &str) -> MockResponse {
    respond(
        StatusCode::BadRequest,
        &serde_json::json!({ "code": "BadRequest", "message": message }).to_string(),
    )
}

/// An empty page of any feed.
pub fn empty_feed() -> MockResponse {
    ok(r#"{"Documents":[],"_count":0}"#)
}

type Handler = dyn Fn(&Request) -> MockResponse + Send + Sync;

/// Answers every request with `handler` and records what was sent.
pub struct MockTransport {
    handler: Box<Handler>,
    requests: Mutex<Vec<Request>>,
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport").finish_non_exhaustive()
    }
}

impl MockTransport {
    pub fn new(handler: impl Fn(&Request) -> MockResponse + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// The `(method, path)` of every request, in order.
    pub fn calls(&self) -> Vec<(Method, String)> {
        self.requests()
            .iter()
            .map(|r| (r.method().clone(), r.url().path().to_string()))
            .collect()
    }
}

#[async_trait]
impl HttpClient for MockTransport {
    async fn execute_request(&self, request: &Request) -> azure_core::Result<Response> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        assert!(
            count <= REQUEST_LIMIT,
            "too many requests; last was {:?} {}",
            request.method(),
            request.url()
        );

        let response = (self.handler)(request);
        let mut headers = Headers::new();
        headers.insert(constants::REQUEST_CHARGE, "1");
        Ok(Response::new(
            response.status,
            headers,
            Box::pin(futures::stream::once(futures::future::ready(Ok::<
                _,
                azure_core::Error,
            >(response.body)))),
        ))
    }
}

/// A [`Shared`] for `mydb`/`mystore` whose requests all go to `transport`.
pub fn shared(transport: &Arc<MockTransport>) -> Shared {
    let transport: Arc<dyn HttpClient> = transport.clone();
    Shared::with_options(
        &DemoConfig {
            endpoint: "https://localhost:8081/".into(),
            key: "dGVzdC1rZXk=".into(),
            database: "mydb".into(),
            container: "mystore".into(),
        },
        CosmosClientOptions {
            client_options: ClientOptions::new(TransportOptions::new(transport)),
        },
    )
    .unwrap()
}

pub fn is_query(request: &Request) -> bool {
    header(request, &constants::QUERY) == Some("True")
}

pub fn header<'a>(request: &'a Request, name: &HeaderName) -> Option<&'a str> {
    request.headers().get_optional_str(name)
}

pub fn body_json(request: &Request) -> serde_json::Value {
    match request.body() {
        Body::Bytes(bytes) if bytes.is_empty() => serde_json::Value::Null,
        Body::Bytes(bytes) => serde_json::from_slice(bytes).unwrap(),
        #[allow(unreachable_patterns)]
        _ => panic!("request body is not in memory"),
    }
}

/// The SQL text of a query request.
pub fn query_text(request: &Request) -> String {
    body_json(request)["query"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

pub fn output_text(output: Vec<u8>) -> String {
    String::from_utf8(output).unwrap()
}

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use azure_core::{
    headers::{HeaderName, Headers},
    Body, ClientOptions, HttpClient, Request, Response, StatusCode, TransportOptions,
};
use bytes::Bytes;
use cosmos_sql::{CosmosClient, CosmosClientOptions};

// "test-key" in base64.
pub const KEY: &str = "dGVzdC1rZXk=";
pub const ENDPOINT: &str = "https://localhost:8081/";

/// A canned response. `Response` bodies are streams, so the parts are kept and assembled on demand.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl MockResponse {
    fn to_response(&self) -> Response {
        let body = self.body.clone();
        Response::new(
            self.status,
            self.headers.clone(),
            Box::pin(futures::stream::once(futures::future::ready(Ok::<
                _,
                azure_core::Error,
            >(body)))),
        )
    }
}

/// Replays canned responses in order and records every request it is handed.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new(responses: impl IntoIterator<Item = MockResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request(&self, index: usize) -> Request {
        self.requests()[index].clone()
    }
}

#[async_trait]
impl HttpClient for MockTransport {
    async fn execute_request(&self, request: &Request) -> azure_core::Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no response queued for {:?} {}", request.method(), request.url()));
        Ok(response.to_response())
    }
}

pub fn client(transport: &Arc<MockTransport>) -> CosmosClient {
    let transport: Arc<dyn HttpClient> = transport.clone();
    CosmosClient::with_key(
        ENDPOINT,
        KEY,
        Some(CosmosClientOptions {
            client_options: ClientOptions::new(TransportOptions::new(transport)),
        }),
    )
    .unwrap()
}

pub fn response(status: StatusCode, body: &str, headers: &[(&'static str, &str)]) -> MockResponse {
    let mut map = Headers::new();
    for (name, value) in headers {
        map.insert(HeaderName::from_static(name), value.to_string());
    }
    MockResponse {
        status,
        headers: map,
        body: Bytes::from(body.to_string()),
    }
}

pub fn ok(body: &str) -> MockResponse {
    response(StatusCode::Ok, body, &[("x-ms-request-charge", "1")])
}

/// The JSON payload the client sent.
pub fn body_json(request: &Request) -> serde_json::Value {
    match request.body() {
        Body::Bytes(bytes) => serde_json::from_slice(bytes).unwrap(),
        #[allow(unreachable_patterns)]
        _ => panic!("request body is not in memory"),
    }
}

pub fn body_bytes(request: &Request) -> Bytes {
    match request.body() {
        Body::Bytes(bytes) => bytes.clone(),
        #[allow(unreachable_patterns)]
        _ => panic!("request body is not in memory"),
    }
}

pub fn header<'a>(request: &'a Request, name: &HeaderName) -> Option<&'a str> {
    request.headers().get_optional_str(name)
}

//! Shared test utilities and fixtures.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use transmission_rpc_types::Error;

use crate::client::Client;
use crate::config::ClientConfig;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

pub(crate) const HASH: &str = "a0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9";

/// Envelope of a successful response.
pub(crate) fn success_body(tag: i64, arguments: Value) -> Vec<u8> {
    serde_json::to_vec(&json!({ "result": "success", "arguments": arguments, "tag": tag }))
        .expect("fixture encodes")
}

/// 200 response carrying a successful envelope.
pub(crate) fn ok(tag: i64, arguments: Value) -> HttpResponse {
    HttpResponse {
        status: 200,
        session_id: None,
        body: success_body(tag, arguments),
    }
}

/// 200 response with a daemon-side failure message.
pub(crate) fn failure(tag: i64, result: &str) -> HttpResponse {
    HttpResponse {
        status: 200,
        session_id: None,
        body: serde_json::to_vec(&json!({ "result": result, "arguments": {}, "tag": tag }))
            .expect("fixture encodes"),
    }
}

/// 409 response handing out a session id.
pub(crate) fn conflict(session_id: &str) -> HttpResponse {
    HttpResponse {
        status: 409,
        session_id: Some(session_id.to_owned()),
        body: b"<h1>409: Conflict</h1>".to_vec(),
    }
}

/// Bare status response.
pub(crate) fn status(code: u16) -> HttpResponse {
    HttpResponse {
        status: code,
        session_id: None,
        body: Vec::new(),
    }
}

/// Decodes the envelope a request carried.
pub(crate) fn envelope(request: &HttpRequest) -> Value {
    serde_json::from_slice(&request.body).expect("request body is json")
}

/// Client on the default URL without credentials.
pub(crate) fn test_client<T: HttpTransport>(transport: T) -> Client<T> {
    client_with(ClientConfig::default().without_credentials(), transport)
}

pub(crate) fn client_with<T: HttpTransport>(config: ClientConfig, transport: T) -> Client<T> {
    Client::new_with_transport(config, transport).expect("valid test config")
}

type Reply = Box<dyn Fn(&str, &Value) -> Value + Send + Sync>;

/// In-memory daemon that enforces the session id like the real one.
///
/// Requests without the expected id get a 409 carrying it; accepted requests are answered
/// with `reply(method, arguments)` and the request tag echoed back.
pub(crate) struct FakeDaemon {
    session_id: String,
    latency: Duration,
    hang: bool,
    reply: Reply,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeDaemon {
    pub(crate) fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_owned(),
            latency: Duration::ZERO,
            hang: false,
            reply: Box::new(|_, _| json!({})),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Never answers.
    pub(crate) fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub(crate) fn with_reply(
        mut self,
        reply: impl Fn(&str, &Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.reply = Box::new(reply);
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Requests rejected with 409.
    pub(crate) fn conflicts(&self) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.session_id.as_deref() != Some(self.session_id.as_str()))
            .count()
    }

    /// Envelopes of the accepted requests, in arrival order.
    pub(crate) fn accepted(&self) -> Vec<Value> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.session_id.as_deref() == Some(self.session_id.as_str()))
            .map(envelope)
            .collect()
    }
}

#[async_trait]
impl HttpTransport for FakeDaemon {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        self.requests.lock().push(request.clone());
        if self.hang {
            std::future::pending::<()>().await;
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if request.session_id.as_deref() != Some(self.session_id.as_str()) {
            return Ok(conflict(&self.session_id));
        }
        let envelope = envelope(&request);
        let method = envelope["method"].as_str().unwrap_or_default();
        let arguments = (self.reply)(method, &envelope["arguments"]);
        Ok(ok(envelope["tag"].as_i64().unwrap_or_default(), arguments))
    }
}

//! HTTP seam between the RPC core and the network.
//!
//! The core only needs "POST these bytes, give me status, session id and body back",
//! which [`HttpTransport`] captures. [`ReqwestTransport`] is the production
//! implementation; tests substitute mocks.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use transmission_rpc_types::Error;

use crate::config::{ClientConfig, SESSION_ID_HEADER};

/// One HTTP POST to the RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Endpoint.
    pub url: Url,
    /// Session id header value, if one is known.
    pub session_id: Option<String>,
    /// Encoded request envelope.
    pub body: Vec<u8>,
}

/// What the core needs from an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Session id header value, if the daemon sent one.
    pub session_id: Option<String>,
    /// Raw body.
    pub body: Vec<u8>,
}

/// Executes RPC POSTs.
///
/// Implementations must be safe for concurrent use; the client shares one instance
/// across all in-flight calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the response, whatever its status.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, Error>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        (**self).post(request).await
    }
}

/// [`HttpTransport`] backed by a `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    username: Option<String>,
    password: Option<String>,
}

impl ReqwestTransport {
    /// Builds the connection pool from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let mut builder = self
            .http
            .post(request.url)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body);
        if let Some(id) = request.session_id {
            builder = builder.header(SESSION_ID_HEADER, id);
        }
        if let Some(username) = &self.username {
            builder = builder.basic_auth(username, self.password.as_ref());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let session_id = response
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status,
            session_id,
            body,
        })
    }
}

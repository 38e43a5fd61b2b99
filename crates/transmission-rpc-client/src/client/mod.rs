//! Transport core: tags, the session-id handshake and cancellation.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use url::Url;

use transmission_rpc_types::Error;

use crate::config::ClientConfig;
use crate::envelope::{encode_request, parse_response};
use crate::request::{Arguments, Dispatch, RpcRequest};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};

mod methods;
#[cfg(test)]
mod tests;

/// Transmission RPC client.
///
/// A client is meant to be shared: every method takes `&self`, so one instance (behind an
/// `Arc` if needed) serves any number of concurrent calls. The session id learnt from the
/// daemon is cached and reused by all of them.
pub struct Client<T: HttpTransport = ReqwestTransport> {
    url: Url,
    retries: u32,
    tag: AtomicI64,
    session_id: RwLock<Option<String>>,
    /// Held while the handshake is pending, so concurrent first calls do not each collect
    /// their own 409.
    bootstrap: Mutex<()>,
    /// Set once the daemon answers with anything but 409. Daemons or proxies that never
    /// send a session id leave the cache empty; this keeps them off the gate.
    bootstrapped: AtomicBool,
    transport: T,
}

impl Client {
    /// Creates a client talking HTTP through `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let transport = ReqwestTransport::new(&config)?;
        Self::new_with_transport(config, transport)
    }
}

impl<T: HttpTransport> Client<T> {
    /// Creates a client on top of a custom transport.
    pub fn new_with_transport(config: ClientConfig, transport: T) -> Result<Self, Error> {
        let url = config.rpc_url()?;
        debug!(%url, retries = config.retries, "creating transmission client");

        Ok(Self {
            url,
            retries: config.retries,
            tag: AtomicI64::new(0),
            session_id: RwLock::new(config.session_id.filter(|id| !id.is_empty())),
            bootstrap: Mutex::new(()),
            bootstrapped: AtomicBool::new(false),
            transport,
        })
    }

    /// RPC endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The currently cached session id.
    pub fn session_id(&self) -> Option<String> {
        self.session_id.read().clone()
    }

    /// Sends a request and waits for its typed response.
    pub async fn send<R: RpcRequest>(&self, request: &R) -> Result<R::Response, Error> {
        self.send_cancellable(request, &CancellationToken::new())
            .await
    }

    /// Like [`Client::send`], aborting with [`Error::Cancelled`] as soon as `cancel` fires.
    ///
    /// Cancellation is checked before every attempt and raced against the attempt in
    /// flight; a cancelled call never starts another attempt.
    #[instrument(skip_all, fields(method = request.method()))]
    pub async fn send_cancellable<R: RpcRequest>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<R::Response, Error> {
        let arguments = match request.prepare()? {
            Dispatch::Skip(response) => {
                debug!("nothing to send");
                return Ok(response);
            }
            Dispatch::Send(arguments) => arguments,
        };
        self.call(request.method(), arguments.as_ref(), cancel)
            .await
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        arguments: Option<&Arguments>,
        cancel: &CancellationToken,
    ) -> Result<R, Error> {
        let empty = Arguments::new();
        let tag = self.next_tag();
        let body = encode_request(method, Some(arguments.unwrap_or(&empty)), tag)?;
        debug!(tag, bytes = body.len(), "sending request");

        let response = self.exchange(body, cancel).await?;
        let result = parse_response(&response)?.into_arguments(tag);
        if let Err(Error::ServerError(message)) = &result {
            debug!(tag, result = %message, "daemon reported failure");
        }
        result
    }

    fn next_tag(&self) -> i64 {
        self.tag.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    fn store_session_id(&self, id: &str) {
        let mut cached = self.session_id.write();
        if cached.as_deref() != Some(id) {
            debug!("session id updated");
            *cached = Some(id.to_owned());
        }
    }

    fn handshake_pending(&self) -> bool {
        self.session_id().is_none() && !self.bootstrapped.load(Ordering::Acquire)
    }

    /// POSTs `body` until the daemon accepts the session id or the retry budget runs out.
    async fn exchange(&self, body: Vec<u8>, cancel: &CancellationToken) -> Result<Vec<u8>, Error> {
        let _gate = if self.handshake_pending() {
            let guard = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                guard = self.bootstrap.lock() => guard,
            };
            // Another caller may have finished the handshake while we waited.
            self.handshake_pending().then_some(guard)
        } else {
            None
        };

        for attempt in 0..=self.retries {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let request = HttpRequest {
                url: self.url.clone(),
                session_id: self.session_id(),
                body: body.clone(),
            };
            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                response = self.transport.post(request) => response?,
            };

            if let Some(id) = response.session_id.as_deref().filter(|id| !id.is_empty()) {
                self.store_session_id(id);
            }
            if response.status != 409 {
                self.bootstrapped.store(true, Ordering::Release);
            }

            match response.status {
                200 => return Ok(response.body),
                409 => debug!(attempt, "session id rejected"),
                401 => return Err(Error::Unauthorized),
                status => {
                    debug!(status, "unexpected http status");
                    return Err(Error::Status(status));
                }
            }
        }

        let attempts = self.retries.saturating_add(1);
        warn!(attempts, "daemon kept rejecting the session id");
        Err(Error::SessionIdRetriesExhausted(attempts))
    }
}

impl<T: HttpTransport> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url.as_str())
            .field("retries", &self.retries)
            .field("tag", &self.tag.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

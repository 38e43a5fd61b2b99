//! Client construction options.

use std::fmt;

use url::Url;

use transmission_rpc_types::Error;

/// Host used when neither a URL nor a host is configured.
pub const DEFAULT_HOST: &str = "localhost:9091";

/// RPC endpoint path on the daemon.
pub const DEFAULT_PATH: &str = "/transmission/rpc/";

/// Default RPC username of a stock daemon.
pub const DEFAULT_USERNAME: &str = "transmission";

/// Default RPC password of a stock daemon.
pub const DEFAULT_PASSWORD: &str = "transmission";

/// Number of session-id retries after the initial attempt.
pub const DEFAULT_RETRIES: u32 = 3;

/// Header carrying the anti-CSRF session id in both directions.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// Configuration for a [`Client`](crate::Client).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Complete RPC URL. Takes precedence over `host`.
    pub url: Option<String>,
    /// `host[:port]`, expanded to `http://{host}/transmission/rpc/`.
    pub host: String,
    /// Basic auth username. `None` sends no credentials.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Session id to present on the first request.
    pub session_id: Option<String>,
    /// Retries after a 409 answer. The daemon is tried at most `retries + 1` times.
    pub retries: u32,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: DEFAULT_HOST.to_owned(),
            username: Some(DEFAULT_USERNAME.to_owned()),
            password: Some(DEFAULT_PASSWORD.to_owned()),
            session_id: None,
            retries: DEFAULT_RETRIES,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl ClientConfig {
    /// Sets the complete RPC URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the daemon host, e.g. `nas.local:9091`.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets basic auth credentials.
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Disables basic auth, for daemons started with authentication off.
    #[must_use]
    pub fn without_credentials(mut self) -> Self {
        self.username = None;
        self.password = None;
        self
    }

    /// Pre-seeds the session id.
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Sets the 409 retry budget.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Resolves the RPC endpoint.
    pub fn rpc_url(&self) -> Result<Url, Error> {
        let raw = match &self.url {
            Some(url) => url.clone(),
            None => format!("http://{}{DEFAULT_PATH}", self.host.trim_end_matches('/')),
        };
        let url = Url::parse(&raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::InvalidUrl(format!("unsupported scheme {other:?}"))),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print credentials or the session id.
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<set>"))
            .field("session_id", &self.session_id.as_ref().map(|_| "<set>"))
            .field("retries", &self.retries)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

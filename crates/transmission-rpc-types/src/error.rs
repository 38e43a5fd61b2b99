use std::convert::Infallible;

use thiserror::Error;

/// Error type for Transmission RPC operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A torrent identifier was neither an integer, a hash string nor `recently-active`.
    #[error("invalid torrent identifier: {0}")]
    InvalidId(String),

    /// Torrent status outside `0..=6`.
    #[error("invalid torrent status: {0}")]
    InvalidStatus(i64),

    /// File or bandwidth priority outside `-1..=1`.
    #[error("invalid priority: {0}")]
    InvalidPriority(i64),

    /// Idle or ratio mode outside `0..=2`.
    #[error("invalid limit mode: {0}")]
    InvalidMode(i64),

    /// Tracker state outside `0..=3`.
    #[error("invalid tracker state: {0}")]
    InvalidTrackerState(i64),

    /// Encryption preference other than `required`, `preferred` or `tolerated`.
    #[error("invalid encryption mode: {0:?}")]
    InvalidEncryption(String),

    /// A time, duration or boolean field carried an unparseable token.
    #[error("invalid scalar value: {0}")]
    InvalidScalar(String),

    /// The response envelope was tagged for a different request.
    #[error("mismatched request and response ids: sent {request}, received {response}")]
    MismatchedIds {
        /// Tag sent with the request.
        request: i64,
        /// Tag found in the response.
        response: i64,
    },

    /// The method accepts exactly one torrent.
    #[error("exactly one torrent id is required, got {0}")]
    SingleTorrentRequired(usize),

    /// The RPC URL could not be assembled or parsed.
    #[error("invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Network-related errors (connection failures, TLS, broken bodies, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// The daemon rejected the credentials.
    #[error("authentication required")]
    Unauthorized,

    /// The final HTTP status was neither 200 nor one of the handled codes.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Every attempt was answered with 409, including the retries.
    #[error("session id still rejected after {0} attempts")]
    SessionIdRetriesExhausted(u32),

    /// The envelope `result` was something other than `success`.
    #[error("server error: {0}")]
    ServerError(String),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The request arguments could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
}

impl Error {
    /// Whether this error belongs to the "request failed" family: network trouble,
    /// a non-success HTTP status or a non-success RPC result.
    pub fn is_request_failed(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::Unauthorized
                | Self::Status(_)
                | Self::SessionIdRetriesExhausted(_)
                | Self::ServerError(_)
                | Self::Decode(_)
        )
    }
}

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn request_failed_family() {
        assert!(Error::Status(500).is_request_failed());
        assert!(Error::ServerError("duplicate torrent".into()).is_request_failed());
        assert!(Error::SessionIdRetriesExhausted(4).is_request_failed());
        assert!(!Error::Cancelled.is_request_failed());
        assert!(!Error::SingleTorrentRequired(2).is_request_failed());
        assert!(!Error::InvalidId("x".into()).is_request_failed());
    }

    #[test]
    fn server_error_keeps_message() {
        let err = Error::ServerError("invalid or corrupt torrent file".into());
        assert_eq!(err.to_string(), "server error: invalid or corrupt torrent file");
    }
}

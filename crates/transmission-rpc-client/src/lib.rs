//! # Transmission RPC client.
//!
//! Talks to a Transmission daemon over its JSON-RPC interface, handling the
//! `X-Transmission-Session-Id` handshake, request tags and typed responses.
//!
//! usage:
//!
//! ```rust,ignore
//! use transmission_rpc_client::{Client, ClientConfig, request::TorrentSet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(ClientConfig::default().with_host("nas.local:9091"))?;
//!
//!     let added = client.torrent_add_magnet("magnet:?xt=urn:btih:...").await?;
//!     let id = added.torrent().id;
//!
//!     client
//!         .torrent_set(&TorrentSet::new([id]).with_upload_limit(50).with_upload_limited(true))
//!         .await?;
//!     for torrent in client.torrent_get_fields([id], ["name", "percentDone"]).await? {
//!         println!("{torrent:?}");
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod envelope;
pub mod request;
mod transport;

#[cfg(test)]
mod testutil;

#[cfg(test)]
use {libc as _, tempfile as _, tracing_subscriber as _};

pub use client::Client;
pub use config::{
    ClientConfig, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PATH, DEFAULT_RETRIES,
    DEFAULT_USERNAME, SESSION_ID_HEADER,
};
pub use envelope::{RequestEnvelope, ResponseEnvelope, SUCCESS, encode_request, parse_response};
pub use tokio_util::sync::CancellationToken;
pub use transmission_rpc_types::{self as types, Error, TorrentId};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

//! Request objects, one per RPC method.
//!
//! A request knows its method name, validates its own arguments and projects them into
//! the JSON `arguments` object. Requests that update settings (`torrent-set`,
//! `session-set`) hold every setting as an `Option`: only the settings that were given a
//! value are sent, because the daemon treats a present key as "overwrite". A settings
//! request with nothing set is skipped without touching the network.
//!
//! ```rust,ignore
//! use transmission_rpc_client::request::TorrentSet;
//!
//! let request = TorrentSet::new([42])
//!     .with_download_limit(100)
//!     .with_download_limited(true);
//! client.send(&request).await?;
//! ```

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use transmission_rpc_types::{Error, TorrentId, normalize_ids};

/// Generates `with_*` setters for `Option` fields of a request.
macro_rules! setters {
    ($($(#[$doc:meta])* $setter:ident => $field:ident: $ty:ty;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $setter(mut self, value: impl Into<$ty>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

mod session;
mod system;
mod torrent;

pub use session::{SessionClose, SessionGet, SessionSet, SessionStats};
pub use system::{BlocklistUpdate, FreeSpace, PortTest};
pub use torrent::{
    QueueDirection, QueueMove, TorrentAction, TorrentActionKind, TorrentAdd, TorrentGet,
    TorrentRemove, TorrentRenamePath, TorrentSet, TorrentSetLocation, TorrentSource,
};

/// JSON object sent as `arguments`.
pub type Arguments = Map<String, Value>;

/// What a prepared request asks the client to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<R> {
    /// Nothing to send; the call resolves to this value without network activity.
    Skip(R),
    /// Send the envelope. `None` means the method takes no arguments; an empty object is
    /// sent in their place.
    Send(Option<Arguments>),
}

/// An RPC method invocation.
pub trait RpcRequest {
    /// Decoded `arguments` of a successful response.
    type Response: DeserializeOwned;

    /// Wire method name.
    fn method(&self) -> &'static str;

    /// Validates the request and projects it into its wire arguments.
    fn prepare(&self) -> Result<Dispatch<Self::Response>, Error>;
}

/// Serializes a request struct into an argument object.
///
/// Unset options are skipped before this point, so a `null` here is a value JSON cannot
/// carry, such as a NaN ratio.
pub(crate) fn to_arguments<S: Serialize>(value: &S) -> Result<Arguments, Error> {
    let map = match serde_json::to_value(value).map_err(|e| Error::Encode(e.to_string()))? {
        Value::Object(map) => map,
        other => {
            return Err(Error::Encode(format!(
                "arguments must be an object, got {other}"
            )));
        }
    };
    if let Some(key) = map.iter().find_map(|(key, value)| value.is_null().then_some(key)) {
        return Err(Error::Encode(format!("`{key}` is not representable in JSON")));
    }
    Ok(map)
}

/// Adds an `ids` entry unless the list is empty, which means "all torrents".
pub(crate) fn insert_ids(arguments: &mut Arguments, ids: &[TorrentId]) -> Result<(), Error> {
    if let Some(ids) = normalize_ids(ids)? {
        let ids = serde_json::to_value(ids).map_err(|e| Error::Encode(e.to_string()))?;
        arguments.insert("ids".to_owned(), ids);
    }
    Ok(())
}

/// Collects caller ids into the validated form.
pub(crate) fn collect_ids<I>(ids: I) -> Vec<TorrentId>
where
    I: IntoIterator,
    I::Item: Into<TorrentId>,
{
    ids.into_iter().map(Into::into).collect()
}

/// Argument object holding only the id list.
pub(crate) fn ids_only(ids: &[TorrentId]) -> Result<Arguments, Error> {
    let mut arguments = Arguments::new();
    insert_ids(&mut arguments, ids)?;
    Ok(arguments)
}

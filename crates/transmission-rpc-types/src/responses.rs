//! Argument payloads of the remaining method responses.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

use crate::{Torrent, TorrentId};

/// Response of `torrent-get`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorrentGetResponse {
    /// Requested torrents, each holding only the requested fields.
    pub torrents: Vec<Torrent>,
    /// Ids removed since the last query; only sent for `recently-active` queries.
    pub removed: Vec<TorrentId>,
}

/// Minimal torrent reference returned by `torrent-add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentRef {
    /// Session-local id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Hex info-hash.
    pub hash_string: String,
}

/// Response of `torrent-add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TorrentAddResponse {
    /// A new torrent was added.
    #[serde(rename = "torrent-added")]
    Added(TorrentRef),
    /// The torrent was already present; nothing changed.
    #[serde(rename = "torrent-duplicate")]
    Duplicate(TorrentRef),
}

impl TorrentAddResponse {
    /// The referenced torrent, new or pre-existing.
    pub fn torrent(&self) -> &TorrentRef {
        match self {
            Self::Added(t) | Self::Duplicate(t) => t,
        }
    }

    /// Whether the torrent was already present.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Response of `torrent-rename-path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedPath {
    /// Torrent id.
    pub id: i64,
    /// Path that was renamed.
    pub path: String,
    /// New name.
    pub name: String,
}

/// Response of `blocklist-update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocklistSize {
    /// Number of rules now in the blocklist.
    #[serde(rename = "blocklist-size")]
    pub size: i64,
}

/// Response of `port-test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortTest {
    /// Whether the peer port is reachable from the outside.
    #[serde(rename = "port-is-open")]
    pub is_open: bool,
    /// `ipv4` or `ipv6` on daemons that report it.
    #[serde(default, rename = "ip_protocol", skip_serializing_if = "Option::is_none")]
    pub ip_protocol: Option<String>,
}

/// Response of `free-space`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSpace {
    /// Queried path.
    pub path: String,
    /// Free bytes at that path.
    #[serde(rename = "size-bytes")]
    pub size_bytes: i64,
    /// Total size of the volume, on daemons that report it.
    #[serde(default, rename = "total_size", skip_serializing_if = "Option::is_none")]
    pub total_size: Option<i64>,
}

/// Arguments of methods that return nothing useful; any payload is accepted and dropped.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Ack;

impl fmt::Debug for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ack")
    }
}

impl<'de> Deserialize<'de> for Ack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer).map(|_| Ack)
    }
}

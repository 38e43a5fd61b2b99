//! Torrent identifiers accepted in the `ids` argument of most methods.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Length of a hex encoded info-hash.
pub const HASH_LEN: usize = 40;

/// Length of the abbreviated hash prefix shown by the daemon's clients.
pub const SHORT_HASH_LEN: usize = 7;

/// Wire spelling of [`TorrentId::RecentlyActive`].
pub const RECENTLY_ACTIVE: &str = "recently-active";

/// Lowercase hex text of a full or abbreviated info-hash.
///
/// Only [`TorrentId::parse`] and the raw info-hash conversion build one, so the text is
/// always valid hex of [`HASH_LEN`] or [`SHORT_HASH_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexHash(String);

impl HexHash {
    /// The hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HexHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry of a torrent identifier list.
///
/// Hash variants can only be built through validation; see [`HexHash`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TorrentId {
    /// Session-local numeric id.
    Id(i64),
    /// 40 character hex info-hash.
    Hash(HexHash),
    /// 7 character hex hash prefix.
    ShortHash(HexHash),
    /// Torrents whose state changed recently.
    RecentlyActive,
}

impl TorrentId {
    /// Parses a string form: a full hash, a short hash or `recently-active`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        if s == RECENTLY_ACTIVE {
            return Ok(Self::RecentlyActive);
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidId(s.to_owned()));
        }
        match s.len() {
            HASH_LEN => Ok(Self::Hash(HexHash(s.to_ascii_lowercase()))),
            SHORT_HASH_LEN => Ok(Self::ShortHash(HexHash(s.to_ascii_lowercase()))),
            _ => Err(Error::InvalidId(s.to_owned())),
        }
    }

    /// Returns the numeric id, if this is one.
    pub fn as_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the hash text of a full or short hash.
    pub fn as_hash(&self) -> Option<&str> {
        match self {
            Self::Hash(hash) | Self::ShortHash(hash) => Some(hash.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for TorrentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Hash(hash) | Self::ShortHash(hash) => f.write_str(hash.as_str()),
            Self::RecentlyActive => f.write_str(RECENTLY_ACTIVE),
        }
    }
}

impl FromStr for TorrentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

macro_rules! lossless_int {
    ($($t:ty),*) => {$(
        impl From<$t> for TorrentId {
            fn from(id: $t) -> Self {
                Self::Id(i64::from(id))
            }
        }
    )*};
}

lossless_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! checked_int {
    ($($t:ty),*) => {$(
        impl TryFrom<$t> for TorrentId {
            type Error = Error;

            fn try_from(id: $t) -> Result<Self, Self::Error> {
                i64::try_from(id)
                    .map(Self::Id)
                    .map_err(|_| Error::InvalidId(id.to_string()))
            }
        }
    )*};
}

checked_int!(u64, usize, isize, i128, u128);

impl TryFrom<&str> for TorrentId {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TorrentId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&String> for TorrentId {
    type Error = Error;

    fn try_from(s: &String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

/// A 40 byte sequence is read as the ASCII spelling of a hash.
impl TryFrom<&[u8]> for TorrentId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != HASH_LEN {
            return Err(Error::InvalidId(format!("{} raw bytes", bytes.len())));
        }
        let s = std::str::from_utf8(bytes)
            .map_err(|_| Error::InvalidId(format!("{bytes:?}")))?;
        Self::parse(s)
    }
}

impl TryFrom<Vec<u8>> for TorrentId {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(bytes.as_slice())
    }
}

/// A binary SHA-1 info-hash.
impl From<[u8; 20]> for TorrentId {
    fn from(info_hash: [u8; 20]) -> Self {
        Self::Hash(HexHash(hex::encode(info_hash)))
    }
}

impl From<&TorrentId> for TorrentId {
    fn from(id: &TorrentId) -> Self {
        id.clone()
    }
}

impl Serialize for TorrentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Id(id) => serializer.serialize_i64(*id),
            Self::Hash(hash) | Self::ShortHash(hash) => serializer.serialize_str(hash.as_str()),
            Self::RecentlyActive => serializer.serialize_str(RECENTLY_ACTIVE),
        }
    }
}

impl<'de> Deserialize<'de> for TorrentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Id(id) => Ok(Self::Id(id)),
            Raw::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Normalises a heterogeneous id list.
///
/// Returns `Ok(None)` for an empty input, which callers turn into an absent `ids`
/// argument ("all torrents"). Any element that does not convert fails the whole list.
pub fn normalize_ids<I>(ids: I) -> Result<Option<Vec<TorrentId>>, Error>
where
    I: IntoIterator,
    I::Item: TryInto<TorrentId>,
    Error: From<<I::Item as TryInto<TorrentId>>::Error>,
{
    let ids = ids
        .into_iter()
        .map(|id| id.try_into().map_err(Error::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((!ids.is_empty()).then_some(ids))
}

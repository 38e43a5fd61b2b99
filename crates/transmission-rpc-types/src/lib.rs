//! # Transmission RPC Types
//!
//! This crate defines the wire data model of the Transmission RPC interface: torrent
//! identifiers, the closed enumerations, scalar wrappers, response payloads and the
//! shared [`Error`] type. It does no I/O; see `transmission-rpc-client` for the transport.

mod enums;
mod error;
mod ids;
mod responses;
mod scalars;
mod session;
mod torrent;

pub use enums::{Encryption, Mode, Priority, TorrentStatus, TrackerState};
pub use error::Error;
pub use ids::{HASH_LEN, HexHash, RECENTLY_ACTIVE, SHORT_HASH_LEN, TorrentId, normalize_ids};
pub use responses::{
    Ack, BlocklistSize, FreeSpace, PortTest, RenamedPath, TorrentAddResponse,
    TorrentGetResponse, TorrentRef,
};
pub use scalars::{Flag, Seconds, UnixTime};
pub use session::{Session, SessionStats, StatsDetails, Units};
pub use torrent::{
    FileStat, Peer, PeersFrom, TORRENT_FIELDS, Torrent, TorrentFile, Tracker, TrackerStat,
};

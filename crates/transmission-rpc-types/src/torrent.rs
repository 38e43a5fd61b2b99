//! Torrent records returned by `torrent-get`.
//!
//! The daemon only echoes the fields that were asked for, so every field of
//! [`Torrent`] is optional.

use serde::{Deserialize, Serialize};

use crate::{Flag, Mode, Priority, Seconds, TorrentId, TorrentStatus, TrackerState, UnixTime};

/// Every field `torrent-get` knows about; requested when the caller does not narrow
/// the list.
pub const TORRENT_FIELDS: &[&str] = &[
    "activityDate",
    "addedDate",
    "bandwidthPriority",
    "comment",
    "corruptEver",
    "creator",
    "dateCreated",
    "desiredAvailable",
    "doneDate",
    "downloadDir",
    "downloadedEver",
    "downloadLimit",
    "downloadLimited",
    "editDate",
    "error",
    "errorString",
    "eta",
    "etaIdle",
    "files",
    "fileStats",
    "hashString",
    "haveUnchecked",
    "haveValid",
    "honorsSessionLimits",
    "id",
    "isFinished",
    "isPrivate",
    "isStalled",
    "labels",
    "leftUntilDone",
    "magnetLink",
    "manualAnnounceTime",
    "maxConnectedPeers",
    "metadataPercentComplete",
    "name",
    "peer-limit",
    "peers",
    "peersConnected",
    "peersFrom",
    "peersGettingFromUs",
    "peersSendingToUs",
    "percentDone",
    "pieces",
    "pieceCount",
    "pieceSize",
    "priorities",
    "queuePosition",
    "rateDownload",
    "rateUpload",
    "recheckProgress",
    "secondsDownloading",
    "secondsSeeding",
    "seedIdleLimit",
    "seedIdleMode",
    "seedRatioLimit",
    "seedRatioMode",
    "sizeWhenDone",
    "startDate",
    "status",
    "torrentFile",
    "totalSize",
    "trackers",
    "trackerStats",
    "uploadedEver",
    "uploadLimit",
    "uploadLimited",
    "uploadRatio",
    "wanted",
    "webseeds",
    "webseedsSendingToUs",
];

/// Torrent information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)] // rationale: field names mirror the RPC field list above
pub struct Torrent {
    pub activity_date: Option<UnixTime>,
    pub added_date: Option<UnixTime>,
    pub bandwidth_priority: Option<Priority>,
    pub comment: Option<String>,
    pub corrupt_ever: Option<i64>,
    pub creator: Option<String>,
    pub date_created: Option<UnixTime>,
    pub desired_available: Option<i64>,
    pub done_date: Option<UnixTime>,
    pub download_dir: Option<String>,
    pub downloaded_ever: Option<i64>,
    pub download_limit: Option<i64>,
    pub download_limited: Option<bool>,
    pub edit_date: Option<UnixTime>,
    pub error: Option<i64>,
    pub error_string: Option<String>,
    pub eta: Option<Seconds>,
    pub eta_idle: Option<Seconds>,
    pub files: Option<Vec<TorrentFile>>,
    pub file_stats: Option<Vec<FileStat>>,
    pub hash_string: Option<String>,
    pub have_unchecked: Option<i64>,
    pub have_valid: Option<i64>,
    pub honors_session_limits: Option<bool>,
    pub id: Option<i64>,
    pub is_finished: Option<bool>,
    pub is_private: Option<bool>,
    pub is_stalled: Option<bool>,
    pub labels: Option<Vec<String>>,
    pub left_until_done: Option<i64>,
    pub magnet_link: Option<String>,
    pub manual_announce_time: Option<UnixTime>,
    pub max_connected_peers: Option<i64>,
    pub metadata_percent_complete: Option<f64>,
    pub name: Option<String>,
    #[serde(rename = "peer-limit")]
    pub peer_limit: Option<i64>,
    pub peers: Option<Vec<Peer>>,
    pub peers_connected: Option<i64>,
    pub peers_from: Option<PeersFrom>,
    pub peers_getting_from_us: Option<i64>,
    pub peers_sending_to_us: Option<i64>,
    pub percent_done: Option<f64>,
    /// Base64 encoded bitfield of the pieces we have.
    pub pieces: Option<String>,
    pub piece_count: Option<i64>,
    pub piece_size: Option<i64>,
    pub priorities: Option<Vec<Priority>>,
    pub queue_position: Option<i64>,
    pub rate_download: Option<i64>,
    pub rate_upload: Option<i64>,
    pub recheck_progress: Option<f64>,
    pub seconds_downloading: Option<i64>,
    pub seconds_seeding: Option<i64>,
    pub seed_idle_limit: Option<i64>,
    pub seed_idle_mode: Option<Mode>,
    pub seed_ratio_limit: Option<f64>,
    pub seed_ratio_mode: Option<Mode>,
    pub size_when_done: Option<i64>,
    pub start_date: Option<UnixTime>,
    pub status: Option<TorrentStatus>,
    pub torrent_file: Option<String>,
    pub total_size: Option<i64>,
    pub trackers: Option<Vec<Tracker>>,
    pub tracker_stats: Option<Vec<TrackerStat>>,
    pub uploaded_ever: Option<i64>,
    pub upload_limit: Option<i64>,
    pub upload_limited: Option<bool>,
    pub upload_ratio: Option<f64>,
    pub wanted: Option<Vec<Flag>>,
    pub webseeds: Option<Vec<String>>,
    pub webseeds_sending_to_us: Option<i64>,
}

impl Torrent {
    /// The most specific identifier available: the hash if it was requested,
    /// otherwise the numeric id.
    pub fn torrent_id(&self) -> Option<TorrentId> {
        self.hash_string
            .as_deref()
            .and_then(|hash| TorrentId::parse(hash).ok())
            .or_else(|| self.id.map(TorrentId::Id))
    }
}

/// A file inside a torrent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TorrentFile {
    pub bytes_completed: i64,
    pub length: i64,
    pub name: String,
}

/// Per-file download settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct FileStat {
    pub bytes_completed: i64,
    pub wanted: Flag,
    pub priority: Priority,
}

/// A connected peer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Peer {
    pub address: String,
    pub client_name: String,
    pub client_is_choked: bool,
    pub client_is_interested: bool,
    pub flag_str: String,
    pub is_downloading_from: bool,
    pub is_encrypted: bool,
    pub is_incoming: bool,
    pub is_uploading_to: bool,
    #[serde(rename = "isUTP")]
    pub is_utp: bool,
    pub peer_is_choked: bool,
    pub peer_is_interested: bool,
    pub port: u16,
    pub progress: f64,
    pub rate_to_client: i64,
    pub rate_to_peer: i64,
}

/// Where the connected peers were discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PeersFrom {
    pub from_cache: i64,
    pub from_dht: i64,
    pub from_incoming: i64,
    pub from_lpd: i64,
    pub from_ltep: i64,
    pub from_pex: i64,
    pub from_tracker: i64,
}

/// A tracker entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Tracker {
    pub announce: String,
    pub id: i64,
    pub scrape: String,
    pub tier: i64,
}

/// Announce and scrape statistics of a tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TrackerStat {
    pub announce: String,
    pub announce_state: TrackerState,
    pub download_count: i64,
    pub has_announced: bool,
    pub has_scraped: bool,
    pub host: String,
    pub id: i64,
    pub is_backup: bool,
    pub last_announce_peer_count: i64,
    pub last_announce_result: String,
    pub last_announce_start_time: UnixTime,
    pub last_announce_succeeded: bool,
    pub last_announce_time: UnixTime,
    pub last_announce_timed_out: bool,
    pub last_scrape_result: String,
    pub last_scrape_start_time: UnixTime,
    pub last_scrape_succeeded: bool,
    pub last_scrape_time: UnixTime,
    pub last_scrape_timed_out: bool,
    pub leecher_count: i64,
    pub next_announce_time: UnixTime,
    pub next_scrape_time: UnixTime,
    pub scrape: String,
    pub scrape_state: TrackerState,
    pub seeder_count: i64,
    pub tier: i64,
}

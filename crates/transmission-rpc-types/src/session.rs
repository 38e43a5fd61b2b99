//! Session level payloads: `session-get` and `session-stats`.

use serde::{Deserialize, Serialize};

use crate::Encryption;

/// Session statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct SessionStats {
    pub active_torrent_count: i64,

    #[serde(rename = "cumulative-stats")]
    pub cumulative_stats: StatsDetails,

    #[serde(rename = "current-stats")]
    pub current_stats: StatsDetails,

    pub download_speed: i64,

    pub paused_torrent_count: i64,

    pub torrent_count: i64,

    pub upload_speed: i64,
}

/// Detailed statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct StatsDetails {
    pub downloaded_bytes: i64,

    pub files_added: i64,

    pub seconds_active: i64,

    pub session_count: i64,

    pub uploaded_bytes: i64,
}

/// Unit labels the daemon uses when formatting sizes and speeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[allow(missing_docs)]
pub struct Units {
    pub speed_units: Vec<String>,
    pub speed_bytes: i64,
    pub size_units: Vec<String>,
    pub size_bytes: i64,
    pub memory_units: Vec<String>,
    pub memory_bytes: i64,
}

/// Session settings as returned by `session-get`.
///
/// Fields are optional because `session-get` accepts a field filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[allow(missing_docs)]
pub struct Session {
    pub alt_speed_down: Option<i64>,
    pub alt_speed_enabled: Option<bool>,
    pub alt_speed_time_begin: Option<i64>,
    pub alt_speed_time_day: Option<i64>,
    pub alt_speed_time_enabled: Option<bool>,
    pub alt_speed_time_end: Option<i64>,
    pub alt_speed_up: Option<i64>,
    pub blocklist_enabled: Option<bool>,
    pub blocklist_size: Option<i64>,
    pub blocklist_url: Option<String>,
    pub cache_size_mb: Option<i64>,
    pub config_dir: Option<String>,
    pub dht_enabled: Option<bool>,
    pub download_dir: Option<String>,
    pub download_dir_free_space: Option<i64>,
    pub download_queue_enabled: Option<bool>,
    pub download_queue_size: Option<i64>,
    pub encryption: Option<Encryption>,
    pub idle_seeding_limit: Option<i64>,
    pub idle_seeding_limit_enabled: Option<bool>,
    pub incomplete_dir: Option<String>,
    pub incomplete_dir_enabled: Option<bool>,
    pub lpd_enabled: Option<bool>,
    pub peer_limit_global: Option<i64>,
    pub peer_limit_per_torrent: Option<i64>,
    pub peer_port: Option<u16>,
    pub peer_port_random_on_start: Option<bool>,
    pub pex_enabled: Option<bool>,
    pub port_forwarding_enabled: Option<bool>,
    pub queue_stalled_enabled: Option<bool>,
    pub queue_stalled_minutes: Option<i64>,
    pub rename_partial_files: Option<bool>,
    pub rpc_version: Option<i64>,
    pub rpc_version_minimum: Option<i64>,
    pub rpc_version_semver: Option<String>,
    pub script_torrent_done_enabled: Option<bool>,
    pub script_torrent_done_filename: Option<String>,
    pub seed_queue_enabled: Option<bool>,
    pub seed_queue_size: Option<i64>,
    #[serde(rename = "seedRatioLimit")]
    pub seed_ratio_limit: Option<f64>,
    #[serde(rename = "seedRatioLimited")]
    pub seed_ratio_limited: Option<bool>,
    pub session_id: Option<String>,
    pub speed_limit_down: Option<i64>,
    pub speed_limit_down_enabled: Option<bool>,
    pub speed_limit_up: Option<i64>,
    pub speed_limit_up_enabled: Option<bool>,
    pub start_added_torrents: Option<bool>,
    pub trash_original_torrent_files: Option<bool>,
    pub units: Option<Units>,
    pub utp_enabled: Option<bool>,
    pub version: Option<String>,
}

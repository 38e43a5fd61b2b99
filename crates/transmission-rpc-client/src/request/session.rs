//! Session-level requests.

use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;

use transmission_rpc_types::{self as types, Ack, Encryption, Error};

use super::{Dispatch, RpcRequest, to_arguments};

/// `session-set`: changes daemon-wide settings.
///
/// Only settings given a value are sent; an empty change set resolves without a request.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)] // same names as the session-get fields
pub struct SessionSet {
    pub alt_speed_down: Option<i64>,
    pub alt_speed_enabled: Option<bool>,
    pub alt_speed_time_begin: Option<i64>,
    pub alt_speed_time_day: Option<i64>,
    pub alt_speed_time_enabled: Option<bool>,
    pub alt_speed_time_end: Option<i64>,
    pub alt_speed_up: Option<i64>,
    pub blocklist_enabled: Option<bool>,
    pub blocklist_url: Option<String>,
    pub cache_size_mb: Option<i64>,
    pub dht_enabled: Option<bool>,
    pub download_dir: Option<String>,
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
    pub script_torrent_done_enabled: Option<bool>,
    pub script_torrent_done_filename: Option<String>,
    pub seed_queue_enabled: Option<bool>,
    pub seed_queue_size: Option<i64>,
    #[serde(rename = "seedRatioLimit")]
    pub seed_ratio_limit: Option<f64>,
    #[serde(rename = "seedRatioLimited")]
    pub seed_ratio_limited: Option<bool>,
    pub speed_limit_down: Option<i64>,
    pub speed_limit_down_enabled: Option<bool>,
    pub speed_limit_up: Option<i64>,
    pub speed_limit_up_enabled: Option<bool>,
    pub start_added_torrents: Option<bool>,
    pub trash_original_torrent_files: Option<bool>,
    pub utp_enabled: Option<bool>,
}

#[allow(missing_docs)]
impl SessionSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        with_alt_speed_down => alt_speed_down: i64;
        with_alt_speed_enabled => alt_speed_enabled: bool;
        with_alt_speed_time_begin => alt_speed_time_begin: i64;
        with_alt_speed_time_day => alt_speed_time_day: i64;
        with_alt_speed_time_enabled => alt_speed_time_enabled: bool;
        with_alt_speed_time_end => alt_speed_time_end: i64;
        with_alt_speed_up => alt_speed_up: i64;
        with_blocklist_enabled => blocklist_enabled: bool;
        with_blocklist_url => blocklist_url: String;
        with_cache_size_mb => cache_size_mb: i64;
        with_dht_enabled => dht_enabled: bool;
        with_download_dir => download_dir: String;
        with_download_queue_enabled => download_queue_enabled: bool;
        with_download_queue_size => download_queue_size: i64;
        with_encryption => encryption: Encryption;
        with_idle_seeding_limit => idle_seeding_limit: i64;
        with_idle_seeding_limit_enabled => idle_seeding_limit_enabled: bool;
        with_incomplete_dir => incomplete_dir: String;
        with_incomplete_dir_enabled => incomplete_dir_enabled: bool;
        with_lpd_enabled => lpd_enabled: bool;
        with_peer_limit_global => peer_limit_global: i64;
        with_peer_limit_per_torrent => peer_limit_per_torrent: i64;
        with_peer_port => peer_port: u16;
        with_peer_port_random_on_start => peer_port_random_on_start: bool;
        with_pex_enabled => pex_enabled: bool;
        with_port_forwarding_enabled => port_forwarding_enabled: bool;
        with_queue_stalled_enabled => queue_stalled_enabled: bool;
        with_queue_stalled_minutes => queue_stalled_minutes: i64;
        with_rename_partial_files => rename_partial_files: bool;
        with_script_torrent_done_enabled => script_torrent_done_enabled: bool;
        with_script_torrent_done_filename => script_torrent_done_filename: String;
        with_seed_queue_enabled => seed_queue_enabled: bool;
        with_seed_queue_size => seed_queue_size: i64;
        with_seed_ratio_limit => seed_ratio_limit: f64;
        with_seed_ratio_limited => seed_ratio_limited: bool;
        with_speed_limit_down => speed_limit_down: i64;
        with_speed_limit_down_enabled => speed_limit_down_enabled: bool;
        with_speed_limit_up => speed_limit_up: i64;
        with_speed_limit_up_enabled => speed_limit_up_enabled: bool;
        with_start_added_torrents => start_added_torrents: bool;
        with_trash_original_torrent_files => trash_original_torrent_files: bool;
        with_utp_enabled => utp_enabled: bool;
    }

    /// Whether no setting has been given a value.
    pub fn is_empty(&self) -> bool {
        to_arguments(self).is_ok_and(|settings| settings.is_empty())
    }
}

impl RpcRequest for SessionSet {
    type Response = Ack;

    fn method(&self) -> &'static str {
        "session-set"
    }

    fn prepare(&self) -> Result<Dispatch<Ack>, Error> {
        let arguments = to_arguments(self)?;
        if arguments.is_empty() {
            return Ok(Dispatch::Skip(Ack));
        }
        Ok(Dispatch::Send(Some(arguments)))
    }
}

/// `session-get`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionGet {
    /// Settings to return; empty returns all of them.
    pub fields: Vec<String>,
}

impl SessionGet {
    /// Requests every setting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests only the named settings.
    #[must_use]
    pub fn with_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

impl RpcRequest for SessionGet {
    type Response = types::Session;

    fn method(&self) -> &'static str {
        "session-get"
    }

    fn prepare(&self) -> Result<Dispatch<types::Session>, Error> {
        if self.fields.is_empty() {
            return Ok(Dispatch::Send(None));
        }
        let mut arguments = super::Arguments::new();
        arguments.insert(
            "fields".to_owned(),
            Value::from(self.fields.iter().map(String::as_str).collect::<Vec<_>>()),
        );
        Ok(Dispatch::Send(Some(arguments)))
    }
}

/// `session-stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats;

impl RpcRequest for SessionStats {
    type Response = types::SessionStats;

    fn method(&self) -> &'static str {
        "session-stats"
    }

    fn prepare(&self) -> Result<Dispatch<types::SessionStats>, Error> {
        Ok(Dispatch::Send(None))
    }
}

/// `session-close`: asks the daemon to shut down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionClose;

impl RpcRequest for SessionClose {
    type Response = Ack;

    fn method(&self) -> &'static str {
        "session-close"
    }

    fn prepare(&self) -> Result<Dispatch<Ack>, Error> {
        Ok(Dispatch::Send(None))
    }
}

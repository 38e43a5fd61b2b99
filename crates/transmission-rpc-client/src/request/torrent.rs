//! Torrent-level requests.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;

use transmission_rpc_types::{
    Ack, Error, Mode, Priority, RECENTLY_ACTIVE, RenamedPath, TORRENT_FIELDS,
    TorrentAddResponse, TorrentGetResponse, TorrentId,
};

use super::{Dispatch, RpcRequest, collect_ids, ids_only, insert_ids, to_arguments};

/// Torrent state transitions that take nothing but ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorrentActionKind {
    /// `torrent-start`
    Start,
    /// `torrent-start-now`, bypassing the queue.
    StartNow,
    /// `torrent-stop`
    Stop,
    /// `torrent-verify`
    Verify,
    /// `torrent-reannounce`
    Reannounce,
}

impl TorrentActionKind {
    /// Wire method name.
    pub fn method(self) -> &'static str {
        match self {
            Self::Start => "torrent-start",
            Self::StartNow => "torrent-start-now",
            Self::Stop => "torrent-stop",
            Self::Verify => "torrent-verify",
            Self::Reannounce => "torrent-reannounce",
        }
    }
}

/// Start, stop, verify or reannounce torrents. No ids means every torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentAction {
    /// What to do.
    pub kind: TorrentActionKind,
    /// Target torrents.
    pub ids: Vec<TorrentId>,
}

impl TorrentAction {
    /// Creates the request.
    pub fn new<I>(kind: TorrentActionKind, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        Self {
            kind,
            ids: collect_ids(ids),
        }
    }
}

impl RpcRequest for TorrentAction {
    type Response = Ack;

    fn method(&self) -> &'static str {
        self.kind.method()
    }

    fn prepare(&self) -> Result<Dispatch<Ack>, Error> {
        Ok(Dispatch::Send(Some(ids_only(&self.ids)?)))
    }
}

/// Queue movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueDirection {
    /// `queue-move-top`
    Top,
    /// `queue-move-up`
    Up,
    /// `queue-move-down`
    Down,
    /// `queue-move-bottom`
    Bottom,
}

/// Moves torrents within the download/seed queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMove {
    /// Where to move.
    pub direction: QueueDirection,
    /// Torrents to move.
    pub ids: Vec<TorrentId>,
}

impl QueueMove {
    /// Creates the request.
    pub fn new<I>(direction: QueueDirection, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        Self {
            direction,
            ids: collect_ids(ids),
        }
    }
}

impl RpcRequest for QueueMove {
    type Response = Ack;

    fn method(&self) -> &'static str {
        match self.direction {
            QueueDirection::Top => "queue-move-top",
            QueueDirection::Up => "queue-move-up",
            QueueDirection::Down => "queue-move-down",
            QueueDirection::Bottom => "queue-move-bottom",
        }
    }

    fn prepare(&self) -> Result<Dispatch<Ack>, Error> {
        Ok(Dispatch::Send(Some(ids_only(&self.ids)?)))
    }
}

/// `torrent-set`: changes per-torrent settings.
///
/// Only settings given a value are sent. Settings can be filled through the `with_*`
/// setters or with struct update syntax.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentSet {
    /// Target torrents. Empty means every torrent.
    #[serde(skip)]
    pub ids: Vec<TorrentId>,
    /// Bandwidth priority.
    pub bandwidth_priority: Option<Priority>,
    /// Download limit in KB/s.
    pub download_limit: Option<i64>,
    /// Whether `download_limit` is honoured.
    pub download_limited: Option<bool>,
    /// Indices of files to download.
    #[serde(rename = "files-wanted")]
    pub files_wanted: Option<Vec<i64>>,
    /// Indices of files to skip.
    #[serde(rename = "files-unwanted")]
    pub files_unwanted: Option<Vec<i64>>,
    /// Bandwidth group name.
    pub group: Option<String>,
    /// Whether session-wide limits apply.
    pub honors_session_limits: Option<bool>,
    /// Replaces the torrent's labels.
    pub labels: Option<Vec<String>>,
    /// New data location (without moving data).
    pub location: Option<String>,
    /// Maximum peers.
    #[serde(rename = "peer-limit")]
    pub peer_limit: Option<i64>,
    /// Indices of high priority files.
    #[serde(rename = "priority-high")]
    pub priority_high: Option<Vec<i64>>,
    /// Indices of low priority files.
    #[serde(rename = "priority-low")]
    pub priority_low: Option<Vec<i64>>,
    /// Indices of normal priority files.
    #[serde(rename = "priority-normal")]
    pub priority_normal: Option<Vec<i64>>,
    /// Position in the queue.
    pub queue_position: Option<i64>,
    /// Idle minutes before seeding stops.
    pub seed_idle_limit: Option<i64>,
    /// Which idle limit applies.
    pub seed_idle_mode: Option<Mode>,
    /// Ratio at which seeding stops.
    pub seed_ratio_limit: Option<f64>,
    /// Which ratio limit applies.
    pub seed_ratio_mode: Option<Mode>,
    /// Download pieces in order.
    pub sequential_download: Option<bool>,
    /// Announce URLs to add.
    pub tracker_add: Option<Vec<String>>,
    /// Tracker ids to remove.
    pub tracker_remove: Option<Vec<i64>>,
    /// Complete tracker list, tiers separated by blank lines.
    pub tracker_list: Option<String>,
    /// Upload limit in KB/s.
    pub upload_limit: Option<i64>,
    /// Whether `upload_limit` is honoured.
    pub upload_limited: Option<bool>,
}

impl TorrentSet {
    /// Creates an empty change set for the given torrents.
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        Self {
            ids: collect_ids(ids),
            ..Default::default()
        }
    }

    setters! {
        /// Sets the bandwidth priority.
        with_bandwidth_priority => bandwidth_priority: Priority;
        /// Sets the download limit in KB/s.
        with_download_limit => download_limit: i64;
        /// Enables or disables the download limit.
        with_download_limited => download_limited: bool;
        /// Marks files as wanted.
        with_files_wanted => files_wanted: Vec<i64>;
        /// Marks files as unwanted.
        with_files_unwanted => files_unwanted: Vec<i64>;
        /// Assigns a bandwidth group.
        with_group => group: String;
        /// Whether session limits apply.
        with_honors_session_limits => honors_session_limits: bool;
        /// Replaces the labels.
        with_labels => labels: Vec<String>;
        /// Points the torrent at a new location.
        with_location => location: String;
        /// Sets the peer limit.
        with_peer_limit => peer_limit: i64;
        /// Raises file priorities.
        with_priority_high => priority_high: Vec<i64>;
        /// Lowers file priorities.
        with_priority_low => priority_low: Vec<i64>;
        /// Resets file priorities.
        with_priority_normal => priority_normal: Vec<i64>;
        /// Moves the torrent in the queue.
        with_queue_position => queue_position: i64;
        /// Sets the idle seeding limit in minutes.
        with_seed_idle_limit => seed_idle_limit: i64;
        /// Selects the idle limit mode.
        with_seed_idle_mode => seed_idle_mode: Mode;
        /// Sets the seed ratio limit.
        with_seed_ratio_limit => seed_ratio_limit: f64;
        /// Selects the ratio limit mode.
        with_seed_ratio_mode => seed_ratio_mode: Mode;
        /// Enables sequential download.
        with_sequential_download => sequential_download: bool;
        /// Adds trackers.
        with_tracker_add => tracker_add: Vec<String>;
        /// Removes trackers by id.
        with_tracker_remove => tracker_remove: Vec<i64>;
        /// Replaces the tracker list.
        with_tracker_list => tracker_list: String;
        /// Sets the upload limit in KB/s.
        with_upload_limit => upload_limit: i64;
        /// Enables or disables the upload limit.
        with_upload_limited => upload_limited: bool;
    }

    /// Whether no setting has been given a value.
    pub fn is_empty(&self) -> bool {
        to_arguments(self).is_ok_and(|settings| settings.is_empty())
    }
}

impl RpcRequest for TorrentSet {
    type Response = Ack;

    fn method(&self) -> &'static str {
        "torrent-set"
    }

    fn prepare(&self) -> Result<Dispatch<Ack>, Error> {
        let mut arguments = to_arguments(self)?;
        if arguments.is_empty() {
            return Ok(Dispatch::Skip(Ack));
        }
        insert_ids(&mut arguments, &self.ids)?;
        Ok(Dispatch::Send(Some(arguments)))
    }
}

/// `torrent-get`: fetches torrent records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentGet {
    /// Torrents to fetch. Empty means every torrent.
    pub ids: Vec<TorrentId>,
    /// Field names to return.
    pub fields: Vec<String>,
}

impl TorrentGet {
    /// Fetches every known field of the given torrents.
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        Self {
            ids: collect_ids(ids),
            fields: TORRENT_FIELDS.iter().map(|f| (*f).to_owned()).collect(),
        }
    }

    /// Torrents changed recently, plus the ids of recently removed ones.
    pub fn recently_active() -> Self {
        Self::new([TorrentId::RecentlyActive])
    }

    /// Narrows the returned fields.
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

impl RpcRequest for TorrentGet {
    type Response = TorrentGetResponse;

    fn method(&self) -> &'static str {
        "torrent-get"
    }

    fn prepare(&self) -> Result<Dispatch<TorrentGetResponse>, Error> {
        let mut arguments = ids_only(&self.ids)?;
        arguments.insert(
            "fields".to_owned(),
            Value::from(self.fields.iter().map(String::as_str).collect::<Vec<_>>()),
        );
        Ok(Dispatch::Send(Some(arguments)))
    }
}

/// Where a new torrent comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum TorrentSource {
    /// A path on the daemon host, an HTTP(S) URL or a magnet link.
    Filename(String),
    /// Contents of a `.torrent` file.
    Metainfo(Vec<u8>),
}

impl std::fmt::Debug for TorrentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filename(name) => f.debug_tuple("Filename").field(name).finish(),
            Self::Metainfo(bytes) => write!(f, "Metainfo(<{} bytes>)", bytes.len()),
        }
    }
}

impl Default for TorrentSource {
    fn default() -> Self {
        Self::Filename(String::new())
    }
}

/// `torrent-add`: adds a torrent from a file, URL, magnet link or raw metainfo.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TorrentAdd {
    /// Torrent to add.
    #[serde(skip)]
    pub source: TorrentSource,
    /// Cookie header sent when fetching a URL.
    pub cookies: Option<String>,
    /// Directory to download into.
    pub download_dir: Option<String>,
    /// Initial labels.
    pub labels: Option<Vec<String>>,
    /// Add without starting.
    pub paused: Option<bool>,
    /// Maximum peers.
    pub peer_limit: Option<i64>,
    /// Bandwidth priority.
    #[serde(rename = "bandwidthPriority")]
    pub bandwidth_priority: Option<Priority>,
    /// Indices of files to download.
    pub files_wanted: Option<Vec<i64>>,
    /// Indices of files to skip.
    pub files_unwanted: Option<Vec<i64>>,
    /// Indices of high priority files.
    pub priority_high: Option<Vec<i64>>,
    /// Indices of low priority files.
    pub priority_low: Option<Vec<i64>>,
    /// Indices of normal priority files.
    pub priority_normal: Option<Vec<i64>>,
}

impl TorrentAdd {
    /// Adds by path, URL or magnet link.
    pub fn filename(filename: impl Into<String>) -> Self {
        Self {
            source: TorrentSource::Filename(filename.into()),
            ..Default::default()
        }
    }

    /// Adds from `.torrent` file contents.
    pub fn metainfo(metainfo: impl Into<Vec<u8>>) -> Self {
        Self {
            source: TorrentSource::Metainfo(metainfo.into()),
            ..Default::default()
        }
    }

    setters! {
        /// Sets the cookie header for URL downloads.
        with_cookies => cookies: String;
        /// Sets the download directory.
        with_download_dir => download_dir: String;
        /// Sets initial labels.
        with_labels => labels: Vec<String>;
        /// Adds the torrent paused (or explicitly started).
        with_paused => paused: bool;
        /// Sets the peer limit.
        with_peer_limit => peer_limit: i64;
        /// Sets the bandwidth priority.
        with_bandwidth_priority => bandwidth_priority: Priority;
        /// Selects files to download.
        with_files_wanted => files_wanted: Vec<i64>;
        /// Selects files to skip.
        with_files_unwanted => files_unwanted: Vec<i64>;
        /// Raises file priorities.
        with_priority_high => priority_high: Vec<i64>;
        /// Lowers file priorities.
        with_priority_low => priority_low: Vec<i64>;
        /// Resets file priorities.
        with_priority_normal => priority_normal: Vec<i64>;
    }
}

impl RpcRequest for TorrentAdd {
    type Response = TorrentAddResponse;

    fn method(&self) -> &'static str {
        "torrent-add"
    }

    fn prepare(&self) -> Result<Dispatch<TorrentAddResponse>, Error> {
        let mut arguments = to_arguments(self)?;
        match &self.source {
            TorrentSource::Filename(name) if !name.is_empty() => {
                arguments.insert("filename".to_owned(), Value::from(name.as_str()));
            }
            TorrentSource::Metainfo(bytes) if !bytes.is_empty() => {
                arguments.insert("metainfo".to_owned(), Value::from(STANDARD.encode(bytes)));
            }
            _ => return Err(Error::Encode("torrent-add needs a filename or metainfo".into())),
        }
        Ok(Dispatch::Send(Some(arguments)))
    }
}

/// `torrent-remove`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentRemove {
    /// Torrents to remove. Empty means every torrent.
    pub ids: Vec<TorrentId>,
    /// Also delete downloaded data.
    pub delete_local_data: bool,
}

impl TorrentRemove {
    /// Creates the request.
    pub fn new<I>(ids: I, delete_local_data: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        Self {
            ids: collect_ids(ids),
            delete_local_data,
        }
    }
}

impl RpcRequest for TorrentRemove {
    type Response = Ack;

    fn method(&self) -> &'static str {
        "torrent-remove"
    }

    fn prepare(&self) -> Result<Dispatch<Ack>, Error> {
        let mut arguments = ids_only(&self.ids)?;
        arguments.insert(
            "delete-local-data".to_owned(),
            Value::from(self.delete_local_data),
        );
        Ok(Dispatch::Send(Some(arguments)))
    }
}

/// `torrent-set-location`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentSetLocation {
    /// Torrents to relocate.
    pub ids: Vec<TorrentId>,
    /// New location.
    pub location: String,
    /// Move the data instead of only looking for it there.
    pub move_data: bool,
}

impl TorrentSetLocation {
    /// Creates the request.
    pub fn new<I>(ids: I, location: impl Into<String>, move_data: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        Self {
            ids: collect_ids(ids),
            location: location.into(),
            move_data,
        }
    }
}

impl RpcRequest for TorrentSetLocation {
    type Response = Ack;

    fn method(&self) -> &'static str {
        "torrent-set-location"
    }

    fn prepare(&self) -> Result<Dispatch<Ack>, Error> {
        let mut arguments = ids_only(&self.ids)?;
        arguments.insert("location".to_owned(), Value::from(self.location.as_str()));
        arguments.insert("move".to_owned(), Value::from(self.move_data));
        Ok(Dispatch::Send(Some(arguments)))
    }
}

/// `torrent-rename-path`: renames a file or directory inside one torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentRenamePath {
    /// Must hold exactly one torrent.
    pub ids: Vec<TorrentId>,
    /// Path inside the torrent.
    pub path: String,
    /// New last path component.
    pub name: String,
}

impl TorrentRenamePath {
    /// Creates the request. The id is checked when the request is sent.
    pub fn new<I>(ids: I, path: impl Into<String>, name: impl Into<String>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        Self {
            ids: collect_ids(ids),
            path: path.into(),
            name: name.into(),
        }
    }
}

impl RpcRequest for TorrentRenamePath {
    type Response = RenamedPath;

    fn method(&self) -> &'static str {
        "torrent-rename-path"
    }

    fn prepare(&self) -> Result<Dispatch<RenamedPath>, Error> {
        match self.ids.as_slice() {
            [TorrentId::RecentlyActive] => {
                return Err(Error::InvalidId(RECENTLY_ACTIVE.to_owned()));
            }
            [_] => {}
            ids => return Err(Error::SingleTorrentRequired(ids.len())),
        }
        let mut arguments = ids_only(&self.ids)?;
        arguments.insert("path".to_owned(), Value::from(self.path.as_str()));
        arguments.insert("name".to_owned(), Value::from(self.name.as_str()));
        Ok(Dispatch::Send(Some(arguments)))
    }
}

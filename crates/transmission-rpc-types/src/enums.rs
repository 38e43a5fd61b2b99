//! Closed enumerations of the RPC interface.
//!
//! Integer-coded enums decode through `TryFrom<i64>`, so any value outside the set is
//! rejected with the matching `Invalid*` error instead of being silently accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Activity state of a torrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TorrentStatus {
    /// Paused.
    Stopped,
    /// Queued for verification.
    CheckWait,
    /// Verifying local data.
    Checking,
    /// Queued for download.
    DownloadWait,
    /// Downloading.
    Downloading,
    /// Queued for seeding.
    SeedWait,
    /// Seeding.
    Seeding,
}

impl TryFrom<i64> for TorrentStatus {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Stopped,
            1 => Self::CheckWait,
            2 => Self::Checking,
            3 => Self::DownloadWait,
            4 => Self::Downloading,
            5 => Self::SeedWait,
            6 => Self::Seeding,
            other => return Err(Error::InvalidStatus(other)),
        })
    }
}

impl From<TorrentStatus> for i64 {
    fn from(status: TorrentStatus) -> Self {
        status as i64
    }
}

impl fmt::Display for TorrentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stopped => "stopped",
            Self::CheckWait => "queued to verify",
            Self::Checking => "verifying",
            Self::DownloadWait => "queued to download",
            Self::Downloading => "downloading",
            Self::SeedWait => "queued to seed",
            Self::Seeding => "seeding",
        })
    }
}

/// File and bandwidth priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    /// `-1`
    Low,
    /// `0`
    #[default]
    Normal,
    /// `1`
    High,
}

impl TryFrom<i64> for Priority {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Low),
            0 => Ok(Self::Normal),
            1 => Ok(Self::High),
            other => Err(Error::InvalidPriority(other)),
        }
    }
}

impl From<Priority> for i64 {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Low => -1,
            Priority::Normal => 0,
            Priority::High => 1,
        }
    }
}

/// Whether a seed idle or ratio limit follows the session, the torrent, or nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Mode {
    /// Follow the session-wide setting.
    #[default]
    Global,
    /// Use the torrent's own limit.
    Single,
    /// No limit.
    Unlimited,
}

impl TryFrom<i64> for Mode {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Global),
            1 => Ok(Self::Single),
            2 => Ok(Self::Unlimited),
            other => Err(Error::InvalidMode(other)),
        }
    }
}

impl From<Mode> for i64 {
    fn from(mode: Mode) -> Self {
        mode as i64
    }
}

/// Announce or scrape state of a tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TrackerState {
    /// Nothing scheduled.
    #[default]
    Inactive,
    /// Waiting for the next slot.
    Waiting,
    /// Queued.
    Queued,
    /// In progress.
    Active,
}

impl TryFrom<i64> for TrackerState {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Waiting),
            2 => Ok(Self::Queued),
            3 => Ok(Self::Active),
            other => Err(Error::InvalidTrackerState(other)),
        }
    }
}

impl From<TrackerState> for i64 {
    fn from(state: TrackerState) -> Self {
        state as i64
    }
}

/// Peer connection encryption preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Encryption {
    /// Only encrypted peers.
    Required,
    /// Prefer encryption, allow plaintext.
    Preferred,
    /// Prefer plaintext, allow encryption.
    Tolerated,
}

impl Encryption {
    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Preferred => "preferred",
            Self::Tolerated => "tolerated",
        }
    }
}

impl TryFrom<String> for Encryption {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "required" => Ok(Self::Required),
            "preferred" => Ok(Self::Preferred),
            "tolerated" => Ok(Self::Tolerated),
            _ => Err(Error::InvalidEncryption(value)),
        }
    }
}

impl From<Encryption> for String {
    fn from(encryption: Encryption) -> Self {
        encryption.as_str().to_owned()
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

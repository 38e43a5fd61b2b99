//! Scalar wrappers for fields whose wire encoding needs interpretation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value;

use crate::Error;

fn integer(value: &Value, what: &str) -> Result<i64, Error> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(|| Error::InvalidScalar(format!("{what}: {n}"))),
        other => Err(Error::InvalidScalar(format!("{what}: {other}"))),
    }
}

/// Seconds since the Unix epoch, where `0` means "never".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnixTime(pub i64);

impl UnixTime {
    /// The timestamp as a [`SystemTime`], or `None` for the "never" sentinel.
    pub fn to_system_time(self) -> Option<SystemTime> {
        match u64::try_from(self.0) {
            Ok(0) | Err(_) => None,
            Ok(secs) => UNIX_EPOCH.checked_add(Duration::from_secs(secs)),
        }
    }
}

impl TryFrom<&Value> for UnixTime {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        integer(value, "timestamp").map(Self)
    }
}

impl Serialize for UnixTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for UnixTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(&value).map_err(de::Error::custom)
    }
}

/// A duration in whole seconds.
///
/// The daemon reports negative values for "not available" (`-1`) and "unknown" (`-2`);
/// those decode to the dedicated variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seconds {
    /// A known duration.
    Known(Duration),
    /// `-1`
    NotAvailable,
    /// `-2` and any other negative value.
    Unknown,
}

impl Seconds {
    /// The duration, if known.
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::Known(d) => Some(d),
            _ => None,
        }
    }
}

impl TryFrom<&Value> for Seconds {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(match integer(value, "duration")? {
            -1 => Self::NotAvailable,
            secs if secs < 0 => Self::Unknown,
            secs => Self::Known(Duration::from_secs(secs.unsigned_abs())),
        })
    }
}

impl Serialize for Seconds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(d) => serializer.serialize_u64(d.as_secs()),
            Self::NotAvailable => serializer.serialize_i64(-1),
            Self::Unknown => serializer.serialize_i64(-2),
        }
    }
}

impl<'de> Deserialize<'de> for Seconds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(&value).map_err(de::Error::custom)
    }
}

/// A boolean that older daemons sometimes send as `0`/`1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flag(pub bool);

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        flag.0
    }
}

impl TryFrom<&Value> for Flag {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(Self(*b)),
            Value::Number(n) if n.as_i64() == Some(0) => Ok(Self(false)),
            Value::Number(n) if n.as_i64() == Some(1) => Ok(Self(true)),
            other => Err(Error::InvalidScalar(format!("bool: {other}"))),
        }
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unix_time_never() {
        assert_eq!(UnixTime(0).to_system_time(), None);
        assert_eq!(
            UnixTime(10).to_system_time(),
            Some(UNIX_EPOCH + Duration::from_secs(10))
        );
    }

    #[test]
    fn seconds_sentinels() {
        assert_eq!(Seconds::try_from(&json!(-1)), Ok(Seconds::NotAvailable));
        assert_eq!(Seconds::try_from(&json!(-2)), Ok(Seconds::Unknown));
        assert_eq!(
            Seconds::try_from(&json!(90)).map(Seconds::duration),
            Ok(Some(Duration::from_secs(90)))
        );
    }

    #[test]
    fn flag_accepts_integers() {
        assert_eq!(serde_json::from_value::<Flag>(json!(1)).unwrap(), Flag(true));
        assert_eq!(serde_json::from_value::<Flag>(json!(false)).unwrap(), Flag(false));
        assert!(matches!(
            Flag::try_from(&json!("yes")),
            Err(Error::InvalidScalar(_))
        ));
        assert!(matches!(Flag::try_from(&json!(2)), Err(Error::InvalidScalar(_))));
    }

    #[test]
    fn unparseable_timestamp() {
        let err = serde_json::from_value::<UnixTime>(json!("yesterday")).unwrap_err();
        assert!(err.to_string().contains("invalid scalar value"));
    }
}

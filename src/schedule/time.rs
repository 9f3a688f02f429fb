//! Minute-precision wall-clock times.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A local wall-clock time with minute precision, rendered as `HH:MM`.
///
/// Ordering follows the time of day, so lessons can be sorted directly by
/// their start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Create a time from hours and minutes.
    ///
    /// Out-of-range components are only rejected by [`ClockTime::try_new`];
    /// this constructor exists for the static schedule tables.
    pub const fn new(hours: u8, minutes: u8) -> Self {
        Self(hours as u16 * 60 + minutes as u16)
    }

    /// Create a time, rejecting hours above 23 or minutes above 59.
    pub fn try_new(hours: u8, minutes: u8) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(Self::new(hours, minutes))
        } else {
            None
        }
    }

    /// Hour component (0-23).
    pub const fn hours(self) -> u8 {
        (self.0 / 60) as u8
    }

    /// Minute component (0-59).
    pub const fn minutes(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Minutes since midnight.
    pub const fn minutes_since_midnight(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if m.len() != 2 {
            return Err(invalid());
        }
        let hours: u8 = h.parse().map_err(|_| invalid())?;
        let minutes: u8 = m.parse().map_err(|_| invalid())?;
        Self::try_new(hours, minutes).ok_or_else(invalid)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_components() {
        assert_eq!(ClockTime::new(7, 50).to_string(), "07:50");
        assert_eq!(ClockTime::new(13, 5).to_string(), "13:05");
    }

    #[test]
    fn test_parse() {
        let t: ClockTime = "08:45".parse().unwrap();
        assert_eq!(t, ClockTime::new(8, 45));
        assert_eq!(t.minutes_since_midnight(), 525);
        assert_eq!("8:45".parse::<ClockTime>().unwrap(), t);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("0845".parse::<ClockTime>().is_err());
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("10:60".parse::<ClockTime>().is_err());
        assert!("10:5".parse::<ClockTime>().is_err());
        assert!("ab:cd".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(ClockTime::new(10, 25) < ClockTime::new(10, 30));
        assert!(ClockTime::new(9, 59) < ClockTime::new(10, 0));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&ClockTime::new(12, 10)).unwrap();
        assert_eq!(json, "\"12:10\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClockTime::new(12, 10));
    }
}

//! Wire calendar types.
//!
//! The appointment API carries dates as literal `DD-MM-YYYY` strings and
//! times as literal `HH:MM` strings. Both formats must round-trip losslessly:
//! parsing accepts only the zero-padded form, and formatting reproduces the
//! exact input. Ordering is calendar ordering for dates and
//! minutes-since-midnight for times.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// The only date format accepted or produced on the wire.
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Errors from parsing wire-format dates and times.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireFormatError {
    #[error("Invalid wire date {0:?}: expected DD-MM-YYYY")]
    Date(String),
    #[error("Invalid wire time {0:?}: expected HH:MM")]
    Time(String),
}

// ─── WireDate ─────────────────────────────────────────────────────────────────

/// A calendar date as carried on the wire (`DD-MM-YYYY`).
///
/// Comparison is calendar comparison, time-zone-naive. "Upcoming" decisions
/// compare whole dates only, never instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WireDate(NaiveDate);

impl WireDate {
    /// Build a date from year/month/day. `None` for out-of-range components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The local calendar date, normalized to a whole day.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// The following calendar day.
    pub fn next_day(self) -> Self {
        Self(self.0.succ_opt().expect("calendar overflow"))
    }

    /// Day of week, for display labelling.
    pub fn weekday(self) -> chrono::Weekday {
        self.0.weekday()
    }

    /// Day and month, zero-padded, for short display labels.
    pub fn day_month(self) -> (u32, u32) {
        (self.0.day(), self.0.month())
    }
}

impl FromStr for WireDate {
    type Err = WireFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|_| WireFormatError::Date(s.to_string()))?;
        // chrono accepts unpadded components; the wire format does not.
        if parsed.format(DATE_FORMAT).to_string() != s {
            return Err(WireFormatError::Date(s.to_string()));
        }
        Ok(Self(parsed))
    }
}

impl fmt::Display for WireDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl TryFrom<String> for WireDate {
    type Error = WireFormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WireDate> for String {
    fn from(date: WireDate) -> Self {
        date.to_string()
    }
}

// ─── WireTime ─────────────────────────────────────────────────────────────────

/// A clock time as carried on the wire (`HH:MM`), compared as
/// minutes-since-midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WireTime {
    minutes: u16,
}

impl WireTime {
    /// Build a time from hour and minute components.
    ///
    /// Const so the fixed slot lists can live in constants. Panics (at
    /// compile time for const uses) on out-of-range components.
    pub const fn from_hm(hours: u16, minutes: u16) -> Self {
        assert!(hours < 24 && minutes < 60);
        Self {
            minutes: hours * 60 + minutes,
        }
    }

    /// Minutes elapsed since midnight. The sort key for tie-breaking
    /// appointments on the same date.
    pub fn minutes_from_midnight(self) -> u16 {
        self.minutes
    }
}

impl FromStr for WireTime {
    type Err = WireFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = s.split_once(':').and_then(|(h, m)| {
            let canonical = h.len() == 2
                && m.len() == 2
                && h.bytes().all(|b| b.is_ascii_digit())
                && m.bytes().all(|b| b.is_ascii_digit());
            if !canonical {
                return None;
            }
            Some((h.parse::<u16>().ok()?, m.parse::<u16>().ok()?))
        });
        match parsed {
            Some((hh, mm)) if hh < 24 && mm < 60 => Ok(Self::from_hm(hh, mm)),
            _ => Err(WireFormatError::Time(s.to_string())),
        }
    }
}

impl fmt::Display for WireTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

impl TryFrom<String> for WireTime {
    type Error = WireFormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WireTime> for String {
    fn from(time: WireTime) -> Self {
        time.to_string()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

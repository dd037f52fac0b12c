use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use thiserror::Error;

/// Number of minutes in a civil day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A civil time of day at minute granularity, stored as minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOfDay(u16);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time of day: {0:?}")]
pub struct ParseTimeError(String);

impl MinuteOfDay {
    pub fn new(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self(hour * 60 + minute))
    }

    /// Reads a minute count stored in a `smallint` column
    pub fn from_column(minutes: i16) -> Option<Self> {
        u16::try_from(minutes).ok().and_then(Self::new)
    }

    /// The value written to a `smallint` column; always in `0..1440`
    pub fn to_column(self) -> i16 {
        self.0 as i16
    }

    fn hour(self) -> u16 {
        self.0 / 60
    }

    fn minute(self) -> u16 {
        self.0 % 60
    }
}

/// Reads exactly `min..=max` ASCII digits
fn digits(s: &str, min: usize, max: usize) -> Option<u16> {
    let valid = (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit());
    valid.then(|| s.parse().ok()).flatten()
}

impl FromStr for MinuteOfDay {
    type Err = ParseTimeError;

    /// Accepts `HH:MM`, `H:MM` and `HH:MM:SS`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeError(s.to_owned());

        let mut parts = s.trim().split(':');
        let hour = parts.next().and_then(|h| digits(h, 1, 2)).ok_or_else(err)?;
        let minute = parts.next().and_then(|m| digits(m, 2, 2)).ok_or_else(err)?;

        if let Some(seconds) = parts.next() {
            digits(seconds, 2, 2)
                .filter(|&secs| secs < 60)
                .ok_or_else(err)?;
        }
        if parts.next().is_some() {
            return Err(err());
        }

        Self::from_hm(hour, minute).ok_or_else(err)
    }
}

impl Display for MinuteOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for MinuteOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MinuteOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A non-empty `[start, end)` interval within one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    start: MinuteOfDay,
    end: MinuteOfDay,
}

impl TimeSlot {
    /// Creates a new `TimeSlot` if `start` is before `end`
    pub fn new(start: MinuteOfDay, end: MinuteOfDay) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Rebuilds a slot from its stored minute columns
    pub fn from_columns(start: i16, end: i16) -> Option<Self> {
        Self::new(MinuteOfDay::from_column(start)?, MinuteOfDay::from_column(end)?)
    }

    pub fn start(&self) -> MinuteOfDay {
        self.start
    }

    pub fn end(&self) -> MinuteOfDay {
        self.end
    }

    /// Half-open overlap: a slot ending at 10:00 does not overlap one starting at 10:00
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}-{}", self.start, self.end)
    }
}

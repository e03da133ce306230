//! Minute-of-day arithmetic and the time-window filter.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use thiserror::Error;

/// Number of one-minute slots in a day.
pub const MINUTES_PER_DAY: usize = 1440;

/// Half-width of the window selected around a center minute.
pub const WINDOW_HALF_WIDTH: usize = 60;

/// Value the slider reports when no time is selected.
pub const SLIDER_ANY_TIME: i32 = -1;

/// A wall-clock minute within a day, always in `0..1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Returns `None` when `minute` falls outside `0..1440`.
    pub fn new(minute: i64) -> Option<Self> {
        if (0..MINUTES_PER_DAY as i64).contains(&minute) {
            Some(Self(minute as u16))
        } else {
            None
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// `hour * 60 + minute` of a timestamp; the date is discarded.
pub fn minutes_since_midnight(ts: &NaiveDateTime) -> i64 {
    i64::from(ts.hour()) * 60 + i64::from(ts.minute())
}

/// Formats a minute of the day the way the slider label shows it, e.g. `8:05 AM`.
pub fn format_time(minute: MinuteOfDay) -> String {
    let hours = minute.get() / 60;
    let minutes = minute.get() % 60;
    let (hour12, suffix) = match hours {
        0 => (12, "AM"),
        1..=11 => (hours, "AM"),
        12 => (12, "PM"),
        _ => (hours - 12, "PM"),
    };
    format!("{}:{:02} {}", hour12, minutes, suffix)
}

/// Selects which trips an aggregation pass looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    /// The whole day.
    #[default]
    Any,
    /// A circular window of ±60 minutes around the center minute.
    Around(MinuteOfDay),
}

impl TimeFilter {
    /// Converts the slider's raw value, where `-1` means any time.
    pub fn from_slider(value: i32) -> Result<Self, FilterParseError> {
        if value == SLIDER_ANY_TIME {
            return Ok(TimeFilter::Any);
        }
        MinuteOfDay::new(i64::from(value))
            .map(TimeFilter::Around)
            .ok_or(FilterParseError::OutOfRange(i64::from(value)))
    }

    /// Slot ranges covered by this filter, in the order they are concatenated.
    ///
    /// The second range is empty unless the window wraps past midnight.
    pub fn window_slots(self) -> (Range<usize>, Range<usize>) {
        match self {
            TimeFilter::Any => (0..MINUTES_PER_DAY, 0..0),
            TimeFilter::Around(center) => {
                let m = center.index();
                let lo = (m + MINUTES_PER_DAY - WINDOW_HALF_WIDTH) % MINUTES_PER_DAY;
                let hi = (m + WINDOW_HALF_WIDTH) % MINUTES_PER_DAY;
                if lo <= hi {
                    (lo..hi, 0..0)
                } else {
                    (lo..MINUTES_PER_DAY, 0..hi)
                }
            }
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFilter::Any => write!(f, "any time"),
            TimeFilter::Around(m) => write!(f, "{}", format_time(*m)),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("minute {0} is outside 0..1440")]
    OutOfRange(i64),
    #[error("cannot parse time filter from {0:?}")]
    Invalid(String),
}

impl FromStr for TimeFilter {
    type Err = FilterParseError;

    /// Accepts `any`, the slider sentinel `-1`, `HH:MM`, or a bare minute count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") || s.is_empty() {
            return Ok(TimeFilter::Any);
        }

        if let Some((h, m)) = s.split_once(':') {
            let invalid = || FilterParseError::Invalid(s.to_string());
            let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
            if !digits(h) || !digits(m) {
                return Err(invalid());
            }
            let h: i64 = h.parse().map_err(|_| invalid())?;
            let m: i64 = m.parse().map_err(|_| invalid())?;
            if !(0..24).contains(&h) || !(0..60).contains(&m) {
                return Err(invalid());
            }
            return MinuteOfDay::new(h * 60 + m)
                .map(TimeFilter::Around)
                .ok_or(FilterParseError::OutOfRange(h * 60 + m));
        }

        let value: i32 = s
            .parse()
            .map_err(|_| FilterParseError::Invalid(s.to_string()))?;
        TimeFilter::from_slider(value)
    }
}

//! Trip records as they arrive from the trip table, and their ingested form.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::{MinuteOfDay, minutes_since_midnight};

/// Wall-clock formats accepted for `started_at` / `ended_at`.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Handle into the trip arena owned by [`crate::index::TripIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TripId(pub usize);

/// One row of the trip table. Extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRecord {
    pub started_at: String,
    pub ended_at: String,
    #[serde(default)]
    pub start_station_id: String,
    #[serde(default)]
    pub end_station_id: String,
}

/// An ingested trip. Immutable once it is in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trip {
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub start_station_id: String,
    pub end_station_id: String,
    pub start_minute: MinuteOfDay,
    pub end_minute: MinuteOfDay,
}

/// Why a row was kept out of the index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("invalid {field} timestamp {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
    #[error("minute of day {0} is outside 0..1440")]
    MinuteOutOfRange(i64),
}

impl TryFrom<TripRecord> for Trip {
    type Error = IngestError;

    fn try_from(record: TripRecord) -> Result<Self, Self::Error> {
        let started_at = parse_timestamp("started_at", &record.started_at)?;
        let ended_at = parse_timestamp("ended_at", &record.ended_at)?;
        Ok(Trip {
            start_minute: minute_of(&started_at)?,
            end_minute: minute_of(&ended_at)?,
            started_at,
            ended_at,
            start_station_id: record.start_station_id,
            end_station_id: record.end_station_id,
        })
    }
}

fn minute_of(ts: &NaiveDateTime) -> Result<MinuteOfDay, IngestError> {
    let minute = minutes_since_midnight(ts);
    MinuteOfDay::new(minute).ok_or(IngestError::MinuteOutOfRange(minute))
}

/// Parses a timestamp, keeping the wall-clock time it was written in.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, IngestError> {
    let trimmed = value.trim();

    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts);
        }
    }

    // Offset-qualified timestamps count in their own local time
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.naive_local());
    }

    Err(IngestError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(started_at: &str, ended_at: &str) -> TripRecord {
        TripRecord {
            started_at: started_at.to_string(),
            ended_at: ended_at.to_string(),
            start_station_id: "A32000".to_string(),
            end_station_id: "M32006".to_string(),
        }
    }

    #[test]
    fn test_trip_minutes_are_precomputed() {
        let trip = Trip::try_from(record("2024-03-01 00:00:48.096", "2024-03-01 23:59:02")).unwrap();
        assert_eq!(trip.start_minute.get(), 0);
        assert_eq!(trip.end_minute.get(), 1439);
        assert_eq!(trip.start_station_id, "A32000");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        for value in [
            "2024-03-05 17:42:10",
            "2024-03-05T17:42:10.5",
            "2024-03-05 17:42",
            "2024-03-05T17:42:10-05:00",
        ] {
            let ts = parse_timestamp("started_at", value).unwrap();
            assert_eq!(minutes_since_midnight(&ts), 17 * 60 + 42, "{value}");
        }
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let err = Trip::try_from(record("yesterday", "2024-03-01 10:00:00")).unwrap_err();
        assert_eq!(
            err,
            IngestError::InvalidTimestamp {
                field: "started_at",
                value: "yesterday".to_string()
            }
        );

        let err = Trip::try_from(record("2024-03-01 10:00:00", "")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::InvalidTimestamp {
                field: "ended_at",
                ..
            }
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            IngestError::MinuteOutOfRange(1500).to_string(),
            "minute of day 1500 is outside 0..1440"
        );
    }
}

//! Station metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dock location, identified by its short code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub short_name: String,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// A station entry as published in a GBFS `station_information` feed.
///
/// Coordinates are kept loose: feeds in the wild carry numbers, numeric
/// strings, nulls, or nothing at all. Fields not listed here are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lon: Option<Value>,
}

impl StationRecord {
    /// Returns `None` unless the station has a short code and both
    /// coordinates are present, numeric and non-zero.
    pub fn into_station(self) -> Option<Station> {
        // Trips without a station carry an empty id; a codeless station must not collect them
        let short_name = self.short_name.filter(|s| !s.trim().is_empty())?;
        let lat = coordinate(self.lat.as_ref())?;
        let lon = coordinate(self.lon.as_ref())?;
        Some(Station {
            short_name,
            name: self.name,
            lat,
            lon,
        })
    }
}

fn coordinate(value: Option<&Value>) -> Option<f64> {
    let v = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    // Zero is treated like a missing coordinate
    if v.is_finite() && v != 0.0 { Some(v) } else { None }
}

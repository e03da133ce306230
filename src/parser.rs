//! Decoders for the station feed (JSON) and the trip table (CSV).

use anyhow::{Result, bail};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::index::TripIndex;
use crate::stations::{Station, StationRecord};
use crate::trips::TripRecord;

/// Rejected rows beyond this many are counted but not logged individually.
const MAX_LOGGED_REJECTIONS: usize = 20;

#[derive(Deserialize)]
struct StationFeed {
    data: StationFeedData,
}

#[derive(Deserialize)]
struct StationFeedData {
    stations: Vec<StationRecord>,
}

/// Decodes a GBFS `station_information` document, dropping stations without
/// a short code or usable coordinates.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON of the expected shape.
pub fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>> {
    let feed: StationFeed = serde_json::from_slice(bytes)?;
    let listed = feed.data.stations.len();

    let stations: Vec<Station> = feed
        .data
        .stations
        .into_iter()
        .filter_map(StationRecord::into_station)
        .collect();

    if stations.len() < listed {
        info!(
            dropped = listed - stations.len(),
            "Stations without a short code or usable coordinates dropped"
        );
    }
    debug!(stations = stations.len(), "Station feed parsed");
    Ok(stations)
}

/// Result of reading the trip table.
pub struct ParsedTrips {
    pub index: TripIndex,
    pub rejected: usize,
}

/// Columns a trip table cannot do without.
const REQUIRED_TRIP_COLUMNS: &[&str] = &["started_at", "ended_at"];

/// Reads trip rows from CSV straight into a [`TripIndex`].
///
/// Rows that cannot be decoded (ragged, bad UTF-8) or whose timestamps cannot
/// be read are skipped and counted.
///
/// # Errors
///
/// Returns an error if the header cannot be read or lacks a required column.
pub fn parse_trips(bytes: &[u8]) -> Result<ParsedTrips> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers = rdr.headers()?;
    for column in REQUIRED_TRIP_COLUMNS {
        if !headers.iter().any(|h| h.trim() == *column) {
            bail!("trip table has no {} column", column);
        }
    }

    let mut builder = TripIndex::builder();
    let mut rejected = 0;

    for (line, result) in rdr.deserialize::<TripRecord>().enumerate() {
        let outcome = result
            .map_err(|e| e.to_string())
            .and_then(|record| builder.push(record).map_err(|e| e.to_string()));

        if let Err(e) = outcome {
            rejected += 1;
            if rejected <= MAX_LOGGED_REJECTIONS {
                // +2: header row and 1-based lines
                warn!(line = line + 2, error = %e, "Trip row rejected");
            }
        }
    }

    let index = builder.finish();
    info!(trips = index.len(), rejected, "Trip table indexed");
    Ok(ParsedTrips { index, rejected })
}

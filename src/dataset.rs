//! Startup loading: both inputs are fetched concurrently and nothing is
//! aggregated until both have arrived.

use anyhow::{Context, Result};
use tracing::info;

use crate::analyzers::aggregate::compute_station_traffic;
use crate::analyzers::types::StationTraffic;
use crate::config::DataSources;
use crate::fetch::{HttpClient, load_source};
use crate::index::TripIndex;
use crate::parser::{parse_stations, parse_trips};
use crate::stations::Station;
use crate::time::TimeFilter;

/// Stations plus the trip index built over a month of trips.
pub struct Dataset {
    pub stations: Vec<Station>,
    pub index: TripIndex,
    /// Trip rows skipped during ingestion.
    pub rejected_trips: usize,
}

impl Dataset {
    /// Loads and indexes both sources. Any failure aborts the whole load.
    #[tracing::instrument(skip(client, sources), fields(stations = %sources.stations, trips = %sources.trips))]
    pub async fn load<C: HttpClient>(client: &C, sources: &DataSources) -> Result<Self> {
        let (station_bytes, trip_bytes) = tokio::try_join!(
            async {
                load_source(client, &sources.stations)
                    .await
                    .context("loading station metadata")
            },
            async {
                load_source(client, &sources.trips)
                    .await
                    .context("loading trip table")
            },
        )?;

        let stations = parse_stations(&station_bytes).context("parsing station metadata")?;
        let trips = parse_trips(&trip_bytes).context("parsing trip table")?;

        info!(
            stations = stations.len(),
            trips = trips.index.len(),
            rejected = trips.rejected,
            "Dataset ready"
        );

        Ok(Self {
            stations,
            index: trips.index,
            rejected_trips: trips.rejected,
        })
    }

    /// Traffic per station for one window, in station-list order.
    pub fn traffic(&self, filter: TimeFilter) -> Vec<StationTraffic> {
        compute_station_traffic(&self.index, &self.stations, filter)
    }
}

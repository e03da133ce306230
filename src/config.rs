//! Where the station feed and trip table are read from.
//!
//! Resolution order: explicit value (CLI flag), then environment
//! (`STATIONS_SOURCE`, `TRIPS_SOURCE`, which a `.env` file may set), then the
//! public Bluebikes datasets.

pub const DEFAULT_STATIONS_SOURCE: &str =
    "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
pub const DEFAULT_TRIPS_SOURCE: &str =
    "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";

pub const STATIONS_ENV: &str = "STATIONS_SOURCE";
pub const TRIPS_ENV: &str = "TRIPS_SOURCE";

/// Locations (URL or file path) of the two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub stations: String,
    pub trips: String,
}

impl DataSources {
    pub fn new(stations: impl Into<String>, trips: impl Into<String>) -> Self {
        Self {
            stations: stations.into(),
            trips: trips.into(),
        }
    }

    /// Fills whichever of `stations` / `trips` is `None` from the environment or defaults.
    pub fn resolve(stations: Option<String>, trips: Option<String>) -> Self {
        Self::resolve_with(stations, trips, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        stations: Option<String>,
        trips: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let pick = |explicit: Option<String>, key: &str, default: &str| {
            explicit
                .or_else(|| env(key).filter(|v| !v.trim().is_empty()))
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            stations: pick(stations, STATIONS_ENV, DEFAULT_STATIONS_SOURCE),
            trips: pick(trips, TRIPS_ENV, DEFAULT_TRIPS_SOURCE),
        }
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self::new(DEFAULT_STATIONS_SOURCE, DEFAULT_TRIPS_SOURCE)
    }
}

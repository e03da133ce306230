//! Data types produced by the aggregation pipeline.

use serde::Serialize;
use std::fmt;

use crate::analyzers::flow::FlowBucket;
use crate::stations::Station;

/// A station annotated with its traffic for one time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationTraffic {
    pub short_name: String,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub arrivals: usize,
    pub departures: usize,
    pub total_traffic: usize,
    /// `departures / total_traffic` in `[0, 1]`; 0 when there is no traffic.
    pub flow_ratio: f64,
}

impl StationTraffic {
    pub(crate) fn new(station: &Station, arrivals: usize, departures: usize) -> Self {
        Self {
            short_name: station.short_name.clone(),
            name: station.name.clone(),
            lat: station.lat,
            lon: station.lon,
            arrivals,
            departures,
            total_traffic: arrivals + departures,
            flow_ratio: crate::analyzers::flow::flow_ratio(departures, arrivals),
        }
    }

    pub fn flow_bucket(&self) -> FlowBucket {
        FlowBucket::quantize(self.flow_ratio)
    }
}

/// Tooltip text, e.g. `12 trips (7 departures, 5 arrivals)`.
impl fmt::Display for StationTraffic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} trips ({} departures, {} arrivals)",
            self.total_traffic, self.departures, self.arrivals
        )
    }
}

/// Network-wide totals for one aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficSummary {
    pub filter: String,
    pub stations: usize,
    pub active_stations: usize,
    pub departures: usize,
    pub arrivals: usize,
    /// Largest `total_traffic` of any station; what marker sizes scale against.
    pub max_total_traffic: usize,
    pub busiest_station: Option<String>,
    pub mean_total_traffic: f64,
    pub stddev_total_traffic: f64,
}

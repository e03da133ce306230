//! Per-station traffic aggregation.
//!
//! [`aggregate::compute_station_traffic`] turns the trip index and a station
//! list into [`types::StationTraffic`] rows for one time window; the other
//! modules derive flow direction and network-wide summaries from those rows.

pub mod aggregate;
pub mod flow;
pub mod summary;
pub mod types;
pub mod utility;

//! Output formatting and persistence for station traffic.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::{StationTraffic, TrafficSummary};
use csv::WriterBuilder;
use std::fs::File;

/// Logs a summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &TrafficSummary) {
    debug!("{:#?}", summary);
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One exported row: the station's counts plus its quantized flow value.
#[derive(Serialize)]
struct ExportRow<'a> {
    short_name: &'a str,
    name: Option<&'a str>,
    lat: f64,
    lon: f64,
    arrivals: usize,
    departures: usize,
    total_traffic: usize,
    flow_ratio: f64,
    flow_bucket: f64,
}

impl<'a> From<&'a StationTraffic> for ExportRow<'a> {
    fn from(s: &'a StationTraffic) -> Self {
        Self {
            short_name: &s.short_name,
            name: s.name.as_deref(),
            lat: s.lat,
            lon: s.lon,
            arrivals: s.arrivals,
            departures: s.departures,
            total_traffic: s.total_traffic,
            flow_ratio: s.flow_ratio,
            flow_bucket: s.flow_bucket().value(),
        }
    }
}

/// Writes station rows to `path` as CSV with a header, replacing any existing file.
pub fn write_csv(path: &str, rows: &[StationTraffic]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing CSV");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(ExportRow::from(row))?;
    }
    writer.flush()?;

    Ok(())
}

/// The `n` busiest stations, busiest first. Ties keep station-list order.
pub fn top_stations(rows: &[StationTraffic], n: usize) -> Vec<&StationTraffic> {
    let mut sorted: Vec<&StationTraffic> = rows.iter().collect();
    sorted.sort_by(|a, b| b.total_traffic.cmp(&a.total_traffic));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::summary::summarize;
    use crate::time::TimeFilter;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn row(code: &str, arrivals: usize, departures: usize) -> StationTraffic {
        StationTraffic {
            short_name: code.to_string(),
            name: Some(format!("{code} station")),
            lat: 42.36,
            lon: -71.09,
            arrivals,
            departures,
            total_traffic: arrivals + departures,
            flow_ratio: crate::analyzers::flow::flow_ratio(departures, arrivals),
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&summarize(&[row("A", 1, 1)], TimeFilter::Any));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&vec![row("A", 1, 1)]).unwrap();
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let path = temp_path("bikeshare_traffic_test_rows.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &[row("A", 1, 2), row("B", 0, 0)]).unwrap();
        // A second write replaces rather than appends
        write_csv(&path, &[row("A", 1, 2), row("B", 0, 0)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("short_name,name,lat,lon,arrivals,departures"));
        assert!(lines[1].starts_with("A,A station,"));
        let last = |line: &str| line.rsplit(',').next().unwrap().parse::<f64>().unwrap();
        assert_eq!(last(lines[1]), 1.0);
        assert_eq!(last(lines[2]), 0.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_top_stations() {
        let rows = vec![row("A", 1, 0), row("B", 5, 5), row("C", 1, 0), row("D", 2, 2)];
        let top: Vec<_> = top_stations(&rows, 3)
            .into_iter()
            .map(|r| r.short_name.as_str())
            .collect();
        assert_eq!(top, vec!["B", "D", "A"]);
    }
}

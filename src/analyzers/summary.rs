use crate::analyzers::types::{StationTraffic, TrafficSummary};
use crate::analyzers::utility::{mean, stddev};
use crate::time::TimeFilter;

/// Rolls station rows up into network totals.
///
/// Ties for busiest station go to the one listed first.
pub fn summarize(rows: &[StationTraffic], filter: TimeFilter) -> TrafficSummary {
    let totals: Vec<usize> = rows.iter().map(|r| r.total_traffic).collect();
    let avg = mean(&totals);

    let mut busiest: Option<&StationTraffic> = None;
    for row in rows {
        if row.total_traffic > 0 && busiest.is_none_or(|b| row.total_traffic > b.total_traffic) {
            busiest = Some(row);
        }
    }

    TrafficSummary {
        filter: filter.to_string(),
        stations: rows.len(),
        active_stations: rows.iter().filter(|r| r.total_traffic > 0).count(),
        departures: rows.iter().map(|r| r.departures).sum(),
        arrivals: rows.iter().map(|r| r.arrivals).sum(),
        max_total_traffic: rows.iter().map(|r| r.total_traffic).max().unwrap_or(0),
        busiest_station: busiest.map(|b| b.short_name.clone()),
        mean_total_traffic: avg,
        stddev_total_traffic: stddev(&totals, avg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, arrivals: usize, departures: usize) -> StationTraffic {
        StationTraffic {
            short_name: code.to_string(),
            name: None,
            lat: 42.0,
            lon: -71.0,
            arrivals,
            departures,
            total_traffic: arrivals + departures,
            flow_ratio: 0.0,
        }
    }

    #[test]
    fn test_summary_empty() {
        let s = summarize(&[], TimeFilter::Any);
        assert_eq!(s.stations, 0);
        assert_eq!(s.max_total_traffic, 0);
        assert_eq!(s.busiest_station, None);
        assert_eq!(s.mean_total_traffic, 0.0);
        assert_eq!(s.filter, "any time");
    }

    #[test]
    fn test_summary_totals() {
        let rows = vec![row("A", 1, 2), row("B", 0, 0), row("C", 3, 0), row("D", 2, 1)];
        let s = summarize(&rows, TimeFilter::Any);
        assert_eq!(s.stations, 4);
        assert_eq!(s.active_stations, 3);
        assert_eq!(s.departures, 3);
        assert_eq!(s.arrivals, 6);
        assert_eq!(s.max_total_traffic, 3);
        assert_eq!(s.busiest_station.as_deref(), Some("A"));
        assert_eq!(s.mean_total_traffic, 2.25);
    }
}

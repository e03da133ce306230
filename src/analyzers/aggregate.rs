use std::collections::HashMap;

use crate::analyzers::types::StationTraffic;
use crate::index::{BucketSet, TripIndex};
use crate::stations::Station;
use crate::time::TimeFilter;

/// Counts arrivals and departures per station for the trips inside `filter`.
///
/// Output order matches `stations`. A station absent from the selected trips
/// gets zero counts. The result depends only on the arguments, so repeated
/// calls with the same inputs are identical.
pub fn compute_station_traffic(
    index: &TripIndex,
    stations: &[Station],
    filter: TimeFilter,
) -> Vec<StationTraffic> {
    let departures = count_by(index, BucketSet::Departures, filter);
    let arrivals = count_by(index, BucketSet::Arrivals, filter);

    stations
        .iter()
        .map(|station| {
            let id = station.short_name.as_str();
            StationTraffic::new(
                station,
                arrivals.get(id).copied().unwrap_or(0),
                departures.get(id).copied().unwrap_or(0),
            )
        })
        .collect()
}

/// Groups the selected trips by the station on the bucketed side and counts them.
fn count_by(index: &TripIndex, set: BucketSet, filter: TimeFilter) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for trip in index.select(set, filter) {
        let station = match set {
            BucketSet::Departures => trip.start_station_id.as_str(),
            BucketSet::Arrivals => trip.end_station_id.as_str(),
        };
        *counts.entry(station).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::MinuteOfDay;
    use crate::trips::TripRecord;

    fn station(code: &str) -> Station {
        Station {
            short_name: code.to_string(),
            name: None,
            lat: 42.36,
            lon: -71.09,
        }
    }

    fn trip(start: &str, end: &str, started_at: &str, ended_at: &str) -> TripRecord {
        TripRecord {
            started_at: started_at.to_string(),
            ended_at: ended_at.to_string(),
            start_station_id: start.to_string(),
            end_station_id: end.to_string(),
        }
    }

    fn index(records: Vec<TripRecord>) -> TripIndex {
        let mut builder = TripIndex::builder();
        for r in records {
            builder.push(r).unwrap();
        }
        builder.finish()
    }

    fn three_trips() -> TripIndex {
        index(vec![
            trip("A", "B", "2024-03-01 08:00:00", "2024-03-01 08:20:00"),
            trip("A", "C", "2024-03-02 17:10:00", "2024-03-02 17:35:00"),
            trip("B", "A", "2024-03-03 23:50:00", "2024-03-04 00:15:00"),
        ])
    }

    fn counts(row: &StationTraffic) -> (usize, usize, usize) {
        (row.departures, row.arrivals, row.total_traffic)
    }

    #[test]
    fn test_aggregation_without_filter() {
        let idx = three_trips();
        let stations = vec![station("A"), station("B"), station("C")];
        let result = compute_station_traffic(&idx, &stations, TimeFilter::Any);

        assert_eq!(counts(&result[0]), (2, 1, 3));
        assert_eq!(counts(&result[1]), (1, 1, 2));
        assert_eq!(counts(&result[2]), (0, 1, 1));
        assert_eq!(result[0].flow_ratio, 2.0 / 3.0);
        assert_eq!(result[2].flow_ratio, 0.0);
    }

    #[test]
    fn test_order_is_preserved() {
        let idx = three_trips();
        let stations = vec![station("C"), station("A"), station("B")];
        let names: Vec<_> = compute_station_traffic(&idx, &stations, TimeFilter::Any)
            .into_iter()
            .map(|s| s.short_name)
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_zero_traffic_station() {
        let idx = three_trips();
        let result = compute_station_traffic(&idx, &[station("Z")], TimeFilter::Any);
        assert_eq!(counts(&result[0]), (0, 0, 0));
        assert_eq!(result[0].flow_ratio, 0.0);
        assert!(!result[0].flow_ratio.is_nan());
    }

    #[test]
    fn test_window_filters_each_side_independently() {
        let idx = three_trips();
        let stations = vec![station("A"), station("B"), station("C")];
        // 00:00 window: B->A departs 23:50 and arrives 00:15, both inside the wrap
        let midnight = TimeFilter::Around(MinuteOfDay::new(0).unwrap());
        let result = compute_station_traffic(&idx, &stations, midnight);
        assert_eq!(counts(&result[0]), (0, 1, 1));
        assert_eq!(counts(&result[1]), (1, 0, 1));
        assert_eq!(counts(&result[2]), (0, 0, 0));

        // 18:30 window covers 17:30..19:30: only the 17:35 arrival at C
        let evening = TimeFilter::Around(MinuteOfDay::new(18 * 60 + 30).unwrap());
        let result = compute_station_traffic(&idx, &stations, evening);
        assert_eq!(counts(&result[0]), (0, 0, 0));
        assert_eq!(counts(&result[2]), (0, 1, 1));
        assert_eq!(result[2].flow_ratio, 0.0);
    }

    #[test]
    fn test_idempotent() {
        let idx = three_trips();
        let stations = vec![station("A"), station("B"), station("C"), station("Q")];
        let filter = TimeFilter::Around(MinuteOfDay::new(500).unwrap());
        let first = compute_station_traffic(&idx, &stations, filter);
        let second = compute_station_traffic(&idx, &stations, filter);
        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.flow_ratio.to_bits(), b.flow_ratio.to_bits());
        }
    }

    #[test]
    fn test_input_stations_untouched() {
        let idx = three_trips();
        let stations = vec![station("A")];
        let before = stations.clone();
        let _ = compute_station_traffic(&idx, &stations, TimeFilter::Any);
        assert_eq!(stations, before);
    }

    #[test]
    fn test_tooltip_text() {
        let idx = three_trips();
        let result = compute_station_traffic(&idx, &[station("A")], TimeFilter::Any);
        assert_eq!(result[0].to_string(), "3 trips (2 departures, 1 arrivals)");
    }
}

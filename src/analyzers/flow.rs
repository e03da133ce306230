use serde::Serialize;

/// Coarse direction of a station's traffic.
///
/// The ratio `departures / total` is cut into three equal-width bands:
///
/// | Ratio          | Bucket              | Value |
/// |----------------|---------------------|-------|
/// | < 1/3          | `MostlyArrivals`    | 0.0   |
/// | < 2/3          | `Balanced`          | 0.5   |
/// | >= 2/3         | `MostlyDepartures`  | 1.0   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlowBucket {
    MostlyArrivals,
    Balanced,
    MostlyDepartures,
}

impl FlowBucket {
    /// Ratios outside `[0, 1]` clamp to the nearest band; NaN counts as 0.
    pub fn quantize(ratio: f64) -> Self {
        let r = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        match (r * 3.0).floor() as u8 {
            0 => FlowBucket::MostlyArrivals,
            1 => FlowBucket::Balanced,
            _ => FlowBucket::MostlyDepartures,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            FlowBucket::MostlyArrivals => 0.0,
            FlowBucket::Balanced => 0.5,
            FlowBucket::MostlyDepartures => 1.0,
        }
    }
}

/// `departures / (arrivals + departures)`, or 0 for a station with no traffic.
pub fn flow_ratio(departures: usize, arrivals: usize) -> f64 {
    let total = departures + arrivals;
    if total == 0 {
        0.0
    } else {
        departures as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_ratio_zero_total() {
        assert_eq!(flow_ratio(0, 0), 0.0);
    }

    #[test]
    fn test_flow_ratio_values() {
        assert_eq!(flow_ratio(2, 1), 2.0 / 3.0);
        assert_eq!(flow_ratio(0, 5), 0.0);
        assert_eq!(flow_ratio(5, 0), 1.0);
    }

    #[test]
    fn test_quantize_boundaries() {
        assert_eq!(FlowBucket::quantize(0.0), FlowBucket::MostlyArrivals);
        assert_eq!(FlowBucket::quantize(0.33), FlowBucket::MostlyArrivals);
        assert_eq!(FlowBucket::quantize(0.34), FlowBucket::Balanced);
        assert_eq!(FlowBucket::quantize(0.5), FlowBucket::Balanced);
        assert_eq!(FlowBucket::quantize(0.66), FlowBucket::Balanced);
        assert_eq!(FlowBucket::quantize(0.67), FlowBucket::MostlyDepartures);
        assert_eq!(FlowBucket::quantize(1.0), FlowBucket::MostlyDepartures);
    }

    #[test]
    fn test_quantize_out_of_domain() {
        assert_eq!(FlowBucket::quantize(f64::NAN), FlowBucket::MostlyArrivals);
        assert_eq!(FlowBucket::quantize(-3.0), FlowBucket::MostlyArrivals);
        assert_eq!(FlowBucket::quantize(7.0), FlowBucket::MostlyDepartures);
    }

    #[test]
    fn test_bucket_values() {
        assert_eq!(FlowBucket::MostlyArrivals.value(), 0.0);
        assert_eq!(FlowBucket::Balanced.value(), 0.5);
        assert_eq!(FlowBucket::MostlyDepartures.value(), 1.0);
    }
}

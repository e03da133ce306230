/// Arithmetic mean of a set of counts. Returns 0.0 for empty input.
pub fn mean(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    counts.iter().sum::<usize>() as f64 / counts.len() as f64
}

/// Population standard deviation of a set of counts around `mean`.
/// Returns 0.0 for empty input.
pub fn stddev(counts: &[usize], mean: f64) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let variance = counts
        .iter()
        .map(|&c| (c as f64 - mean).powi(2))
        .sum::<f64>()
        / counts.len() as f64;

    variance.sqrt()
}

// lcstats-math/src/statistics/mod.rs
extern crate alloc;
use alloc::vec::Vec;
use libm::sqrt;

/// Error-weighted location and scale of a magnitude series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSummary {
    /// `Σ(w·x) / Σw`
    pub mean: f64,
    /// `sqrt(Σ(w·(x - mean)²) / Σw)`
    pub std: f64,
}

/// Calculates the weighted mean and weighted standard deviation of `values`.
///
/// Weights are not validated. A zero or negative weight sum produces NaN/inf,
/// which is propagated to the caller rather than reported as an error.
pub fn weighted_mean_std(values: &[f64], weights: &[f64]) -> WeightedSummary {
    let weight_sum: f64 = weights.iter().sum();

    let mean = values
        .iter()
        .zip(weights)
        .map(|(x, w)| w * x)
        .sum::<f64>()
        / weight_sum;

    let variance = values
        .iter()
        .zip(weights)
        .map(|(x, w)| {
            let diff = x - mean;
            w * diff * diff
        })
        .sum::<f64>()
        / weight_sum;

    WeightedSummary {
        mean,
        std: sqrt(variance),
    }
}

/// Inverse-variance weights, `err⁻²`.
pub fn inverse_variance_weights(err: &[f64]) -> Vec<f64> {
    err.iter().map(|e| 1.0 / (e * e)).collect()
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Linear-interpolation percentile of an already sorted slice, `q` in `[0, 100]`.
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Percentile with linear interpolation between closest ranks.
///
/// Returns NaN for an empty slice.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    percentile_sorted(&sorted_copy(values), q)
}

pub fn median(values: &[f64]) -> f64 {
    percentile(values, 50.0)
}

/// Width of the central interval between the `lower` and `upper` percentiles.
pub fn inter_percentile_range(values: &[f64], lower: f64, upper: f64) -> f64 {
    let sorted = sorted_copy(values);
    percentile_sorted(&sorted, upper) - percentile_sorted(&sorted, lower)
}

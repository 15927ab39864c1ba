// lcstats-core/src/pipeline.rs
//! The statistics pipeline: basic block, Fourier block, and the full row.
//!
//! These functions never fail. Degenerate input shows up as NaN/inf in the
//! affected values, and a failed Fourier fit turns the whole Fourier block
//! into NaN while keeping its length.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use lcstats_math::fourier::{fourier_decomposition, FourierOptions};
use lcstats_math::normality::{anderson_darling, shapiro_wilk};
use lcstats_math::statistics::{
    inter_percentile_range, inverse_variance_weights, median, weighted_mean_std, WeightedSummary,
};
use lcstats_math::variability::{
    inverse_von_neumann, median_absolute_deviation, normalized_excess_variance,
    normalized_peak_to_peak, reduced_chi2, robust_median_statistic, small_kurtosis, stetson,
    weighted_skew,
};

use crate::light_curve::LightCurve;

/// Central percentile intervals reported after `medianAbsDev`: iqr, i60r … i90r.
const PERCENTILE_RANGES: [(f64, f64); 5] = [
    (25.0, 75.0),
    (20.0, 80.0),
    (15.0, 85.0),
    (10.0, 90.0),
    (5.0, 95.0),
];

/// Computes the 22 basic statistics in `BASIC_FEATURE_NAMES` order.
pub fn calc_basic_stats(lc: &LightCurve) -> Vec<f64> {
    let (t, mag, err) = (lc.t(), lc.mag(), lc.err());

    let weights = inverse_variance_weights(err);
    let WeightedSummary { mean: wmean, std: wstd } = weighted_mean_std(mag, &weights);
    let med = median(mag);
    let indices = stetson(mag, err, wmean);

    // Normality is judged on error-normalised magnitudes.
    let normalised: Vec<f64> = mag.iter().zip(err).map(|(m, e)| m / e).collect();

    let mut stats = Vec::with_capacity(22);
    stats.extend_from_slice(&[
        lc.len() as f64,
        med,
        wmean,
        reduced_chi2(mag, err, wmean),
        robust_median_statistic(mag, err, med),
        wstd,
        normalized_peak_to_peak(mag, err),
        normalized_excess_variance(mag, err, wmean),
        median_absolute_deviation(mag, med),
    ]);
    stats.extend(
        PERCENTILE_RANGES
            .iter()
            .map(|&(lower, upper)| inter_percentile_range(mag, lower, upper)),
    );
    stats.extend_from_slice(&[
        weighted_skew(mag, err, wmean),
        small_kurtosis(mag, err, wmean),
        inverse_von_neumann(t, mag, wstd),
        indices.i,
        indices.j,
        indices.k,
        anderson_darling(&normalised),
        shapiro_wilk(&normalised),
    ]);
    stats
}

/// Computes the Fourier block (`options.block_len()` values) at `period`.
///
/// Any fit failure is logged at debug level and yields an all-NaN block.
pub fn calc_fourier_stats(lc: &LightCurve, period: f64, options: &FourierOptions) -> Vec<f64> {
    match fourier_decomposition(lc.t(), lc.mag(), lc.err(), period, options) {
        Ok(decomposition) => {
            debug!(
                "Fourier fit at period {}: order {} selected (BIC {:.4}, power {:.4}).",
                period, decomposition.best_order, decomposition.bic, decomposition.power
            );
            decomposition.to_feature_block(options.relative_output)
        }
        Err(e) => {
            debug!(
                "Fourier fit failed at period {} for {} points: {}. Reporting NaN block.",
                period,
                lc.len(),
                e
            );
            vec![f64::NAN; options.block_len()]
        }
    }
}

/// Basic block followed by the Fourier block.
pub fn calc_stats(lc: &LightCurve, period: f64, options: &FourierOptions) -> Vec<f64> {
    let mut stats = calc_basic_stats(lc);
    stats.extend(calc_fourier_stats(lc, period, options));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::BASIC_FEATURE_NAMES;

    fn index_of(name: &str) -> usize {
        BASIC_FEATURE_NAMES.iter().position(|n| *n == name).unwrap()
    }

    #[test]
    fn test_basic_stats_length_and_location() {
        let lc = LightCurve::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![10.0, 11.0, 10.5, 9.5, 10.0],
            vec![0.1; 5],
        )
        .unwrap();
        let stats = calc_basic_stats(&lc);
        assert_eq!(stats.len(), BASIC_FEATURE_NAMES.len());
        assert_eq!(stats[index_of("N")], 5.0);
        assert_eq!(stats[index_of("median")], 10.0);
        assert!((stats[index_of("wmean")] - 10.2).abs() < 1e-12);
        // sorted: 9.5, 10, 10, 10.5, 11 -> q25 = 10, q75 = 10.5
        assert!((stats[index_of("iqr")] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fourier_failure_yields_nan_block() {
        let lc = LightCurve::new(vec![0.0], vec![1.0], vec![0.1]).unwrap();
        let options = FourierOptions::default();
        let block = calc_fourier_stats(&lc, 1.0, &options);
        assert_eq!(block.len(), options.block_len());
        assert!(block.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_zero_period_yields_nan_block() {
        let lc = LightCurve::new(
            (0..20).map(f64::from).collect(),
            (0..20).map(|i| (i % 3) as f64).collect(),
            vec![0.1; 20],
        )
        .unwrap();
        let block = calc_fourier_stats(&lc, 0.0, &FourierOptions::default());
        assert!(block.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_calc_stats_concatenates_blocks() {
        let lc = LightCurve::new(
            (0..30).map(f64::from).collect(),
            (0..30).map(|i| 15.0 + 0.2 * ((i * 7 % 11) as f64 - 5.0)).collect(),
            vec![0.05; 30],
        )
        .unwrap();
        let options = FourierOptions::default();
        let row = calc_stats(&lc, 7.3, &options);
        assert_eq!(row.len(), 22 + options.block_len());
        assert_eq!(&row[..22], calc_basic_stats(&lc).as_slice());
    }
}

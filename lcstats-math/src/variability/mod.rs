// lcstats-math/src/variability/mod.rs
//! Variability indices over an error-weighted magnitude series.
//!
//! Every function here reduces a series to a scalar and never panics. Sample
//! sizes are converted to `f64` before any subtraction, so degenerate inputs
//! (N too small, zero variance, zero time steps) surface as NaN or inf.

use libm::{fabs, sqrt};

/// Classical Welch/Stetson indices built from consecutive normalised residuals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StetsonIndices {
    /// Welch/Stetson I: `Σ d_i·d_{i+1}`.
    pub i: f64,
    /// Stetson J: `Σ sign(P)·sqrt(|P|)`, robust against single outliers.
    pub j: f64,
    /// Stetson K: mean absolute residual over RMS residual (≈0.798 for Gaussian noise).
    pub k: f64,
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// `Σ((wmean - mag)² / err²) / (N - 1)`
pub fn reduced_chi2(mag: &[f64], err: &[f64], wmean: f64) -> f64 {
    let n = mag.len() as f64;
    mag.iter()
        .zip(err)
        .map(|(m, e)| (wmean - m) * (wmean - m) / (e * e))
        .sum::<f64>()
        / (n - 1.0)
}

/// Robust median statistic: `Σ(|mag - median| / err) / (N - 1)`.
pub fn robust_median_statistic(mag: &[f64], err: &[f64], median: f64) -> f64 {
    let n = mag.len() as f64;
    mag.iter()
        .zip(err)
        .map(|(m, e)| fabs(m - median) / e)
        .sum::<f64>()
        / (n - 1.0)
}

pub fn median_absolute_deviation(mag: &[f64], median: f64) -> f64 {
    let deviations: alloc::vec::Vec<f64> = mag.iter().map(|m| fabs(m - median)).collect();
    crate::statistics::median(&deviations)
}

/// Error-normalised skewness, `N/((N-1)(N-2)) · Σ((mag - wmean)/err)³`.
pub fn weighted_skew(mag: &[f64], err: &[f64], wmean: f64) -> f64 {
    let n = mag.len() as f64;
    let cubes: f64 = mag
        .iter()
        .zip(err)
        .map(|(m, e)| {
            let z = (m - wmean) / e;
            z * z * z
        })
        .sum();
    n / (n - 1.0) / (n - 2.0) * cubes
}

/// Small-sample kurtosis of the error-normalised residuals.
///
/// The `N-2` and `N-3` denominators are left unguarded: N ≤ 3 yields inf/NaN.
pub fn small_kurtosis(mag: &[f64], err: &[f64], wmean: f64) -> f64 {
    let n = mag.len() as f64;
    let fourth: f64 = mag
        .iter()
        .zip(err)
        .map(|(m, e)| {
            let z = (m - wmean) / e;
            let z2 = z * z;
            z2 * z2
        })
        .sum();

    let mut kurt = n * (n + 1.0) / (n - 1.0) / (n - 2.0) / (n - 3.0);
    kurt *= fourth;
    kurt -= 3.0 * (n - 1.0) * (n - 1.0) / (n - 2.0) / (n - 3.0);
    kurt
}

/// Welch/Stetson I and Stetson J, K.
///
/// Pairs are formed from consecutive points, so `mag`/`err` must be time-ordered.
/// A series whose residuals all vanish reports `K = 0` alongside `I = J = 0`.
pub fn stetson(mag: &[f64], err: &[f64], wmean: f64) -> StetsonIndices {
    let n = mag.len() as f64;
    let scale = sqrt(n / (n - 1.0));
    let d: alloc::vec::Vec<f64> = mag
        .iter()
        .zip(err)
        .map(|(m, e)| scale * (m - wmean) / e)
        .collect();

    let (i, j) = d
        .windows(2)
        .map(|pair| pair[0] * pair[1])
        .fold((0.0, 0.0), |(i, j), p| (i + p, j + sign(p) * sqrt(fabs(p))));

    let abs_sum: f64 = d.iter().map(|x| fabs(*x)).sum();
    let sq_sum: f64 = d.iter().map(|x| x * x).sum();
    let k = if sq_sum == 0.0 {
        0.0
    } else {
        (abs_sum / n) / sqrt(sq_sum / n)
    };

    StetsonIndices { i, j, k }
}

/// Inverse of the time-weighted von Neumann ratio.
///
/// Successive differences are weighted by `Δt⁻²`; `t` must be strictly
/// increasing. Small values indicate smooth, correlated variation.
pub fn inverse_von_neumann(t: &[f64], mag: &[f64], wstd: f64) -> f64 {
    let (weighted_sq, weight_sum) = t
        .windows(2)
        .zip(mag.windows(2))
        .map(|(tt, mm)| {
            let dt = tt[1] - tt[0];
            let dm = mm[1] - mm[0];
            let w = 1.0 / (dt * dt);
            (w * dm * dm, w)
        })
        .fold((0.0, 0.0), |(a, b), (x, w)| (a + x, b + w));

    let eta = weighted_sq / (weight_sum * wstd * wstd);
    1.0 / eta
}

/// `Σ((mag - wmean)² - err²) / (N·wmean²)`: variance beyond the photometric noise.
pub fn normalized_excess_variance(mag: &[f64], err: &[f64], wmean: f64) -> f64 {
    let n = mag.len() as f64;
    let excess: f64 = mag
        .iter()
        .zip(err)
        .map(|(m, e)| (m - wmean) * (m - wmean) - e * e)
        .sum();
    excess / (n * wmean * wmean)
}

/// Error-deflated range normalised by its own scale.
pub fn normalized_peak_to_peak(mag: &[f64], err: &[f64]) -> f64 {
    let (upper, lower) = mag.iter().zip(err).fold(
        (f64::NEG_INFINITY, f64::INFINITY),
        |(hi, lo), (m, e)| (hi.max(m - e), lo.min(m + e)),
    );
    (upper - lower) / (upper + lower)
}

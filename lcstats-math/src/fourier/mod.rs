// lcstats-math/src/fourier/mod.rs
//! Truncated Fourier-series decomposition of a light curve at a known period.
//!
//! The model is
//!
//! ```text
//! y(t) = a0 + a_slope·(t - min t) + Σ_{n=1..k} [A_n cos(nφ) + B_n sin(nφ)],   φ = 2πt/p
//! ```
//!
//! Orders `k = 0..=max_nterms` are fitted in sequence, each warm-started from the
//! previous order's solution, and the order with the lowest Bayesian Information
//! Criterion `BIC_k = χ²_k + ln(N)·(2 + 2k)` is reported.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;
use libm::{atan2, cos, floor, log, sin, sqrt};

use crate::optimizer::{optimize, FitError, FitModel, LmConfig};
use crate::statistics::median;

pub const DEFAULT_MAX_NTERMS: usize = 5;
/// Initial value of each newly added harmonic coefficient. Non-zero so the
/// new columns of the Jacobian start out informative.
pub const DEFAULT_HARMONIC_SEED: f64 = 0.1;
const INITIAL_SLOPE: f64 = 1e-6;

/// Knobs for [`fourier_decomposition`].
#[derive(Debug, Clone, PartialEq)]
pub struct FourierOptions {
    /// Highest harmonic order tried.
    pub max_nterms: usize,
    /// Starting value for the two coefficients each new order adds.
    pub harmonic_seed: f64,
    /// Report harmonics as relative amplitude/phase instead of raw (A, B).
    pub relative_output: bool,
    pub lm: LmConfig,
}

impl Default for FourierOptions {
    fn default() -> Self {
        Self {
            max_nterms: DEFAULT_MAX_NTERMS,
            harmonic_seed: DEFAULT_HARMONIC_SEED,
            relative_output: true,
            lm: LmConfig::default(),
        }
    }
}

impl FourierOptions {
    /// Length of the feature block: power, BIC, offset, slope and one pair per harmonic.
    pub fn block_len(&self) -> usize {
        2 + 2 * (self.max_nterms + 1)
    }
}

/// Fourier series with offset and linear trend for a fixed period and order.
#[derive(Debug, Clone, Copy)]
pub struct FourierSeries {
    period: f64,
    t_ref: f64,
    nterms: usize,
}

impl FourierSeries {
    pub fn new(period: f64, t_ref: f64, nterms: usize) -> Self {
        Self {
            period,
            t_ref,
            nterms,
        }
    }

    pub fn nterms(&self) -> usize {
        self.nterms
    }

    fn phase(&self, t: f64) -> f64 {
        2.0 * PI * t / self.period
    }
}

impl FitModel for FourierSeries {
    fn n_params(&self) -> usize {
        2 + 2 * self.nterms
    }

    fn evaluate(&self, t: f64, params: &[f64]) -> f64 {
        let phi = self.phase(t);
        let mut y = params[0] + params[1] * (t - self.t_ref);
        for n in 1..=self.nterms {
            let angle = n as f64 * phi;
            y += params[2 * n] * cos(angle);
            y += params[2 * n + 1] * sin(angle);
        }
        y
    }

    fn jacobian_row(&self, t: f64, _params: &[f64], row: &mut [f64]) {
        let phi = self.phase(t);
        row[0] = 1.0;
        row[1] = t - self.t_ref;
        for n in 1..=self.nterms {
            let angle = n as f64 * phi;
            row[2 * n] = cos(angle);
            row[2 * n + 1] = sin(angle);
        }
    }
}

/// Outcome of the order search.
#[derive(Debug, Clone, PartialEq)]
pub struct FourierDecomposition {
    /// `(χ²_0 - χ²_best) / χ²_0`: signal explained beyond offset and slope.
    pub power: f64,
    /// BIC of the selected order.
    pub bic: f64,
    pub best_order: usize,
    /// χ² of every fitted order, index = order.
    pub chi2: Vec<f64>,
    /// BIC of every fitted order, index = order.
    pub bics: Vec<f64>,
    /// `[offset, slope, A1, B1, …]` of the selected order, zero-padded to `max_nterms` pairs.
    pub params: Vec<f64>,
}

impl FourierDecomposition {
    /// `[power, bic, offset, slope, harmonics…]`, harmonics converted with
    /// [`ab_to_amp_phase`] when `relative` is set.
    pub fn to_feature_block(&self, relative: bool) -> Vec<f64> {
        let mut block = Vec::with_capacity(self.params.len() + 2);
        block.push(self.power);
        block.push(self.bic);
        block.extend_from_slice(&self.params[..2]);
        if relative {
            block.extend(ab_to_amp_phase(&self.params[2..]));
        } else {
            block.extend_from_slice(&self.params[2..]);
        }
        block
    }
}

/// Fits orders `0..=max_nterms` and selects the one with minimum BIC.
///
/// Orders with more parameters than observations are not attempted. Any
/// optimizer failure at an attempted order fails the whole decomposition.
pub fn fourier_decomposition(
    t: &[f64],
    y: &[f64],
    dy: &[f64],
    period: f64,
    options: &FourierOptions,
) -> Result<FourierDecomposition, FitError> {
    if !period.is_finite() || period == 0.0 {
        return Err(FitError::NonFiniteInput);
    }

    let n = y.len();
    if n < 2 {
        return Err(FitError::TooFewPoints { points: n, params: 2 });
    }
    let max_order = options.max_nterms.min((n - 2) / 2);
    let t_ref = t.iter().copied().fold(f64::INFINITY, f64::min);

    let mut chi2 = Vec::with_capacity(max_order + 1);
    let mut fitted: Vec<Vec<f64>> = Vec::with_capacity(max_order + 1);
    let mut init = vec![median(y), INITIAL_SLOPE];

    for order in 0..=max_order {
        let model = FourierSeries::new(period, t_ref, order);
        let result = optimize(&model, t, y, dy, init, &options.lm)?;

        init = result.params.clone();
        init.extend_from_slice(&[options.harmonic_seed, options.harmonic_seed]);

        chi2.push(result.chi2);
        fitted.push(result.params);
    }

    let ln_n = log(n as f64);
    let bics: Vec<f64> = chi2
        .iter()
        .enumerate()
        .map(|(k, c)| c + ln_n * (2.0 + 2.0 * k as f64))
        .collect();

    let best_order = bics
        .iter()
        .enumerate()
        .fold(0, |best, (k, b)| if *b < bics[best] { k } else { best });

    let mut params = vec![0.0; 2 + 2 * options.max_nterms];
    params[..fitted[best_order].len()].copy_from_slice(&fitted[best_order]);

    Ok(FourierDecomposition {
        power: (chi2[0] - chi2[best_order]) / chi2[0],
        bic: bics[best_order],
        best_order,
        chi2,
        bics,
        params,
    })
}

/// Folds `x` into `[0, 1)`.
fn fold_unit(x: f64) -> f64 {
    let folded = x - floor(x);
    if folded >= 1.0 {
        0.0
    } else {
        folded
    }
}

/// Converts Cartesian Fourier pairs `[A1, B1, A2, B2, …]` to amplitude/phase form.
///
/// The first pair becomes `(amp_1, phase_1)` with `amp = sqrt(A² + B²)` and
/// `phase = atan2(A, B)`. Every later harmonic `k` becomes
/// `(amp_k / amp_1, ((phase_k/k - phase_1) / (2π/k)) mod 1)`, a phase offset
/// relative to the fundamental that does not depend on the time zero-point.
pub fn ab_to_amp_phase(pairs: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = pairs
        .chunks_exact(2)
        .flat_map(|ab| [sqrt(ab[0] * ab[0] + ab[1] * ab[1]), atan2(ab[0], ab[1])])
        .collect();
    if out.is_empty() {
        return out;
    }

    let amp_1 = out[0];
    let phase_1 = out[1];
    for (index, pair) in out.chunks_exact_mut(2).enumerate().skip(1) {
        let k = (index + 1) as f64;
        pair[0] /= amp_1;
        pair[1] = fold_unit((pair[1] / k - phase_1) / (2.0 * PI / k));
    }
    out
}

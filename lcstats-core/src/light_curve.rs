// lcstats-core/src/light_curve.rs
//! The `LightCurve` input type.
//!
//! A light curve is three equal-length columns: observation time, magnitude and
//! magnitude uncertainty. Construction sorts the columns together by time so
//! every statistic that pairs consecutive observations sees them in order.
//! Nothing else is validated; NaN values, non-positive errors and very short
//! series are passed through to the statistics, which report NaN/inf for them.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;

use crate::errors::LcStatsError;

/// A time-ordered series of magnitude measurements with uncertainties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightCurve {
    t: Vec<f64>,
    mag: Vec<f64>,
    err: Vec<f64>,
}

impl LightCurve {
    /// Builds a light curve, sorting all three columns by `t`.
    ///
    /// The sort is stable, so observations sharing a timestamp keep their
    /// input order. Ordering follows `f64::total_cmp`, so a (positive) NaN
    /// timestamp sorts last.
    pub fn new(t: Vec<f64>, mag: Vec<f64>, err: Vec<f64>) -> Result<Self, LcStatsError> {
        if t.len() != mag.len() || t.len() != err.len() {
            return Err(LcStatsError::LengthMismatch {
                t: t.len(),
                mag: mag.len(),
                err: err.len(),
            });
        }

        if t.windows(2).all(|w| w[0].total_cmp(&w[1]).is_le()) {
            return Ok(Self { t, mag, err });
        }

        let mut order: Vec<usize> = (0..t.len()).collect();
        order.sort_by(|&a, &b| t[a].total_cmp(&t[b]));

        Ok(Self {
            t: order.iter().map(|&i| t[i]).collect(),
            mag: order.iter().map(|&i| mag[i]).collect(),
            err: order.iter().map(|&i| err[i]).collect(),
        })
    }

    pub fn t(&self) -> &[f64] {
        &self.t
    }

    pub fn mag(&self) -> &[f64] {
        &self.mag
    }

    pub fn err(&self) -> &[f64] {
        &self.err
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

// lcstats-core/src/engine.rs
//! Defines the core `FeatureEngine` trait.
//!
//! The `FeatureEngine` trait provides a pluggable interface for the different
//! ways of turning a light curve into a feature row (the full 22 + Fourier
//! row, or the Fourier block alone). Callers pick an engine once and then feed
//! it light curves without caring which statistics it computes.
//!
//! License: MIT OR APACHE 2.0

use crate::config::EngineConfig;
use crate::features::FeatureVector;
use crate::light_curve::LightCurve;

/// A trait that defines the core functionality of a feature extraction engine.
///
/// Engines hold only immutable configuration, so a single instance can be
/// shared across threads and applied to many light curves in parallel.
pub trait FeatureEngine: Send + Sync {
    /// Computes the engine's feature row for one light curve folded at `period`.
    ///
    /// Extraction never fails: degenerate input produces NaN/inf values and a
    /// failed Fourier fit produces an all-NaN Fourier block of the usual length.
    fn extract(&self, lc: &LightCurve, period: f64) -> FeatureVector;

    /// Column names of the rows produced by [`FeatureEngine::extract`], in order.
    fn feature_names(&self) -> Vec<String>;

    /// Returns a reference to the engine's configuration.
    fn config(&self) -> &EngineConfig;
}

// lcstats-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the feature engines in one-shot mode.
//!
//! Builds a light curve from raw columns, instantiates the selected engine and
//! extracts a single feature row.

use anyhow::Result;

use crate::config::EngineConfig;
use crate::engine::FeatureEngine;
use crate::engines::fourier_stats_engine::FourierStatsEngine;
use crate::engines::full_stats_engine::FullStatsEngine;
use crate::features::FeatureVector;
use crate::light_curve::LightCurve;

/// Enum to select which feature engine to use in headless mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadlessEngineType {
    /// Basic statistics followed by the Fourier block.
    #[default]
    Full,
    /// Fourier block only.
    Fourier,
}

/// Extracts one feature row from raw columns.
///
/// # Arguments
///
/// * `config` - The merged `EngineConfig` (defaults + optional user overrides).
/// * `t`, `mag`, `err` - Observation columns; need not be time-ordered.
/// * `period` - Period at which the Fourier series is fitted.
/// * `engine_type` - Which engine to use (`Full` or `Fourier`).
///
/// Only unequal column lengths and invalid configuration are errors.
pub fn headless_extract(
    config: EngineConfig,
    t: Vec<f64>,
    mag: Vec<f64>,
    err: Vec<f64>,
    period: f64,
    engine_type: HeadlessEngineType,
) -> Result<FeatureVector> {
    let engine: Box<dyn FeatureEngine> = match engine_type {
        HeadlessEngineType::Full => Box::new(FullStatsEngine::new(config)?),
        HeadlessEngineType::Fourier => Box::new(FourierStatsEngine::new(config)?),
    };

    let lc = LightCurve::new(t, mag, err)?;
    Ok(engine.extract(&lc, period))
}

// lcstats-core/src/engines/full_stats_engine.rs
//! A `FeatureEngine` producing the complete row: the 22 basic statistics
//! followed by the Fourier block.
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::debug;

use lcstats_math::fourier::FourierOptions;

use crate::config::EngineConfig;
use crate::engine::FeatureEngine;
use crate::features::{fourier_feature_names, FeatureVector, BASIC_FEATURE_NAMES};
use crate::light_curve::LightCurve;
use crate::pipeline::calc_stats;

/// Computes basic and Fourier statistics in one row.
#[derive(Debug, Clone)]
pub struct FullStatsEngine {
    config: EngineConfig,
    options: FourierOptions,
}

impl FullStatsEngine {
    /// Initializes the engine, validating the configuration first.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let options = config.fourier_options();
        debug!(
            "Initializing FullStatsEngine with max_nterms = {}, relative_output = {}",
            options.max_nterms, options.relative_output
        );
        Ok(Self { config, options })
    }
}

impl FeatureEngine for FullStatsEngine {
    fn extract(&self, lc: &LightCurve, period: f64) -> FeatureVector {
        FeatureVector::new(self.feature_names(), calc_stats(lc, period, &self.options))
    }

    fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = BASIC_FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        names.extend(fourier_feature_names(
            self.options.max_nterms,
            self.options.relative_output,
        ));
        names
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }
}

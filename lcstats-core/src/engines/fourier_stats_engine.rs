// lcstats-core/src/engines/fourier_stats_engine.rs
//! A `FeatureEngine` producing only the Fourier block.
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::debug;

use lcstats_math::fourier::FourierOptions;

use crate::config::EngineConfig;
use crate::engine::FeatureEngine;
use crate::features::{fourier_feature_names, FeatureVector};
use crate::light_curve::LightCurve;
use crate::pipeline::calc_fourier_stats;

/// Fits the Fourier series at the given period and reports the selected order.
#[derive(Debug, Clone)]
pub struct FourierStatsEngine {
    config: EngineConfig,
    options: FourierOptions,
}

impl FourierStatsEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let options = config.fourier_options();
        debug!(
            "Initializing FourierStatsEngine with max_nterms = {}, relative_output = {}",
            options.max_nterms, options.relative_output
        );
        Ok(Self { config, options })
    }
}

impl FeatureEngine for FourierStatsEngine {
    fn extract(&self, lc: &LightCurve, period: f64) -> FeatureVector {
        FeatureVector::new(
            self.feature_names(),
            calc_fourier_stats(lc, period, &self.options),
        )
    }

    fn feature_names(&self) -> Vec<String> {
        fourier_feature_names(self.options.max_nterms, self.options.relative_output)
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FourierConfig;

    #[test]
    fn test_block_width_follows_max_nterms() -> Result<()> {
        let config = EngineConfig {
            fourier: FourierConfig {
                max_nterms: Some(2),
                relative_output: Some(false),
                ..FourierConfig::default()
            },
            ..EngineConfig::default()
        };
        let engine = FourierStatsEngine::new(config)?;
        let lc = LightCurve::new(vec![0.0, 1.0], vec![1.0, 2.0], vec![0.1, 0.1])?;
        let row = engine.extract(&lc, 3.0);
        assert_eq!(row.len(), 8);
        assert_eq!(row.names()[4], "f1_A1");
        Ok(())
    }
}

//! Configuration management for `lcstats-core`.
//!
//! This module defines the engine configuration: the Fourier order search and
//! the least-squares optimizer settings. It handles deserialization of YAML
//! configurations and provides utilities for loading, merging and validating
//! them. Every field is optional so a user file only needs to name what it
//! overrides.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use lcstats_math::fourier::{FourierOptions, DEFAULT_MAX_NTERMS};
use lcstats_math::optimizer::LmConfig;

use crate::errors::LcStatsError;

/// Highest harmonic order accepted from a configuration file.
pub const MAX_NTERMS_LIMIT: usize = 16;

/// Settings for the Fourier order search.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FourierConfig {
    /// Highest harmonic order fitted (default: 5).
    pub max_nterms: Option<usize>,
    /// Initial value of the coefficients each new order adds (default: 0.1).
    pub harmonic_seed: Option<f64>,
    /// Report harmonics as relative amplitude/phase (default: true).
    pub relative_output: Option<bool>,
}

/// Settings for the Levenberg-Marquardt optimizer.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct OptimizerConfig {
    pub max_iterations: Option<usize>,
    /// Relative χ² reduction treated as convergence.
    pub ftol: Option<f64>,
    /// Relative parameter step treated as convergence.
    pub xtol: Option<f64>,
}

/// Represents the top-level configuration structure for lcstats.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub fourier: FourierConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

impl EngineConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, LcStatsError> {
        let config: EngineConfig = serde_yml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads an engine configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading engine configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if let Some(max_nterms) = config.fourier.max_nterms {
            if max_nterms != DEFAULT_MAX_NTERMS {
                warn!(
                    "max_nterms = {} changes the Fourier block width from the standard {} values.",
                    max_nterms,
                    FourierOptions::default().block_len()
                );
            }
        }
        Ok(config)
    }

    /// Loads the default configuration from the embedded YAML.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default engine configuration from embedded string...");
        let default_yaml = include_str!("../config/default_engine.yaml");
        Self::from_yaml_str(default_yaml).context("Failed to parse default engine configuration")
    }

    /// Checks every set field and reports all problems at once.
    pub fn validate(&self) -> std::result::Result<(), LcStatsError> {
        let mut errors = Vec::new();

        if let Some(max_nterms) = self.fourier.max_nterms {
            if max_nterms == 0 || max_nterms > MAX_NTERMS_LIMIT {
                errors.push(format!(
                    "fourier.max_nterms must be between 1 and {}, got {}.",
                    MAX_NTERMS_LIMIT, max_nterms
                ));
            }
        }

        if let Some(seed) = self.fourier.harmonic_seed {
            if !seed.is_finite() || seed == 0.0 {
                errors.push(format!("fourier.harmonic_seed must be finite and non-zero, got {}.", seed));
            }
        }

        if self.optimizer.max_iterations == Some(0) {
            errors.push("optimizer.max_iterations must be at least 1.".to_string());
        }

        for (name, value) in [("ftol", self.optimizer.ftol), ("xtol", self.optimizer.xtol)] {
            if let Some(tol) = value {
                if !(tol.is_finite() && tol > 0.0) {
                    errors.push(format!("optimizer.{} must be a positive number, got {}.", name, tol));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LcStatsError::InvalidConfig(errors.join(" ")))
        }
    }

    /// Resolves the configuration into optimizer-level options, filling unset
    /// fields with the built-in defaults.
    pub fn fourier_options(&self) -> FourierOptions {
        let defaults = FourierOptions::default();
        let lm_defaults = LmConfig::default();

        FourierOptions {
            max_nterms: self.fourier.max_nterms.unwrap_or(defaults.max_nterms),
            harmonic_seed: self.fourier.harmonic_seed.unwrap_or(defaults.harmonic_seed),
            relative_output: self.fourier.relative_output.unwrap_or(defaults.relative_output),
            lm: LmConfig {
                max_iterations: self.optimizer.max_iterations.unwrap_or(lm_defaults.max_iterations),
                ftol: self.optimizer.ftol.unwrap_or(lm_defaults.ftol),
                xtol: self.optimizer.xtol.unwrap_or(lm_defaults.xtol),
                ..lm_defaults
            },
        }
    }
}

/// Merges user-defined settings over the defaults, field by field.
pub fn merge_config(default_config: EngineConfig, user_config: Option<EngineConfig>) -> EngineConfig {
    let Some(user_cfg) = user_config else {
        debug!("No user engine configuration provided; using defaults.");
        return default_config;
    };

    let mut merged = default_config;

    macro_rules! override_field {
        ($section:ident . $field:ident) => {
            if let Some(value) = user_cfg.$section.$field {
                debug!(
                    "Overriding {}.{} with user value: {:?}",
                    stringify!($section),
                    stringify!($field),
                    value
                );
                merged.$section.$field = Some(value);
            }
        };
    }

    override_field!(fourier.max_nterms);
    override_field!(fourier.harmonic_seed);
    override_field!(fourier.relative_output);
    override_field!(optimizer.max_iterations);
    override_field!(optimizer.ftol);
    override_field!(optimizer.xtol);

    merged
}

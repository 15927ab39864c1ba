// lcstats/src/commands/mod.rs
//! Command implementations for the lcstats CLI.

pub mod extract;
pub mod names;

use anyhow::Result;
use log::debug;
use std::path::Path;

use lcstats_core::{
    merge_config, EngineConfig, FeatureEngine, FourierStatsEngine, FullStatsEngine,
};

/// Loads the embedded defaults and merges an optional user file over them.
pub fn load_engine_config(user_path: Option<&Path>) -> Result<EngineConfig> {
    let default_config = EngineConfig::load_default()?;
    let user_config = user_path.map(EngineConfig::load_from_file).transpose()?;
    Ok(merge_config(default_config, user_config))
}

/// Builds the engine selected by `--fourier-only`.
pub fn build_engine(config: EngineConfig, fourier_only: bool) -> Result<Box<dyn FeatureEngine>> {
    debug!("Building {} engine.", if fourier_only { "Fourier-only" } else { "full" });
    Ok(if fourier_only {
        Box::new(FourierStatsEngine::new(config)?)
    } else {
        Box::new(FullStatsEngine::new(config)?)
    })
}

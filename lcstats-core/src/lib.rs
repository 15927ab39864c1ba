// lcstats-core/src/lib.rs
//! # lcstats Core Library
//!
//! `lcstats-core` turns astronomical light curves (time, magnitude, magnitude
//! error) into fixed-order feature rows for variable-star classification. It
//! combines the numerical routines of `lcstats-math` into the basic statistics
//! block and the Fourier block, and wraps them in a pluggable `FeatureEngine`
//! trait.
//!
//! The library is pure and stateless: it performs no I/O beyond reading an
//! optional configuration file, and the same input always yields the same row.
//!
//! ## Modules
//!
//! * `config`: `EngineConfig` and YAML loading, merging and validation.
//! * `light_curve`: The time-sorted `LightCurve` input type.
//! * `features`: Column names and the `FeatureVector` container.
//! * `pipeline`: `calc_basic_stats`, `calc_fourier_stats` and `calc_stats`.
//! * `engine`: Defines the `FeatureEngine` trait.
//! * `engines`: Concrete implementations of the `FeatureEngine` trait.
//! * `headless`: One-shot extraction from raw columns.
//! * `errors`: The `LcStatsError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use lcstats_core::{headless_extract, EngineConfig, HeadlessEngineType};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = EngineConfig::load_default()?;
//!
//!     let t: Vec<f64> = (0..10).map(f64::from).collect();
//!     let mag: Vec<f64> = t
//!         .iter()
//!         .map(|x| 0.5 * (2.0 * std::f64::consts::PI * x / 5.0).sin())
//!         .collect();
//!     let err = vec![0.01; 10];
//!
//!     let row = headless_extract(config, t, mag, err, 5.0, HeadlessEngineType::Full)?;
//!     println!("wstd = {:?}", row.get("wstd"));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Numerical degeneracy is never an error: it appears as NaN/inf in the row,
//! and a failed Fourier fit yields an all-NaN Fourier block. `LcStatsError`
//! covers mismatched columns and bad configuration; loading helpers return
//! `anyhow::Result` with context.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod features;
pub mod headless;
pub mod light_curve;
pub mod pipeline;

/// Re-exports the configuration types and functions.
pub use config::{merge_config, EngineConfig, FourierConfig, OptimizerConfig, MAX_NTERMS_LIMIT};

/// Re-exports the custom error type for clear error reporting.
pub use errors::LcStatsError;

pub use engine::FeatureEngine;
pub use engines::fourier_stats_engine::FourierStatsEngine;
pub use engines::full_stats_engine::FullStatsEngine;

pub use features::{fourier_feature_names, FeatureVector, BASIC_FEATURE_NAMES};
pub use light_curve::LightCurve;
pub use pipeline::{calc_basic_stats, calc_fourier_stats, calc_stats};

/// Re-exports types and functions for one-shot, non-interactive use.
pub use headless::{headless_extract, HeadlessEngineType};

/// Re-exports the numerical options so callers of the pipeline functions do
/// not need a direct `lcstats-math` dependency.
pub use lcstats_math::fourier::FourierOptions;
pub use lcstats_math::optimizer::LmConfig;

//! errors.rs - Custom error types for the lcstats-core library.
//!
//! Numerical degeneracy is never an error in this library: it surfaces as NaN
//! or inf inside the feature vector. The variants here cover the few things
//! that genuinely cannot produce a feature row.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `lcstats-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LcStatsError {
    #[error("Light curve columns differ in length: t={t}, mag={mag}, err={err}")]
    LengthMismatch { t: usize, mag: usize, err: usize },

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yml::Error),
}

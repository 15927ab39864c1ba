// lcstats-core/src/engines/mod.rs
//! This module contains the feature engine implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `FeatureEngine` trait.

pub mod fourier_stats_engine;
pub mod full_stats_engine;

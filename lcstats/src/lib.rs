// lcstats/src/lib.rs
//! # lcstats CLI Application
//!
//! This crate provides the command-line interface for the `lcstats-core`
//! feature engines: reading light-curve files, running an engine over them and
//! rendering the resulting rows.

pub mod cli;
pub mod commands;
pub mod input;
pub mod logger;
pub mod ui;

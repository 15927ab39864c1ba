// lcstats/src/ui/mod.rs
//! Terminal rendering: status messages on stderr and feature tables on stdout.

pub mod feature_table;
pub mod output_format;

// lcstats/src/logger.rs
//! Logging setup for the lcstats binary.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Installs `env_logger` writing to stderr.
///
/// An explicit `level` wins over `RUST_LOG`; with `None` the environment is
/// honoured and defaults to warnings only. Calling this more than once is a
/// no-op.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    let _ = builder.try_init();
}

// lcstats/src/commands/names.rs
//! `lcstats names`: prints the feature columns in output order.

use anyhow::Result;
use std::io::{self, Write};

use crate::cli::NamesCommand;
use crate::commands::{build_engine, load_engine_config};

pub fn run_names<W: Write>(cmd: &NamesCommand, writer: &mut W) -> Result<()> {
    let config = load_engine_config(cmd.config.as_deref())?;
    let engine = build_engine(config, cmd.fourier_only)?;
    for name in engine.feature_names() {
        writeln!(writer, "{}", name)?;
    }
    Ok(())
}

/// Runs `names` against stdout.
pub fn run_names_stdout(cmd: &NamesCommand) -> Result<()> {
    let stdout = io::stdout();
    run_names(cmd, &mut stdout.lock())
}

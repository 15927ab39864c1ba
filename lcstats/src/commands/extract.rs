// lcstats/src/commands/extract.rs
//! `lcstats extract`: computes a feature row per input file.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::io::{self, Write};

use lcstats_core::FeatureVector;

use crate::cli::{ExtractCommand, OutputFormat};
use crate::commands::{build_engine, load_engine_config};
use crate::input::read_light_curve;
use crate::ui::feature_table::build_feature_table;
use crate::ui::output_format;

/// One extracted row and the file it came from.
#[derive(Debug, Serialize)]
pub struct SourceFeatures {
    pub source: String,
    pub features: FeatureVector,
}

/// Reads every input and runs the selected engine over it.
pub fn extract_all(cmd: &ExtractCommand) -> Result<(Vec<String>, Vec<SourceFeatures>)> {
    let config = load_engine_config(cmd.config.as_deref())?;
    let engine = build_engine(config, cmd.fourier_only)?;

    if !cmd.period.is_finite() || cmd.period <= 0.0 {
        let supports_color = io::stderr().is_terminal();
        let _ = output_format::print_warn_message(
            &mut io::stderr(),
            &format!("period {} is not a positive number; Fourier features may be NaN.", cmd.period),
            supports_color,
        );
    }

    let mut rows = Vec::with_capacity(cmd.input.len());
    for path in &cmd.input {
        let lc = read_light_curve(path)?;
        info!("Extracting features from {} ({} points).", path.display(), lc.len());
        let features = engine.extract(&lc, cmd.period);
        rows.push(SourceFeatures {
            source: path.display().to_string(),
            features,
        });
    }

    Ok((engine.feature_names(), rows))
}

/// Writes rows in the requested layout.
pub fn write_rows<W: Write>(
    writer: &mut W,
    names: &[String],
    rows: &[SourceFeatures],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut *writer);
            let header = std::iter::once("source").chain(names.iter().map(String::as_str));
            csv_writer.write_record(header)?;
            for row in rows {
                let mut record = vec![row.source.clone()];
                record.extend(row.features.as_slice().iter().map(|v| v.to_string()));
                csv_writer.write_record(&record)?;
            }
            csv_writer.flush().context("Failed to write CSV output")?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, rows).context("Failed to write JSON output")?;
            writeln!(writer)?;
        }
        OutputFormat::Table => {
            for row in rows {
                writeln!(writer, "{}", build_feature_table(&row.source, &row.features))?;
            }
        }
    }
    Ok(())
}

/// The `extract` command runner.
pub fn run_extract(cmd: &ExtractCommand) -> Result<()> {
    let (names, rows) = extract_all(cmd)?;
    debug!("Writing {} row(s) of {} features.", rows.len(), names.len());

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_rows(&mut writer, &names, &rows, cmd.output_format())?;
    writer.flush()?;
    Ok(())
}

// lcstats/src/main.rs
//! lcstats entry point.
//!
//! Parses the command line, configures logging and dispatches to the
//! selected command.

use clap::Parser;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;

use lcstats::cli::{Cli, Commands};
use lcstats::commands::{extract, names};
use lcstats::logger;
use lcstats::ui::output_format;

fn main() -> ExitCode {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    let result = match &args.command {
        Commands::Extract(cmd) => extract::run_extract(cmd),
        Commands::Names(cmd) => names::run_names_stdout(cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let supports_color = io::stderr().is_terminal();
            let _ = output_format::print_error_message(&mut io::stderr(), &format!("{:#}", e), supports_color);
            ExitCode::FAILURE
        }
    }
}

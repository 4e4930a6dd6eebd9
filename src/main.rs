//! Denshoch - class, alt text and ruby annotation for HTML/XHTML.

mod cli;

use clap::{ColorChoice, Parser};
use cli::Cli;
use denshoch::{log, logger};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match cli::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log!("error"; "{:#}", e);
            if let Some(err) = e.downcast_ref::<denshoch::Error>() {
                logger::diagnostics(err.diagnostics());
            }
            ExitCode::FAILURE
        }
    }
}

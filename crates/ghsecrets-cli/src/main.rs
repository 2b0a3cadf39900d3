//! ghsecrets CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use ghsecrets_core::{Host, Inputs};
use ghsecrets_types::LogFormat;

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let inputs = Inputs::from_env().overlay(cli.inputs());

    init_logging(&inputs);

    let mut host = Host::from_env();

    match commands::set::execute(inputs, &mut host).await {
        Ok(_) => Ok(()),
        Err(e) => {
            let message = format!("{:#}", e);
            if let Err(report) = host.set_failed(&message) {
                eprintln!("{} {}", "Error:".red().bold(), report);
            }
            eprintln!("{} {}", "Error:".red().bold(), message);
            std::process::exit(1);
        }
    }
}

// Configuration is validated later; an unreadable format falls back to the
// default here so the validation error itself still gets logged.
fn init_logging(inputs: &Inputs) {
    let format = inputs
        .log_format
        .as_deref()
        .and_then(|raw| raw.parse::<LogFormat>().ok())
        .unwrap_or_default();

    if let Err(e) = ghsecrets_core::log::init(format, inputs.debug.unwrap_or(false)) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }
}

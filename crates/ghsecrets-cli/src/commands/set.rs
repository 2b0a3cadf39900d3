//! Upload a secret.

use anyhow::Result;
use colored::Colorize;
use ghsecrets_core::{ActionConfig, Host, Inputs};
use ghsecrets_sync::{Outcome, SecretUpload};
use std::io::Write;

pub async fn execute<W: Write>(inputs: Inputs, host: &mut Host<W>) -> Result<()> {
    let config = ActionConfig::from_inputs(inputs)?;
    tracing::debug!(?config, "resolved configuration");

    host.mask(&config.value)?;

    eprintln!(
        "{} {} to {}",
        "Uploading".green().bold(),
        config.name.to_string().cyan(),
        config.target.to_string().cyan()
    );

    let upload = SecretUpload::from_config(&config)?;

    match upload.run().await {
        Outcome::Succeeded(result) => {
            host.set_output("status", &result.status.to_string())?;
            host.set_output("data", &result.body)?;
            eprintln!("{} Secret {} created", "✓".green().bold(), config.name);
            Ok(())
        }
        // The error text is reported as-is; a rejection carries the response body.
        Outcome::Failed(e) => Err(e.into()),
    }
}

//! Signaling to the CI host that runs ghsecrets.
//!
//! Under a GitHub Actions runner, outputs go to the file named by
//! `GITHUB_OUTPUT` and failures are reported with `::error::` workflow
//! commands. Outside a runner the same calls print plain lines on stdout.

use ghsecrets_types::{bail, Result};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Writer for workflow commands and step outputs.
pub struct Host<W: Write = io::Stdout> {
    out: W,
    output_file: Option<PathBuf>,
    in_runner: bool,
}

impl Host<io::Stdout> {
    /// Build a host from the process environment.
    pub fn from_env() -> Self {
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let in_runner = std::env::var("GITHUB_ACTIONS").map(|v| v == "true").unwrap_or(false);

        Self::new(io::stdout(), output_file, in_runner)
    }
}

impl<W: Write> Host<W> {
    /// Create a host writing commands to `out`.
    pub fn new(out: W, output_file: Option<PathBuf>, in_runner: bool) -> Self {
        Self { out, output_file, in_runner }
    }

    /// Whether we are running inside an Actions runner.
    pub fn in_runner(&self) -> bool {
        self.in_runner
    }

    /// Ask the runner to mask `value` in all subsequent log lines.
    pub fn mask(&mut self, value: &str) -> Result<()> {
        if !self.in_runner || value.is_empty() {
            return Ok(());
        }
        for line in value.lines().filter(|l| !l.trim().is_empty()) {
            writeln!(self.out, "::add-mask::{}", escape_data(line))?;
        }
        Ok(())
    }

    /// Publish a step output.
    pub fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match &self.output_file {
            Some(path) => {
                let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
                if name.contains(&delimiter) || value.contains(&delimiter) {
                    bail!(Config, "Output '{}' collides with its delimiter", name);
                }

                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}<<{}\n{}\n{}", name, delimiter, value, delimiter)?;
            }
            None => writeln!(self.out, "{}={}", name, value)?,
        }
        Ok(())
    }

    /// Report the run as failed.
    ///
    /// Inside a runner this emits an `::error::` annotation; the caller is
    /// still responsible for exiting non-zero.
    pub fn set_failed(&mut self, message: &str) -> Result<()> {
        if self.in_runner {
            writeln!(self.out, "::error::{}", escape_data(message))?;
        } else {
            writeln!(self.out, "error={}", escape_data(message))?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Consume the host, returning the command writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Escape a workflow command payload.
pub fn escape_data(data: &str) -> String {
    data.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

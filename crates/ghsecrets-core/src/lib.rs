//! # ghsecrets Core
//!
//! Configuration, logging, and CI host signaling for ghsecrets.
//!
//! This crate provides:
//!
//! - **Configuration**: raw inputs from flags and runner variables, validated
//!   once into an immutable [`ActionConfig`]
//! - **Logging**: `tracing` subscriber setup with pretty, compact, or JSON output
//! - **Output**: step outputs, value masking, and failure annotations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod log;
pub mod output;

// Re-export commonly used items
pub use config::{ActionConfig, Inputs};
pub use output::Host;
pub use ghsecrets_types::{SecretError, Result};

/// ghsecrets application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// ghsecrets application name
pub const APP_NAME: &str = "ghsecrets";

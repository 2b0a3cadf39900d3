//! # ghsecrets Services
//!
//! Remote client implementation for ghsecrets.
//!
//! This crate provides:
//! - **GitHub**: an async client for the Actions secrets REST API, addressing
//!   either a repository or an organization
//! - **Sealer**: libsodium-compatible sealed-box encryption of secret values

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod github;
pub mod sealer;

pub use github::{GithubClient, GithubConfig, Scope};
pub use sealer::seal_secret;

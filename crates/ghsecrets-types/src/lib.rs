//! # ghsecrets Types
//!
//! Core types, traits, and enums shared across all ghsecrets crates.
//!
//! This crate provides:
//!
//! - Validated identifiers for secret names, owners, and repositories
//! - The request-scoped data model: targets, public keys, payloads, results
//! - The [`SecretsApi`] trait implemented by remote clients
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use ghsecrets_types::{Owner, RepoName, SecretName, Target};
//!
//! let target = Target::Repository {
//!     owner: Owner::new("acme").unwrap(),
//!     repo: RepoName::new("widgets").unwrap(),
//! };
//! assert!(!target.is_organization());
//!
//! let name = SecretName::new("api_key").unwrap();
//! assert_eq!(name.as_str(), "API_KEY");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod identifiers;
pub mod enums;
pub mod model;
pub mod traits;

// Re-export common types for convenience
pub use errors::{SecretError, Result};
pub use identifiers::{Owner, RepoName, RepositoryId, SecretName};
pub use enums::{LogFormat, Visibility};
pub use model::{OrgVisibility, PublicKey, SealedSecret, SecretPayload, SubmissionResult, Target};
pub use traits::SecretsApi;

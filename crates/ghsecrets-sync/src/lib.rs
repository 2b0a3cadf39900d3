//! # ghsecrets Sync
//!
//! The upload flow that ties the pieces together:
//!
//! 1. fetch the target's public key
//! 2. seal the value against it
//! 3. attach organization visibility when the target is an organization
//! 4. submit the secret
//! 5. classify the response (status >= 400 is a failure)
//!
//! Every error is caught at the flow boundary and reported once through
//! [`Outcome`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod upload;

pub use upload::{Outcome, SecretUpload};

//! Core trait definitions for ghsecrets abstractions.

use async_trait::async_trait;
use crate::errors::Result;
use crate::identifiers::SecretName;
use crate::model::{PublicKey, SealedSecret, SecretPayload, SubmissionResult};

/// Trait for remote secret stores that accept sealed values.
///
/// Implementers fix their addressing (repository or organization) when they
/// are constructed; the methods never re-decide it.
#[async_trait]
pub trait SecretsApi: Send + Sync {
    /// Fetch the public key new secrets must be sealed against.
    ///
    /// Transport failures and non-2xx responses are errors.
    async fn fetch_public_key(&self) -> Result<PublicKey>;

    /// Seal a plaintext value against a fetched public key.
    fn seal_secret(&self, key: &PublicKey, plaintext: &str) -> Result<SealedSecret>;

    /// Create or update a named secret.
    ///
    /// Only transport failures are errors; a rejected submission comes back
    /// as a [`SubmissionResult`] with its status and body.
    async fn submit_secret(&self, payload: &SecretPayload, name: &SecretName) -> Result<SubmissionResult>;

    /// Whether the store addresses an organization rather than a repository.
    fn is_organization(&self) -> bool;
}

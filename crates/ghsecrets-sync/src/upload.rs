//! Secret upload flow: fetch key, seal, submit, classify.

use ghsecrets_core::ActionConfig;
use ghsecrets_services::{GithubClient, GithubConfig};
use ghsecrets_types::{
    OrgVisibility, Result, SealedSecret, SecretError, SecretName, SecretPayload, SecretsApi,
    SubmissionResult,
};

/// Final result of an upload, after every error has been caught.
#[derive(Debug)]
pub enum Outcome {
    /// The secret was written
    Succeeded(SubmissionResult),
    /// The run failed; the error carries the detail to report
    Failed(SecretError),
}

impl Outcome {
    /// Whether the upload succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

/// One secret upload against a [`SecretsApi`].
pub struct SecretUpload {
    api: Box<dyn SecretsApi>,
    name: SecretName,
    value: String,
    visibility: Option<OrgVisibility>,
}

impl SecretUpload {
    /// Create an upload.
    ///
    /// `visibility` is only consulted when the API addresses an organization.
    pub fn new(
        api: Box<dyn SecretsApi>,
        name: SecretName,
        value: impl Into<String>,
        visibility: Option<OrgVisibility>,
    ) -> Self {
        Self {
            api,
            name,
            value: value.into(),
            visibility,
        }
    }

    /// Build an upload backed by the GitHub client from a validated config.
    pub fn from_config(config: &ActionConfig) -> Result<Self> {
        let github = GithubClient::new(GithubConfig::new(
            config.api_url.clone(),
            config.token.clone(),
            config.target.clone(),
        ))?;

        Ok(Self::new(
            Box::new(github),
            config.name.clone(),
            config.value.clone(),
            config.visibility.clone(),
        ))
    }

    /// Run the upload, returning the first error encountered.
    ///
    /// A submission answered with status >= 400 is turned into
    /// [`SecretError::Rejected`] carrying the response body verbatim.
    pub async fn execute(&self) -> Result<SubmissionResult> {
        tracing::info!("Getting public key from GitHub...");
        let key = self.api.fetch_public_key().await?;

        tracing::info!(secret = %self.name, "Encrypting secret...");
        let sealed = self.api.seal_secret(&key, &self.value)?;
        tracing::debug!(key_id = %sealed.key_id, "sealed secret");

        let payload = self.payload(sealed);

        tracing::info!(secret = %self.name, "Adding secret to GitHub...");
        let result = self.api.submit_secret(&payload, &self.name).await?;
        tracing::debug!(status = result.status, "submission answered");

        if !result.is_success() {
            return Err(SecretError::Rejected {
                status: result.status,
                body: result.body,
            });
        }

        Ok(result)
    }

    /// Run the upload and fold every failure into the outcome.
    pub async fn run(&self) -> Outcome {
        match self.execute().await {
            Ok(submitted) => {
                tracing::info!(secret = %self.name, status = submitted.status, "Secret created successfully");
                Outcome::Succeeded(submitted)
            }
            Err(e) => {
                tracing::error!(secret = %self.name, "Secret upload failed: {}", e);
                Outcome::Failed(e)
            }
        }
    }

    fn payload(&self, sealed: SealedSecret) -> SecretPayload {
        if !self.api.is_organization() {
            return SecretPayload::Repository(sealed);
        }

        let visibility = self.visibility.clone().unwrap_or_else(|| {
            tracing::warn!("no visibility configured for organization secret; using private");
            OrgVisibility::Private
        });
        tracing::debug!(visibility = %visibility.visibility(), "organization secret");

        SecretPayload::Organization { sealed, visibility }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ghsecrets_types::{PublicKey, RepositoryId};
    use mockall::mock;
    use serde_json::json;

    mock! {
        pub Api {}

        #[async_trait]
        impl SecretsApi for Api {
            async fn fetch_public_key(&self) -> Result<PublicKey>;
            fn seal_secret(&self, key: &PublicKey, plaintext: &str) -> Result<SealedSecret>;
            async fn submit_secret(&self, payload: &SecretPayload, name: &SecretName) -> Result<SubmissionResult>;
            fn is_organization(&self) -> bool;
        }
    }

    fn key() -> PublicKey {
        PublicKey {
            key_id: "568250167242549743".to_string(),
            key: "2Sg8iYjAxxmI2LvUXpJjkYrMxURPc8r+dB7TJyvvcCU=".to_string(),
        }
    }

    fn sealed() -> SealedSecret {
        SealedSecret {
            encrypted_value: "c2VhbGVk".to_string(),
            key_id: "568250167242549743".to_string(),
        }
    }

    fn name() -> SecretName {
        SecretName::new("API_KEY").unwrap()
    }

    fn happy_api(organization: bool, status: u16) -> MockApi {
        let mut api = MockApi::new();
        api.expect_fetch_public_key().times(1).returning(|| Ok(key()));
        api.expect_seal_secret()
            .withf(|k, plaintext| *k == key() && plaintext == "shh")
            .times(1)
            .returning(|_, _| Ok(sealed()));
        api.expect_is_organization().return_const(organization);
        api.expect_submit_secret()
            .times(1)
            .returning(move |_, _| Ok(SubmissionResult { status, body: String::new() }));
        api
    }

    #[tokio::test]
    async fn test_repository_payload_is_unmodified() {
        let mut api = MockApi::new();
        api.expect_fetch_public_key().returning(|| Ok(key()));
        api.expect_seal_secret().returning(|_, _| Ok(sealed()));
        api.expect_is_organization().return_const(false);
        api.expect_submit_secret()
            .withf(|payload, name| {
                name.as_str() == "API_KEY"
                    && serde_json::to_value(payload).unwrap()
                        == json!({"encrypted_value": "c2VhbGVk", "key_id": "568250167242549743"})
            })
            .times(1)
            .returning(|_, _| Ok(SubmissionResult { status: 201, body: String::new() }));

        // Visibility is ignored for repository targets.
        let upload = SecretUpload::new(Box::new(api), name(), "shh", Some(OrgVisibility::All));
        let submitted = upload.execute().await.unwrap();
        assert_eq!(submitted.status, 201);
    }

    #[tokio::test]
    async fn test_organization_payload_carries_visibility() {
        let mut api = MockApi::new();
        api.expect_fetch_public_key().returning(|| Ok(key()));
        api.expect_seal_secret().returning(|_, _| Ok(sealed()));
        api.expect_is_organization().return_const(true);
        api.expect_submit_secret()
            .withf(|payload, _| {
                let body = serde_json::to_value(payload).unwrap();
                body["visibility"] == "selected" && body["selected_repository_ids"] == json!([111, 222])
            })
            .times(1)
            .returning(|_, _| Ok(SubmissionResult { status: 204, body: String::new() }));

        let visibility = OrgVisibility::Selected(vec![RepositoryId(111), RepositoryId(222)]);
        let upload = SecretUpload::new(Box::new(api), name(), "shh", Some(visibility));
        assert!(upload.run().await.is_success());
    }

    #[tokio::test]
    async fn test_organization_without_visibility_defaults_to_private() {
        let mut api = MockApi::new();
        api.expect_fetch_public_key().returning(|| Ok(key()));
        api.expect_seal_secret().returning(|_, _| Ok(sealed()));
        api.expect_is_organization().return_const(true);
        api.expect_submit_secret()
            .withf(|payload, _| {
                let body = serde_json::to_value(payload).unwrap();
                body["visibility"] == "private" && body.get("selected_repository_ids").is_none()
            })
            .returning(|_, _| Ok(SubmissionResult { status: 201, body: String::new() }));

        let upload = SecretUpload::new(Box::new(api), name(), "shh", None);
        assert!(upload.run().await.is_success());
    }

    #[tokio::test]
    async fn test_success_exposes_status_and_body() {
        let mut api = MockApi::new();
        api.expect_fetch_public_key().returning(|| Ok(key()));
        api.expect_seal_secret().returning(|_, _| Ok(sealed()));
        api.expect_is_organization().return_const(false);
        api.expect_submit_secret()
            .returning(|_, _| Ok(SubmissionResult { status: 201, body: r#"{"ok": true}"#.to_string() }));

        let upload = SecretUpload::new(Box::new(api), name(), "shh", None);
        match upload.run().await {
            Outcome::Succeeded(submitted) => {
                assert_eq!(submitted.status, 201);
                assert_eq!(submitted.body, r#"{"ok": true}"#);
            }
            Outcome::Failed(e) => panic!("expected success, got {}", e),
        }
    }

    #[tokio::test]
    async fn test_rejection_reports_body() {
        let mut api = MockApi::new();
        api.expect_fetch_public_key().returning(|| Ok(key()));
        api.expect_seal_secret().returning(|_, _| Ok(sealed()));
        api.expect_is_organization().return_const(false);
        api.expect_submit_secret().returning(|_, _| {
            Ok(SubmissionResult {
                status: 404,
                body: "{\n  \"message\": \"Not Found\",\n  \"documentation_url\": \"x\"\n}".to_string(),
            })
        });

        let upload = SecretUpload::new(Box::new(api), name(), "shh", None);
        match upload.run().await {
            Outcome::Failed(SecretError::Rejected { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "{\n  \"message\": \"Not Found\",\n  \"documentation_url\": \"x\"\n}");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_status_400_is_failure_399_is_not() {
        let upload = SecretUpload::new(Box::new(happy_api(false, 400)), name(), "shh", None);
        assert!(!upload.run().await.is_success());

        let upload = SecretUpload::new(Box::new(happy_api(false, 399)), name(), "shh", None);
        assert!(upload.run().await.is_success());
    }

    #[tokio::test]
    async fn test_key_fetch_failure_stops_the_flow() {
        let mut api = MockApi::new();
        api.expect_fetch_public_key()
            .times(1)
            .returning(|| Err(SecretError::Remote("connection reset".into())));
        api.expect_seal_secret().never();
        api.expect_is_organization().never();
        api.expect_submit_secret().never();

        let upload = SecretUpload::new(Box::new(api), name(), "shh", None);
        match upload.run().await {
            Outcome::Failed(e) => assert!(e.is_remote()),
            Outcome::Succeeded(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_seal_failure_skips_submission() {
        let mut api = MockApi::new();
        api.expect_fetch_public_key().returning(|| Ok(key()));
        api.expect_seal_secret()
            .returning(|_, _| Err(SecretError::Encryption("Public key must be 32 bytes, got 3".into())));
        api.expect_submit_secret().never();

        let upload = SecretUpload::new(Box::new(api), name(), "shh", None);
        match upload.run().await {
            Outcome::Failed(e) => assert!(matches!(e, SecretError::Encryption(_))),
            Outcome::Succeeded(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_submit_transport_failure() {
        let mut api = MockApi::new();
        api.expect_fetch_public_key().returning(|| Ok(key()));
        api.expect_seal_secret().returning(|_, _| Ok(sealed()));
        api.expect_is_organization().return_const(false);
        api.expect_submit_secret()
            .returning(|_, _| Err(SecretError::Remote("Failed to submit secret: timed out".into())));

        let upload = SecretUpload::new(Box::new(api), name(), "shh", None);
        assert!(matches!(upload.run().await, Outcome::Failed(SecretError::Remote(_))));
    }
}

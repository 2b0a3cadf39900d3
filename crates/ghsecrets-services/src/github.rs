//! GitHub Actions secrets API client implementation.

use async_trait::async_trait;
use ghsecrets_types::{
    PublicKey, Result, SealedSecret, SecretError, SecretName, SecretPayload, SecretsApi,
    SubmissionResult, Target,
};
use reqwest::{header, Client};
use url::Url;

use crate::sealer;

/// GitHub REST API version requested on every call.
pub const API_VERSION: &str = "2022-11-28";

/// GitHub client configuration.
#[derive(Clone)]
pub struct GithubConfig {
    /// GitHub API base URL (for Enterprise)
    pub api_url: Url,
    /// Token used as a bearer credential
    pub token: String,
    /// Repository or organization the secrets belong to
    pub target: Target,
    /// User agent sent to the API
    pub user_agent: String,
}

impl GithubConfig {
    /// Configuration for a target on an API endpoint.
    pub fn new(api_url: Url, token: impl Into<String>, target: Target) -> Self {
        Self {
            api_url,
            token: token.into(),
            target,
            user_agent: format!("ghsecrets/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_url", &self.api_url.as_str())
            .field("token", &"<redacted>")
            .field("target", &self.target)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Endpoint family for a target, fixed when the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    prefix: String,
    organization: bool,
}

impl Scope {
    /// Pick the endpoint family for `target`.
    pub fn for_target(target: &Target) -> Self {
        match target {
            Target::Repository { owner, repo } => Self {
                prefix: format!("repos/{}/{}", owner, repo),
                organization: false,
            },
            Target::Organization { org } => Self {
                prefix: format!("orgs/{}", org),
                organization: true,
            },
        }
    }

    /// Path of the public-key endpoint.
    pub fn public_key_path(&self) -> String {
        format!("{}/actions/secrets/public-key", self.prefix)
    }

    /// Path of a named secret.
    pub fn secret_path(&self, name: &SecretName) -> String {
        format!("{}/actions/secrets/{}", self.prefix, name)
    }

    /// Whether this is the organization family.
    pub fn is_organization(&self) -> bool {
        self.organization
    }
}

/// GitHub API client for Actions secrets.
pub struct GithubClient {
    config: GithubConfig,
    scope: Scope,
    client: Client,
}

impl GithubClient {
    /// Create a new GitHub client.
    pub fn new(config: GithubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| SecretError::Config(format!("Invalid user agent: {}", e)))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            header::HeaderValue::from_static(API_VERSION),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SecretError::Remote(format!("Failed to create HTTP client: {}", e)))?;

        let scope = Scope::for_target(&config.target);

        Ok(Self { config, scope, client })
    }

    /// Endpoint family chosen at construction.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Target the client writes to.
    pub fn target(&self) -> &Target {
        &self.config.target
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.as_str().trim_end_matches('/'), path)
    }
}

#[async_trait]
impl SecretsApi for GithubClient {
    async fn fetch_public_key(&self) -> Result<PublicKey> {
        let url = self.endpoint(&self.scope.public_key_path());
        tracing::debug!(%url, "fetching public key");

        let response = self.client.get(&url)
            .bearer_auth(&self.config.token)
            .send().await
            .map_err(|e| SecretError::Remote(format!("Failed to fetch public key: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SecretError::Remote(format!(
                "Public key request failed ({}): {}",
                status, error_text
            )));
        }

        let key: PublicKey = response.json().await
            .map_err(|e| SecretError::Remote(format!("Failed to parse public key: {}", e)))?;

        tracing::debug!(key_id = %key.key_id, "received public key");
        Ok(key)
    }

    fn seal_secret(&self, key: &PublicKey, plaintext: &str) -> Result<SealedSecret> {
        sealer::seal_secret(key, plaintext)
    }

    async fn submit_secret(&self, payload: &SecretPayload, name: &SecretName) -> Result<SubmissionResult> {
        let url = self.endpoint(&self.scope.secret_path(name));
        tracing::debug!(%url, "submitting secret");

        let response = self.client.put(&url)
            .bearer_auth(&self.config.token)
            .json(payload)
            .send().await
            .map_err(|e| SecretError::Remote(format!("Failed to submit secret: {}", e)))?;

        let status = response.status().as_u16();
        let body = response.text().await
            .map_err(|e| SecretError::Remote(format!("Failed to read submission response: {}", e)))?;

        Ok(SubmissionResult { status, body })
    }

    fn is_organization(&self) -> bool {
        self.scope.is_organization()
    }
}

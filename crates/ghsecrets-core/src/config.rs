//! Configuration management for ghsecrets.
//!
//! Inputs arrive from two layers, resolved in this priority order:
//! 1. Command-line flags
//! 2. Environment variables (`INPUT_*` as exported by the Actions runner,
//!    plus `GITHUB_REPOSITORY` and `GITHUB_API_URL`)
//!
//! Both layers fill the same raw [`Inputs`] bag. [`ActionConfig::from_inputs`]
//! validates it exactly once; the resulting config is immutable and is the
//! only thing the upload flow reads.
//!
//! ## Example
//!
//! ```
//! use ghsecrets_core::config::{ActionConfig, Inputs};
//!
//! let inputs = Inputs {
//!     name: Some("API_KEY".into()),
//!     value: Some("shh".into()),
//!     owner: Some("acme".into()),
//!     repository: Some("widgets".into()),
//!     token: Some("ghp_example".into()),
//!     ..Default::default()
//! };
//!
//! let config = ActionConfig::from_inputs(inputs).unwrap();
//! assert_eq!(config.target.to_string(), "acme/widgets");
//! assert!(config.visibility.is_none());
//! ```

use ghsecrets_types::{
    bail, LogFormat, OrgVisibility, Owner, RepoName, RepositoryId, Result, SecretError,
    SecretName, Target, Visibility,
};
use std::fmt;
use url::Url;

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Raw, unvalidated inputs.
///
/// Every field is optional here; presence rules are enforced by
/// [`ActionConfig::from_inputs`].
#[derive(Clone, Default)]
pub struct Inputs {
    /// Secret name
    pub name: Option<String>,
    /// Secret plaintext value
    pub value: Option<String>,
    /// Repository owner
    pub owner: Option<String>,
    /// Repository name, or `owner/repo`
    pub repository: Option<String>,
    /// Authentication token
    pub token: Option<String>,
    /// Organization flag or organization login
    pub org: Option<String>,
    /// Organization secret visibility
    pub visibility: Option<String>,
    /// Repository ids for `selected` visibility
    pub selected_repository_ids: Option<String>,
    /// REST API base URL
    pub api_url: Option<String>,
    /// `owner/repo` of the repository the workflow runs in
    pub github_repository: Option<String>,
    /// Log output format
    pub log_format: Option<String>,
    /// Debug logging requested
    pub debug: Option<bool>,
}

impl Inputs {
    /// Read inputs from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read inputs through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let input = |name: &str| lookup(&input_var(name));

        Self {
            name: input("name"),
            value: input("value"),
            owner: input("owner"),
            repository: input("repository"),
            token: input("token"),
            org: input("org"),
            visibility: input("visibility"),
            selected_repository_ids: input("selected_repository_ids"),
            api_url: lookup("GITHUB_API_URL"),
            github_repository: lookup("GITHUB_REPOSITORY"),
            log_format: input("log_format"),
            debug: lookup("RUNNER_DEBUG").map(|v| v.trim() == "1"),
        }
    }

    /// Layer `overrides` on top of `self`; values set in `overrides` win.
    pub fn overlay(self, overrides: Inputs) -> Self {
        Self {
            name: overrides.name.or(self.name),
            value: overrides.value.or(self.value),
            owner: overrides.owner.or(self.owner),
            repository: overrides.repository.or(self.repository),
            token: overrides.token.or(self.token),
            org: overrides.org.or(self.org),
            visibility: overrides.visibility.or(self.visibility),
            selected_repository_ids: overrides.selected_repository_ids.or(self.selected_repository_ids),
            api_url: overrides.api_url.or(self.api_url),
            github_repository: overrides.github_repository.or(self.github_repository),
            log_format: overrides.log_format.or(self.log_format),
            debug: match (self.debug, overrides.debug) {
                (Some(a), Some(b)) => Some(a || b),
                (a, b) => b.or(a),
            },
        }
    }
}

impl fmt::Debug for Inputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inputs")
            .field("name", &self.name)
            .field("value", &self.value.as_ref().map(|_| "<redacted>"))
            .field("owner", &self.owner)
            .field("repository", &self.repository)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("org", &self.org)
            .field("visibility", &self.visibility)
            .field("selected_repository_ids", &self.selected_repository_ids)
            .field("api_url", &self.api_url)
            .field("github_repository", &self.github_repository)
            .field("log_format", &self.log_format)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Environment variable the Actions runner uses for an input.
pub fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// How the `org` input selects the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgFlag {
    /// Repository-scoped target
    Repository,
    /// Organization named by the owner input
    UseOwner,
    /// Organization named explicitly
    Named(String),
}

/// Interpret the `org` input.
///
/// Empty or false-like values select the repository endpoints, `true`-like
/// values reuse the owner as the organization, anything else is taken as the
/// organization login itself.
pub fn parse_org_flag(org: Option<&str>) -> OrgFlag {
    match org.map(str::trim).unwrap_or_default() {
        "" => OrgFlag::Repository,
        s if matches!(s.to_lowercase().as_str(), "false" | "no" | "0" | "off") => OrgFlag::Repository,
        s if matches!(s.to_lowercase().as_str(), "true" | "yes" | "1" | "on") => OrgFlag::UseOwner,
        s => OrgFlag::Named(s.to_string()),
    }
}

/// Parse a repository id list.
///
/// Accepts a JSON array (`[111, 222]`) or ids separated by commas and/or
/// whitespace (`111,222`, `111 222`).
pub fn parse_repository_ids(raw: &str) -> Result<Vec<RepositoryId>> {
    let raw = raw.trim();

    if raw.starts_with('[') {
        let ids: Vec<serde_json::Value> = serde_json::from_str(raw)
            .map_err(|e| SecretError::Config(format!("Invalid selected_repository_ids: {}", e)))?;
        return ids
            .iter()
            .map(|v| match v {
                serde_json::Value::Number(n) => n
                    .as_u64()
                    .map(RepositoryId)
                    .ok_or_else(|| SecretError::Validation(format!("Invalid repository id: '{}'", n))),
                serde_json::Value::String(s) => s.parse(),
                other => Err(SecretError::Validation(format!("Invalid repository id: '{}'", other))),
            })
            .collect();
    }

    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Split `owner/repo` into its parts; a bare name yields no owner.
pub fn split_repository(repository: &str) -> Result<(Option<&str>, &str)> {
    let repository = repository.trim();
    match repository.split_once('/') {
        None => Ok((None, repository)),
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((Some(owner), repo))
        }
        Some(_) => bail!(Config, "Invalid repository '{}': expected 'repo' or 'owner/repo'", repository),
    }
}

/// Validated configuration for a single upload.
#[derive(Clone)]
pub struct ActionConfig {
    /// Secret name
    pub name: SecretName,
    /// Plaintext value, kept verbatim
    pub value: String,
    /// Authentication token
    pub token: String,
    /// REST API base URL
    pub api_url: Url,
    /// Where the secret is written
    pub target: Target,
    /// Organization visibility; `Some` iff the target is an organization
    pub visibility: Option<OrgVisibility>,
    /// Log output format
    pub log_format: LogFormat,
    /// Debug logging
    pub debug: bool,
}

impl ActionConfig {
    /// Validate raw inputs into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Config`] or [`SecretError::Validation`] when a
    /// required input is missing or malformed. No remote call is involved.
    pub fn from_inputs(inputs: Inputs) -> Result<Self> {
        let name = SecretName::new(required(&inputs.name, "name")?)?;

        let value = match &inputs.value {
            Some(value) => value.clone(),
            None => bail!(Config, "Missing required input: value"),
        };

        let token = required(&inputs.token, "token")?.to_string();

        let api_url = parse_api_url(present(&inputs.api_url).unwrap_or(DEFAULT_API_URL))?;

        let log_format: LogFormat = present(&inputs.log_format)
            .map(str::parse::<LogFormat>)
            .transpose()?
            .unwrap_or_default();

        let target = resolve_target(&inputs)?;

        let visibility = if target.is_organization() {
            Some(resolve_visibility(&inputs)?)
        } else {
            if present(&inputs.visibility).is_some() || present(&inputs.selected_repository_ids).is_some() {
                tracing::warn!("visibility inputs only apply to organization secrets; ignoring them");
            }
            None
        };

        Ok(Self {
            name,
            value,
            token,
            api_url,
            target,
            visibility,
            log_format,
            debug: inputs.debug.unwrap_or(false),
        })
    }
}

impl fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionConfig")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("target", &self.target)
            .field("visibility", &self.visibility)
            .field("log_format", &self.log_format)
            .field("debug", &self.debug)
            .finish()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(value: &'a Option<String>, input: &str) -> Result<&'a str> {
    present(value).ok_or_else(|| SecretError::Config(format!("Missing required input: {}", input)))
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| SecretError::Config(format!("Invalid API URL '{}': {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!(Config, "Invalid API URL '{}': scheme must be http or https", raw);
    }
    Ok(url)
}

fn resolve_target(inputs: &Inputs) -> Result<Target> {
    // Explicit repository input first, then the workflow's own repository.
    let (repo_owner, repo) = match present(&inputs.repository) {
        Some(repository) => split_repository(repository)?,
        None => (None, ""),
    };

    let owner = match (present(&inputs.owner), repo_owner) {
        (Some(owner), Some(other)) if owner != other => bail!(
            Config,
            "Conflicting owner: input owner is '{}' but repository names '{}'",
            owner,
            other
        ),
        (Some(owner), _) => Some(owner),
        (None, owner) => owner,
    };

    let (env_owner, env_repo) = match present(&inputs.github_repository) {
        Some(full) => match split_repository(full)? {
            (Some(owner), repo) => (Some(owner), Some(repo)),
            (None, _) => (None, None),
        },
        None => (None, None),
    };

    let owner = owner.or(env_owner);

    match parse_org_flag(inputs.org.as_deref()) {
        OrgFlag::Named(org) => Ok(Target::Organization { org: Owner::new(org)? }),
        OrgFlag::UseOwner => {
            let org = owner.ok_or_else(|| {
                SecretError::Config("Organization flag is set but no organization or owner was given".to_string())
            })?;
            Ok(Target::Organization { org: Owner::new(org)? })
        }
        OrgFlag::Repository => {
            let owner = owner.ok_or_else(|| SecretError::Config("Missing required input: owner".to_string()))?;
            let repo = Some(repo)
                .filter(|r| !r.is_empty())
                .or(env_repo)
                .ok_or_else(|| SecretError::Config("Missing required input: repository".to_string()))?;
            Ok(Target::Repository {
                owner: Owner::new(owner)?,
                repo: RepoName::new(repo)?,
            })
        }
    }
}

fn resolve_visibility(inputs: &Inputs) -> Result<OrgVisibility> {
    let visibility: Visibility = present(&inputs.visibility)
        .map(str::parse::<Visibility>)
        .transpose()?
        .unwrap_or_default();

    let selected = match (visibility, present(&inputs.selected_repository_ids)) {
        (Visibility::Selected, Some(raw)) => parse_repository_ids(raw)?,
        (Visibility::Selected, None) => bail!(
            Config,
            "Missing required input: selected_repository_ids (visibility is 'selected')"
        ),
        (_, Some(_)) => {
            tracing::warn!(%visibility, "selected_repository_ids only applies to 'selected' visibility; ignoring it");
            Vec::new()
        }
        (_, None) => Vec::new(),
    };

    Ok(OrgVisibility::new(visibility, selected))
}

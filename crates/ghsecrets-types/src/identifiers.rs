//! Type-safe identifiers used to address secrets on GitHub.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{SecretError, Result};

/// A validated Actions secret name.
///
/// Secret names must:
/// - Contain only ASCII letters, digits, and underscores
/// - Not start with a digit
/// - Not start with the reserved `GITHUB_` prefix
///
/// GitHub stores names upper-cased, so the name is normalized on creation.
///
/// # Example
///
/// ```
/// use ghsecrets_types::SecretName;
///
/// let name = SecretName::new("api_key").unwrap();
/// assert_eq!(name.as_str(), "API_KEY");
///
/// assert!(SecretName::new("1PASSWORD").is_err());
/// assert!(SecretName::new("GITHUB_TOKEN").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretName(String);

impl SecretName {
    /// Create a new validated secret name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name doesn't meet GitHub's naming rules.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();
        if !Self::is_valid(name) {
            return Err(SecretError::Validation(format!(
                "Invalid secret name '{}': must contain only letters, digits, and underscores, \
                must not start with a digit or the GITHUB_ prefix",
                name
            )));
        }
        Ok(Self(name.to_ascii_uppercase()))
    }

    /// Check if a name is valid without allocating.
    pub fn is_valid(name: &str) -> bool {
        let Some(first) = name.chars().next() else {
            return false;
        };

        if first.is_ascii_digit() {
            return false;
        }

        if name.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("GITHUB_")) {
            return false;
        }

        name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SecretName {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// A validated account login: a user or organization name.
///
/// Used both as the owner of a repository and as an organization identifier.
/// Logins are single URL path segments, so `/` and dot-only names are refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owner(String);

impl Owner {
    /// Create a new validated owner login.
    pub fn new(login: impl AsRef<str>) -> Result<Self> {
        let login = login.as_ref().trim();
        if !is_path_segment(login) {
            return Err(SecretError::Validation(format!(
                "Invalid owner '{}': must be a single name made of letters, digits, '-', '_' or '.'",
                login
            )));
        }
        Ok(Self(login.to_string()))
    }

    /// Get the login as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Owner {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// A validated repository name (without its owner).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoName(String);

impl RepoName {
    /// Create a new validated repository name.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();
        if !is_path_segment(name) {
            return Err(SecretError::Validation(format!(
                "Invalid repository name '{}': must be a single name made of letters, digits, '-', '_' or '.'",
                name
            )));
        }
        Ok(Self(name.to_string()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RepoName {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Numeric id of a repository, as used by `selected_repository_ids`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(pub u64);

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RepositoryId {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(RepositoryId)
            .map_err(|_| SecretError::Validation(format!("Invalid repository id: '{}'", s.trim())))
    }
}

fn is_path_segment(s: &str) -> bool {
    if s.is_empty() || s.chars().all(|c| c == '.') {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

//! Request-scoped values exchanged with the GitHub secrets API.
//!
//! None of these outlive a single invocation: the public key is fetched fresh,
//! sealed into a [`SealedSecret`], wrapped into a [`SecretPayload`] and the
//! [`SubmissionResult`] is classified and dropped.

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::enums::Visibility;
use crate::identifiers::{Owner, RepoName, RepositoryId};

/// Where a secret is written.
///
/// The variant picks one of two mutually exclusive endpoint families on the
/// remote platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Repository-scoped secret, keyed by owner and repository
    Repository {
        /// Repository owner (user or organization login)
        owner: Owner,
        /// Repository name
        repo: RepoName,
    },
    /// Organization-scoped secret, keyed by organization login
    Organization {
        /// Organization login
        org: Owner,
    },
}

impl Target {
    /// Whether this target addresses an organization.
    pub fn is_organization(&self) -> bool {
        matches!(self, Target::Organization { .. })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Repository { owner, repo } => write!(f, "{}/{}", owner, repo),
            Target::Organization { org } => write!(f, "org:{}", org),
        }
    }
}

/// Public key handed out by the secrets API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// Opaque identifier of the key, echoed back on submission
    pub key_id: String,
    /// Base64-encoded X25519 public key
    pub key: String,
}

/// A value sealed against a [`PublicKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedSecret {
    /// Base64-encoded sealed box
    pub encrypted_value: String,
    /// Identifier of the key the value was sealed with
    pub key_id: String,
}

/// Visibility of an organization secret, with the repository list carried by
/// the `Selected` variant only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgVisibility {
    /// Every repository in the organization
    All,
    /// Private and internal repositories only
    Private,
    /// Only the listed repositories
    Selected(Vec<RepositoryId>),
}

impl OrgVisibility {
    /// Build from a parsed visibility and an optional repository list.
    ///
    /// The list is only kept for [`Visibility::Selected`].
    pub fn new(visibility: Visibility, selected: Vec<RepositoryId>) -> Self {
        match visibility {
            Visibility::All => OrgVisibility::All,
            Visibility::Private => OrgVisibility::Private,
            Visibility::Selected => OrgVisibility::Selected(selected),
        }
    }

    /// The plain visibility value.
    pub fn visibility(&self) -> Visibility {
        match self {
            OrgVisibility::All => Visibility::All,
            OrgVisibility::Private => Visibility::Private,
            OrgVisibility::Selected(_) => Visibility::Selected,
        }
    }

    /// Repository ids, present only for `selected`.
    pub fn selected_repository_ids(&self) -> Option<&[RepositoryId]> {
        match self {
            OrgVisibility::Selected(ids) => Some(ids),
            _ => None,
        }
    }
}

/// Body of the secret submission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretPayload {
    /// Payload for a repository secret: the sealed value as-is
    Repository(SealedSecret),
    /// Payload for an organization secret, with its visibility
    Organization {
        /// The sealed value
        sealed: SealedSecret,
        /// Visibility (and selected repositories)
        visibility: OrgVisibility,
    },
}

impl SecretPayload {
    /// The sealed value carried by the payload.
    pub fn sealed(&self) -> &SealedSecret {
        match self {
            SecretPayload::Repository(sealed) => sealed,
            SecretPayload::Organization { sealed, .. } => sealed,
        }
    }
}

#[derive(Serialize)]
struct PayloadBody<'a> {
    encrypted_value: &'a str,
    key_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_repository_ids: Option<&'a [RepositoryId]>,
}

impl Serialize for SecretPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let sealed = self.sealed();
        let (visibility, selected_repository_ids) = match self {
            SecretPayload::Repository(_) => (None, None),
            SecretPayload::Organization { visibility, .. } => {
                (Some(visibility.visibility()), visibility.selected_repository_ids())
            }
        };

        PayloadBody {
            encrypted_value: &sealed.encrypted_value,
            key_id: &sealed.key_id,
            visibility,
            selected_repository_ids,
        }
        .serialize(serializer)
    }
}

/// Outcome of the submission call as reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// HTTP status code
    pub status: u16,
    /// Response body exactly as received; empty when the API sent none
    pub body: String,
}

impl SubmissionResult {
    /// Statuses below 400 count as success.
    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    /// Response body parsed as JSON, if it is JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sealed() -> SealedSecret {
        SealedSecret {
            encrypted_value: "c2VhbGVk".to_string(),
            key_id: "568250167242549743".to_string(),
        }
    }

    #[test]
    fn test_repository_payload_has_two_fields() {
        let body = serde_json::to_value(SecretPayload::Repository(sealed())).unwrap();
        assert_eq!(
            body,
            json!({"encrypted_value": "c2VhbGVk", "key_id": "568250167242549743"})
        );
    }

    #[test]
    fn test_org_payload_without_selection() {
        for (vis, name) in [(Visibility::All, "all"), (Visibility::Private, "private")] {
            let payload = SecretPayload::Organization {
                sealed: sealed(),
                visibility: OrgVisibility::new(vis, vec![RepositoryId(1)]),
            };
            let body = serde_json::to_value(payload).unwrap();
            assert_eq!(body["visibility"], name);
            assert!(body.get("selected_repository_ids").is_none());
        }
    }

    #[test]
    fn test_org_payload_with_selection() {
        let payload = SecretPayload::Organization {
            sealed: sealed(),
            visibility: OrgVisibility::Selected(vec![RepositoryId(111), RepositoryId(222)]),
        };
        let body = serde_json::to_value(payload).unwrap();
        assert_eq!(body["visibility"], "selected");
        assert_eq!(body["selected_repository_ids"], json!([111, 222]));
    }

    #[test]
    fn test_submission_classification() {
        let ok = SubmissionResult { status: 204, body: String::new() };
        assert!(ok.is_success());
        assert!(ok.json().is_none());

        let rejected = SubmissionResult {
            status: 400,
            body: "{\n  \"message\": \"Bad\"\n}".to_string(),
        };
        assert!(!rejected.is_success());
        assert_eq!(rejected.json(), Some(json!({"message": "Bad"})));
        assert_eq!(rejected.body, "{\n  \"message\": \"Bad\"\n}");
    }

    #[test]
    fn test_target_display() {
        let repo = Target::Repository {
            owner: Owner::new("acme").unwrap(),
            repo: RepoName::new("widgets").unwrap(),
        };
        assert_eq!(repo.to_string(), "acme/widgets");
        assert!(!repo.is_organization());

        let org = Target::Organization { org: Owner::new("acme-org").unwrap() };
        assert_eq!(org.to_string(), "org:acme-org");
        assert!(org.is_organization());
    }
}

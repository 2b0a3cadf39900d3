//! Error types for ghsecrets operations.

use thiserror::Error;

/// The main error type for ghsecrets operations.
///
/// Every failure in a run ends up as exactly one of these variants, which the
/// CLI turns into a single failure signal for the CI host.
#[derive(Error, Debug)]
pub enum SecretError {
    /// Required input missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed identifier (secret name, owner, visibility, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport failure or unusable response from the remote API
    #[error("Remote error: {0}")]
    Remote(String),

    /// The public key could not be used to seal the value
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// The remote API answered the submission with a status >= 400
    #[error("{body}")]
    Rejected {
        /// HTTP status returned by the remote API
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SecretError {
    /// Whether the error was raised before any remote call could be made.
    pub fn is_config(&self) -> bool {
        matches!(self, SecretError::Config(_) | SecretError::Validation(_))
    }

    /// Whether the error is a terminal remote-side failure.
    ///
    /// Encryption failures count as remote failures: a key that cannot be
    /// decoded means the public-key fetch handed back garbage.
    pub fn is_remote(&self) -> bool {
        matches!(self, SecretError::Remote(_) | SecretError::Encryption(_))
    }
}

/// A specialized Result type for ghsecrets operations.
pub type Result<T> = std::result::Result<T, SecretError>;

/// Helper macro to bail out with a SecretError
///
/// # Example
///
/// ```ignore
/// if value.is_empty() {
///     bail!(Config, "missing input: {}", name);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::SecretError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::SecretError::$variant(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_fails() -> Result<()> {
        bail!(Config, "missing input: {}", "name");
    }

    #[test]
    fn test_bail_builds_variant() {
        let err = config_fails().unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.to_string(), "Configuration error: missing input: name");
    }

    #[test]
    fn test_rejection_displays_body_verbatim() {
        let err = SecretError::Rejected {
            status: 404,
            body: r#"{"message":"Not Found"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"{"message":"Not Found"}"#);
        assert!(!err.is_remote());
    }

    #[test]
    fn test_encryption_counts_as_remote() {
        assert!(SecretError::Encryption("bad key".into()).is_remote());
        assert!(SecretError::Remote("timeout".into()).is_remote());
        assert!(!SecretError::Config("x".into()).is_remote());
    }
}

//! # Error Hierarchy
//!
//! Structured error types for the whole workspace, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Schema problems found in a hunt document are deliberately *not* part of
//! this hierarchy: they are reported as accumulated plain strings by the
//! parser's `validate()` so a user sees every problem in one pass. Only
//! conditions the caller cannot inspect around — missing files, undecodable
//! config, transport failures — become error values.

use thiserror::Error;

/// Top-level error type for huntctl operations.
#[derive(Error, Debug)]
pub enum HuntctlError {
    /// Record identifier validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Workspace configuration could not be loaded or written.
    #[error("config error: {0}")]
    Config(String),

    /// A hunt file referenced by identifier does not exist.
    #[error("hunt not found: {0}")]
    HuntNotFound(String),

    /// An identifier-derived path failed containment checks.
    #[error("unsafe path rejected for identifier \"{0}\"")]
    UnsafePath(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for record identifier newtypes.
///
/// Each identifier type enforces format constraints at construction time.
/// These errors carry the invalid input so operators can diagnose bad
/// references without guesswork.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Hunt identifier does not match the `H-NNNN` grammar or contains
    /// path-traversal characters.
    #[error("invalid hunt ID: \"{0}\" (expected uppercase letters, a hyphen, and 4 digits, e.g. H-0001)")]
    InvalidHuntId(String),

    /// Investigation identifier does not match the `I-NNNN` grammar.
    #[error("invalid investigation ID: \"{0}\" (expected uppercase letters, a hyphen, and 4 digits, e.g. I-0001)")]
    InvalidInvestigationId(String),

    /// Research identifier does not match the `R-NNNN` grammar.
    #[error("invalid research ID: \"{0}\" (expected uppercase letters, a hyphen, and 4 digits, e.g. R-0001)")]
    InvalidResearchId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_input() {
        let err = ValidationError::InvalidHuntId("h-1".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("h-1"));
        assert!(msg.contains("H-0001"));
    }

    #[test]
    fn huntctl_error_wraps_validation() {
        let inner = ValidationError::InvalidResearchId("R-1".to_string());
        let err = HuntctlError::Validation(inner);
        assert!(format!("{err}").contains("validation error"));
    }

    #[test]
    fn huntctl_error_hunt_not_found_display() {
        let err = HuntctlError::HuntNotFound("H-9999".to_string());
        assert!(format!("{err}").contains("H-9999"));
    }

    #[test]
    fn huntctl_error_unsafe_path_display() {
        let err = HuntctlError::UnsafePath("H-0001".to_string());
        assert!(format!("{err}").contains("unsafe path"));
    }

    #[test]
    fn huntctl_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: HuntctlError = io.into();
        assert!(matches!(err, HuntctlError::Io(_)));
    }
}

//! Error types for the docgen CLI.
//!
//! This module defines a unified error enum covering configuration,
//! provider, storage, input, prompt and I/O failures.

use thiserror::Error;

/// Unified error type for the docgen CLI.
///
/// All fallible functions return `Result<T, AppError>`. Which variants are
/// fatal is decided by the orchestrator, not here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid configuration (unknown model, missing API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Hosted-storage client secret is not present
    #[error("Credentials missing: {0}")]
    CredentialsMissing(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// AI provider transport or response failures
    #[error("Provider error: {0}")]
    Llm(String),

    /// Hosted-storage (Docs/Drive) API failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid or missing user input
    #[error("Input error: {0}")]
    Input(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Config("ANTHROPIC_API_KEY not set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: ANTHROPIC_API_KEY not set"
        );
    }

    #[test]
    fn test_from_io() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: gone");
    }

    #[test]
    fn test_from_serde_json() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}

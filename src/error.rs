//! Error types for qail-spanner.

use thiserror::Error;

/// The main error type for translation, DDL and binding operations.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The query, as expressed, cannot be represented in the target dialect.
    #[error("Illegal query operation: {0}")]
    IllegalQueryOperation(String),

    /// A value that must be known at translation time is not a literal.
    #[error("Unresolvable literal: {0}")]
    UnresolvableLiteral(String),

    /// Structurally impossible request (e.g. ROLLUP/CUBE emulation).
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// A required dialect capability is missing or the config is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A bound or extracted value does not fit its declared type.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// JSON input error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a caller should surface a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The query cannot be expressed in this dialect.
    IllegalQueryOperation,
    /// The request is structurally impossible or the dialect is misconfigured.
    UnsupportedOperation,
    /// Input could not be read or decoded.
    Input,
}

impl TranslateError {
    pub fn illegal(message: impl Into<String>) -> Self {
        Self::IllegalQueryOperation(message.into())
    }

    pub fn unresolvable(message: impl Into<String>) -> Self {
        Self::UnresolvableLiteral(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IllegalQueryOperation(_) | Self::UnresolvableLiteral(_) => {
                ErrorKind::IllegalQueryOperation
            }
            Self::Unsupported(_) | Self::Config(_) => ErrorKind::UnsupportedOperation,
            Self::InvalidValue(_) | Self::Json(_) | Self::Toml(_) | Self::Io(_) => ErrorKind::Input,
        }
    }
}

/// Result type alias for qail-spanner operations.
pub type TranslateResult<T> = Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranslateError::unsupported("Summarization is not supported by Spanner");
        assert_eq!(
            err.to_string(),
            "Unsupported operation: Summarization is not supported by Spanner"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            TranslateError::unresolvable("escape").kind(),
            ErrorKind::IllegalQueryOperation
        );
        assert_eq!(
            TranslateError::config("no strategy").kind(),
            ErrorKind::UnsupportedOperation
        );
    }
}

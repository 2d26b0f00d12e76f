//! Unified error handling for the baeum crate
//!
//! Domain-specific errors live next to their modules; this module
//! consolidates them into a single [`Error`] enum for use across module
//! boundaries, with classification helpers for handling strategies.
//!
//! Note that the pipeline itself converts every collaborator failure into
//! placeholder content at the assembler boundary, so these types surface
//! mainly at construction time and in the CLI.

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::cache::CacheError;
pub use crate::extract::ExtractError;
pub use crate::llm::LlmError;
pub use crate::models::PlanParseError;
pub use crate::search::SearchError;

/// Common interface for baeum error types
pub trait BaeumErrorTrait: std::error::Error {
    /// Check if this error is recoverable (worth retrying)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout)
    Network,
    /// Input parsing and validation errors
    Parsing,
    /// Cache and I/O errors
    Storage,
    /// Generation collaborator errors
    Llm,
    /// Configuration errors
    Config,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the baeum crate
#[derive(Error, Debug)]
pub enum Error {
    /// Search collaborator errors
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Extraction errors
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Generation collaborator errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Content cache errors
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Plan input parsing errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl BaeumErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Search(e) => e.is_recoverable(),
            Self::Extract(e) => e.is_recoverable(),
            Self::Llm(e) => e.is_recoverable(),
            Self::Cache(_) => true, // cache is best-effort by design
            Self::Plan(_) => false,
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Http(_) => true,
            Self::Config(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Search(e) => e.category(),
            Self::Extract(e) => e.category(),
            Self::Llm(e) => e.category(),
            Self::Http(_) => ErrorCategory::Network,
            Self::Cache(_) | Self::Io(_) => ErrorCategory::Storage,
            Self::Plan(_) | Self::Json(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

impl BaeumErrorTrait for SearchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Status(_) => true,
            Self::MalformedResponse(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::Status(_) => ErrorCategory::Network,
            Self::MalformedResponse(_) => ErrorCategory::Parsing,
        }
    }
}

impl BaeumErrorTrait for ExtractError {
    fn is_recoverable(&self) -> bool {
        true // transient page failures; the next fetch may succeed
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Network
    }
}

impl BaeumErrorTrait for LlmError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Status { .. } | Self::EmptyResponse => true,
            Self::EmptyInput => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Llm
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let err = Error::Search(SearchError::Status(503));
        assert_eq!(err.category(), ErrorCategory::Network);

        let err = Error::Llm(LlmError::EmptyResponse);
        assert_eq!(err.category(), ErrorCategory::Llm);

        let err = Error::config("missing api key");
        assert_eq!(err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::Search(SearchError::Status(503)).is_recoverable());
        assert!(!Error::Llm(LlmError::EmptyInput).is_recoverable());
        assert!(!Error::config("bad").is_recoverable());
    }

    #[test]
    fn test_domain_error_conversion() {
        let search_err = SearchError::MalformedResponse("truncated body".into());
        let unified: Error = search_err.into();
        assert!(matches!(unified, Error::Search(_)));
        assert_eq!(unified.category(), ErrorCategory::Parsing);
    }
}

//! Unified error handling for metagen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for metagen core operations.
#[derive(Debug, Error, Clone)]
pub enum MetagenError {
    /// Errors from the domain layer (metadata model, conversion).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (templates, artifacts).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Host declarations are inconsistent (unknown marker, bad manifest).
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MetagenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your declarations and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in metagen".into(),
                "Please report this issue at: https://github.com/cosecruz/metagen/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conversion => ErrorCategory::Conversion,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conversion,
    Template,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type MetagenResult<T> = Result<T, MetagenError>;

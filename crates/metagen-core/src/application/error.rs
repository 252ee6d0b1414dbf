//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the ports, not
//! in the metadata model. Model errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while rendering and emitting artifacts.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A template could not be compiled (syntax error or unknown reference).
    #[error("Template '{template}' failed to compile: {reason}")]
    TemplateCompile { template: String, reason: String },

    /// A compiled template failed while executing.
    #[error("Template '{template}' failed to render: {reason}")]
    TemplateRender { template: String, reason: String },

    /// A named template reference is unknown to the engine.
    #[error("Template not found: {reference}")]
    TemplateNotFound { reference: String },

    /// The output artifact could not be created or written.
    #[error("Cannot write artifact {name}: {reason}")]
    ArtifactIo { name: String, reason: String },

    /// Two generation events computed the same output name in one run.
    #[error("Artifact {name} was already generated in this run (from {first_origin})")]
    DuplicateArtifact { name: String, first_origin: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Adapter state is unavailable: {name}")]
    LockPoisoned { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateCompile { template, .. } => vec![
                format!("Check the syntax of template '{}'", template),
                "Templates use logic-less syntax: {{name}}, {{this.class}}, {{#items}}...{{/items}}".into(),
            ],
            Self::TemplateNotFound { reference } => vec![
                format!("No template is registered under '{}'", reference),
                "Check --templates points at the directory holding your templates".into(),
            ],
            Self::ArtifactIo { name, .. } => vec![
                format!("Failed to write: {}", name),
                "Check that you have write permissions on the output directory".into(),
            ],
            Self::DuplicateArtifact { name, .. } => vec![
                format!("Two directives compute the output name '{}'", name),
                "Make the class name templates distinct, e.g. include {{annotated}}".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateCompile { .. } | Self::TemplateRender { .. } => ErrorCategory::Template,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ArtifactIo { .. } | Self::LockPoisoned { .. } => ErrorCategory::Internal,
            Self::DuplicateArtifact { .. } => ErrorCategory::Validation,
        }
    }
}

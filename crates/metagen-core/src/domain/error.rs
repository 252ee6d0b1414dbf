// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (collected and reported at the end of a run)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Conversion Errors
    // ========================================================================
    /// A metadata value has no scope representation.
    #[error("Unsupported value kind '{kind}' in attribute '{attribute}'")]
    UnsupportedValueKind { attribute: String, kind: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid qualified name '{name}': {reason}")]
    InvalidQualifiedName { name: String, reason: String },

    #[error("Invalid generation directive on '{marker}': {reason}")]
    InvalidDirective { marker: String, reason: String },

    #[error("Computed class name '{name}' is not a valid identifier")]
    InvalidClassName { name: String },

    #[error("Unknown attribute kind '{0}'")]
    UnknownAttributeKind(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedValueKind { attribute, kind } => vec![
                format!("Attribute '{}' holds a {} value", attribute, kind),
                "Supported values: strings, numbers, booleans, characters, enum constants,".into(),
                "  declared type references (and arrays of them), nested metadata, arrays".into(),
            ],
            Self::InvalidDirective { marker, .. } => vec![
                format!("Check the directives declared on '{}'", marker),
                "Each directive needs a class name template and a body template".into(),
            ],
            Self::InvalidClassName { .. } => vec![
                "The class name template rendered an empty or dotted identifier".into(),
                "Reference attributes that are always present, e.g. {{annotated}}".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedValueKind { .. } => ErrorCategory::Conversion,
            Self::InvalidQualifiedName { .. }
            | Self::InvalidDirective { .. }
            | Self::InvalidClassName { .. }
            | Self::UnknownAttributeKind(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conversion,
}

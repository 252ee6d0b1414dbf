use crate::domain::{
    entities::{GenerationDirective, MarkerType},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_directive(
        marker: &MarkerType,
        directive: &GenerationDirective,
    ) -> Result<(), DomainError> {
        directive.validate(marker.name())
    }

    /// A computed class name must be a single, non-empty name segment.
    pub fn validate_class_name(name: &str) -> Result<(), DomainError> {
        let invalid = name.is_empty()
            || name
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '.' | '/' | '\\'));

        if invalid {
            Err(DomainError::InvalidClassName { name: name.into() })
        } else {
            Ok(())
        }
    }
}

// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for metagen.
//!
//! This module contains pure generation logic with no I/O. Discovery,
//! templating, and output are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: metadata and markers are read-only views
//! - **Closed value model**: raw values are a sum type, converted by exhaustive match
//!
// Public API - what the world sees
pub mod convert;
pub mod entities;
pub mod error;
pub mod registry;
pub mod scope;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    AppliedMetadata, DirectiveDeclaration, EnumConstant, GeneratedArtifact, GenerationDirective,
    MarkerType, RawValue, Scalar, TargetElement, TypeRef,
    common::{QualifiedName, qualify},
};

pub use error::{DomainError, ErrorCategory};
pub use registry::{DirectiveRegistry, RegistryEntry};
pub use scope::{Frame, Scope, ScopeValue};
pub use validation::DomainValidator;
pub use value_objects::AttributeKind;

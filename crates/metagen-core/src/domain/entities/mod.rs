pub mod artifact;
pub mod common;
pub mod element;
pub mod marker;
pub mod metadata;

pub use crate::domain::DomainError;
pub use artifact::GeneratedArtifact;
pub use element::TargetElement;
pub use marker::{DirectiveDeclaration, GenerationDirective, MarkerType};
pub use metadata::{AppliedMetadata, EnumConstant, RawValue, Scalar, TypeRef};

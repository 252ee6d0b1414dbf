//! Driven (output) ports - implemented by the host.
//!
//! These traits define what the generation pipeline needs from the outside
//! world. The `metagen-adapters` crate provides implementations.

use std::fmt;
use std::io::Write;

use crate::domain::{
    DirectiveDeclaration, AppliedMetadata, MarkerType, Scope, TargetElement,
};
use crate::error::MetagenResult;

/// Port for discovering markers, elements, and applied metadata.
///
/// Supplied once per round. Implemented by:
/// - `metagen_adapters::manifest::ManifestHost` (TOML declarations)
#[cfg_attr(test, mockall::automock)]
pub trait Discovery: Send + Sync {
    /// Markers announcing directives in this round, through either route.
    fn directive_declarations(&self) -> Vec<DirectiveDeclaration>;

    /// Elements carrying `marker` as applied metadata.
    fn elements_carrying(&self, marker: &MarkerType) -> Vec<TargetElement>;

    /// Metadata instances present on `element`, in declaration order.
    fn applied_metadata_on(&self, element: &TargetElement) -> Vec<AppliedMetadata>;
}

/// Port for type-compatibility queries between marker types.
///
/// The hierarchy between markers belongs to the host's declaration model;
/// the core never decides assignability on its own.
#[cfg_attr(test, mockall::automock)]
pub trait Assignability: Send + Sync {
    /// Whether an instance of `applied` can stand in for `marker`.
    fn is_assignable(&self, applied: &MarkerType, marker: &MarkerType) -> bool;
}

/// Port for creating output artifacts.
///
/// Implemented by:
/// - `metagen_adapters::filer::DirectoryFiler` (production)
/// - `metagen_adapters::filer::MemoryFiler` (testing)
///
/// ## Design Notes
///
/// - The returned sink is write-once; dropping it releases the artifact
/// - `origin` ties the artifact to the element it was generated from
#[cfg_attr(test, mockall::automock)]
pub trait Filer: Send + Sync {
    fn create_artifact(
        &self,
        qualified_name: &str,
        origin: &TargetElement,
    ) -> MetagenResult<Box<dyn Write>>;
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Note,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Port for user-visible diagnostics.
#[cfg_attr(test, mockall::automock)]
pub trait Messager: Send + Sync {
    fn report(&self, severity: Severity, text: &str);
}

/// Port for the logic-less template engine.
///
/// Implemented by:
/// - `metagen_adapters::engine::MustacheEngine`
///
/// Missing keys must render as empty text, not fail.
pub trait TemplateEngine: Send + Sync {
    /// Compile an ephemeral template from inline text.
    fn compile_inline(&self, source: &str) -> MetagenResult<Box<dyn CompiledTemplate + '_>>;

    /// Compile a named, reusable template resolved through the engine's lookup.
    fn compile_named(&self, reference: &str) -> MetagenResult<Box<dyn CompiledTemplate + '_>>;
}

/// A template ready to execute against a scope chain.
pub trait CompiledTemplate {
    /// Name used in diagnostics (the reference, or the inline source).
    fn name(&self) -> &str;

    fn execute(&self, scope: &Scope) -> MetagenResult<String>;
}

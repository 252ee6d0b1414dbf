//! metagen core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers of an
//! annotation-driven source generator, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            metagen-cli (CLI)            │
//! │       (drives rounds, reports exit)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │ (GenerationService, Renderer, resolve)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Discovery, Assignability, Filer,       │
//! │  Messager, TemplateEngine)              │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     metagen-adapters (Infrastructure)   │
//! │ (ManifestHost, MustacheEngine,          │
//! │  DirectoryFiler, TracingMessager)       │
//! └──────────────────┬──────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (RawValue, Scope, DirectiveRegistry)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use metagen_core::prelude::*;
//!
//! // 1. Inject adapters
//! let mut service = GenerationService::new(engine, filer, messager);
//!
//! // 2. One call per discovery round
//! let report = service.process_round(&host, &host);
//!
//! // 3. Report collected errors once
//! let errors = service.finish();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationService, RoundReport,
        ports::{Assignability, CompiledTemplate, Discovery, Filer, Messager, Severity, TemplateEngine},
    };
    pub use crate::domain::{
        AppliedMetadata, AttributeKind, DirectiveDeclaration, DirectiveRegistry, EnumConstant,
        GeneratedArtifact, GenerationDirective, MarkerType, QualifiedName, RawValue, Scalar,
        Scope, ScopeValue, TargetElement, TypeRef,
    };
    pub use crate::error::{MetagenError, MetagenResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

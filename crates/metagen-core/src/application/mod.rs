//! Application layer for metagen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, Renderer, resolver)
//! - **Ports**: Interface definitions (traits) for the host and the engine
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! model logic itself. Conversion and scope rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerationService, Renderer, Resolution, RoundReport, resolve};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Assignability, CompiledTemplate, Discovery, Filer, Messager, Severity, TemplateEngine,
};

pub use error::ApplicationError;

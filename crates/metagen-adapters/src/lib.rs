//! Infrastructure adapters for metagen.
//!
//! This crate implements the ports defined in `metagen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod engine;
pub mod filer;
pub mod manifest;
pub mod messager;

// Re-export commonly used adapters
pub use engine::MustacheEngine;
pub use filer::{DirectoryFiler, MemoryFiler};
pub use manifest::{ManifestError, ManifestHost};
pub use messager::{CollectingMessager, TracingMessager};

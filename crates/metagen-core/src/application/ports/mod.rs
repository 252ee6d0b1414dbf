//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `metagen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by the host
//!   - `Discovery`: Markers, elements, and applied metadata for a round
//!   - `Assignability`: Marker hierarchy queries
//!   - `Filer`: Output artifact creation
//!   - `Messager`: Diagnostics
//!   - `TemplateEngine`: Template compilation and execution
//!
//! - **Driving (Input) Ports**: Called by the host, implemented by application
//!   - (`GenerationService::process_round` / `finish`)

pub mod output;

pub use output::{
    Assignability, CompiledTemplate, Discovery, Filer, Messager, Severity, TemplateEngine,
};

#[cfg(test)]
pub use output::{MockAssignability, MockDiscovery, MockFiler, MockMessager};

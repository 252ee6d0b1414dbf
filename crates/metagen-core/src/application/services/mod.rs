//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish one
//! generation run: register directives, resolve triples, render, emit.

pub mod error_collector;
pub mod generation_service;
pub mod renderer;
pub mod resolver;

pub use error_collector::ErrorCollector;
pub use generation_service::{GenerationService, RoundReport};
pub use renderer::Renderer;
pub use resolver::{Resolution, resolve};

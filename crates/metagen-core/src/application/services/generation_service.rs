//! Generation Service - main application orchestrator.
//!
//! This service coordinates one generation run, round by round:
//! 1. Register the directive declarations the host discovered
//! 2. Resolve applicable (element, directive, metadata) triples
//! 3. For each triple: build the scope, render name + body, emit the artifact
//! 4. At the end of the run, report collected errors once
//!
//! Failures are isolated per triple: a failing triple records an error and
//! the remaining triples still run.

use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Assignability, Discovery, Filer, Messager, Severity, TemplateEngine},
        services::{
            error_collector::ErrorCollector,
            renderer::Renderer,
            resolver::{Resolution, resolve},
        },
    },
    domain::{DirectiveRegistry, Scope},
    error::MetagenResult,
};

/// Outcome of one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Triples the resolver produced.
    pub resolved: usize,
    /// Qualified names of the artifacts written, in generation order.
    pub generated: Vec<String>,
    /// Triples (and declarations) that recorded an error.
    pub failed: usize,
}

/// Main generation service.
pub struct GenerationService {
    engine: Box<dyn TemplateEngine>,
    filer: Box<dyn Filer>,
    messager: Box<dyn Messager>,
    registry: DirectiveRegistry,
    errors: ErrorCollector,
    /// Artifact name → origin element, for collision detection.
    emitted: HashMap<String, String>,
    run_id: Uuid,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use metagen_core::application::GenerationService;
    ///
    /// let mut service = GenerationService::new(
    ///     engine,   // impl TemplateEngine
    ///     filer,    // impl Filer
    ///     messager, // impl Messager
    /// );
    /// service.process_round(&discovery, &types);
    /// service.finish();
    /// ```
    pub fn new(
        engine: Box<dyn TemplateEngine>,
        filer: Box<dyn Filer>,
        messager: Box<dyn Messager>,
    ) -> Self {
        Self {
            engine,
            filer,
            messager,
            registry: DirectiveRegistry::new(),
            errors: ErrorCollector::new(),
            emitted: HashMap::new(),
            run_id: Uuid::new_v4(),
        }
    }

    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Errors recorded so far and not yet reported.
    pub fn pending_errors(&self) -> &[String] {
        self.errors.messages()
    }

    /// Process one discovery round.
    ///
    /// The registry persists across rounds: markers registered earlier still
    /// apply to elements discovered later.
    #[instrument(skip_all, fields(run = %self.run_id))]
    pub fn process_round(
        &mut self,
        discovery: &dyn Discovery,
        types: &dyn Assignability,
    ) -> RoundReport {
        let mut report = RoundReport::default();

        // 1. Registration
        for declaration in discovery.directive_declarations() {
            let marker = declaration.marker().name().clone();
            if let Err(e) = self.registry.declare(declaration) {
                warn!(marker = %marker, error = %e, "Rejected directive declaration");
                self.errors.record(format!("{marker}: {e}"));
                report.failed += 1;
            }
        }

        // 2. Resolution (registry borrowed read-only from here on)
        let Self {
            engine,
            filer,
            messager,
            registry,
            errors,
            emitted,
            ..
        } = self;

        let resolutions = resolve(registry, discovery, types);
        report.resolved = resolutions.len();
        debug!(markers = registry.len(), resolved = report.resolved, "Resolved triples");

        // 3. Generation, isolated per triple
        let ctx = EventContext {
            engine: engine.as_ref(),
            filer: filer.as_ref(),
            messager: messager.as_ref(),
        };
        for resolution in &resolutions {
            match ctx.generate(resolution, emitted) {
                Ok(name) => {
                    info!(artifact = %name, "Generated");
                    report.generated.push(name);
                }
                Err(e) => {
                    warn!(element = %resolution.element, error = %e, "Generation failed");
                    errors.record(format!(
                        "Failed to generate from {} for {} ({}): {}",
                        resolution.marker, resolution.element, resolution.directive, e
                    ));
                    report.failed += 1;
                }
            }
        }

        info!(
            resolved = report.resolved,
            generated = report.generated.len(),
            failed = report.failed,
            "Round complete"
        );
        report
    }

    /// End the run: report every recorded error through the messager.
    ///
    /// Returns the number of errors reported.
    #[instrument(skip_all, fields(run = %self.run_id))]
    pub fn finish(&mut self) -> usize {
        let reported = self.errors.flush_all(self.messager.as_ref());
        if reported > 0 {
            warn!(errors = reported, "Run finished with errors");
        }
        reported
    }
}

/// Ports needed by a single generation event.
struct EventContext<'a> {
    engine: &'a dyn TemplateEngine,
    filer: &'a dyn Filer,
    messager: &'a dyn Messager,
}

impl EventContext<'_> {
    fn generate(
        &self,
        resolution: &Resolution<'_>,
        emitted: &mut HashMap<String, String>,
    ) -> MetagenResult<String> {
        let Resolution {
            directive,
            element,
            metadata,
            ..
        } = resolution;

        self.messager.report(
            Severity::Note,
            &format!(
                "Generating {} class from {} template with context {} and declaring class {}",
                directive.class_name_template,
                directive.template,
                metadata,
                element.qualified_name()
            ),
        );

        let scope = Scope::build(element, metadata)?;
        let artifact = Renderer::new(self.engine).render(element, directive, &scope)?;

        if let Some(first_origin) = emitted.get(artifact.qualified_name()) {
            return Err(ApplicationError::DuplicateArtifact {
                name: artifact.qualified_name().to_string(),
                first_origin: first_origin.clone(),
            }
            .into());
        }

        Renderer::emit(&artifact, element, self.filer)?;
        emitted.insert(
            artifact.qualified_name().to_string(),
            artifact.origin().to_string(),
        );

        Ok(artifact.qualified_name().to_string())
    }
}

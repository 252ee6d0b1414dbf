//! Two-phase render: class name first, then body.
//!
//! 1. Compile the directive's class name template inline and execute it
//!    against the scope. `this.class` does not exist yet.
//! 2. Fold the result into a new scope (`Scope::with_class`).
//! 3. Compile the named body template and execute it against the new scope.
//!
//! The body is rendered into memory; writing it out is a separate step
//! ([`Renderer::emit`]) so a failed render never leaves a partial artifact.

use std::io::Write;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filer, TemplateEngine},
    },
    domain::{DomainValidator, GeneratedArtifact, GenerationDirective, Scope, TargetElement},
    error::MetagenResult,
};

pub struct Renderer<'e> {
    engine: &'e dyn TemplateEngine,
}

impl<'e> Renderer<'e> {
    pub fn new(engine: &'e dyn TemplateEngine) -> Self {
        Self { engine }
    }

    /// Run the name phase only. Any `this.class` already present in `scope`
    /// is hidden from the name template.
    pub fn render_class_name(
        &self,
        directive: &GenerationDirective,
        scope: &Scope,
    ) -> MetagenResult<String> {
        let template = self.engine.compile_inline(&directive.class_name_template)?;
        let class_name = template.execute(&scope.without_class())?;
        DomainValidator::validate_class_name(&class_name)?;
        Ok(class_name)
    }

    /// Run both phases and produce the artifact for `target`.
    #[instrument(skip_all, fields(element = %target, template = %directive.template))]
    pub fn render(
        &self,
        target: &TargetElement,
        directive: &GenerationDirective,
        scope: &Scope,
    ) -> MetagenResult<GeneratedArtifact> {
        let class_name = self.render_class_name(directive, scope)?;
        debug!(class = %class_name, "Class name rendered");

        let scope = scope.with_class(&class_name);
        let body = self.engine.compile_named(&directive.template)?;
        let content = body.execute(&scope)?;

        Ok(GeneratedArtifact::new(target, class_name, content.into_bytes()))
    }

    /// Hand the artifact to the filer. The sink is released on every path.
    pub fn emit(
        artifact: &GeneratedArtifact,
        origin: &TargetElement,
        filer: &dyn Filer,
    ) -> MetagenResult<()> {
        let io_error = |e: std::io::Error| ApplicationError::ArtifactIo {
            name: artifact.qualified_name().to_string(),
            reason: e.to_string(),
        };

        let mut sink = filer.create_artifact(artifact.qualified_name(), origin)?;
        sink.write_all(artifact.content()).map_err(io_error)?;
        sink.flush().map_err(io_error)?;
        Ok(())
    }
}

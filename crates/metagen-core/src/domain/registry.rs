//! Directive registry: marker type → ordered generation directives.
//!
//! Single owner, built before resolution and then borrowed read-only by the
//! resolver. Both declaration routes (explicit list and marker-is-a-directive)
//! end up in the same table.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{
    entities::{
        DirectiveDeclaration, GenerationDirective, MarkerType, common::QualifiedName,
    },
    error::DomainError,
};

/// Directives registered for one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub marker: MarkerType,
    pub directives: Vec<GenerationDirective>,
}

#[derive(Debug, Clone, Default)]
pub struct DirectiveRegistry {
    entries: BTreeMap<QualifiedName, RegistryEntry>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `directives` for `marker`, replacing any previous entry.
    ///
    /// Every directive is validated first; on error the registry is unchanged.
    /// A rejected re-registration therefore keeps the marker's previous
    /// directives, not an empty entry.
    pub fn register(
        &mut self,
        marker: MarkerType,
        directives: Vec<GenerationDirective>,
    ) -> Result<(), DomainError> {
        for directive in &directives {
            directive.validate(marker.name())?;
        }

        debug!(marker = %marker.name(), directives = directives.len(), "Registering marker");
        self.entries
            .insert(marker.name().clone(), RegistryEntry { marker, directives });
        Ok(())
    }

    /// Register a marker that lists its directives explicitly.
    pub fn register_list(
        &mut self,
        marker: MarkerType,
        directives: Vec<GenerationDirective>,
    ) -> Result<(), DomainError> {
        self.register(marker, directives)
    }

    /// Register a marker that is itself a single directive.
    pub fn register_single(
        &mut self,
        marker: MarkerType,
        directive: GenerationDirective,
    ) -> Result<(), DomainError> {
        self.register(marker, vec![directive])
    }

    /// Register either declaration route.
    pub fn declare(&mut self, declaration: DirectiveDeclaration) -> Result<(), DomainError> {
        let (marker, directives) = declaration.into_parts();
        self.register(marker, directives)
    }

    pub fn get(&self, marker: &QualifiedName) -> Option<&RegistryEntry> {
        self.entries.get(marker)
    }

    /// Entries in marker name order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn directive(name: &str) -> GenerationDirective {
        GenerationDirective::new(name, "body.mustache")
    }

    #[test]
    fn single_route_matches_one_element_list() {
        let mut single = DirectiveRegistry::new();
        single
            .register_single(MarkerType::new("app.Spec"), directive("{{name}}Impl"))
            .unwrap();

        let mut list = DirectiveRegistry::new();
        list.register_list(MarkerType::new("app.Spec"), vec![directive("{{name}}Impl")])
            .unwrap();

        let key = QualifiedName::new("app.Spec");
        assert_eq!(single.get(&key), list.get(&key));
        assert_eq!(single.get(&key).unwrap().directives.len(), 1);
    }

    #[test]
    fn re_registration_replaces_entry() {
        let mut registry = DirectiveRegistry::new();
        registry
            .register_list(
                MarkerType::new("app.Spec"),
                vec![directive("{{name}}A"), directive("{{name}}B")],
            )
            .unwrap();
        registry
            .register_single(MarkerType::new("app.Spec"), directive("{{name}}C"))
            .unwrap();

        let entry = registry.get(&QualifiedName::new("app.Spec")).unwrap();
        assert_eq!(entry.directives, vec![directive("{{name}}C")]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn preserves_directive_order() {
        let mut registry = DirectiveRegistry::new();
        let directives = vec![directive("{{name}}One"), directive("{{name}}Two"), directive("{{name}}Three")];
        registry
            .register(MarkerType::new("app.Spec"), directives.clone())
            .unwrap();

        assert_eq!(registry.entries().next().unwrap().directives, directives);
    }

    #[test]
    fn rejects_invalid_directive_without_touching_table() {
        let mut registry = DirectiveRegistry::new();
        let result = registry.register_single(
            MarkerType::new("app.Spec"),
            GenerationDirective::new("", "body.mustache"),
        );

        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn rejected_re_registration_keeps_previous_directives() {
        let mut registry = DirectiveRegistry::new();
        registry
            .register_single(MarkerType::new("app.Spec"), directive("{{name}}Impl"))
            .unwrap();

        let result = registry.register_list(
            MarkerType::new("app.Spec"),
            vec![directive("{{name}}Next"), GenerationDirective::new("", "body.mustache")],
        );

        assert!(result.is_err());
        let entry = registry.get(&QualifiedName::new("app.Spec")).unwrap();
        assert_eq!(entry.directives, vec![directive("{{name}}Impl")]);
    }

    #[test]
    fn declare_unifies_both_routes() {
        let mut registry = DirectiveRegistry::new();
        registry
            .declare(DirectiveDeclaration::Single {
                marker: MarkerType::new("app.Builder"),
                directive: directive("{{annotated}}Builder"),
            })
            .unwrap();
        registry
            .declare(DirectiveDeclaration::List {
                marker: MarkerType::new("app.Spec"),
                directives: vec![],
            })
            .unwrap();

        let names: Vec<_> = registry.entries().map(|e| e.marker.name().to_string()).collect();
        assert_eq!(names, vec!["app.Builder", "app.Spec"]);
    }
}

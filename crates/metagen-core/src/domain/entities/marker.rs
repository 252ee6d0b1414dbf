//! Marker types and the generation directives they carry.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{
    entities::common::QualifiedName, error::DomainError, value_objects::AttributeKind,
};

/// Identity of a metadata schema declaration.
///
/// Immutable once discovered. Equality is by qualified name and declared
/// attributes; hierarchy between markers is a host concern (see
/// `application::ports::Assignability`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerType {
    name: QualifiedName,
    attributes: BTreeMap<String, AttributeKind>,
}

impl MarkerType {
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Declare an attribute, consuming self and returning the extended marker.
    pub fn with_attribute(mut self, name: impl Into<String>, kind: AttributeKind) -> Self {
        self.attributes.insert(name.into(), kind);
        self
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeKind> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeKind> {
        self.attributes.get(name)
    }
}

impl fmt::Display for MarkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}

/// One generation recipe: how to name the output and which body template to render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationDirective {
    /// Inline template producing the output class name, e.g. `{{name}}Impl`.
    pub class_name_template: String,
    /// Reference of the named body template, resolved by the template engine.
    pub template: String,
}

impl GenerationDirective {
    pub fn new(class_name_template: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            class_name_template: class_name_template.into(),
            template: template.into(),
        }
    }

    /// Both templates must be present.
    pub fn validate(&self, marker: &QualifiedName) -> Result<(), DomainError> {
        if self.class_name_template.trim().is_empty() {
            return Err(DomainError::InvalidDirective {
                marker: marker.to_string(),
                reason: "class name template is empty".into(),
            });
        }
        if self.template.trim().is_empty() {
            return Err(DomainError::InvalidDirective {
                marker: marker.to_string(),
                reason: "body template reference is empty".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for GenerationDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.class_name_template, self.template)
    }
}

/// How a marker announces the directives it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveDeclaration {
    /// The marker lists its directives explicitly.
    List {
        marker: MarkerType,
        directives: Vec<GenerationDirective>,
    },
    /// The marker itself is a single directive.
    Single {
        marker: MarkerType,
        directive: GenerationDirective,
    },
}

impl DirectiveDeclaration {
    pub fn marker(&self) -> &MarkerType {
        match self {
            Self::List { marker, .. } | Self::Single { marker, .. } => marker,
        }
    }

    /// Normalize both routes into the registry's shape.
    pub fn into_parts(self) -> (MarkerType, Vec<GenerationDirective>) {
        match self {
            Self::List { marker, directives } => (marker, directives),
            Self::Single { marker, directive } => (marker, vec![directive]),
        }
    }
}

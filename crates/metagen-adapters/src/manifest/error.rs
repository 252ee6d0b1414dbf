//! Errors raised while loading a declaration manifest.

use std::path::PathBuf;

use metagen_core::{domain::DomainError, error::MetagenError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Cannot read manifest '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Marker '{0}' is declared more than once")]
    DuplicateMarker(String),

    #[error("Unknown marker '{name}' referenced from {context}")]
    UnknownMarker { name: String, context: String },

    #[error("Marker '{0}' declares directives both as a list and with `generates`")]
    ConflictingDirectives(String),

    #[error("Element '{0}' is declared more than once")]
    DuplicateElement(String),

    #[error("Invalid element {context}: {reason}")]
    InvalidElement { context: String, reason: String },

    #[error("Invalid value at {path}: {reason}")]
    InvalidValue { path: String, reason: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ManifestError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Io { path, .. } => vec![
                format!("Check that '{}' exists and is readable", path.display()),
            ],
            Self::UnknownMarker { name, .. } => vec![
                format!("Declare '{}' under [[markers]] before using it", name),
            ],
            Self::DuplicateElement(name) => vec![
                format!("Merge the metadata of every '{}' entry into one [[elements]] entry", name),
            ],
            Self::InvalidElement { .. } => vec![
                "Packages and names are dotted identifiers: package = \"app.model\", name = \"Order\"".into(),
            ],
            Self::ConflictingDirectives(_) => vec![
                "Use either [[markers.directives]] or `generates`, not both".into(),
            ],
            Self::InvalidValue { .. } => vec![
                "Typed values are tables: { type = \"pkg.Foo\" }, { enum = \"Color.RED\" },".into(),
                "  { char = \"x\" }, { marker = \"pkg.Nested\", values = { ... } }".into(),
            ],
            _ => vec!["Check the manifest syntax".into()],
        }
    }
}

impl From<ManifestError> for MetagenError {
    fn from(e: ManifestError) -> Self {
        match e {
            ManifestError::Domain(e) => MetagenError::Domain(e),
            other => MetagenError::Configuration {
                message: other.to_string(),
            },
        }
    }
}

use std::fmt;

use super::{common::qualify, element::TargetElement};

/// A rendered source unit, ready to be handed to the host's filer.
///
/// This is the output of the two-phase render. It contains no behavior,
/// only data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub(crate) qualified_name: String,
    pub(crate) class_name: String,
    pub(crate) origin: String,
    pub(crate) content: Vec<u8>,
}

impl GeneratedArtifact {
    pub fn new(origin: &TargetElement, class_name: impl Into<String>, content: Vec<u8>) -> Self {
        let class_name = class_name.into();
        Self {
            qualified_name: qualify(origin.package(), &class_name),
            class_name,
            origin: origin.qualified_name().to_string(),
            content,
        }
    }

    /// Output name: package of the originating element plus the computed class name.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Qualified name of the element the artifact was generated from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

impl fmt::Display for GeneratedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} bytes, from {})",
            self.qualified_name,
            self.content.len(),
            self.origin
        )
    }
}

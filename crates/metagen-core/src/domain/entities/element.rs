use std::fmt;

use super::common::qualify;

/// A declared program element that metadata is attached to.
///
/// Read-only view supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetElement {
    simple_name: String,
    package: String,
    qualified_name: String,
}

impl TargetElement {
    /// Top-level element: qualified name is `package.simple_name`.
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        let package = package.into();
        let simple_name = simple_name.into();
        let qualified_name = qualify(&package, &simple_name);
        Self {
            simple_name,
            package,
            qualified_name,
        }
    }

    /// Element whose qualified name does not follow from package + simple name
    /// (e.g. nested declarations `app.Outer.Inner`).
    pub fn with_qualified_name(
        package: impl Into<String>,
        simple_name: impl Into<String>,
        qualified_name: impl Into<String>,
    ) -> Self {
        Self {
            simple_name: simple_name.into(),
            package: package.into(),
            qualified_name: qualified_name.into(),
        }
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Enclosing package; empty for the unnamed package.
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }
}

impl fmt::Display for TargetElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

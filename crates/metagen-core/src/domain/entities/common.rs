use super::DomainError;
use std::fmt;

/// A dotted, fully qualified declaration name (`app.model.Widget`).
///
/// Invariant: non-empty, no empty segments, no whitespace, no path separators.
/// Enforced at construction, so every segment is safe to use as a directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Create a new qualified name.
    ///
    /// # Panics
    /// Panics if the name is malformed (use `try_new` for fallible).
    pub fn new(name: impl Into<String>) -> Self {
        match Self::try_new(name) {
            Ok(name) => name,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.chars().any(char::is_whitespace) {
            Some("name contains whitespace")
        } else if name.contains(['/', '\\']) {
            Some("name contains a path separator")
        } else if name.split('.').any(str::is_empty) {
            Some("name has an empty segment")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidQualifiedName {
                name,
                reason: reason.into(),
            }),
            None => Ok(Self(name)),
        }
    }

    /// Last segment: `Widget` for `app.model.Widget`.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything before the last segment, empty for top-level names.
    pub fn namespace(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(ns, _)| ns)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join a package and a simple name, leaving the unnamed package out.
pub fn qualify(package: &str, simple_name: &str) -> String {
    if package.is_empty() {
        simple_name.to_string()
    } else {
        format!("{package}.{simple_name}")
    }
}

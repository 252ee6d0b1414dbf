//! Domain value objects: attribute kinds declared by marker types.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity. This file's
//! only job is to define the types, their string representations, and their
//! `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── AttributeKind ─────────────────────────────────────────────────────────────

/// The declared kind of a marker attribute.
///
/// String form is the kind name, with one `[]` suffix per array dimension
/// (`type[]`, `string[][]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AttributeKind {
    String,
    Boolean,
    Integer,
    Float,
    Char,
    /// Reference to a declared type.
    Type,
    /// Constant of an enumeration.
    Enum,
    /// Nested metadata instance.
    Metadata,
    Array(Box<AttributeKind>),
}

impl AttributeKind {
    /// Wrap this kind in one array dimension.
    pub fn array_of(self) -> Self {
        Self::Array(Box::new(self))
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    const fn base_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "int",
            Self::Float => "float",
            Self::Char => "char",
            Self::Type => "type",
            Self::Enum => "enum",
            Self::Metadata => "metadata",
            Self::Array(_) => "array",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(component) => write!(f, "{component}[]"),
            other => f.write_str(other.base_str()),
        }
    }
}

impl FromStr for AttributeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(component) = trimmed.strip_suffix("[]") {
            return Ok(component.parse::<Self>()?.array_of());
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(Self::String),
            "boolean" | "bool" => Ok(Self::Boolean),
            "int" | "integer" | "long" | "short" | "byte" => Ok(Self::Integer),
            "float" | "double" => Ok(Self::Float),
            "char" => Ok(Self::Char),
            "type" | "class" => Ok(Self::Type),
            "enum" => Ok(Self::Enum),
            "metadata" | "annotation" => Ok(Self::Metadata),
            _ => Err(DomainError::UnknownAttributeKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for AttributeKind {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AttributeKind> for String {
    fn from(kind: AttributeKind) -> Self {
        kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_kinds_and_aliases() {
        assert_eq!("string".parse::<AttributeKind>().unwrap(), AttributeKind::String);
        assert_eq!("long".parse::<AttributeKind>().unwrap(), AttributeKind::Integer);
        assert_eq!("Class".parse::<AttributeKind>().unwrap(), AttributeKind::Type);
        assert!("object".parse::<AttributeKind>().is_err());
    }

    #[test]
    fn parses_array_dimensions() {
        let kind: AttributeKind = "type[][]".parse().unwrap();
        assert_eq!(kind, AttributeKind::Type.array_of().array_of());
        assert_eq!(kind.to_string(), "type[][]");
    }
}

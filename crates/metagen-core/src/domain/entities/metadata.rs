//! Applied metadata and its raw, host-shaped values.
//!
//! Values arrive from the host exactly as declared on the element. The
//! converter in `domain::convert` turns them into scope values; nothing in
//! this module is visible to templates.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::marker::MarkerType;
use crate::domain::entities::common::QualifiedName;

/// A concrete metadata instance attached to a target element.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedMetadata {
    marker: MarkerType,
    values: BTreeMap<String, RawValue>,
}

impl AppliedMetadata {
    pub fn new(marker: MarkerType) -> Self {
        Self {
            marker,
            values: BTreeMap::new(),
        }
    }

    /// Set an attribute value, consuming self and returning the extended instance.
    pub fn with_value(mut self, attribute: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.values.insert(attribute.into(), value.into());
        self
    }

    pub fn marker(&self) -> &MarkerType {
        &self.marker
    }

    /// Explicitly supplied attribute values, ordered by attribute name.
    pub fn values(&self) -> &BTreeMap<String, RawValue> {
        &self.values
    }
}

impl fmt::Display for AppliedMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.marker)?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

/// A scalar that templates may consume as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Char(c) => write!(f, "{c:?}"),
        }
    }
}

/// Reference to a type, as written in metadata (`Foo.class`, `Foo[][].class`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Declared(QualifiedName),
    Array(Box<TypeRef>),
    /// Built-in type with no declaration (`int`, `void`).
    Primitive(String),
}

impl TypeRef {
    pub fn declared(name: impl Into<QualifiedName>) -> Self {
        Self::Declared(name.into())
    }

    /// Wrap in one array dimension.
    pub fn array_of(self) -> Self {
        Self::Array(Box::new(self))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared(name) => write!(f, "{name}"),
            Self::Array(component) => write!(f, "{component}[]"),
            Self::Primitive(name) => f.write_str(name),
        }
    }
}

/// Constant of an enumeration (`Color.RED`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    pub enum_type: QualifiedName,
    pub name: String,
}

impl EnumConstant {
    pub fn new(enum_type: impl Into<QualifiedName>, name: impl Into<String>) -> Self {
        Self {
            enum_type: enum_type.into(),
            name: name.into(),
        }
    }
}

/// One raw metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Scalar(Scalar),
    TypeRef(TypeRef),
    EnumConst(EnumConstant),
    Nested(AppliedMetadata),
    Array(Vec<RawValue>),
    /// A host value outside the supported grammar; `kind` names what it is.
    Opaque { kind: String, repr: String },
}

impl RawValue {
    /// Short name of the value's kind, used in diagnostics.
    pub fn kind_name(&self) -> String {
        match self {
            Self::Scalar(Scalar::Str(_)) => "string".into(),
            Self::Scalar(Scalar::Bool(_)) => "boolean".into(),
            Self::Scalar(Scalar::Int(_)) => "integer".into(),
            Self::Scalar(Scalar::Float(_)) => "float".into(),
            Self::Scalar(Scalar::Char(_)) => "char".into(),
            Self::TypeRef(TypeRef::Primitive(name)) => format!("primitive type '{name}'"),
            Self::TypeRef(_) => "type".into(),
            Self::EnumConst(_) => "enum".into(),
            Self::Nested(_) => "metadata".into(),
            Self::Array(_) => "array".into(),
            Self::Opaque { kind, .. } => kind.clone(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::TypeRef(t) => write!(f, "{t}.class"),
            Self::EnumConst(c) => write!(f, "{}.{}", c.enum_type, c.name),
            Self::Nested(m) => write!(f, "{m}"),
            Self::Array(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Self::Opaque { repr, .. } => f.write_str(repr),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::Str(s.to_string()))
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::Str(s))
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        Self::Scalar(Scalar::Int(i))
    }
}

impl From<f64> for RawValue {
    fn from(x: f64) -> Self {
        Self::Scalar(Scalar::Float(x))
    }
}

impl From<char> for RawValue {
    fn from(c: char) -> Self {
        Self::Scalar(Scalar::Char(c))
    }
}

impl From<TypeRef> for RawValue {
    fn from(t: TypeRef) -> Self {
        Self::TypeRef(t)
    }
}

impl From<EnumConstant> for RawValue {
    fn from(c: EnumConstant) -> Self {
        Self::EnumConst(c)
    }
}

impl From<AppliedMetadata> for RawValue {
    fn from(m: AppliedMetadata) -> Self {
        Self::Nested(m)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

//! Decoding of manifest attribute values into raw metadata values.
//!
//! Plain TOML scalars and arrays map directly. Typed values are single-purpose
//! tables:
//!
//! | TOML                                     | Raw value                |
//! |------------------------------------------|--------------------------|
//! | `{ type = "pkg.Foo[][]" }`               | type reference           |
//! | `{ type = "int" }`                       | primitive type reference |
//! | `{ enum = "pkg.Color.RED" }`             | enum constant            |
//! | `{ char = "x" }`                         | character                |
//! | `{ marker = "pkg.M", values = { .. } }`  | nested metadata          |
//! | any other table, datetimes               | opaque                   |

use std::collections::HashMap;

use metagen_core::domain::{
    AppliedMetadata, EnumConstant, MarkerType, QualifiedName, RawValue, Scalar, TypeRef,
};
use toml::{Table, Value};

use super::error::ManifestError;

/// Built-in type names that have no declaration.
const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "short", "int", "long", "char", "float", "double", "void",
];

/// Declared markers by name.
pub(crate) type MarkerIndex = HashMap<String, MarkerType>;

/// Decode the `values` table of one metadata instance.
pub(crate) fn decode_metadata(
    marker: &MarkerType,
    values: &Table,
    path: &str,
    markers: &MarkerIndex,
) -> Result<AppliedMetadata, ManifestError> {
    let mut metadata = AppliedMetadata::new(marker.clone());
    for (attribute, value) in values {
        let value = decode(value, &format!("{path}.{attribute}"), markers)?;
        metadata = metadata.with_value(attribute.as_str(), value);
    }
    Ok(metadata)
}

pub(crate) fn decode(
    value: &Value,
    path: &str,
    markers: &MarkerIndex,
) -> Result<RawValue, ManifestError> {
    Ok(match value {
        Value::String(s) => RawValue::Scalar(Scalar::Str(s.clone())),
        Value::Integer(i) => RawValue::Scalar(Scalar::Int(*i)),
        Value::Float(x) => RawValue::Scalar(Scalar::Float(*x)),
        Value::Boolean(b) => RawValue::Scalar(Scalar::Bool(*b)),
        Value::Datetime(d) => RawValue::Opaque {
            kind: "datetime".into(),
            repr: d.to_string(),
        },
        Value::Array(items) => RawValue::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| decode(item, &format!("{path}[{i}]"), markers))
                .collect::<Result<_, _>>()?,
        ),
        Value::Table(table) => decode_table(table, path, markers)?,
    })
}

fn decode_table(table: &Table, path: &str, markers: &MarkerIndex) -> Result<RawValue, ManifestError> {
    let single = |key: &str| -> Option<&str> {
        match (table.len(), table.get(key)) {
            (1, Some(Value::String(s))) => Some(s),
            _ => None,
        }
    };

    if let Some(spelled) = single("type") {
        return Ok(RawValue::TypeRef(parse_type(spelled, path)?));
    }

    if let Some(spelled) = single("enum") {
        let (enum_type, name) = spelled.rsplit_once('.').ok_or_else(|| invalid(
            path,
            format!("enum constant '{spelled}' must be written as Type.CONSTANT"),
        ))?;
        let enum_type = QualifiedName::try_new(enum_type)?;
        return Ok(RawValue::EnumConst(EnumConstant::new(enum_type, name)));
    }

    if let Some(spelled) = single("char") {
        let mut chars = spelled.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(RawValue::Scalar(Scalar::Char(c))),
            _ => Err(invalid(path, format!("'{spelled}' is not a single character"))),
        };
    }

    let nested_keys = table.keys().all(|k| k == "marker" || k == "values");
    if let (true, Some(Value::String(marker))) = (nested_keys, table.get("marker")) {
        let marker = markers.get(marker).ok_or_else(|| ManifestError::UnknownMarker {
            name: marker.clone(),
            context: path.to_string(),
        })?;
        let values = match table.get("values") {
            None => Table::new(),
            Some(Value::Table(values)) => values.clone(),
            Some(_) => return Err(invalid(path, "nested `values` must be a table".into())),
        };
        return Ok(RawValue::Nested(decode_metadata(marker, &values, path, markers)?));
    }

    Ok(RawValue::Opaque {
        kind: "table".into(),
        repr: Value::Table(table.clone()).to_string(),
    })
}

/// Parse `pkg.Foo[][]`, `int`, `int[]`.
fn parse_type(spelled: &str, path: &str) -> Result<TypeRef, ManifestError> {
    let mut base = spelled.trim();
    let mut dimensions = 0;
    while let Some(component) = base.strip_suffix("[]") {
        base = component.trim_end();
        dimensions += 1;
    }

    if base.is_empty() {
        return Err(invalid(path, format!("'{spelled}' names no type")));
    }

    let mut type_ref = if PRIMITIVES.contains(&base) {
        TypeRef::Primitive(base.to_string())
    } else {
        TypeRef::Declared(QualifiedName::try_new(base)?)
    };
    for _ in 0..dimensions {
        type_ref = type_ref.array_of();
    }
    Ok(type_ref)
}

fn invalid(path: &str, reason: String) -> ManifestError {
    ManifestError::InvalidValue {
        path: path.to_string(),
        reason,
    }
}

//! Raw metadata value → scope value conversion.
//!
//! Rules, in priority order:
//!
//! 1. Type reference → qualified name, `[]` appended per array dimension
//! 2. Enum constant → bare constant name
//! 3. Nested metadata → map of its converted attributes (no `this` frame)
//! 4. Array → list of converted values, order preserved
//! 5. Scalar → unchanged
//! 6. Anything else → `UnsupportedValueKind`

use crate::domain::{
    entities::{AppliedMetadata, RawValue, TypeRef},
    error::DomainError,
    scope::{Frame, ScopeValue},
};

/// Convert every explicitly supplied attribute of `metadata` into a frame.
///
/// Errors name the full attribute path, e.g. `config.targets[1]`.
pub fn convert_attributes(metadata: &AppliedMetadata) -> Result<Frame, DomainError> {
    attributes_at(metadata, "")
}

/// Convert one raw value. `path` names the value in error messages.
pub fn convert(value: &RawValue, path: &str) -> Result<ScopeValue, DomainError> {
    match value {
        RawValue::TypeRef(type_ref) => type_name(type_ref)
            .map(ScopeValue::string)
            .ok_or_else(|| unsupported(path, value)),
        RawValue::EnumConst(constant) => Ok(ScopeValue::string(constant.name.clone())),
        RawValue::Nested(nested) => attributes_at(nested, path).map(ScopeValue::Map),
        RawValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| convert(item, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(ScopeValue::List),
        RawValue::Scalar(scalar) => Ok(ScopeValue::Scalar(scalar.clone())),
        RawValue::Opaque { .. } => Err(unsupported(path, value)),
    }
}

fn attributes_at(metadata: &AppliedMetadata, prefix: &str) -> Result<Frame, DomainError> {
    metadata
        .values()
        .iter()
        .map(|(name, raw)| {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            convert(raw, &path).map(|value| (name.clone(), value))
        })
        .collect()
}

/// Qualified name of a declared type or array thereof; `None` for primitives.
fn type_name(type_ref: &TypeRef) -> Option<String> {
    match type_ref {
        TypeRef::Declared(name) => Some(name.to_string()),
        TypeRef::Array(component) => type_name(component).map(|name| name + "[]"),
        TypeRef::Primitive(_) => None,
    }
}

fn unsupported(path: &str, value: &RawValue) -> DomainError {
    DomainError::UnsupportedValueKind {
        attribute: path.to_string(),
        kind: value.kind_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EnumConstant, MarkerType, Scalar};
    use pretty_assertions::assert_eq;

    fn str_value(s: &str) -> ScopeValue {
        ScopeValue::string(s)
    }

    #[test]
    fn type_reference_converts_to_qualified_name() {
        let value = RawValue::from(TypeRef::declared("pkg.Foo"));
        assert_eq!(convert(&value, "t").unwrap(), str_value("pkg.Foo"));
    }

    #[test]
    fn array_type_appends_one_marker_per_dimension() {
        let value = RawValue::from(TypeRef::declared("pkg.Foo").array_of().array_of());
        assert_eq!(convert(&value, "t").unwrap(), str_value("pkg.Foo[][]"));
    }

    #[test]
    fn enum_constant_converts_to_bare_name() {
        let value = RawValue::from(EnumConstant::new("app.Color", "RED"));
        assert_eq!(convert(&value, "color").unwrap(), str_value("RED"));
    }

    #[test]
    fn scalars_pass_through_unchanged() {
        for scalar in [
            Scalar::Str("x".into()),
            Scalar::Bool(true),
            Scalar::Int(42),
            Scalar::Float(1.5),
            Scalar::Char('c'),
        ] {
            let value = RawValue::Scalar(scalar.clone());
            assert_eq!(convert(&value, "v").unwrap(), ScopeValue::Scalar(scalar));
        }
    }

    #[test]
    fn sequences_preserve_order_and_recurse() {
        let value = RawValue::from(vec![
            RawValue::from(TypeRef::declared("pkg.A")),
            RawValue::from(TypeRef::declared("pkg.B")),
        ]);
        assert_eq!(
            convert(&value, "types").unwrap(),
            ScopeValue::List(vec![str_value("pkg.A"), str_value("pkg.B")])
        );
    }

    #[test]
    fn nested_metadata_becomes_map_without_this_frame() {
        let inner = AppliedMetadata::new(MarkerType::new("app.Field"))
            .with_value("name", "id")
            .with_value("kind", EnumConstant::new("app.Kind", "LONG"));
        let outer = AppliedMetadata::new(MarkerType::new("app.Entity"))
            .with_value("fields", vec![inner]);

        let frame = convert_attributes(&outer).unwrap();
        let fields = frame["fields"].as_list().unwrap();
        let field = fields[0].as_map().unwrap();

        assert_eq!(field["name"], str_value("id"));
        assert_eq!(field["kind"], str_value("LONG"));
        assert!(!field.contains_key("this"));
    }

    #[test]
    fn opaque_value_is_rejected_with_attribute_path() {
        let inner = AppliedMetadata::new(MarkerType::new("app.Field")).with_value(
            "handle",
            RawValue::Opaque {
                kind: "object".into(),
                repr: "<handle>".into(),
            },
        );
        let outer = AppliedMetadata::new(MarkerType::new("app.Entity"))
            .with_value("fields", vec![RawValue::from("ok"), RawValue::Nested(inner)]);

        let err = convert_attributes(&outer).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnsupportedValueKind {
                attribute: "fields[1].handle".into(),
                kind: "object".into(),
            }
        );
    }

    #[test]
    fn primitive_type_reference_is_unsupported() {
        let value = RawValue::from(TypeRef::Primitive("int".into()).array_of());
        let err = convert(&value, "type").unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedValueKind { ref attribute, .. } if attribute == "type"));
    }
}

//! Layered naming/value context handed to the template engine.
//!
//! A [`Scope`] has two frames, searched top-first:
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ top frame                                  │
//! │   <converted metadata attributes>          │
//! │   this ─────────────┐                      │
//! └─────────────────────┼──────────────────────┘
//!                       ▼
//! ┌────────────────────────────────────────────┐
//! │ "this" frame                               │
//! │   annotated = <element simple name>        │
//! │   package   = <element package>            │
//! │   class     = <computed, body phase only>  │
//! └────────────────────────────────────────────┘
//! ```
//!
//! `class` is added with [`Scope::with_class`] after the name phase, which
//! returns a new scope and leaves the original untouched.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    convert,
    entities::{AppliedMetadata, Scalar, TargetElement},
    error::DomainError,
};

pub const THIS: &str = "this";
pub const ANNOTATED: &str = "annotated";
pub const PACKAGE: &str = "package";
pub const CLASS: &str = "class";

/// One frame of named values.
pub type Frame = BTreeMap<String, ScopeValue>;

/// A template-consumable value. Nothing host-specific survives conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScopeValue {
    Scalar(Scalar),
    List(Vec<ScopeValue>),
    Map(Frame),
}

impl ScopeValue {
    pub fn string(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Str(s.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ScopeValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Frame> {
        match self {
            Self::Map(frame) => Some(frame),
            _ => None,
        }
    }
}

/// The two-frame context for one generation event.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    this: Frame,
    values: Frame,
}

impl Scope {
    /// Build the scope for one (element, metadata instance) pair.
    ///
    /// # Errors
    /// `DomainError::UnsupportedValueKind` when any attribute value (at any
    /// depth) has no scope representation.
    pub fn build(target: &TargetElement, metadata: &AppliedMetadata) -> Result<Self, DomainError> {
        let mut this = Frame::new();
        this.insert(ANNOTATED.into(), ScopeValue::string(target.simple_name()));
        this.insert(PACKAGE.into(), ScopeValue::string(target.package()));

        let values = convert::convert_attributes(metadata)?;

        Ok(Self { this, values })
    }

    /// Return a copy of this scope with `this.class` set.
    pub fn with_class(&self, class_name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.this
            .insert(CLASS.into(), ScopeValue::string(class_name.into()));
        next
    }

    /// Return a copy of this scope without `this.class`.
    pub fn without_class(&self) -> Self {
        let mut next = self.clone();
        next.this.remove(CLASS);
        next
    }

    /// The computed class name, once the name phase has run.
    pub fn class(&self) -> Option<&str> {
        self.this.get(CLASS).and_then(ScopeValue::as_str)
    }

    pub fn this_frame(&self) -> &Frame {
        &self.this
    }

    /// Converted attributes, without the `this` back-reference.
    pub fn attributes(&self) -> &Frame {
        &self.values
    }

    /// Top frame as the engine sees it: attributes plus the `this` back-reference.
    pub fn top_frame(&self) -> Frame {
        let mut top = self.values.clone();
        top.insert(THIS.into(), ScopeValue::Map(self.this.clone()));
        top
    }

    /// Frames in lookup order (top first).
    pub fn chain(&self) -> [Frame; 2] {
        [self.top_frame(), self.this.clone()]
    }

    /// The chain collapsed into one frame, inner frames overlaid by outer
    /// ones. A first path segment finds the same value here as it would
    /// walking [`Scope::chain`], so engines that take a single context
    /// object keep the layered lookup.
    pub fn flattened(&self) -> Frame {
        self.chain()
            .into_iter()
            .rev()
            .fold(Frame::new(), |mut merged, frame| {
                merged.extend(frame);
                merged
            })
    }

    /// Resolve a dotted path the way a logic-less engine does: the first
    /// segment is searched through the frames, the rest descends into maps.
    pub fn lookup(&self, path: &str) -> Option<&ScopeValue> {
        let mut segments = path.split('.');
        let head = segments.next()?;

        let mut current: Option<&ScopeValue> = None;
        let mut in_this = false;
        if head == THIS {
            in_this = true;
        } else {
            current = self.values.get(head).or_else(|| self.this.get(head));
        }

        for segment in segments {
            current = if in_this {
                in_this = false;
                self.this.get(segment)
            } else {
                current?.as_map()?.get(segment)
            };
        }

        if in_this {
            // Bare `this` names the frame itself, which is not a single value.
            return None;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MarkerType, TypeRef};
    use pretty_assertions::assert_eq;

    fn widget_scope() -> Scope {
        let marker = MarkerType::new("app.Spec");
        let metadata = AppliedMetadata::new(marker)
            .with_value("name", "Widget")
            .with_value("types", vec![TypeRef::declared("pkg.A")]);
        Scope::build(&TargetElement::new("app", "Base"), &metadata).unwrap()
    }

    #[test]
    fn builds_this_frame_without_class() {
        let scope = widget_scope();

        assert_eq!(scope.lookup("this.annotated").and_then(ScopeValue::as_str), Some("Base"));
        assert_eq!(scope.lookup("this.package").and_then(ScopeValue::as_str), Some("app"));
        assert!(scope.lookup("this.class").is_none());
        assert!(scope.class().is_none());
    }

    #[test]
    fn unqualified_lookup_falls_back_to_this_frame() {
        let scope = widget_scope();

        assert_eq!(scope.lookup("name").and_then(ScopeValue::as_str), Some("Widget"));
        assert_eq!(scope.lookup("annotated").and_then(ScopeValue::as_str), Some("Base"));
        assert!(scope.lookup("missing").is_none());
    }

    #[test]
    fn with_class_leaves_original_untouched() {
        let scope = widget_scope();
        let named = scope.with_class("WidgetImpl");

        assert_eq!(named.class(), Some("WidgetImpl"));
        assert_eq!(named.lookup("this.class").and_then(ScopeValue::as_str), Some("WidgetImpl"));
        assert!(scope.class().is_none());
    }

    #[test]
    fn top_frame_carries_back_reference() {
        let scope = widget_scope().with_class("WidgetImpl");
        let top = scope.top_frame();

        let this = top.get(THIS).and_then(ScopeValue::as_map).unwrap();
        assert_eq!(this.get(CLASS).and_then(ScopeValue::as_str), Some("WidgetImpl"));
        assert_eq!(scope.chain()[1], *scope.this_frame());
    }

    #[test]
    fn flattened_prefers_attributes_over_this_frame() {
        let marker = MarkerType::new("app.Spec");
        let metadata = AppliedMetadata::new(marker).with_value("annotated", "Shadow");
        let scope = Scope::build(&TargetElement::new("app", "Base"), &metadata).unwrap();

        let flat = scope.flattened();
        assert_eq!(flat.get(ANNOTATED).and_then(ScopeValue::as_str), Some("Shadow"));
        assert_eq!(flat.get(PACKAGE).and_then(ScopeValue::as_str), Some("app"));
        assert_eq!(scope.lookup("this.annotated").and_then(ScopeValue::as_str), Some("Base"));
    }
}

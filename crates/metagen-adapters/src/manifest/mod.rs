//! TOML declaration manifest acting as the generation host.
//!
//! A manifest declares markers (with their capability hierarchy and
//! directives) and the elements that carry them. [`ManifestHost`] answers
//! the `Discovery` and `Assignability` ports from that data.
//!
//! # Format
//!
//! ```toml
//! [[markers]]
//! name = "app.Spec"
//! extends = ["app.Generated"]
//! attributes = { name = "string", types = "type[]" }
//!
//!   [[markers.directives]]
//!   class_name = "{{name}}Impl"
//!   template = "impl.mustache"
//!
//! [[markers]]
//! name = "app.Builder"
//! generates = { class_name = "{{annotated}}Builder", template = "builder.mustache" }
//!
//! [[elements]]
//! package = "app"
//! name = "Base"
//!
//!   [[elements.metadata]]
//!   marker = "app.Spec"
//!   values = { name = "Widget", types = [{ type = "pkg.A" }] }
//! ```
//!
//! See [`value`] for the attribute value encoding.

mod error;
pub mod value;

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::Path,
    str::FromStr,
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use metagen_core::{
    application::ports::{Assignability, Discovery},
    domain::{
        AppliedMetadata, AttributeKind, DirectiveDeclaration, GenerationDirective, MarkerType,
        QualifiedName, TargetElement,
    },
};

pub use error::ManifestError;
use value::MarkerIndex;

// ── Manifest types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    markers: Vec<MarkerEntry>,
    #[serde(default)]
    elements: Vec<ElementEntry>,
}

/// One `[[markers]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MarkerEntry {
    name: String,
    #[serde(default)]
    extends: Vec<String>,
    #[serde(default)]
    attributes: BTreeMap<String, AttributeKind>,
    /// Explicit list route.
    #[serde(default)]
    directives: Vec<DirectiveEntry>,
    /// Singleton route: the marker is itself a directive.
    generates: Option<DirectiveEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DirectiveEntry {
    class_name: String,
    template: String,
}

impl From<DirectiveEntry> for GenerationDirective {
    fn from(entry: DirectiveEntry) -> Self {
        GenerationDirective::new(entry.class_name, entry.template)
    }
}

/// One `[[elements]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementEntry {
    #[serde(default)]
    package: String,
    name: String,
    /// Overrides `package.name`, for nested declarations.
    qualified_name: Option<String>,
    #[serde(default)]
    metadata: Vec<MetadataEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MetadataEntry {
    marker: String,
    #[serde(default)]
    values: toml::Table,
}

// ── Host ──────────────────────────────────────────────────────────────────────

/// A declared marker, as the host knows it.
#[derive(Debug, Clone)]
pub struct DeclaredMarker {
    pub marker: MarkerType,
    pub extends: Vec<QualifiedName>,
    pub declaration: Option<DirectiveDeclaration>,
}

/// Element with the metadata applied to it, in declaration order.
#[derive(Debug, Clone)]
pub struct DeclaredElement {
    pub element: TargetElement,
    pub metadata: Vec<AppliedMetadata>,
}

/// Host backed by a parsed manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestHost {
    markers: Vec<DeclaredMarker>,
    elements: Vec<DeclaredElement>,
}

impl ManifestHost {
    /// Read and validate a manifest file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        raw.parse()
    }

    pub fn markers(&self) -> &[DeclaredMarker] {
        &self.markers
    }

    pub fn elements(&self) -> &[DeclaredElement] {
        &self.elements
    }

    pub fn marker(&self, name: &str) -> Option<&DeclaredMarker> {
        self.markers.iter().find(|m| m.marker.name().as_str() == name)
    }

    fn from_manifest(manifest: ManifestFile) -> Result<Self, ManifestError> {
        // ── 1. Marker types (names must be unique) ─────────────────────────
        let mut index = MarkerIndex::new();
        for entry in &manifest.markers {
            let name = QualifiedName::try_new(entry.name.as_str())?;
            let marker = entry
                .attributes
                .iter()
                .fold(MarkerType::new(name), |marker, (attr, kind)| {
                    marker.with_attribute(attr.as_str(), kind.clone())
                });
            if index.insert(entry.name.clone(), marker).is_some() {
                return Err(ManifestError::DuplicateMarker(entry.name.clone()));
            }
        }

        // ── 2. Hierarchy and directives ────────────────────────────────────
        let mut markers = Vec::with_capacity(manifest.markers.len());
        for entry in manifest.markers {
            let marker = index[&entry.name].clone();

            let extends = entry
                .extends
                .iter()
                .map(|parent| {
                    if !index.contains_key(parent) {
                        return Err(ManifestError::UnknownMarker {
                            name: parent.clone(),
                            context: format!("the `extends` of '{}'", entry.name),
                        });
                    }
                    Ok(QualifiedName::try_new(parent.as_str())?)
                })
                .collect::<Result<Vec<_>, _>>()?;

            let declaration = match (entry.directives.is_empty(), entry.generates) {
                (false, Some(_)) => {
                    return Err(ManifestError::ConflictingDirectives(entry.name));
                }
                (false, None) => Some(DirectiveDeclaration::List {
                    marker: marker.clone(),
                    directives: entry.directives.into_iter().map(Into::into).collect(),
                }),
                (true, Some(single)) => Some(DirectiveDeclaration::Single {
                    marker: marker.clone(),
                    directive: single.into(),
                }),
                (true, None) => None,
            };

            markers.push(DeclaredMarker {
                marker,
                extends,
                declaration,
            });
        }

        // ── 3. Elements and their metadata ─────────────────────────────────
        let mut elements = Vec::with_capacity(manifest.elements.len());
        let mut seen = HashSet::new();
        for (i, entry) in manifest.elements.into_iter().enumerate() {
            let element = element_of(i, entry.package, entry.name, entry.qualified_name)?;
            if !seen.insert(element.qualified_name().to_string()) {
                return Err(ManifestError::DuplicateElement(element.to_string()));
            }

            let mut metadata = Vec::with_capacity(entry.metadata.len());
            for (i, applied) in entry.metadata.iter().enumerate() {
                let path = format!("{element}.metadata[{i}]");
                let marker = index
                    .get(&applied.marker)
                    .ok_or_else(|| ManifestError::UnknownMarker {
                        name: applied.marker.clone(),
                        context: path.clone(),
                    })?;

                for attribute in applied.values.keys() {
                    if !marker.attributes().is_empty() && marker.attribute(attribute).is_none() {
                        warn!(
                            element = %element,
                            marker = %marker,
                            attribute = %attribute,
                            "Value for undeclared attribute"
                        );
                    }
                }

                metadata.push(value::decode_metadata(
                    marker,
                    &applied.values,
                    &path,
                    &index,
                )?);
            }

            elements.push(DeclaredElement { element, metadata });
        }

        debug!(
            markers = markers.len(),
            elements = elements.len(),
            "Manifest loaded"
        );
        Ok(Self { markers, elements })
    }

    fn parents_of(&self, name: &QualifiedName) -> &[QualifiedName] {
        match self.markers.iter().find(|m| m.marker.name() == name) {
            Some(declared) => &declared.extends,
            None => &[],
        }
    }
}

/// Build an element, refusing names that cannot become an output path.
fn element_of(
    index: usize,
    package: String,
    name: String,
    qualified_name: Option<String>,
) -> Result<TargetElement, ManifestError> {
    let invalid = |reason: String| ManifestError::InvalidElement {
        context: format!("elements[{index}] ('{name}')"),
        reason,
    };

    if !package.is_empty() {
        QualifiedName::try_new(package.as_str()).map_err(|e| invalid(e.to_string()))?;
    }
    if name.contains('.') {
        return Err(invalid("a simple name cannot contain '.'".into()));
    }

    let element = match qualified_name {
        Some(qualified) => TargetElement::with_qualified_name(package, name.as_str(), qualified),
        None => TargetElement::new(package, name.as_str()),
    };
    QualifiedName::try_new(element.qualified_name()).map_err(|e| invalid(e.to_string()))?;
    Ok(element)
}

impl FromStr for ManifestHost {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let manifest: ManifestFile = toml::from_str(s)?;
        Self::from_manifest(manifest)
    }
}

impl Discovery for ManifestHost {
    fn directive_declarations(&self) -> Vec<DirectiveDeclaration> {
        self.markers
            .iter()
            .filter_map(|m| m.declaration.clone())
            .collect()
    }

    fn elements_carrying(&self, marker: &MarkerType) -> Vec<TargetElement> {
        self.elements
            .iter()
            .filter(|e| {
                e.metadata
                    .iter()
                    .any(|m| self.is_assignable(m.marker(), marker))
            })
            .map(|e| e.element.clone())
            .collect()
    }

    fn applied_metadata_on(&self, element: &TargetElement) -> Vec<AppliedMetadata> {
        self.elements
            .iter()
            .find(|e| e.element == *element)
            .map(|e| e.metadata.clone())
            .unwrap_or_default()
    }
}

impl Assignability for ManifestHost {
    /// Reflexive, transitive walk over `extends`.
    fn is_assignable(&self, applied: &MarkerType, marker: &MarkerType) -> bool {
        let target = marker.name();
        let mut seen = HashSet::new();
        let mut pending = vec![applied.name()];

        while let Some(name) = pending.pop() {
            if name == target {
                return true;
            }
            if seen.insert(name) {
                pending.extend(self.parents_of(name));
            }
        }
        false
    }
}

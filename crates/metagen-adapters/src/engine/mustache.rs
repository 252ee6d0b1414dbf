//! Mustache-backed template engine.
//!
//! Lookup follows Mustache's context stack: a name is searched from the
//! innermost section item outwards, ending at the scope chain. Inside
//! `{{#types}}...{{/types}}` the item is `{{.}}`, while `{{name}}`,
//! `{{package}}` and `{{this.class}}` still reach the enclosing frames.
//! Missing keys render as empty text.
//!
//! `{{value}}` is HTML-escaped as in every Mustache implementation; use
//! `{{{value}}}` or `{{&value}}` for raw text such as generic type arguments.

use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
};

use mustache::Template;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use metagen_core::{
    application::{
        ApplicationError,
        ports::{CompiledTemplate, TemplateEngine},
    },
    domain::Scope,
    error::{MetagenError, MetagenResult},
};

/// Template engine with eagerly compiled named templates.
#[derive(Default)]
pub struct MustacheEngine {
    templates: BTreeMap<String, Template>,
}

impl MustacheEngine {
    /// Engine with no named templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every file under `root`, keyed by its `/`-separated path
    /// relative to `root` (`impl.mustache`, `model/entity.mustache`).
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn from_dir(root: impl AsRef<Path>) -> MetagenResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(MetagenError::Configuration {
                message: format!("templates directory not found: {}", root.display()),
            });
        }

        let mut engine = Self::new();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| MetagenError::Configuration {
                message: format!("cannot walk templates directory: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let key = template_key(root, entry.path())?;
            let source = fs::read_to_string(entry.path()).map_err(|e| {
                MetagenError::Configuration {
                    message: format!("cannot read template '{}': {e}", entry.path().display()),
                }
            })?;
            engine.register(&key, &source)?;
        }

        debug!(templates = engine.len(), "Templates registered");
        Ok(engine)
    }

    /// Builder-style registration of a named template.
    pub fn with_template(mut self, name: &str, source: &str) -> MetagenResult<Self> {
        self.register(name, source)?;
        Ok(self)
    }

    /// Compile and register (or replace) a named template.
    pub fn register(&mut self, name: &str, source: &str) -> MetagenResult<()> {
        let template = compile(name, source)?;
        self.templates.insert(name.to_string(), template);
        Ok(())
    }

    /// Registered template names, sorted.
    pub fn template_names(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl fmt::Debug for MustacheEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MustacheEngine")
            .field("templates", &self.template_names())
            .finish()
    }
}

fn compile(name: &str, source: &str) -> MetagenResult<Template> {
    Ok(
        mustache::compile_str(source).map_err(|e| ApplicationError::TemplateCompile {
            template: name.to_string(),
            reason: e.to_string(),
        })?,
    )
}

fn render(name: &str, template: &Template, scope: &Scope) -> MetagenResult<String> {
    let render_error = |reason: String| ApplicationError::TemplateRender {
        template: name.to_string(),
        reason,
    };

    // The chain becomes the bottom of Mustache's context stack; sections push
    // their items above it.
    let mut out = Vec::new();
    template
        .render(&mut out, &scope.flattened())
        .map_err(|e| render_error(e.to_string()))?;
    Ok(String::from_utf8(out).map_err(|e| render_error(e.to_string()))?)
}

/// A compiled template; named ones are borrowed from the engine.
enum MustacheTemplate<'e> {
    Inline { source: String, template: Template },
    Named { name: String, template: &'e Template },
}

impl CompiledTemplate for MustacheTemplate<'_> {
    fn name(&self) -> &str {
        match self {
            Self::Inline { source, .. } => source,
            Self::Named { name, .. } => name,
        }
    }

    fn execute(&self, scope: &Scope) -> MetagenResult<String> {
        match self {
            Self::Inline { source, template } => render(source, template, scope),
            Self::Named { name, template } => render(name, template, scope),
        }
    }
}

impl TemplateEngine for MustacheEngine {
    fn compile_inline(&self, source: &str) -> MetagenResult<Box<dyn CompiledTemplate + '_>> {
        let template = compile(source, source)?;
        Ok(Box::new(MustacheTemplate::Inline {
            source: source.to_string(),
            template,
        }))
    }

    fn compile_named(&self, reference: &str) -> MetagenResult<Box<dyn CompiledTemplate + '_>> {
        let template = self
            .templates
            .get(reference)
            .ok_or_else(|| ApplicationError::TemplateNotFound {
                reference: reference.to_string(),
            })?;

        Ok(Box::new(MustacheTemplate::Named {
            name: reference.to_string(),
            template,
        }))
    }
}

fn template_key(root: &Path, path: &Path) -> MetagenResult<String> {
    let relative: PathBuf = path
        .strip_prefix(root)
        .map_err(|_| MetagenError::Internal {
            message: format!(
                "failed to relativise '{}' against '{}'",
                path.display(),
                root.display()
            ),
        })?
        .to_path_buf();

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

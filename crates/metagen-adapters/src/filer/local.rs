//! Local filesystem filer using std::fs.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tracing::debug;

use metagen_core::{
    application::{ApplicationError, ports::Filer},
    domain::{QualifiedName, TargetElement},
    error::MetagenResult,
};

/// Writes artifacts to `<root>/<package path>/<Class>.<extension>`.
#[derive(Debug, Clone)]
pub struct DirectoryFiler {
    root: PathBuf,
    extension: String,
    written: Arc<Mutex<Vec<PathBuf>>>,
}

impl DirectoryFiler {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
            written: Arc::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an artifact with this qualified name is written to. Always under
    /// `root`: a `QualifiedName` has no empty segments and no separators.
    pub fn path_for(&self, qualified_name: &QualifiedName) -> PathBuf {
        let mut path = self.root.clone();
        for segment in qualified_name.namespace().split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }

        let file_name = if self.extension.is_empty() {
            qualified_name.simple_name().to_string()
        } else {
            format!("{}.{}", qualified_name.simple_name(), self.extension)
        };
        path.join(file_name)
    }

    /// Paths created so far, in creation order.
    pub fn written(&self) -> Vec<PathBuf> {
        self.written
            .lock()
            .map(|written| written.clone())
            .unwrap_or_default()
    }
}

impl Filer for DirectoryFiler {
    fn create_artifact(
        &self,
        qualified_name: &str,
        origin: &TargetElement,
    ) -> MetagenResult<Box<dyn Write>> {
        let name = QualifiedName::try_new(qualified_name)?;
        let path = self.path_for(&name);
        let io_error = |e: io::Error| ApplicationError::ArtifactIo {
            name: qualified_name.to_string(),
            reason: format!("{}: {e}", path.display()),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let file = File::create(&path).map_err(io_error)?;

        debug!(path = %path.display(), origin = %origin, "Artifact created");
        self.written
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned {
                name: "directory filer",
            })?
            .push(path);

        Ok(Box::new(BufWriter::new(file)))
    }
}

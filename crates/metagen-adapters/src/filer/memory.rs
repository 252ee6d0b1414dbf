//! In-memory filer for testing and dry runs.

use std::{
    collections::BTreeMap,
    io::{self, Write},
    sync::{Arc, Mutex},
};

use metagen_core::{
    application::{ApplicationError, ports::Filer},
    domain::TargetElement,
    error::MetagenResult,
};

#[derive(Debug, Default)]
struct Stored {
    content: Vec<u8>,
    origin: String,
}

/// Keeps every artifact in memory, keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiler {
    inner: Arc<Mutex<BTreeMap<String, Stored>>>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of an artifact, as UTF-8 text.
    pub fn read(&self, qualified_name: &str) -> Option<String> {
        let inner = self.inner.lock().ok()?;
        inner
            .get(qualified_name)
            .map(|stored| String::from_utf8_lossy(&stored.content).into_owned())
    }

    /// Qualified name of the element an artifact was generated from.
    pub fn origin_of(&self, qualified_name: &str) -> Option<String> {
        let inner = self.inner.lock().ok()?;
        inner.get(qualified_name).map(|stored| stored.origin.clone())
    }

    /// Artifact names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Filer for MemoryFiler {
    fn create_artifact(
        &self,
        qualified_name: &str,
        origin: &TargetElement,
    ) -> MetagenResult<Box<dyn Write>> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned {
                name: "memory filer",
            })?;

        if inner.contains_key(qualified_name) {
            return Err(ApplicationError::ArtifactIo {
                name: qualified_name.to_string(),
                reason: "artifact already exists".into(),
            }
            .into());
        }

        inner.insert(
            qualified_name.to_string(),
            Stored {
                content: Vec::new(),
                origin: origin.qualified_name().to_string(),
            },
        );

        Ok(Box::new(MemorySink {
            inner: Arc::clone(&self.inner),
            name: qualified_name.to_string(),
        }))
    }
}

struct MemorySink {
    inner: Arc<Mutex<BTreeMap<String, Stored>>>,
    name: String,
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("memory filer lock poisoned"))?;
        let stored = inner
            .get_mut(&self.name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, self.name.clone()))?;
        stored.content.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

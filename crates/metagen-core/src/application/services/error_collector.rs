//! Accumulates failures across a run and reports them once, at the end.

use crate::application::ports::{Messager, Severity};

#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<String>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Report every recorded error, in insertion order, and clear the list.
    ///
    /// Returns how many errors were reported.
    pub fn flush_all(&mut self, sink: &dyn Messager) -> usize {
        let count = self.errors.len();
        for error in self.errors.drain(..) {
            sink.report(Severity::Error, &error);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.errors
    }
}

//! Messager adapters.

use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use metagen_core::application::ports::{Messager, Severity};

/// Forwards diagnostics to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMessager;

impl Messager for TracingMessager {
    fn report(&self, severity: Severity, text: &str) {
        match severity {
            Severity::Note => info!(target: "metagen::diagnostics", "{text}"),
            Severity::Warning => warn!(target: "metagen::diagnostics", "{text}"),
            Severity::Error => error!(target: "metagen::diagnostics", "{text}"),
        }
    }
}

/// Records diagnostics for later inspection.
#[derive(Debug, Clone, Default)]
pub struct CollectingMessager {
    messages: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl CollectingMessager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Texts reported at the given severity, in order.
    pub fn texts(&self, severity: Severity) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, text)| text)
            .collect()
    }
}

impl Messager for CollectingMessager {
    fn report(&self, severity: Severity, text: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((severity, text.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_by_severity() {
        let messager = CollectingMessager::new();
        messager.report(Severity::Note, "generating");
        messager.report(Severity::Error, "boom");
        TracingMessager.report(Severity::Warning, "ignored by collector");

        assert_eq!(messager.texts(Severity::Error), vec!["boom".to_string()]);
        assert_eq!(messager.messages().len(), 2);
    }
}

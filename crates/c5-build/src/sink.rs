//! Output collaborator: where generated files and diagnostics go.

use std::collections::BTreeMap;

use c5_core::C5Error;
use serde::Serialize;

/// Receives everything a build produces.
///
/// The driver owns persistence. Registering a name twice replaces the
/// earlier content.
pub trait OutputSink {
    fn register_output(&mut self, name: &str, content: String);

    fn remove_output(&mut self, name: &str);

    /// A document failed; the build continues without its companions.
    fn report_error(&mut self, document: &str, error: &C5Error);
}

/// A reported per-document failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub document: String,
    pub message: String,
}

/// Keeps outputs in an ordered map and diagnostics in report order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    outputs: BTreeMap<String, String>,
    diagnostics: Vec<Diagnostic>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.outputs.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.outputs.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    #[must_use]
    pub const fn outputs(&self) -> &BTreeMap<String, String> {
        &self.outputs
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn into_parts(self) -> (BTreeMap<String, String>, Vec<Diagnostic>) {
        (self.outputs, self.diagnostics)
    }
}

impl OutputSink for MemorySink {
    fn register_output(&mut self, name: &str, content: String) {
        self.outputs.insert(name.to_string(), content);
    }

    fn remove_output(&mut self, name: &str) {
        self.outputs.remove(name);
    }

    fn report_error(&mut self, document: &str, error: &C5Error) {
        self.diagnostics.push(Diagnostic {
            document: document.to_string(),
            message: error.to_string(),
        });
    }
}

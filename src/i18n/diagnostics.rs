//! Lookup diagnostics.
//!
//! Missing languages and missing keys never fail a lookup. Instead they are
//! reported to a [`DiagnosticSink`] owned by the registry. The default sink
//! logs through `tracing`; [`MemorySink`] keeps the events so callers can
//! inspect them.

use std::fmt;
use std::sync::Mutex;
use tracing::error;

/// A degraded lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Requested language is not registered; the fallback language was used
    LanguageNotFound { requested: String, fallback: String },

    /// Key is absent from a language (or from a nested node of it)
    KeyNotFound {
        language: String,
        /// Dotted path of the node the key was looked up in, `None` at top level
        node: Option<String>,
        key: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LanguageNotFound {
                requested,
                fallback,
            } => write!(
                f,
                "Not found language \"{}\". Using default language: \"{}\"",
                requested, fallback
            ),
            Diagnostic::KeyNotFound {
                language,
                node: Some(node),
                key,
            } => write!(
                f,
                "For language \"{}\" not found word \"{}\" in \"{}\"",
                language, key, node
            ),
            Diagnostic::KeyNotFound {
                language,
                node: None,
                key,
            } => write!(f, "For language \"{}\" not found word \"{}\"", language, key),
        }
    }
}

/// Receiver for lookup diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Logs every diagnostic at error level. Used unless a registry is given
/// another sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::LanguageNotFound {
                requested,
                fallback,
            } => error!(requested = %requested, fallback = %fallback, "{}", diagnostic),
            Diagnostic::KeyNotFound {
                language,
                node,
                key,
            } => error!(
                language = %language,
                node = node.as_deref().unwrap_or(""),
                key = %key,
                "{}",
                diagnostic
            ),
        }
    }
}

/// Records diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics recorded so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Drain the recorded diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        // A poisoned lock only means another reporter panicked mid-push
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.lock().push(diagnostic.clone());
    }
}

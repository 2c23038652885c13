//! Diagnostic sink for non-fatal resolution events
//!
//! Resolution absorbs most per-directory failures, but they still need to be
//! reported somewhere. The resolver takes a [`Diagnostics`] implementation
//! instead of logging globally; the default forwards to `tracing`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Warning,
    Error,
}

/// Receives diagnostics emitted while resolving drop-ins
pub trait Diagnostics {
    fn emit(&self, severity: Severity, path: Option<&Path>, message: &str);

    fn debug(&self, path: Option<&Path>, message: &str) {
        self.emit(Severity::Debug, path, message);
    }

    fn warning(&self, path: Option<&Path>, message: &str) {
        self.emit(Severity::Warning, path, message);
    }

    fn error(&self, path: Option<&Path>, message: &str) {
        self.emit(Severity::Error, path, message);
    }
}

/// Forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn emit(&self, severity: Severity, path: Option<&Path>, message: &str) {
        let path = path.map(|p| p.display().to_string()).unwrap_or_default();
        match severity {
            Severity::Debug => tracing::debug!(path = %path, "{}", message),
            Severity::Warning => tracing::warn!(path = %path, "{}", message),
            Severity::Error => tracing::error!(path = %path, "{}", message),
        }
    }
}

/// One recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Keeps every diagnostic in memory; used by tests and by callers that want to
/// present resolution problems themselves.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn emit(&self, severity: Severity, path: Option<&Path>, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Diagnostic {
                severity,
                path: path.map(Path::to_path_buf),
                message: message.to_string(),
            });
    }
}

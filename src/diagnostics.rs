//! Diagnostic collection
//!
//! Soft violations found at synthesis time are recorded as ordered
//! diagnostics on the stack rather than aborting emission. The log is an
//! explicit object passed into validators; there is no global registry.

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational note
    Info,
    /// Non-fatal violation the user should review before deploying
    Warning,
}

/// A single diagnostic attached to a construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Construct path the diagnostic belongs to (e.g. `Web/frontend`)
    pub path: String,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
}

/// Receiver for diagnostics emitted during validation
pub trait DiagnosticSink {
    fn add(&mut self, diagnostic: Diagnostic);

    fn info(&mut self, path: &str, message: &str) {
        self.add(Diagnostic {
            path: path.to_string(),
            severity: Severity::Info,
            message: message.to_string(),
        });
    }

    fn warn(&mut self, path: &str, message: &str) {
        self.add(Diagnostic {
            path: path.to_string(),
            severity: Severity::Warning,
            message: message.to_string(),
        });
    }
}

/// Ordered diagnostic log collected over one synthesis pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All entries in emission order
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Warnings in emission order
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Warning messages in emission order, for assertion-friendly access
    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings().map(|d| d.message.as_str()).collect()
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn add(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            path = %diagnostic.path,
            severity = ?diagnostic.severity,
            message = %diagnostic.message,
            "diagnostic recorded"
        );
        self.entries.push(diagnostic);
    }
}

//! Per-run diagnostics sink
//!
//! A [`Diagnostics`] value is created for one generation run, passed to
//! whatever needs to report, then read and cleared by the caller.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Severity of a diagnostic entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Worth reporting, never fatal
    Warning,
    /// Fatal unless escalation is disabled
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("Warning"),
            Severity::Error => f.write_str("Error"),
        }
    }
}

/// A single recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Diagnostic {
    /// How serious the entry is
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Ordered, deduplicated collection of diagnostics
#[derive(Debug, Clone)]
pub struct Diagnostics {
    entries: BTreeSet<Diagnostic>,
    escalate_errors: bool,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Diagnostics {
    /// Create a sink; with `escalate_errors` every error fails immediately
    pub fn new(escalate_errors: bool) -> Self {
        Self {
            entries: BTreeSet::new(),
            escalate_errors,
        }
    }

    /// Whether errors are raised instead of recorded
    pub fn escalates_errors(&self) -> bool {
        self.escalate_errors
    }

    /// Record a diagnostic; empty messages are ignored
    ///
    /// Returns [`Error::BoundsMismatch`] for errors when escalation is on.
    pub fn report(&mut self, severity: Severity, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        if message.is_empty() {
            return Ok(());
        }
        if self.escalate_errors && severity == Severity::Error {
            return Err(Error::BoundsMismatch(message));
        }
        match severity {
            Severity::Warning => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
        self.entries.insert(Diagnostic { severity, message });
        Ok(())
    }

    /// Record a warning
    pub fn warn(&mut self, message: impl Into<String>) {
        // warnings are never escalated
        let _ = self.report(Severity::Warning, message);
    }

    /// Recorded entries in order
    pub fn entries(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded errors
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == Severity::Error)
            .count()
    }

    /// Move every entry of `other` into this sink
    pub fn absorb(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Take all entries, leaving the sink empty
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }
}

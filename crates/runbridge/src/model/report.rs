//! Parse and conversion outcome types.
//!
//! A malformed entry never aborts a batch: it is recorded here and the rest
//! of the file keeps processing. Only unreadable input or an unwritable
//! output location is a hard error.

use std::fmt;

use crate::model::Task;

/// Warning attached to a single skipped entry during parsing.
#[derive(Debug, Clone)]
pub struct ParseWarning {
    /// Display name of the entry, or the file stem when no name was readable.
    pub entry: String,
    pub reason: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entry, self.reason)
    }
}

/// Result of parsing one file (or one run-configuration directory).
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub tasks: Vec<Task>,
    pub warnings: Vec<ParseWarning>,
}

impl ParseOutcome {
    pub fn warn(&mut self, entry: impl Into<String>, reason: impl Into<String>) {
        let w = ParseWarning {
            entry: entry.into(),
            reason: reason.into(),
        };
        tracing::warn!("skipping entry '{}': {}", w.entry, w.reason);
        self.warnings.push(w);
    }

    pub fn merge(&mut self, other: ParseOutcome) {
        self.tasks.extend(other.tasks);
        self.warnings.extend(other.warnings);
    }
}

/// Why a task was left out of a conversion batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The task's kind is not what this converter accepts.
    KindMismatch,
    /// The task matched but a required field could not be derived.
    Unconvertible,
}

/// Per-item diagnostic emitted by a converter.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub task: String,
    pub reason: SkipReason,
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.task, self.detail)
    }
}

/// Counts and diagnostics for one conversion batch.
#[derive(Debug, Default)]
pub struct ConvertReport {
    pub converted: usize,
    pub skipped: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ConvertReport {
    pub fn skip(&mut self, task: &str, reason: SkipReason, detail: impl Into<String>) {
        let d = Diagnostic {
            task: task.to_string(),
            reason,
            detail: detail.into(),
        };
        match reason {
            SkipReason::KindMismatch => tracing::debug!("skipping '{}': {}", d.task, d.detail),
            SkipReason::Unconvertible => tracing::warn!("skipping '{}': {}", d.task, d.detail),
        }
        self.skipped += 1;
        self.diagnostics.push(d);
    }
}

//! Core types for declarative resource management

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The operation failed
    Error,
    /// The operation succeeded but something needs attention
    Warning,
}

/// A message reported by a resource operation
///
/// Resource implementations never surface raw errors to the host; every
/// failure becomes an error diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// One-line summary
    pub summary: String,
    /// Longer explanation (may be empty)
    pub detail: String,
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Create a warning diagnostic
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Convert an error into an error diagnostic
    ///
    /// The summary is the outermost message; the detail holds the full
    /// cause chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        Self::error(err.to_string(), causes.join(": "))
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        if self.detail.is_empty() {
            write!(f, "{label}: {}", self.summary)
        } else {
            write!(f, "{label}: {}: {}", self.summary, self.detail)
        }
    }
}

/// Result of applying one planned change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyResult {
    /// No changes needed
    NoChange,
    /// Resource was created (or an existing one adopted)
    Created,
    /// Resource was updated
    Updated,
    /// Resource was deleted
    Deleted,
    /// Apply failed
    Failed { error: String },
    /// Apply was skipped
    Skipped { reason: String },
}

impl ApplyResult {
    /// Check if the result represents success (no failure)
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// Check if the result represents a change
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Created | Self::Updated | Self::Deleted)
    }
}

/// Summary of execution results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub no_change: usize,
    /// Warnings reported by successful operations
    pub warnings: usize,
}

impl ExecuteSummary {
    /// Total number of actual changes made
    pub fn total_changes(&self) -> usize {
        self.created + self.updated + self.deleted
    }

    /// Check if execution was fully successful (no failures)
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Total number of resources processed
    pub fn total(&self) -> usize {
        self.created + self.updated + self.deleted + self.skipped + self.failed + self.no_change
    }

    /// Merge another summary into this one
    pub fn merge(&mut self, other: &ExecuteSummary) {
        self.created += other.created;
        self.updated += other.updated;
        self.deleted += other.deleted;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.no_change += other.no_change;
        self.warnings += other.warnings;
    }

    /// Add a result to the summary
    pub fn add_result(&mut self, result: &ApplyResult) {
        match result {
            ApplyResult::NoChange => self.no_change += 1,
            ApplyResult::Created => self.created += 1,
            ApplyResult::Updated => self.updated += 1,
            ApplyResult::Deleted => self.deleted += 1,
            ApplyResult::Failed { .. } => self.failed += 1,
            ApplyResult::Skipped { .. } => self.skipped += 1,
        }
    }
}

/// Options for execution
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Don't make changes, just show what would happen
    pub dry_run: bool,
    /// Number of parallel jobs for refresh
    pub jobs: usize,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            jobs: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_add_and_merge() {
        let mut summary = ExecuteSummary::default();
        summary.add_result(&ApplyResult::Created);
        summary.add_result(&ApplyResult::Updated);
        summary.add_result(&ApplyResult::NoChange);
        summary.add_result(&ApplyResult::Failed {
            error: "boom".into(),
        });
        assert_eq!(summary.total_changes(), 2);
        assert_eq!(summary.total(), 4);
        assert!(!summary.is_success());

        let mut other = ExecuteSummary::default();
        other.add_result(&ApplyResult::Deleted);
        other.warnings = 1;
        summary.merge(&other);
        assert_eq!(summary.deleted, 1);
        assert_eq!(summary.warnings, 1);
    }

    #[test]
    fn test_apply_result_flags() {
        assert!(ApplyResult::Deleted.is_change());
        assert!(!ApplyResult::NoChange.is_change());
        assert!(!ApplyResult::Failed { error: String::new() }.is_success());
        assert!(ApplyResult::Skipped { reason: String::new() }.is_success());
    }

    #[test]
    fn test_diagnostic_from_error_chain() {
        let err = anyhow::anyhow!("connection refused").context("failed to create role");
        let diag = Diagnostic::from_error(&err);
        assert!(diag.is_error());
        assert_eq!(diag.summary, "failed to create role");
        assert_eq!(diag.detail, "connection refused");
        assert_eq!(
            diag.to_string(),
            "error: failed to create role: connection refused"
        );
    }

    #[test]
    fn test_warning_display_without_detail() {
        let diag = Diagnostic::warning("name change not persisted", "");
        assert!(!diag.is_error());
        assert_eq!(diag.to_string(), "warning: name change not persisted");
    }
}

//! Core violation types.
//!
//! The analysis pass produces `Violation` values; the reporter consumes them.
//! A violation is immutable once created.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Source code location.
///
/// Lines and columns are 1-based (matching Go's `token.Position`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    /// Line number (1-based).
    pub line: u32,
    /// Column offset (1-based).
    pub column: u32,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One call site whose required argument was not address-taking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Where the offending argument appears.
    pub location: Location,
    /// The raw source line, trimmed.
    pub line: String,
    /// Bare name of the called function/method, for display only.
    pub method: String,
    /// Zero-based index of the offending argument.
    pub argument: usize,
}

impl Violation {
    /// Report order: file, then line, then column, then raw source text.
    /// Total on every pair, so sorted output is stable across runs.
    fn sort_key(&self) -> (&str, u32, u32, &str) {
        (
            &self.location.file,
            self.location.line,
            self.location.column,
            &self.line,
        )
    }
}

impl Ord for Violation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Violation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

//! Shared data models for index construction, queries, and results.
//!
//! `QueryResult` and `ScoredMatch` form the JSON surface emitted by
//! `--format json`; the index-side types stay in-process only.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Schema version for `QueryResult` JSON payloads.
///
/// Follows semver: additive optional fields bump MINOR, changes to
/// existing fields bump MAJOR.
pub const QUERY_RESULT_VERSION: &str = "1.0.0";

/// A single line in a single file, identified by path and 1-based
/// line number.
///
/// The path is reference-counted so that every occurrence on a file
/// shares one allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub path: Arc<Path>,
    pub line: u32,
}

impl Location {
    pub fn new(path: Arc<Path>, line: u32) -> Self {
        Self { path, line }
    }
}

/// One record of a word appearing on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub location: Location,
    /// The line's text with surrounding whitespace stripped.
    pub text: Arc<str>,
}

/// Parsed form of a raw query string.
///
/// - `required` words must all be present on a matching line.
/// - `optional` words only contribute to the score.
/// - every group in `or_groups` needs at least one member present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredQuery {
    pub required: Vec<String>,
    pub optional: Vec<String>,
    pub or_groups: Vec<Vec<String>>,
}

/// A matching line together with its optional-term score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMatch {
    /// File containing the line.
    pub path: PathBuf,
    /// 1-based line number.
    pub line: u32,
    /// Trimmed line text.
    pub text: String,
    /// Number of optional query words found in the line.
    pub score: u32,
}

/// Ranked matches for one query, highest score first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub version: String,
    /// Raw query string as typed.
    pub query: String,
    pub matches: Vec<ScoredMatch>,
    /// Number of matches before any `limit` was applied.
    pub total_matches: u64,
    /// True when `matches` was cut short by a limit.
    pub truncated: bool,
}

/// Configuration for building an in-memory word index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory whose files are indexed recursively.
    pub root: PathBuf,
    /// Inclusion globs applied to candidate files.
    #[serde(default)]
    pub globs: Vec<String>,
    /// Exclusion globs applied to candidate files.
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    /// Honor `.gitignore`, `.ignore`, and hidden-file rules while
    /// walking. When false every regular file under `root` is read.
    #[serde(default)]
    pub respect_ignore: bool,
}

/// A file that was enumerated but contributed nothing to the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Statistics about a completed index build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSummary {
    pub root: PathBuf,
    pub files_indexed: u64,
    /// Distinct words in the index.
    pub words: u64,
    /// Total occurrence records across all words.
    pub occurrences: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
}

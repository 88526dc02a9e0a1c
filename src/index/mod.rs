//! In-memory inverted word index.
//!
//! The index maps each lowercase word to the ordered list of lines it
//! occurs on. It is built once by [`build_index`] and is read-only
//! afterwards; queries borrow it immutably.
//!
//! Alongside the word buckets the index keeps a location→line map so
//! that the evaluator can recover a matched line's text without
//! scanning any particular word's bucket.

pub mod tokenizer;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet};
use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, info, warn};

use crate::models::{IndexConfig, IndexSummary, Location, Occurrence, SkippedFile};

pub use tokenizer::tokenize;

/// Word → occurrences, plus the text of every indexed line.
#[derive(Debug, Default)]
pub struct WordIndex {
    words: HashMap<String, Vec<Occurrence>>,
    lines: HashMap<Location, Arc<str>>,
    occurrences: usize,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `path` and index every line of it.
    ///
    /// Undecodable bytes are replaced rather than rejected. The file is
    /// read completely before anything is inserted, so a read failure
    /// leaves the index untouched. Returns the number of occurrence
    /// records added.
    pub fn add_file(&mut self, path: &Path) -> Result<usize> {
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let contents = String::from_utf8_lossy(&bytes);
        self.add_text(Arc::from(path), &contents)
            .with_context(|| format!("failed to index {}", path.display()))
    }

    /// Index already-loaded file contents under `path`.
    ///
    /// Line numbers start at 1 and restart for every call. Contents with
    /// more lines than a `u32` can number are rejected before anything
    /// is inserted.
    pub fn add_text(&mut self, path: Arc<Path>, contents: &str) -> Result<usize> {
        let numbered = split_lines(contents)
            .enumerate()
            .map(|(idx, raw)| line_number(idx).map(|line| (line, raw)))
            .collect::<Result<Vec<_>>>()?;

        Ok(numbered
            .into_iter()
            .map(|(line, raw)| self.add_line(Location::new(path.clone(), line), raw))
            .sum())
    }

    /// Index a single line. A word repeated on the same line produces
    /// one occurrence record.
    pub fn add_line(&mut self, location: Location, raw: &str) -> usize {
        let text: Arc<str> = Arc::from(raw.trim());
        let mut seen: HashSet<String> = HashSet::new();

        for word in tokenize(raw) {
            if !seen.insert(word.clone()) {
                continue;
            }
            self.words.entry(word).or_default().push(Occurrence {
                location: location.clone(),
                text: text.clone(),
            });
        }

        if !seen.is_empty() {
            self.lines.insert(location, text);
        }

        self.occurrences += seen.len();
        seen.len()
    }

    /// Occurrences of `word` in insertion order (walk order, then line
    /// order). Unknown words yield an empty slice.
    pub fn occurrences(&self, word: &str) -> &[Occurrence] {
        self.words.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Locations where `word` occurs.
    pub fn locations(&self, word: &str) -> impl Iterator<Item = &Location> + '_ {
        self.occurrences(word).iter().map(|occ| &occ.location)
    }

    /// Trimmed text of an indexed line.
    pub fn line_text(&self, location: &Location) -> Option<&str> {
        self.lines.get(location).map(|text| text.as_ref())
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrences
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Walk `config.root` and build a word index from every file found.
///
/// Files that cannot be read are logged, recorded in
/// `IndexSummary::skipped`, and contribute nothing. Only a missing or
/// non-directory root and invalid globs are errors.
pub fn build_index(config: &IndexConfig) -> Result<(WordIndex, IndexSummary)> {
    if !config.root.exists() {
        bail!("index root does not exist: {}", config.root.display());
    }
    if !config.root.is_dir() {
        bail!("index root is not a directory: {}", config.root.display());
    }

    let include_globs = build_globset(&config.globs)?;
    let exclude_globs = build_globset(&config.exclude_globs)?;

    let mut builder = WalkBuilder::new(&config.root);
    builder
        .standard_filters(config.respect_ignore)
        .sort_by_file_name(|a, b| a.cmp(b));
    let walker = builder.build();

    let mut index = WordIndex::new();
    let mut summary = IndexSummary {
        root: config.root.clone(),
        ..IndexSummary::default()
    };

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "failed to read directory entry");
                continue;
            }
        };

        if !is_candidate_file(&entry) {
            continue;
        }

        let path = entry.path();

        if let Some(set) = &include_globs {
            if !set.is_match(path) {
                continue;
            }
        }
        if let Some(set) = &exclude_globs {
            if set.is_match(path) {
                continue;
            }
        }

        match index.add_file(path) {
            Ok(added) => {
                debug!(path = %path.display(), occurrences = added, "indexed file");
                summary.files_indexed += 1;
            }
            Err(err) => {
                warn!(path = %path.display(), "skipping file: {err:#}");
                summary.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: format!("{err:#}"),
                });
            }
        }
    }

    summary.words = index.word_count() as u64;
    summary.occurrences = index.occurrence_count() as u64;

    info!(
        root = %config.root.display(),
        files = summary.files_indexed,
        skipped = summary.skipped.len(),
        words = summary.words,
        occurrences = summary.occurrences,
        "index built"
    );

    Ok((index, summary))
}

/// Split `contents` on `\n`, `\r\n`, or a lone `\r`.
///
/// A terminator at the very end does not start an extra empty line.
fn split_lines(contents: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = Some(contents);
    std::iter::from_fn(move || {
        let current = rest.take().filter(|s| !s.is_empty())?;
        match current.find(['\n', '\r']) {
            Some(pos) => {
                let skip = if current[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[pos + skip..]);
                Some(&current[..pos])
            }
            None => Some(current),
        }
    })
}

/// 1-based line number for the zero-based line `idx`.
fn line_number(idx: usize) -> Result<u32> {
    idx.checked_add(1)
        .and_then(|n| u32::try_from(n).ok())
        .with_context(|| format!("line {idx} exceeds the supported line count"))
}

/// Regular files, plus symlinks that do not resolve to a directory.
///
/// Broken symlinks are kept so that they surface as skipped files.
fn is_candidate_file(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_file() => true,
        Some(ft) if ft.is_symlink() => !entry.path().is_dir(),
        _ => false,
    }
}

pub(crate) fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = globset::GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?);
    }
    Ok(Some(builder.build()?))
}

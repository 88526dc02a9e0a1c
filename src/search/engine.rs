//! Query evaluation against a built [`WordIndex`].
//!
//! Evaluation runs on sets of locations:
//! 1. every required word narrows the candidate set by intersection;
//! 2. every OR-group narrows it by the union of its members;
//! 3. when neither is present, candidates are the union of all
//!    optional-word locations.
//!
//! Surviving locations are scored by how many optional words appear
//! as substrings of the lower-cased line, then ranked.

use std::collections::HashSet;
use std::time::Instant;

use anyhow::Result;
use tracing::debug;

use crate::index::WordIndex;
use crate::models::{
    Location, QueryResult, ScoredMatch, StructuredQuery, QUERY_RESULT_VERSION,
};
use crate::search::query::parse_query;

/// Parse and evaluate a raw query string.
///
/// `limit` caps the number of returned matches after ranking; the
/// summary fields still report the full count.
pub fn run_query(index: &WordIndex, raw: &str, limit: Option<usize>) -> Result<QueryResult> {
    let started = Instant::now();
    let query = parse_query(raw)?;

    let mut matches = evaluate(index, &query);
    let total_matches = matches.len() as u64;

    let mut truncated = false;
    if let Some(limit) = limit {
        if matches.len() > limit {
            matches.truncate(limit);
            truncated = true;
        }
    }

    debug!(
        query = raw,
        total_matches,
        elapsed_us = started.elapsed().as_micros() as u64,
        "query evaluated"
    );

    Ok(QueryResult {
        version: QUERY_RESULT_VERSION.to_string(),
        query: raw.to_string(),
        matches,
        total_matches,
        truncated,
    })
}

/// Resolve a structured query into ranked matches.
///
/// Results are ordered by descending score; ties are broken by path
/// and then line number so output is reproducible.
pub fn evaluate(index: &WordIndex, query: &StructuredQuery) -> Vec<ScoredMatch> {
    let candidates = candidate_locations(index, query);

    let mut matches: Vec<ScoredMatch> = candidates
        .into_iter()
        .filter_map(|location| {
            let text = index.line_text(location)?;
            Some(ScoredMatch {
                path: location.path.to_path_buf(),
                line: location.line,
                text: text.to_string(),
                score: score_line(text, &query.optional),
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.path.cmp(&b.path))
            .then_with(|| a.line.cmp(&b.line))
    });

    matches
}

fn candidate_locations<'a>(index: &'a WordIndex, query: &StructuredQuery) -> HashSet<&'a Location> {
    // `None` means no constraint has been applied yet, which differs
    // from a constraint that matched nothing.
    let mut candidates: Option<HashSet<&'a Location>> = None;

    for word in &query.required {
        narrow(&mut candidates, index.locations(word).collect());
    }

    for group in &query.or_groups {
        let union = group
            .iter()
            .flat_map(|word| index.locations(word))
            .collect();
        narrow(&mut candidates, union);
    }

    candidates.unwrap_or_else(|| {
        query
            .optional
            .iter()
            .flat_map(|word| index.locations(word))
            .collect()
    })
}

fn narrow<'a>(candidates: &mut Option<HashSet<&'a Location>>, found: HashSet<&'a Location>) {
    *candidates = Some(match candidates.take() {
        None => found,
        Some(mut current) => {
            current.retain(|loc| found.contains(loc));
            current
        }
    });
}

/// Count optional words that appear anywhere in the lower-cased line.
///
/// Repeated optional words are counted once per repetition.
fn score_line(text: &str, optional: &[String]) -> u32 {
    let lowered = text.to_lowercase();
    optional
        .iter()
        .filter(|word| lowered.contains(word.as_str()))
        .count() as u32
}

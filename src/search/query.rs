//! Query grammar parsing.
//!
//! A query is split on whitespace and each token is classified:
//! - `+(` opens an OR-group that runs until a token ending in `)`.
//!   The group may fit in one token (`+(cat)`) or span several
//!   (`+(cat dog fish)`).
//! - `+word` is a required term.
//! - anything else is an optional term.
//!
//! All words are lower-cased so they line up with index buckets.

use thiserror::Error;

use crate::models::StructuredQuery;

/// Malformed-query conditions reported by [`parse_query`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Input ended inside an OR-group.
    #[error("unterminated OR-group: `+({}` is missing a closing `)`", .words.join(" "))]
    UnterminatedGroup { words: Vec<String> },
}

enum ParseState {
    TopLevel,
    InGroup(Vec<String>),
}

/// Parse a raw query string into a [`StructuredQuery`].
///
/// Blank input produces an empty query. Empty fragments inside a group
/// (`+( cat )`) are dropped, so `+()` yields an empty group that can
/// never match.
pub fn parse_query(input: &str) -> Result<StructuredQuery, QueryError> {
    let mut query = StructuredQuery::default();
    let mut state = ParseState::TopLevel;

    for token in input.split_whitespace() {
        state = match state {
            ParseState::TopLevel => {
                if let Some(rest) = token.strip_prefix("+(") {
                    let mut group = Vec::new();
                    if push_group_word(rest, &mut group) {
                        query.or_groups.push(group);
                        ParseState::TopLevel
                    } else {
                        ParseState::InGroup(group)
                    }
                } else if let Some(word) = token.strip_prefix('+') {
                    query.required.push(word.to_lowercase());
                    ParseState::TopLevel
                } else {
                    query.optional.push(token.to_lowercase());
                    ParseState::TopLevel
                }
            }
            ParseState::InGroup(mut group) => {
                if push_group_word(token, &mut group) {
                    query.or_groups.push(group);
                    ParseState::TopLevel
                } else {
                    ParseState::InGroup(group)
                }
            }
        };
    }

    match state {
        ParseState::TopLevel => Ok(query),
        ParseState::InGroup(words) => Err(QueryError::UnterminatedGroup { words }),
    }
}

/// Add one group token; returns true when it closes the group.
fn push_group_word(token: &str, group: &mut Vec<String>) -> bool {
    let (word, closes) = match token.strip_suffix(')') {
        Some(word) => (word, true),
        None => (token, false),
    };
    if !word.is_empty() {
        group.push(word.to_lowercase());
    }
    closes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn classifies_required_and_optional_terms() {
        let query = parse_query("+Dog cat FISH").expect("query");
        assert_eq!(query.required, words(&["dog"]));
        assert_eq!(query.optional, words(&["cat", "fish"]));
        assert!(query.or_groups.is_empty());
    }

    #[test]
    fn single_token_group() {
        let query = parse_query("+(Cat)").expect("query");
        assert_eq!(query.or_groups, vec![words(&["cat"])]);
        assert!(query.required.is_empty());
        assert!(query.optional.is_empty());
    }

    #[test]
    fn multi_token_group() {
        let query = parse_query("+(cat DOG fish) bird").expect("query");
        assert_eq!(query.or_groups, vec![words(&["cat", "dog", "fish"])]);
        assert_eq!(query.optional, words(&["bird"]));
    }

    #[test]
    fn multiple_groups_and_required_terms() {
        let query = parse_query("+(a b) +req +(c) opt").expect("query");
        assert_eq!(query.or_groups, vec![words(&["a", "b"]), words(&["c"])]);
        assert_eq!(query.required, words(&["req"]));
        assert_eq!(query.optional, words(&["opt"]));
    }

    #[test]
    fn tokens_inside_a_group_are_taken_literally() {
        let query = parse_query("+(a +b c)").expect("query");
        assert_eq!(query.or_groups, vec![words(&["a", "+b", "c"])]);
        assert!(query.required.is_empty());
    }

    #[test]
    fn detached_parentheses_are_ignored_inside_groups() {
        let query = parse_query("+( cat dog )").expect("query");
        assert_eq!(query.or_groups, vec![words(&["cat", "dog"])]);

        let query = parse_query("+()").expect("query");
        assert_eq!(query.or_groups, vec![Vec::<String>::new()]);
    }

    #[test]
    fn blank_input_is_an_empty_query() {
        let query = parse_query("   ").expect("query");
        assert_eq!(query, StructuredQuery::default());
    }

    #[test]
    fn unterminated_group_is_rejected() {
        let err = parse_query("+dog +(cat fish").expect_err("expected error");
        assert_eq!(
            err,
            QueryError::UnterminatedGroup {
                words: words(&["cat", "fish"])
            }
        );
        assert!(err.to_string().contains("missing a closing"));
    }
}

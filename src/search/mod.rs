//! Query parsing and evaluation.
//!
//! `query` turns a raw query string into a `StructuredQuery`;
//! `engine` resolves it against a `WordIndex` into ranked matches.

pub mod engine;
pub mod query;

pub use engine::{evaluate, run_query};
pub use query::{parse_query, QueryError};

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::models::IndexConfig;

/// Top-level CLI entrypoint for `wordgrep`.
#[derive(Parser, Debug)]
#[command(
    name = "wordgrep",
    about = "Index a directory into an in-memory word index and query it interactively",
    author = "wordgrep developers"
)]
pub struct Cli {
    /// Directory to index recursively.
    #[arg(long = "dir", value_name = "DIR")]
    pub dir: PathBuf,

    /// Inclusion globs applied to candidate files.
    #[arg(long = "glob")]
    pub globs: Vec<String>,

    /// Exclusion globs applied to candidate files.
    #[arg(long = "exclude")]
    pub exclude_globs: Vec<String>,

    /// Honor `.gitignore`/`.ignore` files and skip hidden entries.
    ///
    /// By default every regular file under `--dir` is indexed.
    #[arg(long = "respect-ignore")]
    pub respect_ignore: bool,

    /// Maximum number of matches printed per query.
    #[arg(long = "limit")]
    pub limit: Option<usize>,

    /// Output format for query results (text or json).
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log indexing statistics and query timings to stderr.
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// CLI representation of output format.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn index_config_from_args(args: &Cli) -> Result<IndexConfig> {
    if !args.dir.is_dir() {
        bail!("--dir must name an existing directory; got {}", args.dir.display());
    }

    Ok(IndexConfig {
        root: args.dir.clone(),
        globs: args.globs.clone(),
        exclude_globs: args.exclude_globs.clone(),
        respect_ignore: args.respect_ignore,
    })
}

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::index::build_index;

mod args;
mod config;
mod format;
mod repl;

pub use args::{Cli, OutputFormat};
pub use format::{write_result, NO_MATCHES};
pub use repl::{Session, PROMPT};

use config::{apply_config_defaults, load_cli_config};

/// Entry point for the CLI binary.
///
/// A malformed invocation is handled by clap, which prints usage and
/// exits before anything is indexed.
pub fn run() -> Result<()> {
    let mut cli = Cli::parse();

    init_logging(cli.verbose);

    if let Some(config) = load_cli_config()? {
        apply_config_defaults(&config, &mut cli);
    }

    let index_config = args::index_config_from_args(&cli)?;

    // The handler runs on its own thread while the loop may hold the
    // stdout lock, so it must not write anything itself.
    if let Err(err) = ctrlc::set_handler(|| std::process::exit(0)) {
        warn!(error = %err, "failed to install interrupt handler");
    }

    println!("Building search index...");
    let (index, summary) = build_index(&index_config)
        .with_context(|| format!("failed to index {}", index_config.root.display()))?;
    info!(
        files = summary.files_indexed,
        skipped = summary.skipped.len(),
        words = summary.words,
        "ready"
    );
    println!("Ready for searches!");

    let session = Session {
        index: &index,
        format: cli.format,
        limit: cli.limit,
    };

    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout())
}

/// Install the stderr subscriber: `warn` by default, `info` with
/// `--verbose`, anything via `RUST_LOG`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

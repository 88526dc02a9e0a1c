use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::args::{Cli, OutputFormat};

/// Top-level representation of `.wordgrep/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub index: Option<IndexSection>,

    #[serde(default)]
    pub search: Option<SearchSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexSection {
    #[serde(default)]
    pub globs: Vec<String>,
    #[serde(default, alias = "exclude")]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub respect_ignore: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchSection {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Discover and load a project-local `.wordgrep/config.toml` (or
/// `.wordgrep/wordgrep.toml`) starting from the current working
/// directory and walking up parent directories.
pub fn load_cli_config() -> Result<Option<CliConfig>> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let Some(path) = find_project_config(&cwd) else {
        return Ok(None);
    };

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: CliConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse TOML config at {}", path.display()))?;

    Ok(Some(config))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);

    while let Some(current) = dir {
        let project_dir = current.join(".wordgrep");
        let config_toml = project_dir.join("config.toml");
        if config_toml.is_file() {
            return Some(config_toml);
        }

        let named_toml = project_dir.join("wordgrep.toml");
        if named_toml.is_file() {
            return Some(named_toml);
        }

        dir = current.parent();
    }

    None
}

/// Fill unset command-line options from the project config.
pub fn apply_config_defaults(config: &CliConfig, args: &mut Cli) {
    if let Some(index) = &config.index {
        if args.globs.is_empty() && !index.globs.is_empty() {
            args.globs = index.globs.clone();
        }

        if args.exclude_globs.is_empty() && !index.exclude_globs.is_empty() {
            args.exclude_globs = index.exclude_globs.clone();
        }

        if !args.respect_ignore {
            if let Some(true) = index.respect_ignore {
                args.respect_ignore = true;
            }
        }
    }

    if let Some(search) = &config.search {
        if args.limit.is_none() {
            args.limit = search.limit;
        }

        if matches!(args.format, OutputFormat::Text) {
            if let Some(format) = search.format {
                args.format = format;
            }
        }
    }
}

//! Command-line surface: argument parsing and dispatch.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::config::{settings, AppConfig};
use crate::core::{catalog, CoreError, Scanner};

#[derive(Parser, Debug)]
#[command(
    name = "context-generator",
    version,
    about = "Concatenate the text files of a directory tree into one copy-pastable document",
    long_about = None
)]
pub struct Cli {
    /// Directory (or single file) to scan
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Additional glob pattern to exclude (repeatable)
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Category ID to disable (repeatable, or comma separated)
    #[arg(long = "disable-category", value_name = "ID", value_delimiter = ',')]
    pub disable_category: Vec<String>,

    /// Do not apply the built-in exclusion catalog
    #[arg(long)]
    pub no_defaults: bool,

    /// Show what would be processed and excluded instead of rendering
    #[arg(long)]
    pub dry_run: bool,

    /// Path of the config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List the built-in exclusion categories and patterns
    ListExclusions {
        /// Only list the patterns of this category
        #[arg(long, value_name = "ID", conflicts_with = "patterns_only")]
        category: Option<String>,

        /// Print every pattern on its own line, nothing else
        #[arg(long)]
        patterns_only: bool,
    },
    /// Write a config file holding the default settings
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// The command-line options expressed as a config layer.
    pub fn overrides(&self) -> AppConfig {
        AppConfig {
            exclude_patterns: self.exclude.clone(),
            disabled_categories: self
                .disable_category
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
            no_defaults: self.no_defaults,
        }
    }
}

/// Executes `cli`, writing all regular output to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let result = match &cli.command {
        Some(Commands::ListExclusions {
            category,
            patterns_only,
        }) => list_exclusions(category.as_deref(), *patterns_only, out),
        Some(Commands::InitConfig { force }) => init_config(cli.config.as_deref(), *force, out),
        None => generate(&cli, out),
    };
    out.flush()?;
    result
}

fn generate<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let settings = AppConfig::load(cli.config.as_deref())?.merge(&cli.overrides());
    let scanner = Scanner::new(settings.build_filter()?);

    if cli.dry_run {
        scanner.dry_run(&cli.directory, out)?;
    } else {
        scanner.scan(&cli.directory, out)?;
    }
    Ok(())
}

fn list_exclusions<W: Write>(category: Option<&str>, patterns_only: bool, out: &mut W) -> Result<()> {
    match category {
        Some(id) if catalog::find_category(id).is_none() => {
            return Err(CoreError::InvalidCategories(vec![id.to_string()]).into());
        }
        Some(id) => catalog::write_category_exclusions(out, id)?,
        None if patterns_only => catalog::write_patterns_only(out)?,
        None => catalog::write_exclusions(out)?,
    }
    Ok(())
}

fn init_config<W: Write>(path: Option<&Path>, force: bool, out: &mut W) -> Result<()> {
    let config_path = settings::resolve_config_path(path)?;
    if config_path.exists() && !force {
        bail!(
            "config file {} already exists; use --force to overwrite it",
            config_path.display()
        );
    }

    let written = settings::save_config(&AppConfig::default(), Some(&config_path))?;
    writeln!(out, "Wrote default config to {}", written.display())?;
    Ok(())
}

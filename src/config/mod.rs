//! Configuration management

use crate::types::{BatchError, ChunkMode};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Files per batch folder when neither the CLI nor a config file says otherwise
pub const DEFAULT_MAX: u64 = 100;

/// Command-line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "kopy-batch",
    version,
    about = "Copy a directory tree into numbered batch folders"
)]
pub struct Cli {
    /// Source directory
    #[arg(long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Target directory (batch folders 1, 2, ... are created inside)
    #[arg(long, value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// Max files per batch folder [default: 100]
    #[arg(long, value_name = "N")]
    pub max: Option<u64>,

    /// TOML file providing defaults for any of the flags above
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How the path under each batch folder is derived
    #[arg(long, value_enum, value_name = "MODE")]
    pub chunk_mode: Option<ChunkMode>,

    /// Print where each file would go without copying anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Values read from a `--config` TOML file
///
/// Every key is optional; flags given on the command line win.
///
/// Relative `source` and `target` paths are taken as-is and resolve against
/// the process working directory, not the directory holding the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub max: Option<u64>,
    pub chunk_mode: Option<ChunkMode>,
    pub dry_run: Option<bool>,
}

impl FileConfig {
    /// Load and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self, BatchError> {
        let text = fs::read_to_string(path).map_err(|e| {
            BatchError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::parse(&text)
            .map_err(|msg| BatchError::Config(format!("Invalid config file {:?}: {}", path, msg)))
    }

    /// Parse TOML text
    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

/// Validated configuration for a batch copy run
#[derive(Debug, Clone)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Target directory
    pub target: PathBuf,

    /// Files per batch folder (>= 1 once validated)
    pub max: u64,

    /// Chunk derivation under each batch folder
    pub chunk_mode: ChunkMode,

    /// Dry run (show placements, don't copy)
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            target: PathBuf::new(),
            max: DEFAULT_MAX,
            chunk_mode: ChunkMode::default(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Validate configuration
    ///
    /// Checks run in flag order and stop at the first failure. Nothing on
    /// disk is created or modified.
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.max < 1 {
            return Err(BatchError::Config(
                "--max should be greater than 0".to_string(),
            ));
        }

        if self.source.as_os_str().is_empty() {
            return Err(BatchError::Config(
                "--source should not be empty".to_string(),
            ));
        }

        if self.target.as_os_str().is_empty() {
            return Err(BatchError::Config(
                "--target should not be empty".to_string(),
            ));
        }

        if !self.source.exists() {
            return Err(BatchError::Config(format!(
                "Source path does not exist: {:?}",
                self.source
            )));
        }

        if !self.source.is_dir() {
            return Err(BatchError::Config(format!(
                "Source path is not a directory: {:?}",
                self.source
            )));
        }

        if target_within_source(&self.source, &self.target) {
            return Err(BatchError::Config(format!(
                "Target {:?} must not be the source directory or inside it",
                self.target
            )));
        }

        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = BatchError;

    /// Merge CLI flags over an optional config file, then validate
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let config = Config {
            source: cli.source.or(file.source).unwrap_or_default(),
            target: cli.target.or(file.target).unwrap_or_default(),
            max: cli.max.or(file.max).unwrap_or(DEFAULT_MAX),
            chunk_mode: cli.chunk_mode.or(file.chunk_mode).unwrap_or_default(),
            dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}

/// True when `target` is `source` itself or any path beneath it
///
/// The target may not exist yet, so its longest existing ancestor is
/// canonicalized and the missing tail re-attached.
fn target_within_source(source: &Path, target: &Path) -> bool {
    let Ok(source) = source.canonicalize() else {
        return false;
    };
    resolve_partially(target).starts_with(source)
}

fn resolve_partially(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut tail = Vec::new();

    loop {
        if let Ok(resolved) = existing.canonicalize() {
            return tail.iter().rev().fold(resolved, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => return path.to_path_buf(),
        }
    }
}

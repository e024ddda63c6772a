//! Configuration management
//!
//! Options arrive as `key=value` tokens (`source=/media/card mode=s ext=mp4`).
//! Clap owns `--help`/`--version` and collects the raw tokens; the key/value
//! parsing and validation happen in [`Config::from_tokens`].

use crate::types::{BucketizeError, DateSource, TransferPolicy};
use clap::{CommandFactory, Parser};
use std::path::{Component, PathBuf};
use tracing::info;

const OPTIONS_HELP: &str = "\
OPTIONS (key=value, keys are case-insensitive):
  source=<sourceRoot>   root directory of source, searched recursively
  target=<targetRoot>   root directory of target; files land in
                        targetRoot/yyyy/yyyy-mm-dd[/subDir]
  mode=c                copy and replace if existing
       m                move and skip if existing
       s                copy and skip if existing
  ext=<fileExtension>   only process files whose path ends with this text,
                        without dot (e.g. mp4); empty matches every file
  subdir=<subDir>       static path appended to every generated target path
  date=m|c|a            timestamp propagated after transfer: modified
                        (default), created or accessed";

/// Raw command line
#[derive(Debug, Parser)]
#[command(
    name = "bucketize",
    version,
    about = "Sort files into date-bucketed directories by last-modified date",
    after_help = OPTIONS_HELP
)]
pub struct Cli {
    /// Options as key=value tokens
    // Unknown dashed tokens are kept as values and later ignored like any
    // bare token; `-h`/`--help` and `-V`/`--version` still win.
    #[arg(value_name = "KEY=VALUE", allow_hyphen_values = true)]
    pub options: Vec<String>,
}

/// Immutable configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root scanned for files
    pub source: PathBuf,

    /// Root under which bucket directories are created
    pub target: PathBuf,

    /// Copy/move behavior
    pub policy: TransferPolicy,

    /// Raw path suffix filter; empty matches everything
    pub extension: String,

    /// Relative path appended below every bucket
    pub subdir: Option<PathBuf>,

    /// Timestamp propagated onto transferred files
    pub date_source: DateSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            target: PathBuf::new(),
            policy: TransferPolicy::Skip,
            extension: String::new(),
            subdir: None,
            date_source: DateSource::Modified,
        }
    }
}

impl Config {
    /// Parse `key=value` tokens into a validated configuration.
    ///
    /// Unknown keys and tokens without `=` are ignored. Every missing or
    /// invalid required option is reported in a single
    /// [`BucketizeError::Config`].
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, BucketizeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = None;
        let mut target = None;
        let mut mode = None;
        let mut date = None;
        let mut extension = String::new();
        let mut subdir = None;

        for token in tokens {
            let Some((key, value)) = token.as_ref().split_once('=') else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match key.trim().to_ascii_lowercase().as_str() {
                "source" => source = Some(PathBuf::from(value)),
                "target" => target = Some(PathBuf::from(value)),
                "mode" => mode = Some(value.to_string()),
                "ext" => extension = value.to_string(),
                "subdir" => subdir = normalize_subdir(value),
                "date" => date = Some(value.to_string()),
                _ => {}
            }
        }

        let mut problems = Vec::new();
        if source.is_none() {
            problems.push("source not set".to_string());
        }
        if target.is_none() {
            problems.push("target not set".to_string());
        }
        let policy = match mode.as_deref() {
            None => {
                problems.push("mode not set".to_string());
                None
            }
            Some(value) => {
                let parsed = TransferPolicy::from_mode(value);
                if parsed.is_none() {
                    problems.push(format!("unknown mode '{}' (expected c, m or s)", value));
                }
                parsed
            }
        };
        let date_source = match date.as_deref() {
            None => DateSource::Modified,
            Some(value) => DateSource::from_value(value).unwrap_or_else(|| {
                problems.push(format!("unknown date source '{}' (expected m, c or a)", value));
                DateSource::Modified
            }),
        };

        match (source, target, policy) {
            (Some(source), Some(target), Some(policy)) if problems.is_empty() => Ok(Self {
                source,
                target,
                policy,
                extension,
                subdir,
                date_source,
            }),
            _ => Err(BucketizeError::Config(problems.join("; "))),
        }
    }

    /// Echo the effective options at startup
    pub fn log_options(&self) {
        info!("options:");
        info!("source={}", self.source.display());
        info!("target={}", self.target.display());
        info!("mode={}", self.policy);
        info!("ext={}", self.extension);
        info!(
            "subdir={}",
            self.subdir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        );
        info!("date={}", self.date_source.label());
    }
}

impl TryFrom<Cli> for Config {
    type Error = BucketizeError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        Config::from_tokens(cli.options)
    }
}

/// Full usage text, as printed after a configuration error
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Keep only the normal components so the subdir never escapes its bucket.
fn normalize_subdir(value: &str) -> Option<PathBuf> {
    let cleaned: PathBuf = PathBuf::from(value)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    if cleaned.as_os_str().is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

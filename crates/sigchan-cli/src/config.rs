//! `sigchan.json` loading and merging with command-line flags.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use sigchan_checker::{AnalysisConfig, AnalysisError, QualifiedRef};
use thiserror::Error;
use tracing::debug;

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "sigchan.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid exclude pattern `{pattern}`: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Contents of `sigchan.json`. Every field is optional; unknown fields are
/// rejected so that typos do not silently fall back to defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FileConfig {
    pub registration: Option<QualifiedRef>,
    pub signal_type: Option<QualifiedRef>,
    pub capacity: Option<u64>,
    pub exclude: Vec<String>,
    /// Whether `_test.go` files are checked.
    pub tests: Option<bool>,
}

pub fn parse_config(text: &str, path: &Path) -> Result<FileConfig, ConfigError> {
    serde_json::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text, path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// `sigchan.json` in `cwd`, if there is one.
pub fn find_config(cwd: &Path) -> Option<PathBuf> {
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Effective settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub analysis: AnalysisConfig,
    pub exclude_patterns: Vec<String>,
    pub exclude: GlobSet,
    pub include_tests: bool,
}

impl Settings {
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.is_match(path)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            analysis: AnalysisConfig::default(),
            exclude_patterns: Vec::new(),
            exclude: GlobSet::empty(),
            include_tests: true,
        }
    }
}

/// Merge file settings with flags. Flags win; exclude patterns from both
/// sources apply.
pub fn resolve_settings(args: &CliArgs, file: Option<FileConfig>) -> Result<Settings, ConfigError> {
    let file = file.unwrap_or_default();
    let mut analysis = AnalysisConfig::default();
    let rule = &mut analysis.sigchanyzer;
    if let Some(registration) = file.registration {
        rule.registration = registration;
    }
    if let Some(signal_type) = file.signal_type {
        rule.signal_type = signal_type;
    }
    if let Some(capacity) = file.capacity {
        rule.capacity = capacity;
    }
    analysis.validate()?;

    let mut exclude_patterns = file.exclude;
    exclude_patterns.extend(args.exclude.iter().cloned());
    let exclude = build_globset(&exclude_patterns)?;

    Ok(Settings {
        analysis,
        exclude_patterns,
        exclude,
        include_tests: !args.no_tests && file.tests.unwrap_or(true),
    })
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ConfigError::Glob {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::Glob {
        pattern: patterns.join(", "),
        source,
    })
}

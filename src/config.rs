use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::ReportFormat;
use crate::reliability::TimeUnit;

/// File names probed in the working directory when no `--config` is given.
const CANDIDATES: [&str; 4] = [
    "sentry-reliability.toml",
    "sentry-reliability.json",
    "sentry-reliability.yaml",
    "sentry-reliability.yml",
];

/// Configuration file structure.
///
/// Every field is optional in the file; command line flags take precedence.
/// The auth token only comes from the environment or the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub sentry: SentryConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SentryConfig {
    /// Sentry API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Project slugs to scan; empty scans every visible project
    #[serde(default)]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportConfig {
    /// Report file path; defaults to `result.xlsx` or `result.csv` by format
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Report file format
    #[serde(default)]
    pub format: ReportFormat,

    /// Unit for every reported duration
    #[serde(default)]
    pub unit: TimeUnit,

    /// Compute MTTR only, without fetching events
    #[serde(default)]
    pub skip_events: bool,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            projects: Vec::new(),
        }
    }
}

fn default_base_url() -> String {
    "https://sentry.io/api/".to_string()
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the working directory is
    /// searched for `sentry-reliability.{toml,json,yaml,yml}` in that order,
    /// falling back to defaults when none is present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::discover(Path::new(".")),
        }
    }

    fn discover(dir: &Path) -> Result<Self> {
        for candidate in &CANDIDATES {
            let path = dir.join(candidate);
            if path.exists() {
                log::debug!("Using config file {}", path.display());
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display())),
        }
    }
}

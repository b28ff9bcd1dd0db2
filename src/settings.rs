use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "parser.toml";

/// Where the parser keeps its files and how it talks to the network.
/// Relative paths are resolved against `base_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_dir: PathBuf,
    pub results_dir: PathBuf,
    pub downloads_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub log_file: String,
    pub log_max_bytes: u64,
    pub log_backup_count: usize,
    pub cache_file: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            results_dir: PathBuf::from("results"),
            downloads_dir: PathBuf::from("downloads"),
            logs_dir: PathBuf::from("logs"),
            log_file: "parser.log".to_string(),
            log_max_bytes: 1_000_000,
            log_backup_count: 5,
            cache_file: PathBuf::from("http_cache.sqlite"),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load from `path`, else from `parser.toml` when present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn results_path(&self) -> PathBuf {
        self.base_dir.join(&self.results_dir)
    }

    pub fn downloads_path(&self) -> PathBuf {
        self.base_dir.join(&self.downloads_dir)
    }

    pub fn logs_path(&self) -> PathBuf {
        self.base_dir.join(&self.logs_dir)
    }

    pub fn log_path(&self) -> PathBuf {
        self.logs_path().join(&self.log_file)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.base_dir.join(&self.cache_file)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

//! Configuration management for subgrab.
//!
//! Configuration is read from `~/.config/subgrab/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! Command-line flags override anything read from the file.

mod resolution;

pub use resolution::{AspectRatio, Resolution, ResolutionConfig};

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::http_fetcher::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::lister::DEFAULT_FEED_BASE_URL;
use crate::pipeline::{default_workers, PipelineSettings, DEFAULT_QUEUE_CAPACITY};

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sources (subreddit names) to list
    pub sources: Vec<String>,

    /// Destination folder for downloads
    pub folder: PathBuf,

    /// Whether mature entries may be downloaded
    pub allow_mature: bool,

    /// Base URL the feed URL is built from
    pub feed_base_url: String,

    /// Listing pool size (0 = one per core)
    pub listing_workers: usize,

    /// Download pool size (0 = one per core)
    pub download_workers: usize,

    /// Capacity of each work queue
    pub queue_capacity: usize,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Remove duplicate files once downloads finish
    pub dedup: bool,

    pub resolution: ResolutionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: vec!["wallpapers".to_string(), "WQHD_Wallpaper".to_string()],
            folder: PathBuf::from("/tmp"),
            allow_mature: true,
            feed_base_url: DEFAULT_FEED_BASE_URL.to_string(),
            listing_workers: 0,
            download_workers: 0,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            dedup: true,
            resolution: ResolutionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/subgrab/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("subgrab").join("config.toml"))
    }

    /// The maturity filter is on exactly when mature content is not allowed.
    pub fn filter_mature(&self) -> bool {
        !self.allow_mature
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        let or_default = |n: usize| if n == 0 { default_workers() } else { n };

        PipelineSettings {
            listing_workers: or_default(self.listing_workers),
            download_workers: or_default(self.download_workers),
            queue_capacity: self.queue_capacity.max(1),
            filter_mature: self.filter_mature(),
            dest: self.folder.clone(),
        }
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# subgrab configuration
#
# Every setting can also be given on the command line, which takes precedence.

# Subreddits to fetch images from
sources = ["wallpapers", "WQHD_Wallpaper"]

# Where downloaded images are written
folder = "/tmp"

# Download posts flagged over_18
allow_mature = true

feed_base_url = "https://www.reddit.com"

# Worker pool sizes (0 = one per CPU core)
listing_workers = 0
download_workers = 0

# Capacity of the source and image queues
queue_capacity = 64

# Per-request timeout in seconds
timeout_secs = 10

# Remove files with identical content after downloading
dedup = true

[resolution]
# Remove images smaller than min_width x min_height or with another aspect ratio
enabled = false
min_width = 1920
min_height = 1080
aspect = "16:9"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        let defaults = Config::default();
        assert_eq!(config.sources, defaults.sources);
        assert_eq!(config.folder, PathBuf::from("/tmp"));
        assert!(config.allow_mature);
        assert!(config.dedup);
        assert!(!config.resolution.enabled);
        assert_eq!(config.resolution.aspect, Some(AspectRatio::new(16, 9)));
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
sources = ["EarthPorn"]
allow_mature = false
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.sources, vec!["EarthPorn"]);
        assert!(!config.allow_mature);
        assert_eq!(config.folder, PathBuf::from("/tmp"));
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_filter_mature_is_inverse_of_allow() {
        let mut config = Config::default();
        assert!(!config.filter_mature());
        config.allow_mature = false;
        assert!(config.filter_mature());
        assert!(config.pipeline_settings().filter_mature);
    }

    #[test]
    fn test_zero_workers_uses_core_count() {
        let config = Config {
            listing_workers: 0,
            download_workers: 4,
            queue_capacity: 0,
            ..Default::default()
        };
        let settings = config.pipeline_settings();

        assert_eq!(settings.listing_workers, default_workers());
        assert_eq!(settings.download_workers, 4);
        assert_eq!(settings.queue_capacity, 1);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sources = 3").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_create_default_config_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::create_default_config(&path).unwrap();
        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
    }
}

use bead_pattern::DistanceMetric;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory for uploaded images and rendered diagrams
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Cell size of the rendered diagram in pixels
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,

    /// Distance metric used for palette matching
    #[serde(default)]
    pub metric: MetricConfig,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("storage")
}

fn default_multiplier() -> u32 {
    26
}

/// Serializable name for a [`DistanceMetric`]
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricConfig {
    #[default]
    Euclidean,
    Cmc,
}

impl From<MetricConfig> for DistanceMetric {
    fn from(metric: MetricConfig) -> Self {
        match metric {
            MetricConfig::Euclidean => DistanceMetric::EuclideanLab,
            MetricConfig::Cmc => DistanceMetric::Cmc,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file is missing or malformed.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        bind_addr = %config.bind_addr,
                        storage_dir = %config.storage_dir.display(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Config file path: `BEADLOOM_CONFIG` env var or `config.yaml`.
    pub fn default_path() -> PathBuf {
        std::env::var("BEADLOOM_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.yaml"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            storage_dir: default_storage_dir(),
            multiplier: default_multiplier(),
            metric: MetricConfig::default(),
        }
    }
}

use crate::error::{ConfigError, PipelineError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_PATH_VAR: &str = "COMMENTSCOPE_CONFIG";
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";
pub const DEFAULT_CONFIG_FILE: &str = "commentscope.toml";
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const CSV_FILE_NAME: &str = "comments_with_sentiment.csv";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub export_dir: PathBuf,
    pub useful_threshold: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            user_agent: format!("commentscope/{}", env!("CARGO_PKG_VERSION")),
            export_dir: PathBuf::from("."),
            useful_threshold: crate::DEFAULT_USEFUL_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Reads the config file (if any), overlays the process environment and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => {
                debug!("No configuration file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound { path: path_str.clone() },
            std::io::ErrorKind::PermissionDenied => ConfigError::PermissionDenied {
                path: path_str.clone(),
            },
            _ => ConfigError::InvalidFormat {
                details: format!("{}: {}", path_str, e),
            },
        })?;

        info!("Loaded configuration from {}", path_str);
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Environment values win over file values; blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_VAR).filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = base_url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.api_base_url).map_err(|_| ConfigError::InvalidValue {
            field: "api_base_url".to_string(),
            value: self.api_base_url.clone(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url".to_string(),
                value: self.api_base_url.clone(),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }

        if !self.useful_threshold.is_finite() || !(-1.0..=1.0).contains(&self.useful_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "useful_threshold".to_string(),
                value: self.useful_threshold.to_string(),
            });
        }

        Ok(())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn require_api_key(&self) -> Result<&str, PipelineError> {
        self.api_key().ok_or(PipelineError::MissingCredential)
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(CSV_FILE_NAME)
    }
}

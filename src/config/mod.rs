//! # Config Module
//!
//! Startup configuration, passed explicitly to the components that need it.
//!
//! Values come from an optional TOML file and are then overlaid with the
//! environment keys `ACCESS_KEY_ID`, `SECRET_ACCESS_KEY` and `REGION`.
//!
//! ```toml
//! [credentials]
//! region = "eu-west-1"
//!
//! [comparison]
//! similarity_threshold = 80.0
//! digest = "sha1"
//!
//! [report]
//! directory = "/home/me/reports"
//!
//! [preview]
//! enabled = true
//! max_dimension = 320
//!
//! [ui]
//! submit_pause_ms = 500
//! ```

use crate::core::digest::DigestAlgorithm;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment key for the default access key
pub const ENV_ACCESS_KEY_ID: &str = "ACCESS_KEY_ID";
/// Environment key for the default secret key
pub const ENV_SECRET_ACCESS_KEY: &str = "SECRET_ACCESS_KEY";
/// Environment key for the default region
pub const ENV_REGION: &str = "REGION";
/// Region used when nothing else is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub credentials: CredentialDefaults,
    pub comparison: ComparisonConfig,
    pub report: ReportConfig,
    pub preview: PreviewConfig,
    pub ui: UiConfig,
}

/// Pre-configured credential values
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialDefaults {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: String,
}

impl Default for CredentialDefaults {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl std::fmt::Debug for CredentialDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialDefaults")
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "********"),
            )
            .field("region", &self.region)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Minimum similarity (0-100) for the service to report a match.
    /// `None` leaves the service default in place.
    pub similarity_threshold: Option<f32>,
    pub digest: DigestAlgorithm,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: None,
            digest: DigestAlgorithm::Sha1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub directory: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            directory: dirs::download_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub enabled: bool,
    /// Longest edge of a rendered preview, in pixels
    pub max_dimension: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_dimension: 320,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Cosmetic pause before submitting, in milliseconds
    pub submit_pause_ms: u64,
}

impl AppConfig {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("face-compare")
            .join("config.toml")
    }

    /// Load configuration from the process environment and an optional file.
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Load configuration using a custom environment lookup
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_toml(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    /// Overlay non-blank environment values
    pub fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(access_key) = non_blank(ENV_ACCESS_KEY_ID) {
            self.credentials.access_key_id = Some(access_key);
        }
        if let Some(secret_key) = non_blank(ENV_SECRET_ACCESS_KEY) {
            self.credentials.secret_access_key = Some(secret_key);
        }
        if let Some(region) = non_blank(ENV_REGION) {
            self.credentials.region = region;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(threshold) = self.comparison.similarity_threshold {
            if !(0.0..=100.0).contains(&threshold) {
                return Err(ConfigError::Invalid {
                    field: "comparison.similarity_threshold",
                    reason: format!("must be between 0 and 100, got {}", threshold),
                });
            }
        }

        if self.preview.max_dimension == 0 {
            return Err(ConfigError::Invalid {
                field: "preview.max_dimension",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

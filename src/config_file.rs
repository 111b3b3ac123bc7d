//! Configuration file handling for the backend endpoint and session defaults.
//!
//! Every field has a default, so a partial file (or none at all) is valid.
//! Typed values such as the architecture are enums, so a typo fails at load
//! time instead of producing an empty family list later.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::gateway::DEFAULT_SIZES_PATH;
use crate::logic::cascade::{SessionDefaults, MAX_VOLUME_SIZE, MIN_VOLUME_SIZE};
use crate::types::Architecture;

/// Backend used when neither the config file nor the command line names one
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/";

/// Client configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuicklookConfig {
    // Backend
    pub endpoint: String,
    pub sizes_path: String, // `instance/types` on older deployments
    pub request_timeout_secs: u64,

    // Session defaults
    pub default_region: String,
    pub default_architecture: Architecture,
    pub default_category: String,
    pub default_platform: String,
    pub default_volume_type: String,
    pub default_volume_size: u32,
}

impl Default for QuicklookConfig {
    fn default() -> Self {
        let defaults = SessionDefaults::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            sizes_path: DEFAULT_SIZES_PATH.to_string(),
            request_timeout_secs: 30,
            default_region: defaults.region,
            default_architecture: defaults.architecture,
            default_category: defaults.category,
            default_platform: defaults.platform,
            default_volume_type: defaults.volume_type,
            default_volume_size: defaults.volume_size,
        }
    }
}

impl QuicklookConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            anyhow::bail!("Endpoint must be specified");
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            anyhow::bail!("Endpoint must start with http:// or https://");
        }
        reqwest::Url::parse(endpoint)
            .with_context(|| format!("Endpoint {:?} is not a valid URL", endpoint))?;

        if self.sizes_path.trim().is_empty() {
            anyhow::bail!("Sizes path must be specified");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("Request timeout must be greater than zero");
        }

        if self.default_region.trim().is_empty() {
            anyhow::bail!("Default region must be specified");
        }
        if !(MIN_VOLUME_SIZE..=MAX_VOLUME_SIZE).contains(&self.default_volume_size) {
            anyhow::bail!(
                "Default volume size must be between {} and {} GiB",
                MIN_VOLUME_SIZE,
                MAX_VOLUME_SIZE
            );
        }

        Ok(())
    }

    /// Request timeout for the HTTP gateway
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Initial selections for a new session
    pub fn to_session_defaults(&self) -> SessionDefaults {
        SessionDefaults {
            region: self.default_region.clone(),
            architecture: self.default_architecture,
            category: self.default_category.clone(),
            platform: self.default_platform.clone(),
            volume_type: self.default_volume_type.clone(),
            volume_size: self.default_volume_size,
        }
    }
}

//! # Client Configuration
//!
//! Where the REST backend lives and how the image upload widget is set up.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VITRINE_API_URL=https://shop.example.com/api                       │
//! │     VITRINE_CLOUDINARY_CLOUD_NAME=my-cloud                             │
//! │     VITRINE_CLOUDINARY_PRESET=unsigned-products                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/vitrine-admin/vitrine.toml (Linux)                       │
//! │     ~/Library/Application Support/com.vitrine.admin/vitrine.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:5000/api, no upload credentials                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # vitrine.toml
//! [api]
//! base_url = "https://shop.example.com/api"
//!
//! [upload]
//! cloud_name = "my-cloud"
//! upload_preset = "unsigned-products"
//! max_file_size = 10000000
//! sources = ["local", "url", "camera"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

pub const ENV_API_URL: &str = "VITRINE_API_URL";
pub const ENV_CLOUD_NAME: &str = "VITRINE_CLOUDINARY_CLOUD_NAME";
pub const ENV_UPLOAD_PRESET: &str = "VITRINE_CLOUDINARY_PRESET";

const CONFIG_FILE_NAME: &str = "vitrine.toml";

// =============================================================================
// API Settings
// =============================================================================

/// REST backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every product path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
        }
    }
}

// =============================================================================
// Upload Settings
// =============================================================================

/// Where the upload widget may pick images from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadSource {
    Local,
    Url,
    Camera,
}

impl std::fmt::Display for UploadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadSource::Local => write!(f, "local"),
            UploadSource::Url => write!(f, "url"),
            UploadSource::Camera => write!(f, "camera"),
        }
    }
}

/// Image upload widget settings.
///
/// `cloud_name` and `upload_preset` stay optional here: a missing value is
/// reported when the widget initializes, not when the config loads, so the
/// CRUD screens keep working without upload credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSettings {
    #[serde(default)]
    pub cloud_name: Option<String>,

    #[serde(default)]
    pub upload_preset: Option<String>,

    /// Largest accepted file, in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    #[serde(default = "default_sources")]
    pub sources: Vec<UploadSource>,
}

fn default_max_file_size() -> u64 {
    10_000_000
}

fn default_sources() -> Vec<UploadSource> {
    vec![UploadSource::Local, UploadSource::Url, UploadSource::Camera]
}

impl Default for UploadSettings {
    fn default() -> Self {
        UploadSettings {
            cloud_name: None,
            upload_preset: None,
            max_file_size: default_max_file_size(),
            sources: default_sources(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub upload: UploadSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (vitrine.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        self.base_url()?;

        if self.upload.max_file_size == 0 {
            return Err(ClientError::InvalidConfig(
                "upload.max_file_size must be greater than 0".into(),
            ));
        }

        if self.upload.sources.is_empty() {
            return Err(ClientError::InvalidConfig(
                "upload.sources must list at least one source".into(),
            ));
        }

        Ok(())
    }

    /// Parses `api.base_url`. Only http and https are accepted.
    pub fn base_url(&self) -> ClientResult<Url> {
        let url = Url::parse(&self.api.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::InvalidUrl(format!(
                "API URL must use http:// or https://, got {}://",
                other
            ))),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Empty values are ignored.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(name) = lookup(ENV_CLOUD_NAME) {
            debug!(cloud_name = %name, "Overriding upload cloud name from environment");
            self.upload.cloud_name = Some(name);
        }

        if let Some(preset) = lookup(ENV_UPLOAD_PRESET) {
            debug!("Overriding upload preset from environment");
            self.upload.upload_preset = Some(preset);
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vitrine", "admin")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.upload.max_file_size, 10_000_000);
        assert_eq!(config.upload.sources.len(), 3);
        assert!(config.upload.cloud_name.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let mut config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://file.example.com/api"

            [upload]
            cloud_name = "from-file"
            "#,
        )
        .unwrap();

        let vars = env(&[
            (ENV_API_URL, "https://env.example.com/api"),
            (ENV_UPLOAD_PRESET, "preset-from-env"),
            (ENV_CLOUD_NAME, ""),
        ]);
        config.apply_overrides_from(|key| vars.get(key).cloned());

        assert_eq!(config.api.base_url, "https://env.example.com/api");
        assert_eq!(config.upload.cloud_name.as_deref(), Some("from-file"));
        assert_eq!(config.upload.upload_preset.as_deref(), Some("preset-from-env"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = ClientConfig::default();

        config.api.base_url = "not a url".into();
        assert!(config.validate().unwrap_err().is_config_error());

        config.api.base_url = "ftp://files.example.com".into();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "https://shop.example.com/api".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_upload_limits_validated() {
        let mut config = ClientConfig::default();
        config.upload.max_file_size = 0;
        assert!(config.validate().is_err());

        config.upload.max_file_size = 1;
        config.upload.sources.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_and_save_roundtrip_through_file() {
        let dir = std::env::temp_dir().join(format!("vitrine-config-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE_NAME);

        let mut config = ClientConfig::default();
        config.upload.cloud_name = Some("demo".into());
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("[upload]"));

        let loaded = ClientConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.upload.cloud_name.as_deref(), Some("demo"));
        assert_eq!(loaded.api, config.api);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir()
            .join(format!("vitrine-missing-{}", std::process::id()))
            .join(CONFIG_FILE_NAME);

        let config = ClientConfig::load(Some(path.clone())).unwrap();
        assert_eq!(config.upload.sources, default_sources());
        assert_eq!(config.upload.max_file_size, ClientConfig::default().upload.max_file_size);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = std::env::temp_dir().join(format!("vitrine-invalid-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[api]\nbase_url = \"ftp://shop.example.com\"\n").unwrap();

        let err = ClientConfig::load(Some(path.clone())).unwrap_err();
        assert!(err.is_config_error());

        let fallback = ClientConfig::load_or_default(Some(path));
        assert_eq!(fallback, ClientConfig::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ClientConfig = toml::from_str("[upload]\nupload_preset = \"p\"\n").unwrap();
        assert_eq!(config.api, ApiSettings::default());
        assert_eq!(config.upload.sources, default_sources());
        assert_eq!(config.upload.upload_preset.as_deref(), Some("p"));
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
///
/// Loaded from `config.toml` under the platform config dir. Everything has
/// a working default, so a missing file just means "stock settings".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            // No config file? Use defaults
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("soscout");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Stack Apps request key. Optional - anonymous requests work, a key
    /// just raises the daily quota. Register one at https://stackapps.com
    pub key: Option<String>,

    /// Which Stack Exchange site to browse
    #[serde(default = "default_site")]
    pub site: String,

    /// API base URL (pinned to 2.2, the last version carrying `age`)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_site() -> String {
    "stackoverflow".to_string() // where else would you browse users?
}

fn default_base_url() -> String {
    "https://api.stackexchange.com/2.2".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            site: default_site(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Override for the bookmark file location. Defaults to
    /// `<data_dir>/soscout/bookmarks.json` when unset.
    pub bookmarks_path: Option<PathBuf>,
}

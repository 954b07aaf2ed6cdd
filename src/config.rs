/// Application configuration
///
/// Read once at startup from an optional JSON file in the user's config
/// directory:
/// - Linux: ~/.config/pizza-shop/config.json
/// - macOS: ~/Library/Application Support/pizza-shop/config.json
/// - Windows: %APPDATA%\pizza-shop\config.json
///
/// Every key is optional; missing keys take their defaults.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base url of the recipe resource
    pub api_base_url: String,
    /// How many recipes the initial list fetch asks for
    pub list_limit: u32,
    /// Image given to new recipes created without a picked file
    pub placeholder_image: String,
    /// Tag attached to every created recipe
    pub user_id: u64,
    /// Longest edge of card thumbnails, in pixels
    pub thumbnail_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://dummyjson.com/recipes".to_string(),
            list_limit: 12,
            placeholder_image: "https://placehold.co/600x400?text=New+Pizza".to_string(),
            user_id: 1,
            thumbnail_size: 256,
        }
    }
}

impl Config {
    /// Where the config file is looked up
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("pizza-shop");
        path.push("config.json");
        Some(path)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                info!(path = %path.display(), api = %config.api_base_url, "⚙️ Configuration loaded");
                config
            }
            Err(err) => {
                warn!(error = %err, "Ignoring config file, using defaults");
                Self::default()
            }
        }
    }
}

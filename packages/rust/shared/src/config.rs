//! Application configuration for markdrop.
//!
//! User config lives at `~/.markdrop/markdrop.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MarkdropError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "markdrop.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".markdrop";

// ---------------------------------------------------------------------------
// Config structs (matching markdrop.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// `[server]` section.
    #[serde(default)]
    pub server: ServerConfig,

    /// `[storage]` section.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8000
}

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where documents are stored. A leading `~/` is expanded
    /// against the user's home directory.
    #[serde(default = "default_document_root")]
    pub root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_document_root(),
        }
    }
}

fn default_document_root() -> String {
    "~/.markdrop/documents".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.markdrop/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MarkdropError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.markdrop/markdrop.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MarkdropError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| MarkdropError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| MarkdropError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| MarkdropError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MarkdropError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Expand a leading `~/` against the user's home directory.
/// Any other path is returned unchanged.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir()
                .ok_or_else(|| MarkdropError::config("could not determine home directory"))?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("host"));
        assert!(toml_str.contains("8000"));
        assert!(toml_str.contains("documents"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert_eq!(parsed.server.port, 8000);
        assert_eq!(parsed.storage.root, "~/.markdrop/documents");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[server]
port = 9100

[storage]
root = "/srv/markdrop"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.root, "/srv/markdrop");
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: AppConfig = toml::from_str("").expect("parse empty");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn expand_home_leaves_absolute_paths_alone() {
        assert_eq!(
            expand_home("/srv/markdrop").unwrap(),
            PathBuf::from("/srv/markdrop")
        );
        assert_eq!(expand_home("relative/dir").unwrap(), PathBuf::from("relative/dir"));
    }

    #[test]
    fn expand_home_resolves_tilde() {
        let expanded = expand_home("~/.markdrop/documents").unwrap();
        assert!(expanded.ends_with(".markdrop/documents"));
        assert!(!expanded.starts_with("~"));
    }
}

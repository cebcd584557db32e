//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default HTTP port for ludex-gi
pub const DEFAULT_PORT: u16 = 5730;

/// Default storefront locale (country code / language), matching the
/// catalog's primary audience
pub const DEFAULT_STEAM_COUNTRY: &str = "kr";
pub const DEFAULT_STEAM_LANGUAGE: &str = "koreana";

/// Optional TOML configuration file contents
///
/// All fields are optional; missing fields fall back to environment
/// variables and compiled defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Service root folder (database and media cache live here)
    pub root_folder: Option<String>,
    /// HTTP listen port
    pub port: Option<u16>,
    /// Storefront country code (e.g. "kr", "us")
    pub steam_country: Option<String>,
    /// Storefront language (e.g. "koreana", "english")
    pub steam_language: Option<String>,
}

/// Resolved service settings after applying all configuration tiers
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub root_folder: PathBuf,
    pub port: u16,
    pub steam_country: String,
    pub steam_language: String,
}

impl ServiceSettings {
    /// Resolve settings with priority: CLI argument > environment > TOML
    /// config file > compiled default.
    pub fn resolve(cli_root: Option<&str>, cli_port: Option<u16>) -> Self {
        let toml_config = load_toml_config().unwrap_or_default();

        let root_folder = resolve_root_folder(cli_root, "LUDEX_ROOT_FOLDER", &toml_config);

        let port = cli_port
            .or_else(|| {
                std::env::var("LUDEX_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .or(toml_config.port)
            .unwrap_or(DEFAULT_PORT);

        let steam_country = std::env::var("LUDEX_STEAM_COUNTRY")
            .ok()
            .or(toml_config.steam_country)
            .unwrap_or_else(|| DEFAULT_STEAM_COUNTRY.to_string());

        let steam_language = std::env::var("LUDEX_STEAM_LANGUAGE")
            .ok()
            .or(toml_config.steam_language)
            .unwrap_or_else(|| DEFAULT_STEAM_LANGUAGE.to_string());

        Self {
            root_folder,
            port,
            steam_country,
            steam_language,
        }
    }

    /// Path of the SQLite database inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join("ludex.db")
    }

    /// Path of the media cache directory inside the root folder
    pub fn media_dir(&self) -> PathBuf {
        self.root_folder.join("media")
    }

    /// Create the root folder and media cache directory if missing
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        std::fs::create_dir_all(self.media_dir())?;
        Ok(())
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(root_folder) = &toml_config.root_folder {
        return PathBuf::from(root_folder);
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Load the TOML config file from the platform config directory
fn load_toml_config() -> Result<TomlConfig> {
    let path = config_file_path()?;
    parse_toml_config(&path)
}

/// Parse a TOML config file at an explicit path
pub fn parse_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read config failed: {}", e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse config failed: {}", e)))
}

/// Configuration file path for the platform
///
/// Linux prefers `~/.config/ludex/config.toml`, then `/etc/ludex/config.toml`.
fn config_file_path() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        if let Some(path) = dirs::config_dir().map(|d| d.join("ludex").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/ludex/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        dirs::config_dir()
            .map(|d| d.join("ludex").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("ludex"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/ludex"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("ludex"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/ludex"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("ludex"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\ludex"))
    } else {
        PathBuf::from("./ludex_data")
    }
}

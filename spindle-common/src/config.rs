//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// HTTP port for the collection UI service
pub const UI_PORT: u16 = 5720;

/// HTTP port for the catalog service
pub const CATALOG_PORT: u16 = 5721;

/// Environment variable overriding the catalog service base URL
pub const CATALOG_URL_ENV: &str = "SPINDLE_CATALOG_URL";

/// Environment variable overriding the root folder
pub const ROOT_ENV: &str = "SPINDLE_ROOT";

/// Compiled default catalog base URL (local catalog on its standard port)
pub const DEFAULT_CATALOG_URL: &str = "http://127.0.0.1:5721";

/// Catalog base URL resolution:
/// 1. Environment variable (SPINDLE_CATALOG_URL)
/// 2. Compiled default (local catalog on port 5721)
///
/// Trailing slashes are stripped so the result can be joined with
/// `/api/...` paths directly.
pub fn resolve_catalog_url() -> String {
    let raw = std::env::var(CATALOG_URL_ENV).unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string());
    raw.trim_end_matches('/').to_string()
}

/// Root folder resolution priority order:
/// 1. Environment variable (SPINDLE_ROOT)
/// 2. TOML config file (`root_folder` key)
/// 3. OS-dependent compiled default (fallback)
pub fn resolve_root_folder() -> PathBuf {
    // Priority 1: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV) {
        return PathBuf::from(path);
    }

    // Priority 2: TOML config file
    if let Ok(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 3: OS-dependent compiled default
    default_root_folder()
}

/// Locate the configuration file for the platform
fn find_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/spindle/spindle.toml first, then /etc/spindle/spindle.toml
        let user_config = dirs::config_dir().map(|d| d.join("spindle").join("spindle.toml"));
        let system_config = PathBuf::from("/etc/spindle/spindle.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("spindle").join("spindle.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/spindle (or /var/lib/spindle for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("spindle"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/spindle"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/spindle
        dirs::data_dir()
            .map(|d| d.join("spindle"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/spindle"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\spindle
        dirs::data_local_dir()
            .map(|d| d.join("spindle"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\spindle"))
    } else {
        PathBuf::from("./spindle_data")
    }
}

/// Catalog database file path within the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join("spindle.db")
}

/// Create the root folder if it does not exist (idempotent)
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::AppConfig;

const APP_NAME: &str = "ContextGenerator";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "contextgenerator", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

/// `explicit` if given, otherwise the platform default location.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory")),
    }
}

/// Loads the configuration from `path`, or from the default location.
///
/// A missing file yields the defaults without creating anything. A file that
/// does not parse is reported with a warning and also yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => match get_config_file_path() {
            Some(path) => path,
            None => {
                tracing::debug!("No config directory on this platform, using defaults");
                return Ok(AppConfig::default());
            }
        },
    };

    let config_content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {:?}, using defaults", config_path);
            return Ok(AppConfig::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config file {:?}", config_path))
        }
    };

    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            Ok(AppConfig::default())
        }
    }
}

/// Writes `config` as pretty JSON, creating parent directories. Returns the
/// path written.
pub fn save_config(config: &AppConfig, path: Option<&Path>) -> Result<PathBuf> {
    let config_path = resolve_config_path(path)?;

    if let Some(config_dir) = config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;
            tracing::info!("Created config directory: {:?}", config_dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)
        .with_context(|| format!("Failed to write config file {:?}", config_path))?;
    tracing::info!("Saved config to {:?}", config_path);

    Ok(config_path)
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/com.contextgenerator.ContextGenerator/
// Linux:   ~/.config/contextgenerator/
// Windows: %APPDATA%/contextgenerator/ContextGenerator/config/

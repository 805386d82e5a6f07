#![warn(clippy::all, clippy::pedantic)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use super::Config;

// Default config file path
const CONFIG_FILE_PATH: &str = "config/chick_stack.toml";

// Environment variable that overrides the config location
pub const CONFIG_ENV_VAR: &str = "CHICK_STACK_CONFIG";

// Last modified time of the config file we loaded
static LAST_MODIFIED: once_cell::sync::Lazy<Mutex<Option<SystemTime>>> =
    once_cell::sync::Lazy::new(|| Mutex::new(None));

// Load the configuration from the default location
pub fn load_config_from_file() -> Result<Config, ConfigError> {
    load_config_from_path(&get_config_file_path())
}

// Load the configuration at `config_path`, writing defaults there if it doesn't exist yet
pub fn load_config_from_path(config_path: &Path) -> Result<Config, ConfigError> {
    ensure_parent_dir(config_path)?;

    if !config_path.exists() {
        let default_config = Config::default();
        save_config_to_path(&default_config, config_path)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&contents)?;

    remember_modified(config_path);
    Ok(config.validated())
}

// Reload the default config only if the file changed since it was last read
pub fn load_changed_config() -> Result<Option<Config>, ConfigError> {
    let config_path = get_config_file_path();
    if !config_path.exists() {
        return Ok(None);
    }

    let last_modified = fs::metadata(&config_path)?.modified()?;
    let unchanged = LAST_MODIFIED
        .lock()
        .map(|previous| *previous == Some(last_modified))
        .unwrap_or(false);
    if unchanged {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

pub fn save_config_to_path(config: &Config, config_path: &Path) -> Result<(), ConfigError> {
    ensure_parent_dir(config_path)?;

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(config_path, toml_string)?;

    remember_modified(config_path);
    Ok(())
}

// Get the path to the config file
#[must_use]
pub fn get_config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("chick_stack").join("config.toml")
    } else {
        // Fallback to local directory
        PathBuf::from(CONFIG_FILE_PATH)
    }
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn remember_modified(path: &Path) {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok();
    if let Ok(mut last) = LAST_MODIFIED.lock() {
        *last = modified;
    }
}

// Custom error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}

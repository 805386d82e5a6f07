pub mod loader;
pub mod tuning;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

pub use tuning::{AvatarTuning, TuningConfig};

use crate::game;

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

// Time to wait between checking for config file changes
const CONFIG_CHECK_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tuning: TuningConfig,
    pub player: PlayerConfig,
    pub leaderboard: LeaderboardConfig,
    pub display: DisplayConfig,
    #[serde(skip)]
    last_modified: Option<Instant>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tuning: TuningConfig::default(),
            player: PlayerConfig::default(),
            leaderboard: LeaderboardConfig::default(),
            display: DisplayConfig::default(),
            last_modified: Some(Instant::now()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: game::ANONYMOUS_PLAYER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub top_n: usize,
    // Overrides the platform data directory when set
    pub path: Option<PathBuf>,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            top_n: game::LEADERBOARD_SIZE,
            path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub frame_interval_ms: u64,
    // Upper bound on a single frame's time scale (terminal suspended, laptop asleep...)
    pub max_time_scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            max_time_scale: 4.0,
        }
    }
}

impl DisplayConfig {
    #[must_use]
    pub fn validated(self) -> Self {
        let d = Self::default();
        Self {
            frame_interval_ms: self.frame_interval_ms,
            max_time_scale: tuning::positive(
                "max_time_scale",
                self.max_time_scale,
                d.max_time_scale,
            ),
        }
    }
}

impl Config {
    /// The same config with unusable tuning and display values replaced by defaults
    #[must_use]
    pub fn validated(self) -> Self {
        Self {
            tuning: self.tuning.validated(),
            display: self.display.validated(),
            ..self
        }
    }

    // Snapshot of the current global configuration
    #[must_use]
    pub fn current() -> Self {
        match CONFIG.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    // Check if the config needs to be reloaded and reload if necessary
    pub fn check_and_reload() -> bool {
        let mut reloaded = false;

        // Check if enough time has passed since last check
        let now = Instant::now();
        let should_check = {
            let Ok(config) = CONFIG.read() else {
                return false;
            };
            if let Some(last_modified) = config.last_modified {
                now.duration_since(last_modified) > CONFIG_CHECK_INTERVAL
            } else {
                true
            }
        };

        if should_check {
            match loader::load_changed_config() {
                Ok(Some(new_config)) => {
                    if let Ok(mut config) = CONFIG.write() {
                        *config = new_config;
                        config.last_modified = Some(now);
                        reloaded = true;
                    }
                }
                Ok(None) => {
                    if let Ok(mut config) = CONFIG.write() {
                        config.last_modified = Some(now);
                    }
                }
                Err(e) => log::warn!("Config reload failed, keeping current settings: {e:?}"),
            }
        }

        reloaded
    }

    // Replace the global configuration (used at startup)
    pub fn install(mut config: Config) {
        config.last_modified = Some(Instant::now());
        if let Ok(mut global) = CONFIG.write() {
            *global = config;
        }
    }
}

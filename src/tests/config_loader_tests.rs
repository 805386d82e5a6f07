#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::config::loader::{ConfigError, load_config_from_path, save_config_to_path};
    use crate::config::{Config, TuningConfig};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    // Helper function to create a test config path
    fn create_test_config_path() -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config").join("chick_stack.toml");
        (temp_dir, config_path)
    }

    #[test]
    fn test_load_nonexistent_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        // Loading a non-existent config should create a default one
        let config = load_config_from_path(&config_path).expect("Failed to load default config");
        assert!(config_path.exists(), "Config file should have been created");

        assert_eq!(config.tuning, TuningConfig::default());
        assert_eq!(config.player.name, "Anonymous");
        assert_eq!(config.leaderboard.top_n, 20);
        assert_eq!(config.display.frame_interval_ms, 16);
    }

    #[test]
    fn test_save_and_load_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        let mut config = Config::default();
        config.tuning.base_speed = 5.5;
        config.tuning.avatar.near_threshold = 30.0;
        config.player.name = "Ada".to_string();
        config.leaderboard.path = Some(PathBuf::from("/tmp/scores.toml"));

        save_config_to_path(&config, &config_path).expect("Failed to save config");
        let loaded = load_config_from_path(&config_path).expect("Failed to load config");

        assert!((loaded.tuning.base_speed - 5.5).abs() < f32::EPSILON);
        assert!((loaded.tuning.avatar.near_threshold - 30.0).abs() < f32::EPSILON);
        assert_eq!(loaded.player.name, "Ada");
        assert_eq!(
            loaded.leaderboard.path,
            Some(PathBuf::from("/tmp/scores.toml"))
        );
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(
            &config_path,
            "[tuning]\nspeed_increment = 0.5\n\n[tuning.avatar]\ngravity = 0.8\n",
        )
        .unwrap();

        let config = load_config_from_path(&config_path).expect("Failed to load config");

        assert!((config.tuning.speed_increment - 0.5).abs() < f32::EPSILON);
        assert!((config.tuning.avatar.gravity - 0.8).abs() < f32::EPSILON);
        assert!((config.tuning.base_speed - 4.0).abs() < f32::EPSILON);
        assert_eq!(config.tuning.camera_threshold, 8);
        assert_eq!(config.player.name, "Anonymous");
    }

    #[test]
    fn test_invalid_config() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "[tuning\nbase_speed = ").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_out_of_range_values_fall_back_to_defaults() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(
            &config_path,
            "[tuning]\ntarget_frame_interval_ms = 0.0\nblock_height = 0.0\nbase_speed = 5.0\n\n\
             [tuning.avatar]\ngravity = -1.0\nhalf_width = nan\n\n\
             [display]\nmax_time_scale = -2.0\n",
        )
        .unwrap();

        let config = load_config_from_path(&config_path).expect("Failed to load config");
        let defaults = TuningConfig::default();

        assert!(
            (config.tuning.target_frame_interval_ms - defaults.target_frame_interval_ms).abs()
                < f64::EPSILON
        );
        assert!((config.tuning.block_height - 25.0).abs() < f32::EPSILON);
        assert!((config.tuning.avatar.gravity - 0.4).abs() < f32::EPSILON);
        assert!((config.tuning.avatar.half_width - 8.0).abs() < f32::EPSILON);
        assert!((config.display.max_time_scale - 4.0).abs() < f32::EPSILON);
        // Valid neighbours are kept
        assert!((config.tuning.base_speed - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_validated_tuning_replaces_non_finite_values() {
        let mut tuning = TuningConfig::default();
        tuning.viewport_width = f32::NAN;
        tuning.speed_increment = f32::INFINITY;
        tuning.palette_size = 0;
        tuning.avatar.jump_impulse = f32::NEG_INFINITY;
        tuning.avatar.near_threshold = 30.0;

        let tuning = tuning.validated();

        assert!((tuning.viewport_width - 300.0).abs() < f32::EPSILON);
        assert!((tuning.speed_increment - 0.2).abs() < f32::EPSILON);
        assert_eq!(tuning.palette_size, 8);
        assert!((tuning.avatar.jump_impulse + 12.0).abs() < f32::EPSILON);
        assert!((tuning.avatar.near_threshold - 30.0).abs() < f32::EPSILON);
        assert_eq!(TuningConfig::default().validated(), TuningConfig::default());
    }
}

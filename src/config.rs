//! Enhancer configuration
//!
//! Theme values and the ripple policy, loaded from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "FORM_ENHANCE_CONFIG_PATH";

const DEFAULT_CONFIG_PATH: &str = "./assets/form-enhance.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Config file is empty")]
    EmptyFile,
}

/// What a new focus ripple does to ripples still running on the same control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RipplePolicy {
    /// Remove in-flight ripples first; at most one ripple per control.
    #[default]
    Replace,
    /// Let ripples pile up until each one finishes.
    Stack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    pub color: String,
    pub size_px: f64,
    pub start_opacity: f64,
    pub max_scale: f64,
    pub duration_ms: u64,
    pub policy: RipplePolicy,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            color: "#94B4C1".to_string(),
            size_px: 5.0,
            start_opacity: 0.6,
            max_scale: 15.0,
            duration_ms: 800,
            policy: RipplePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Upward offset of a hovered submit control.
    pub lift_px: f64,
    pub hover_shadow: String,
    pub rest_shadow: String,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            lift_px: 3.0,
            hover_shadow: "0 10px 25px rgba(84, 119, 146, 0.4)".to_string(),
            rest_shadow: "0 4px 6px rgba(84, 119, 146, 0.1)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub height_px: f64,
    pub margin_top_px: f64,
    pub radius_px: f64,
    /// Background before the first keystroke.
    pub idle_color: String,
    pub transition: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            height_px: 3.0,
            margin_top_px: 5.0,
            radius_px: 3.0,
            idle_color: "#94B4C1".to_string(),
            transition: "all 0.3s ease".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    pub ripple: RippleConfig,
    pub button: ButtonConfig,
    pub indicator: IndicatorConfig,
    /// Inline transition given to every text-like control.
    pub field_transition: String,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            ripple: RippleConfig::default(),
            button: ButtonConfig::default(),
            indicator: IndicatorConfig::default(),
            field_transition: "all 0.3s cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
        }
    }
}

/// Returns the config file path.
///
/// Priority:
/// 1. Environment variable `FORM_ENHANCE_CONFIG_PATH`
/// 2. Default path `./assets/form-enhance.json`
pub fn get_config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Loads the configuration from the file named by [`get_config_path`].
///
/// # Errors
///
/// Returns error if the file does not exist, cannot be read, is empty or
/// is not valid JSON. Missing fields take their defaults.
pub fn load_config() -> Result<EnhancerConfig, ConfigError> {
    load_config_from_path(get_config_path())
}

/// Loads the configuration from a specific file path.
pub fn load_config_from_path<P: AsRef<Path>>(path: P) -> Result<EnhancerConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Config load FAILED: FileNotFound {:?}", path);
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Config load FAILED: Empty file {:?}", path);
        return Err(ConfigError::EmptyFile);
    }

    let config: EnhancerConfig = serde_json::from_str(&content)?;

    #[cfg(feature = "tracing")]
    tracing::info!("Config loaded from {:?}", path);

    Ok(config)
}

/// Like [`load_config`], falling back to defaults on any error.
pub fn load_config_or_default() -> EnhancerConfig {
    load_config().unwrap_or_else(|_err| {
        #[cfg(feature = "tracing")]
        tracing::warn!("Using default enhancer config: {}", _err);
        EnhancerConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: This is only for testing purposes in single-threaded test context
        unsafe { std::env::set_var(key, value); }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: This is only for testing purposes in single-threaded test context
        unsafe { std::env::remove_var(key); }
    }

    fn setup_with_tempfile(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "{}", content).expect("Failed to write");
        temp_file
    }

    #[test]
    #[serial]
    fn test_get_config_path_default() {
        remove_env(CONFIG_PATH_ENV);

        let path = get_config_path();
        assert_eq!(path, PathBuf::from("./assets/form-enhance.json"));
    }

    #[test]
    #[serial]
    fn test_get_config_path_from_env() {
        let custom_path = "/custom/path/form-enhance.json";
        set_env(CONFIG_PATH_ENV, custom_path);

        let path = get_config_path();
        assert_eq!(path, PathBuf::from(custom_path));

        remove_env(CONFIG_PATH_ENV);
    }

    #[test]
    #[serial]
    fn test_load_config_file_not_found() {
        set_env(CONFIG_PATH_ENV, "/nonexistent/path/form-enhance.json");

        let result = load_config();
        match result {
            Err(ConfigError::FileNotFound(_)) => {}
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }

        remove_env(CONFIG_PATH_ENV);
    }

    #[test]
    #[serial]
    fn test_load_config_or_default_falls_back() {
        set_env(CONFIG_PATH_ENV, "/nonexistent/path/form-enhance.json");

        assert_eq!(load_config_or_default(), EnhancerConfig::default());

        remove_env(CONFIG_PATH_ENV);
    }

    #[test]
    fn test_load_config_empty_file() {
        let temp_file = setup_with_tempfile("  \n");
        let result = load_config_from_path(temp_file.path());
        assert!(matches!(result, Err(ConfigError::EmptyFile)));
    }

    #[test]
    fn test_load_config_invalid_json() {
        let temp_file = setup_with_tempfile("{ ripple: ");
        let result = load_config_from_path(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    #[serial]
    fn test_load_config_partial_overrides() {
        let temp_file = setup_with_tempfile(
            r##"{ "ripple": { "color": "#ff0000", "policy": "stack" }, "button": { "lift_px": 5 } }"##,
        );
        let path = temp_file.path().to_str().unwrap();
        set_env(CONFIG_PATH_ENV, path);

        let config = load_config().expect("config should load");
        assert_eq!(config.ripple.color, "#ff0000");
        assert_eq!(config.ripple.policy, RipplePolicy::Stack);
        assert_eq!(config.ripple.duration_ms, 800);
        assert_eq!(config.button.lift_px, 5.0);
        assert_eq!(config.indicator, IndicatorConfig::default());

        remove_env(CONFIG_PATH_ENV);
    }

    #[test]
    fn test_default_config_matches_theme() {
        let config = EnhancerConfig::default();
        assert_eq!(config.ripple.policy, RipplePolicy::Replace);
        assert_eq!(config.indicator.idle_color, "#94B4C1");
        assert_eq!(config.field_transition, "all 0.3s cubic-bezier(0.4, 0, 0.2, 1)");
    }
}

//! Controller configuration.
//!
//! Settings can be built in code or loaded from TOML:
//!
//! ```rust
//! use poise::config::ControllerConfig;
//! use poise::core::Easing;
//!
//! let config = ControllerConfig::from_toml_str(r#"
//!     max_history_size = 20
//!
//!     [persistence]
//!     enabled = false
//!
//!     [default_animation]
//!     duration_ms = 150
//!     easing = "ease-out"
//! "#).unwrap();
//!
//! assert_eq!(config.max_history_size, 20);
//! assert!(!config.persistence.enabled);
//! assert_eq!(config.default_animation.easing, Easing::EaseOut);
//! assert_eq!(config.default_animation.delay_ms, 0);
//! ```

use crate::core::{TransitionAnimation, DEFAULT_HISTORY_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for a [`StateController`](crate::machine::StateController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Maximum number of history entries kept (default: 50)
    pub max_history_size: usize,
    /// Persistence settings
    pub persistence: PersistenceConfig,
    /// Animation used when no enabled transition connects two states
    pub default_animation: TransitionAnimation,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_HISTORY_SIZE,
            persistence: PersistenceConfig::default(),
            default_animation: TransitionAnimation::default(),
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// When false, save and load never touch the repository (default: true)
    pub enabled: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ControllerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Configuration with persistence turned off; the controller is purely
    /// in-memory.
    pub fn in_memory() -> Self {
        Self {
            persistence: PersistenceConfig { enabled: false },
            ..Self::default()
        }
    }

    pub fn with_max_history_size(mut self, size: usize) -> Self {
        self.max_history_size = size;
        self
    }

    pub fn with_default_animation(mut self, animation: TransitionAnimation) -> Self {
        self.default_animation = animation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Easing;

    #[test]
    fn default_config() {
        let config = ControllerConfig::default();
        assert_eq!(config.max_history_size, 50);
        assert!(config.persistence.enabled);
        assert_eq!(config.default_animation.duration_ms, 300);
        assert_eq!(config.default_animation.easing, Easing::EaseInOut);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(
            ControllerConfig::from_toml_str("").unwrap(),
            ControllerConfig::default()
        );
    }

    #[test]
    fn toml_serialization() {
        let config = ControllerConfig::in_memory()
            .with_max_history_size(5)
            .with_default_animation(TransitionAnimation::new(90, Easing::Spring).with_delay(10));
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = ControllerConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(matches!(
            ControllerConfig::from_toml_str("max_history_size = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poise.toml");
        std::fs::write(&path, "max_history_size = 3\n").unwrap();

        let config = ControllerConfig::load_from_file(&path).unwrap();
        assert_eq!(config.max_history_size, 3);

        assert!(matches!(
            ControllerConfig::load_from_file(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}

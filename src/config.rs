//=========================================================================
// Configuration
//=========================================================================
//
// Application configuration loaded from TOML.
//
// Layout:
//   [window]      title, width, height
//   [timing]      max_fps
//   [logging]     filter (env_logger syntax)
//   [scene_args]  free-form table passed to the first scene's `init`
//
// Every section and field is optional; missing values take defaults.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::scene::SceneArgs;
use crate::logging::LoggingConfig;

//=== ConfigError =========================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    /// A value parsed but cannot be used (zero fps, empty window).
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

//=== Sections ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Stagehand".to_string(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub max_fps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { max_fps: 60 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Filter in `env_logger` syntax, e.g. `"info,stagehand=debug"`.
    pub filter: Option<String>,
}

//=== AppConfig ===========================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub logging: LoggingSection,
    pub scene_args: SceneArgs,
}

impl AppConfig {
    //--- Loading ----------------------------------------------------------

    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    //--- Saving -----------------------------------------------------------

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    //--- Validation -------------------------------------------------------

    /// Rejects values the display drivers cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.max_fps == 0 {
            return Err(ConfigError::Invalid("timing.max_fps must be positive".to_string()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }

    /// Logger settings derived from the `[logging]` section.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.logging.filter.clone(),
            ..LoggingConfig::default()
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.timing.max_fps, 60);
        assert_eq!(config.window.title, "Stagehand");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [window]
            title = "Demo"

            [timing]
            max_fps = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.timing.max_fps, 30);
        assert_eq!(config.logging.filter, None);
    }

    #[test]
    fn scene_args_are_free_form() {
        let config = AppConfig::from_toml_str(
            r#"
            [scene_args]
            level = 3
            player = "ada"
            "#,
        )
        .unwrap();

        assert_eq!(config.scene_args.get("level"), Some(&toml::Value::Integer(3)));
        assert_eq!(
            config.scene_args.get("player").and_then(|v| v.as_str()),
            Some("ada")
        );
    }

    #[test]
    fn logging_section_feeds_logger_config() {
        let config = AppConfig::from_toml_str("[logging]\nfilter = \"stagehand=debug\"").unwrap();
        assert_eq!(
            config.logging_config().env_filter.as_deref(),
            Some("stagehand=debug")
        );
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml_str("[window"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_fps_is_invalid() {
        assert!(matches!(
            AppConfig::from_toml_str("[timing]\nmax_fps = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            AppConfig::load("/nonexistent/stagehand.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = AppConfig::default();
        config.window.title = "Round".to_string();
        config.scene_args.insert("seed".to_string(), toml::Value::Integer(7));

        let text = config.to_toml_string().unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }
}

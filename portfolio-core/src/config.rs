use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to a file in the cache directory
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Volume applied on every song load, `0.0..=1.0`
    #[serde(default = "default_volume")]
    pub default_volume: f32,
}

const fn default_volume() -> f32 {
    crate::engine::DEFAULT_VOLUME
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_volume: default_volume(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Alternate catalog file; the built-in portfolio is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Name shown under the page title
    #[serde(default = "default_artist_label")]
    pub artist_label: String,
    #[serde(default)]
    pub window: WindowConfig,
}

fn default_artist_label() -> String {
    "justbenzo".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            artist_label: default_artist_label(),
            window: WindowConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
}

const fn default_window_width() -> u32 {
    1280
}

const fn default_window_height() -> u32 {
    820
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl PortfolioConfig {
    /// Get the configuration directory path (~/.config/portfolio/)
    #[must_use]
    pub fn config_dir() -> PathBuf {
        crate::paths::config_dir()
    }

    /// Get the config file path (~/.config/portfolio/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from the default location, writing the template on first run.
    ///
    /// A freshly written template is not an error: the defaults it contains are
    /// returned directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, written, parsed, or validated.
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&config_path, CONFIG_TEMPLATE)?;
            info!("Wrote config template to {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load config from a specific file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] if the file is missing, or an error
    /// if it cannot be parsed or fails validation.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate config text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let volume = self.player.default_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(CoreError::ConfigInvalid {
                message: format!("player.default_volume must be between 0.0 and 1.0, got {volume}"),
            });
        }
        if self.ui.window.width == 0 || self.ui.window.height == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "ui.window width and height must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Template written on first run
pub const CONFIG_TEMPLATE: &str = r#"# Portfolio Configuration
# ~/.config/portfolio/config.toml

[logging]
# Also write logs to <cache dir>/portfolio/portfolio.log
enabled = false

[player]
# Volume applied whenever a new song loads (0.0 - 1.0)
default_volume = 0.8

[catalog]
# Optional: load folders, tracks and videos from a TOML file instead of the
# built-in portfolio
# path = "/home/me/portfolio/catalog.toml"

[ui]
# Name shown under the page title
artist_label = "justbenzo"

[ui.window]
width = 1280
height = 820
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = PortfolioConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        assert!(!config.logging.enabled);
        assert!((config.player.default_volume - 0.8).abs() < f32::EPSILON);
        assert!(config.catalog.path.is_none());
        assert_eq!(config.ui.artist_label, "justbenzo");
        assert_eq!(config.ui.window.width, 1280);
        assert_eq!(config.ui.window.height, 820);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PortfolioConfig::from_toml_str("").unwrap();
        assert!((config.player.default_volume - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.ui.artist_label, "justbenzo");
    }

    #[test]
    fn test_partial_config() {
        let config = PortfolioConfig::from_toml_str(
            r#"
[logging]
enabled = true

[catalog]
path = "/tmp/catalog.toml"
"#,
        )
        .unwrap();
        assert!(config.logging.enabled);
        assert_eq!(config.catalog.path, Some(PathBuf::from("/tmp/catalog.toml")));
        assert_eq!(config.ui.window.width, 1280);
    }

    #[test]
    fn test_rejects_out_of_range_volume() {
        let err = PortfolioConfig::from_toml_str("[player]\ndefault_volume = 1.5\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_rejects_zero_window() {
        let err = PortfolioConfig::from_toml_str("[ui.window]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = PortfolioConfig::from_toml_str("[player\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParseError(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("portfolio-config-test-missing.toml");
        let _ = fs::remove_file(&path);
        let err = PortfolioConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "portfolio-config-test-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[player]\ndefault_volume = 0.5\n").unwrap();
        let config = PortfolioConfig::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert!((config.player.default_volume - 0.5).abs() < f32::EPSILON);
    }
}

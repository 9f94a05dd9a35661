//! Core `Config` struct plus persistence and validation.
//!
//! Covers:
//! - `load` / `save` against the XDG path (`~/.config/xibao/config.yaml`)
//! - `load_from` / `save_to` for explicit paths (atomic write)
//! - `validate` for semantic checks the YAML schema cannot express

use crate::error::ConfigError;
use crate::types::{LayoutConfig, LogLevel, PresetConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the banner generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Fonts
    // ========================================================================
    /// Primary typeface file. Loaded into the font catalog at startup.
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// Primary family name, used when `font_path` is unset or unusable
    #[serde(default = "crate::defaults::font_family")]
    pub font_family: String,

    /// Locale preference order for glyph fallback (e.g. `zh-Hans` before `und`)
    #[serde(default = "crate::defaults::fallback_locales")]
    pub fallback_locales: Vec<String>,

    // ========================================================================
    // Layout
    // ========================================================================
    #[serde(flatten)]
    pub layout: LayoutConfig,

    // ========================================================================
    // Commands & presets
    // ========================================================================
    /// Messages with this many characters or more are rejected
    #[serde(default = "crate::defaults::max_message_chars")]
    pub max_message_chars: usize,

    /// Directory that relative preset backgrounds are resolved against
    #[serde(default = "crate::defaults::assets_dir")]
    pub assets_dir: PathBuf,

    #[serde(default = "crate::defaults::celebratory")]
    pub celebratory: PresetConfig,

    #[serde(default = "crate::defaults::lamenting")]
    pub lamenting: PresetConfig,

    // ========================================================================
    // Runtime
    // ========================================================================
    /// Upper bound on a single render when driven by the async service
    #[serde(default)]
    pub render_timeout_ms: Option<u64>,

    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_path: None,
            font_family: crate::defaults::font_family(),
            fallback_locales: crate::defaults::fallback_locales(),
            layout: LayoutConfig::default(),
            max_message_chars: crate::defaults::max_message_chars(),
            assets_dir: crate::defaults::assets_dir(),
            celebratory: crate::defaults::celebratory(),
            lamenting: crate::defaults::lamenting(),
            render_timeout_ms: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn with_wrap_capacity(mut self, capacity: usize) -> Self {
        self.layout.wrap_capacity = capacity;
        self
    }

    pub fn with_size_range(mut self, min: u32, max: u32) -> Self {
        self.layout.min_font_size = min;
        self.layout.max_font_size = max;
        self
    }

    /// Load configuration from the default path, creating it when missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("xibao")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("xibao")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Resolve a preset background against `assets_dir`.
    pub fn background_path(&self, preset: &PresetConfig) -> PathBuf {
        if preset.background.is_absolute() {
            preset.background.clone()
        } else {
            self.assets_dir.join(&preset.background)
        }
    }

    /// Semantic checks on values that deserialised fine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if layout.wrap_capacity == 0 {
            return Err(ConfigError::Validation(
                "wrap_capacity must be at least 1".to_string(),
            ));
        }
        if layout.min_font_size == 0 {
            return Err(ConfigError::Validation(
                "min_font_size must be at least 1".to_string(),
            ));
        }
        if layout.min_font_size > layout.max_font_size {
            return Err(ConfigError::Validation(format!(
                "min_font_size ({}) exceeds max_font_size ({})",
                layout.min_font_size, layout.max_font_size
            )));
        }
        if !(0.0..0.5).contains(&layout.margin_ratio) {
            return Err(ConfigError::Validation(format!(
                "margin_ratio must be in [0, 0.5), got {}",
                layout.margin_ratio
            )));
        }
        if !(layout.line_height > 0.0 && layout.line_height.is_finite()) {
            return Err(ConfigError::Validation(format!(
                "line_height must be positive, got {}",
                layout.line_height
            )));
        }
        if self.max_message_chars == 0 {
            return Err(ConfigError::Validation(
                "max_message_chars must be at least 1".to_string(),
            ));
        }
        for (name, preset) in [("celebratory", &self.celebratory), ("lamenting", &self.lamenting)] {
            if let Some(stroke) = &preset.stroke
                && !(stroke.width > 0.0 && stroke.width.is_finite())
            {
                return Err(ConfigError::Validation(format!(
                    "{name}.stroke.width must be positive, got {}",
                    stroke.width
                )));
            }
        }
        Ok(())
    }
}

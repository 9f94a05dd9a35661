//! Configuration types and enums.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the renderer picks a font size when the caller gives none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// Binary-search the largest size whose widest line fits the canvas
    #[default]
    Fit,
    /// Size derived from the character count alone (the original chat plugin's rule)
    LengthHeuristic,
}

/// Log level for the log bridge.
///
/// `RUST_LOG` and the `--log-level` CLI flag take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Text layout tunables shared by the wrapper, the size solver and the compositor.
///
/// Flattened into [`crate::Config`], so the keys sit at the top level of the YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Characters per line before the wrapper starts a new one
    #[serde(default = "crate::defaults::wrap_capacity")]
    pub wrap_capacity: usize,

    /// Smallest size the solver may return (pixels)
    #[serde(default = "crate::defaults::min_font_size")]
    pub min_font_size: u32,

    /// Largest size the solver may return (pixels)
    #[serde(default = "crate::defaults::max_font_size")]
    pub max_font_size: u32,

    /// Fraction of the canvas width and height kept free around the text block
    #[serde(default = "crate::defaults::margin_ratio")]
    pub margin_ratio: f32,

    /// Line advance as a multiple of the font size
    #[serde(default = "crate::defaults::line_height")]
    pub line_height: f32,

    /// Downward shift of the centred block, in pixels
    #[serde(default = "crate::defaults::vertical_bias")]
    pub vertical_bias: f32,

    #[serde(default)]
    pub sizing: SizingMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wrap_capacity: crate::defaults::wrap_capacity(),
            min_font_size: crate::defaults::min_font_size(),
            max_font_size: crate::defaults::max_font_size(),
            margin_ratio: crate::defaults::margin_ratio(),
            line_height: crate::defaults::line_height(),
            vertical_bias: crate::defaults::vertical_bias(),
            sizing: SizingMode::default(),
        }
    }
}

/// Outline drawn beneath the fill pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeConfig {
    pub color: Color,
    /// Outline width in pixels, measured outward from the glyph edge
    #[serde(default = "crate::defaults::stroke_width")]
    pub width: f32,
}

/// One banner variant: a background asset and its colour scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetConfig {
    /// Background image, relative to `assets_dir` unless absolute
    pub background: PathBuf,
    pub fill: Color,
    /// `None` suppresses the stroke pass
    #[serde(default)]
    pub stroke: Option<StrokeConfig>,
}

//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on config fields.

use crate::color::Color;
use crate::types::{PresetConfig, StrokeConfig};
use std::path::PathBuf;

// ── Fonts ──────────────────────────────────────────────────────────────────

pub fn font_family() -> String {
    "Source Han Sans SC".to_string()
}

pub fn fallback_locales() -> Vec<String> {
    vec!["zh-Hans".to_string(), "und".to_string()]
}

// ── Layout ─────────────────────────────────────────────────────────────────

pub fn wrap_capacity() -> usize {
    10
}

pub fn min_font_size() -> u32 {
    40
}

pub fn max_font_size() -> u32 {
    250
}

pub fn margin_ratio() -> f32 {
    0.15
}

pub fn line_height() -> f32 {
    1.3
}

pub fn vertical_bias() -> f32 {
    40.0
}

// ── Presets ────────────────────────────────────────────────────────────────

pub fn stroke_width() -> f32 {
    10.0
}

pub fn max_message_chars() -> usize {
    30
}

pub fn assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

pub fn celebratory() -> PresetConfig {
    PresetConfig {
        background: PathBuf::from("xibao_bg.png"),
        fill: Color::RED,
        stroke: Some(StrokeConfig {
            color: Color::YELLOW,
            width: stroke_width(),
        }),
    }
}

pub fn lamenting() -> PresetConfig {
    PresetConfig {
        background: PathBuf::from("beibao_bg.png"),
        fill: Color::BLACK,
        stroke: Some(StrokeConfig {
            color: Color::WHITE,
            width: stroke_width(),
        }),
    }
}

//! Shared integration test helpers for xibao.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{config_with_assets, bundled_catalog};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers is used per file.

#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use std::sync::Arc;
use tempfile::TempDir;
use xibao::Preset;
use xibao_config::Config;
use xibao_fonts::FontCatalog;

pub const BG_WIDTH: u32 = 1200;
pub const BG_HEIGHT: u32 = 900;

/// Plain background in a preset-specific shade.
pub fn background(preset: Preset) -> RgbaImage {
    let rgba = match preset {
        Preset::Celebratory => [230, 30, 30, 255],
        Preset::Lamenting => [120, 120, 120, 255],
    };
    RgbaImage::from_pixel(BG_WIDTH, BG_HEIGHT, Rgba(rgba))
}

/// Creates a temporary assets directory holding both preset backgrounds
/// and returns a `Config` pointing at it.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn config_with_assets() -> (Config, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config::default().with_assets_dir(temp_dir.path());
    for preset in Preset::all() {
        let path = config.background_path(preset.config(&config));
        background(preset)
            .save(&path)
            .expect("Failed to write background");
    }
    (config, temp_dir)
}

/// Catalog holding only the bundled face, independent of installed fonts.
pub fn bundled_catalog() -> Arc<FontCatalog> {
    Arc::new(FontCatalog::bundled())
}

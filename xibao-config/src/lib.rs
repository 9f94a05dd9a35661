//! Configuration system for the xibao banner generator.
//!
//! This crate provides configuration loading, saving, and default values
//! for the renderer and its command front-end. It includes:
//!
//! - Layout tunables (wrap capacity, size range, margins, line height)
//! - The two banner presets (celebratory / lamenting) and their colours
//! - Font selection (primary font file, family, fallback locales)
//! - YAML persistence with atomic writes and typed errors

pub mod color;
pub mod config;
pub mod defaults;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use color::{Color, NamedColor};
pub use config::Config;
pub use error::ConfigError;
pub use types::{LayoutConfig, LogLevel, PresetConfig, SizingMode, StrokeConfig};

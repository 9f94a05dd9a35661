//! Font discovery, glyph fallback and run segmentation for xibao.
//!
//! This crate provides:
//! - A process-wide [`FontCatalog`] over system fonts plus a bundled face
//! - The [`FontProvider`] capability interface with outline and block backends
//! - HarfBuzz-based measurement via rustybuzz with LRU caching
//! - [`GlyphCoverageResolver`], which picks a fallback face per character
//! - [`segment`], which splits a line into runs that each use one font
//!
//! # Architecture
//!
//! The catalog is built once at startup and shared. Each render call wraps
//! it in a [`SwashProvider`], pairs that with a [`FallbackCache`] and asks
//! the resolver which font draws every character of every line.

pub mod catalog;
pub mod handle;
pub mod provider;
pub mod resolver;
pub mod segment;
pub mod text_shaper;

// Re-export main types for convenience
pub use catalog::{EMBEDDED_FAMILY, FALLBACK_FAMILIES, FontCatalog, FontData};
pub use handle::{FontHandle, Run, TypefaceId};
pub use provider::{BlockFace, BlockProvider, DrawPass, FontProvider, Paint, Plot, SwashProvider};
pub use resolver::{FallbackCache, GlyphCoverageResolver};
pub use segment::{measure_runs, segment};
pub use text_shaper::{ShapedGlyph, ShapedRun, TextShaper};

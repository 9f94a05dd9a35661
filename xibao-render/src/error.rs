//! Typed error types for xibao-render.
//!
//! Every variant is fatal for the render call that produced it. Missing
//! glyphs are not errors; they degrade to the notdef handle instead.

use thiserror::Error;

/// Failure of a single render call.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The background image could not be opened or decoded.
    #[error("Background image '{path}' could not be loaded: {source}")]
    AssetMissing {
        /// Path of the background asset.
        path: String,
        /// Underlying decode or I/O error.
        #[source]
        source: image::ImageError,
    },

    /// Neither the configured typeface nor any default face could be loaded.
    #[error("Font load failed: {0}")]
    FontLoad(String),

    /// The composed canvas could not be encoded as PNG.
    #[error("PNG encoding failed: {0}")]
    Encode(#[source] image::ImageError),
}

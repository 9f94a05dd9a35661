//! Background bitmaps.

use std::path::Path;
use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::error::RenderError;

/// A decoded, read-only background.
///
/// Cloning shares the pixels. Drawing always happens on a
/// [`working_copy`](Canvas::working_copy), so concurrent renders against
/// one `Canvas` never see each other's output.
#[derive(Debug, Clone)]
pub struct Canvas {
    background: Arc<RgbaImage>,
}

impl Canvas {
    /// Decode a background image from disk.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        log::info!("Loading background image from: {}", path.display());
        let img = image::open(path)
            .map_err(|e| {
                log::error!("Failed to open background image '{}': {}", path.display(), e);
                RenderError::AssetMissing {
                    path: path.display().to_string(),
                    source: e,
                }
            })?
            .to_rgba8();
        log::info!("Background image loaded: {}x{}", img.width(), img.height());
        Ok(Self::from_image(img))
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            background: Arc::new(image),
        }
    }

    /// Single-colour canvas, for previews without an asset.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    pub fn width(&self) -> u32 {
        self.background.width()
    }

    pub fn height(&self) -> u32 {
        self.background.height()
    }

    pub fn background(&self) -> &RgbaImage {
        &self.background
    }

    /// Private copy to draw on.
    pub fn working_copy(&self) -> RgbaImage {
        (*self.background).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_asset_missing() {
        let err = Canvas::load(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, RenderError::AssetMissing { .. }));
        assert!(err.to_string().contains("/definitely/not/here.png"));
    }

    #[test]
    fn test_working_copy_is_independent() {
        let canvas = Canvas::solid(4, 3, [1, 2, 3, 255]);
        let mut copy = canvas.working_copy();
        copy.put_pixel(0, 0, Rgba([9, 9, 9, 255]));
        assert_eq!(canvas.background().get_pixel(0, 0).0, [1, 2, 3, 255]);
        assert_eq!((canvas.width(), canvas.height()), (4, 3));
    }
}

/// Text shaping module using HarfBuzz via rustybuzz
///
/// Runs are shaped once in font units and scaled to pixels by the caller,
/// so the size solver's repeated measurements of the same line at different
/// sizes hit the cache.
///
/// # Usage
///
/// ```ignore
/// let mut shaper = TextShaper::new();
/// let shaped = shaper.shape_text("Hello", &font_data, typeface);
/// let width_px = shaped.advance_px(48.0);
/// ```
use lru::LruCache;
use rustybuzz::{Face, Feature, GlyphBuffer, UnicodeBuffer};
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;

use crate::catalog::FontData;
use crate::handle::TypefaceId;

/// A single shaped glyph, positions in font units
#[derive(Debug, Clone, Copy)]
pub struct ShapedGlyph {
    /// Glyph ID from the font
    pub glyph_id: u16,

    /// Cluster index (byte offset of the source character)
    pub cluster: u32,

    /// Horizontal advance
    pub x_advance: f32,

    /// Horizontal offset from the pen position
    pub x_offset: f32,

    /// Vertical offset from the baseline
    pub y_offset: f32,
}

/// Result of shaping a text run
#[derive(Debug, Clone)]
pub struct ShapedRun {
    /// The shaped glyphs
    pub glyphs: Vec<ShapedGlyph>,

    /// Total advance in font units
    pub total_advance: f32,

    /// Units per em of the face the run was shaped with
    pub units_per_em: f32,
}

impl ShapedRun {
    /// Scale factor from font units to pixels at `size`.
    pub fn scale(&self, size: f32) -> f32 {
        if self.units_per_em > 0.0 {
            size / self.units_per_em
        } else {
            0.0
        }
    }

    /// Total advance in pixels at `size`.
    pub fn advance_px(&self, size: f32) -> f32 {
        self.total_advance * self.scale(size)
    }
}

/// Cache key for shaped text runs
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct ShapeCacheKey {
    text: String,
    typeface: TypefaceId,
}

/// Text shaper using HarfBuzz via rustybuzz
pub struct TextShaper {
    /// Cache of shaped text runs
    shape_cache: LruCache<ShapeCacheKey, Arc<ShapedRun>>,

    /// Kerning and standard ligatures
    features: Vec<Feature>,
}

impl TextShaper {
    /// Create a new text shaper with default settings
    pub fn new() -> Self {
        Self::with_cache_size(256)
    }

    /// Create a new text shaper with a specific cache size
    pub fn with_cache_size(max_cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(max_cache_size).unwrap_or(NonZeroUsize::MIN);
        let features = ["kern", "liga", "ccmp", "locl"]
            .iter()
            .filter_map(|tag| Feature::from_str(tag).ok())
            .collect();
        Self {
            shape_cache: LruCache::new(capacity),
            features,
        }
    }

    /// Shape a text run using rustybuzz.
    ///
    /// A face that rustybuzz cannot parse yields an empty run.
    pub fn shape_text(&mut self, text: &str, font: &FontData, typeface: TypefaceId) -> Arc<ShapedRun> {
        let cache_key = ShapeCacheKey {
            text: text.to_string(),
            typeface,
        };

        if let Some(cached) = self.shape_cache.get(&cache_key) {
            return Arc::clone(cached);
        }

        let units_per_em = font.units_per_em();
        let face = match Face::from_slice(font.data.as_slice(), font.face_index) {
            Some(face) => face,
            None => {
                log::warn!("rustybuzz could not parse {}, treating run as empty", typeface);
                return Arc::new(ShapedRun {
                    glyphs: vec![],
                    total_advance: 0.0,
                    units_per_em,
                });
            }
        };

        let mut unicode_buffer = UnicodeBuffer::new();
        unicode_buffer.push_str(text);
        unicode_buffer.set_direction(rustybuzz::Direction::LeftToRight);
        unicode_buffer.guess_segment_properties();

        let glyph_buffer = rustybuzz::shape(&face, &self.features, unicode_buffer);
        let glyphs = Self::extract_shaped_glyphs(&glyph_buffer);
        let total_advance = glyphs.iter().map(|g| g.x_advance).sum();

        let shaped_run = Arc::new(ShapedRun {
            glyphs,
            total_advance,
            units_per_em,
        });
        self.shape_cache.put(cache_key, Arc::clone(&shaped_run));
        shaped_run
    }

    /// Extract shaped glyphs from HarfBuzz glyph buffer
    fn extract_shaped_glyphs(buffer: &GlyphBuffer) -> Vec<ShapedGlyph> {
        let glyph_infos = buffer.glyph_infos();
        let glyph_positions = buffer.glyph_positions();

        glyph_infos
            .iter()
            .zip(glyph_positions.iter())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id as u16,
                cluster: info.cluster,
                x_advance: pos.x_advance as f32,
                x_offset: pos.x_offset as f32,
                y_offset: pos.y_offset as f32,
            })
            .collect()
    }

    /// Get the current cache size
    pub fn cache_size(&self) -> usize {
        self.shape_cache.len()
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

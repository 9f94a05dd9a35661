//! Font data types for loaded faces.

use std::sync::Arc;
use swash::{CacheKey, FontRef};

/// Owns the bytes of one face and hands out transient swash `FontRef`s.
///
/// Raw bytes sit in an `Arc` so rustybuzz faces and swash refs can borrow
/// them cheaply while the provider keeps the face alive.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF/TTC)
    pub data: Arc<Vec<u8>>,
    /// Face index within a collection file (0 for single-face fonts)
    pub face_index: u32,
    /// Byte offset to the face's table directory
    offset: u32,
    /// Swash cache key, unique per loaded face
    key: CacheKey,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("data_len", &self.data.len())
            .field("face_index", &self.face_index)
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from bytes using face index 0.
    ///
    /// Returns `None` if the bytes are not a parseable font.
    pub fn new(data: Vec<u8>) -> Option<Self> {
        Self::new_with_index(data, 0)
    }

    /// Create a new FontData from bytes with a specific face index.
    ///
    /// Needed for TrueType Collection (.ttc) files where several faces share
    /// the same data.
    pub fn new_with_index(data: Vec<u8>, face_index: u32) -> Option<Self> {
        let (offset, key) = {
            let font_ref = FontRef::from_index(&data, face_index as usize)?;
            (font_ref.offset, font_ref.key)
        };
        Some(FontData {
            data: Arc::new(data),
            face_index,
            offset,
            key,
        })
    }

    /// Borrow a swash reference to this face.
    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: self.data.as_slice(),
            offset: self.offset,
            key: self.key,
        }
    }

    /// Whether the face maps `ch` to a real glyph.
    pub fn has_glyph(&self, ch: char) -> bool {
        self.font_ref().charmap().map(ch) != 0
    }

    pub fn units_per_em(&self) -> f32 {
        self.font_ref().metrics(&[]).units_per_em as f32
    }

    /// Ascent in pixels at `size`.
    pub fn ascent(&self, size: f32) -> f32 {
        let metrics = self.font_ref().metrics(&[]);
        metrics.ascent * size / metrics.units_per_em as f32
    }
}

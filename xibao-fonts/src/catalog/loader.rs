//! Font loading utilities for catalog and bundled fonts.

use fontdb::{Database, ID};

use super::types::FontData;

/// Embedded DejaVu Sans font (TTF format).
pub(crate) const EMBEDDED_FONT: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");

/// Family name of the embedded face.
pub const EMBEDDED_FAMILY: &str = "DejaVu Sans";

/// Load the embedded DejaVu Sans font directly, bypassing any database.
pub fn load_embedded_font() -> Option<FontData> {
    FontData::new(EMBEDDED_FONT.to_vec())
}

/// Load one face from the font database.
///
/// # Returns
/// `Some(FontData)` if the face source could be read and parsed.
pub fn load_face(db: &Database, id: ID) -> Option<FontData> {
    // Copy the bytes out; memory-mapped sources must not outlive this call.
    // The face index matters for TTC files where faces share one file.
    let (bytes, face_index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    FontData::new_with_index(bytes, face_index)
}

/// Whether a face in the database maps `ch` to a real glyph.
///
/// Reads the face source without keeping it loaded.
pub fn face_has_glyph(db: &Database, id: ID, ch: char) -> bool {
    db.with_face_data(id, |data, index| {
        swash::FontRef::from_index(data, index as usize)
            .map(|font| font.charmap().map(ch) != 0)
            .unwrap_or(false)
    })
    .unwrap_or(false)
}

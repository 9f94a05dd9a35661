//! Synthetic block-glyph backend.
//!
//! Every glyph is a solid rectangle `advance` wide and `ascent` tall sitting
//! on the baseline. Metrics are exact multiples of the pixel size, which
//! makes layout arithmetic predictable without any font files.

use std::ops::RangeInclusive;

use super::{DrawPass, FontProvider, Paint, Plot};
use crate::handle::{FontHandle, TypefaceId};

/// Advance of the missing-glyph box, as a fraction of the size.
const NOTDEF_ADVANCE_RATIO: f32 = 0.5;

/// One synthetic typeface.
#[derive(Debug, Clone)]
pub struct BlockFace {
    pub name: String,
    pub coverage: Vec<RangeInclusive<char>>,
    /// Glyph advance as a fraction of the pixel size
    pub advance_ratio: f32,
}

impl BlockFace {
    pub fn covers(&self, ch: char) -> bool {
        self.coverage.iter().any(|range| range.contains(&ch))
    }
}

/// Provider over a fixed list of [`BlockFace`]s.
///
/// Typeface ids are indices into the face list, in insertion order.
#[derive(Debug, Clone)]
pub struct BlockProvider {
    faces: Vec<BlockFace>,
    /// Ascent as a fraction of the pixel size
    ascent_ratio: f32,
}

impl Default for BlockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockProvider {
    pub fn new() -> Self {
        Self {
            faces: Vec::new(),
            ascent_ratio: 0.8,
        }
    }

    /// Printable ASCII at half-width plus CJK at full width.
    pub fn latin_and_cjk() -> Self {
        Self::new()
            .with_face("Block Latin", vec![' '..='~'], 0.5)
            .with_face(
                "Block CJK",
                vec!['\u{3000}'..='\u{303F}', '\u{4E00}'..='\u{9FFF}', '\u{FF00}'..='\u{FFEF}'],
                1.0,
            )
    }

    pub fn with_face(
        mut self,
        name: impl Into<String>,
        coverage: Vec<RangeInclusive<char>>,
        advance_ratio: f32,
    ) -> Self {
        self.faces.push(BlockFace {
            name: name.into(),
            coverage,
            advance_ratio,
        });
        self
    }

    pub fn typeface(&self, name: &str) -> Option<TypefaceId> {
        self.faces
            .iter()
            .position(|face| face.name == name)
            .map(|idx| TypefaceId::new(idx as u32))
    }

    pub fn face(&self, id: TypefaceId) -> Option<&BlockFace> {
        if id.is_notdef() {
            return None;
        }
        self.faces.get(id.index() as usize)
    }

    fn advance(&self, font: FontHandle) -> f32 {
        let ratio = self
            .face(font.typeface)
            .map(|face| face.advance_ratio)
            .unwrap_or(NOTDEF_ADVANCE_RATIO);
        ratio * font.size as f32
    }
}

impl FontProvider for BlockProvider {
    fn can_render(&self, font: FontHandle, ch: char) -> bool {
        self.face(font.typeface).is_some_and(|face| face.covers(ch))
    }

    fn find_fallback(&self, base: FontHandle, ch: char, _locales: &[String]) -> Option<FontHandle> {
        self.faces
            .iter()
            .enumerate()
            .map(|(idx, face)| (TypefaceId::new(idx as u32), face))
            .find(|(id, face)| *id != base.typeface && face.covers(ch))
            .map(|(id, _)| FontHandle::new(id, base.size))
    }

    fn measure(&self, font: FontHandle, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance(font)
    }

    fn ascent(&self, font: FontHandle) -> f32 {
        self.ascent_ratio * font.size as f32
    }

    fn draw(
        &self,
        font: FontHandle,
        text: &str,
        origin: (f32, f32),
        pass: DrawPass,
        plot: &mut Plot<'_>,
    ) {
        let advance = self.advance(font);
        let ascent = self.ascent(font);
        let grow = match pass {
            DrawPass::Fill => 0.0,
            DrawPass::Stroke { width } => width,
        };

        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = (origin.0 + i as f32 * advance - grow).round() as i32;
            let x1 = (origin.0 + (i + 1) as f32 * advance + grow).round() as i32;
            let y0 = (origin.1 - ascent - grow).round() as i32;
            let y1 = (origin.1 + grow).round() as i32;

            for y in y0..y1 {
                for x in x0..x1 {
                    // Missing glyphs are hollow boxes
                    let edge = x < x0 + 2 || x >= x1 - 2 || y < y0 + 2 || y >= y1 - 2;
                    if font.is_notdef() && !edge && pass == DrawPass::Fill {
                        continue;
                    }
                    plot(x, y, Paint::Mask(255));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typeface_lookup_and_coverage() {
        let provider = BlockProvider::latin_and_cjk();
        let latin = provider.typeface("Block Latin").unwrap();
        let cjk = provider.typeface("Block CJK").unwrap();
        assert_ne!(latin, cjk);
        assert!(provider.can_render(FontHandle::new(latin, 10), 'a'));
        assert!(!provider.can_render(FontHandle::new(latin, 10), '喜'));
        assert!(provider.can_render(FontHandle::new(cjk, 10), '喜'));
    }

    #[test]
    fn test_fallback_skips_base() {
        let provider = BlockProvider::latin_and_cjk();
        let latin = FontHandle::new(TypefaceId::new(0), 30);
        let fallback = provider.find_fallback(latin, '报', &[]).unwrap();
        assert_eq!(fallback, FontHandle::new(TypefaceId::new(1), 30));
        assert!(provider.find_fallback(latin, '😀', &[]).is_none());
    }

    #[test]
    fn test_metrics() {
        let provider = BlockProvider::latin_and_cjk();
        assert_eq!(provider.measure(FontHandle::new(TypefaceId::new(0), 100), "abcd"), 200.0);
        assert_eq!(provider.measure(FontHandle::new(TypefaceId::new(1), 100), "喜报"), 200.0);
        assert_eq!(provider.measure(FontHandle::notdef(100), "😀"), 50.0);
        assert_eq!(provider.ascent(FontHandle::new(TypefaceId::new(0), 100)), 80.0);
    }

    #[test]
    fn test_draw_block_extent() {
        let provider = BlockProvider::latin_and_cjk();
        let font = FontHandle::new(TypefaceId::new(0), 20);
        let mut pixels = Vec::new();
        provider.draw(font, "a b", (0.0, 16.0), DrawPass::Fill, &mut |x, y, _| pixels.push((x, y)));

        // Two 10x16 blocks, the space is skipped
        assert_eq!(pixels.len(), 2 * 10 * 16);
        assert!(pixels.iter().all(|&(_, y)| (0..16).contains(&y)));
        assert!(!pixels.iter().any(|&(x, _)| (10..20).contains(&x)));
    }

    #[test]
    fn test_stroke_grows_block() {
        let provider = BlockProvider::latin_and_cjk();
        let font = FontHandle::new(TypefaceId::new(0), 20);
        let mut count = 0;
        provider.draw(
            font,
            "a",
            (10.0, 26.0),
            DrawPass::Stroke { width: 2.0 },
            &mut |_, _, _| count += 1,
        );
        assert_eq!(count, 14 * 20);
    }
}

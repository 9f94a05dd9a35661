//! Outline backend: fontdb faces, rustybuzz shaping, swash rasterisation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::{Cap, Format, Join, Stroke, Style, Vector};

use super::{DrawPass, FontProvider, Paint, Plot};
use crate::catalog::{FontCatalog, FontData};
use crate::handle::{FontHandle, TypefaceId};
use crate::text_shaper::TextShaper;

/// Glyph drawn for characters no face covers.
const NOTDEF_GLYPH: u16 = 0;

/// A positioned glyph in pixels, relative to the run origin.
struct PlacedGlyph {
    id: u16,
    x: f32,
    y: f32,
}

/// Provider backed by the process-wide [`FontCatalog`].
///
/// Create one per render call. Faces are loaded on first use and kept for
/// the lifetime of the provider.
///
/// Colour bitmap and colour outline glyphs are plotted as [`Paint::Color`]
/// and keep their own colours; the stroke pass uses outlines only.
pub struct SwashProvider {
    catalog: Arc<FontCatalog>,
    base: TypefaceId,
    faces: RwLock<HashMap<TypefaceId, Option<FontData>>>,
    /// Catalog search result per (from, char); independent of size
    covering: RwLock<HashMap<(TypefaceId, char), Option<TypefaceId>>>,
    shaper: Mutex<TextShaper>,
    scale_context: Mutex<ScaleContext>,
}

impl SwashProvider {
    /// Create a provider whose notdef glyph comes from `base`.
    ///
    /// The base face is loaded eagerly; `None` means it could not be read
    /// or parsed.
    pub fn new(catalog: Arc<FontCatalog>, base: TypefaceId) -> Option<Self> {
        let base_face = catalog.load(base)?;
        log::debug!(
            "SwashProvider base face {} ({})",
            base,
            catalog.family_name(base).unwrap_or("?")
        );

        let mut faces = HashMap::new();
        faces.insert(base, Some(base_face));

        Some(Self {
            catalog,
            base,
            faces: RwLock::new(faces),
            covering: RwLock::new(HashMap::new()),
            shaper: Mutex::new(TextShaper::new()),
            scale_context: Mutex::new(ScaleContext::new()),
        })
    }

    pub fn catalog(&self) -> &Arc<FontCatalog> {
        &self.catalog
    }

    pub fn base(&self) -> TypefaceId {
        self.base
    }

    /// Loaded face for `id`; notdef resolves to the base face.
    fn face(&self, id: TypefaceId) -> Option<FontData> {
        let id = if id.is_notdef() { self.base } else { id };

        if let Some(entry) = self.faces.read().get(&id) {
            return entry.clone();
        }

        let loaded = self.catalog.load(id);
        if loaded.is_none() {
            log::warn!("Failed to load {} from the font catalog", id);
        }
        self.faces.write().entry(id).or_insert(loaded).clone()
    }

    /// Shape `text` and return pixel positions relative to the run origin.
    fn layout(&self, font: FontHandle, face: &FontData, text: &str) -> (Vec<PlacedGlyph>, f32) {
        let size = font.size as f32;

        if font.is_notdef() {
            let advance = face
                .font_ref()
                .glyph_metrics(&[])
                .scale(size)
                .advance_width(NOTDEF_GLYPH);
            let glyphs = (0..text.chars().count())
                .map(|i| PlacedGlyph {
                    id: NOTDEF_GLYPH,
                    x: i as f32 * advance,
                    y: 0.0,
                })
                .collect::<Vec<_>>();
            let width = glyphs.len() as f32 * advance;
            return (glyphs, width);
        }

        let shaped = self.shaper.lock().shape_text(text, face, font.typeface);
        let scale = shaped.scale(size);
        let mut pen = 0.0;
        let mut glyphs = Vec::with_capacity(shaped.glyphs.len());
        for glyph in &shaped.glyphs {
            glyphs.push(PlacedGlyph {
                id: glyph.glyph_id,
                x: pen + glyph.x_offset * scale,
                y: -glyph.y_offset * scale,
            });
            pen += glyph.x_advance * scale;
        }
        (glyphs, pen)
    }

    fn rasterize(&self, face: &FontData, size: f32, glyph: u16, fract_x: f32, pass: DrawPass) -> Option<Image> {
        let mut context = self.scale_context.lock();
        let mut scaler = context
            .builder(face.font_ref())
            .size(size)
            .hint(false)
            .build();

        match pass {
            DrawPass::Fill => Render::new(&[
                Source::ColorBitmap(StrikeWith::BestFit),
                Source::ColorOutline(0),
                Source::Outline,
            ])
            .format(Format::Alpha)
            .offset(Vector::new(fract_x, 0.0))
            .render(&mut scaler, glyph),
            DrawPass::Stroke { width } => {
                // zeno centres the stroke on the outline
                let mut stroke = Stroke::new(2.0 * width);
                stroke.join(Join::Round).cap(Cap::Round);
                Render::new(&[Source::Outline])
                    .format(Format::Alpha)
                    .offset(Vector::new(fract_x, 0.0))
                    .style(Style::Stroke(stroke))
                    .render(&mut scaler, glyph)
            }
        }
    }
}

impl FontProvider for SwashProvider {
    fn can_render(&self, font: FontHandle, ch: char) -> bool {
        if font.is_notdef() {
            return false;
        }
        self.face(font.typeface)
            .map(|face| face.has_glyph(ch))
            .unwrap_or(false)
    }

    fn find_fallback(&self, base: FontHandle, ch: char, locales: &[String]) -> Option<FontHandle> {
        let from = if base.is_notdef() { self.base } else { base.typeface };
        let cached = self.covering.read().get(&(from, ch)).copied();
        let found = match cached {
            Some(found) => found,
            None => {
                let found = self.catalog.find_covering(ch, from, locales);
                *self.covering.write().entry((from, ch)).or_insert(found)
            }
        };
        found.map(|id| FontHandle::new(id, base.size))
    }

    fn measure(&self, font: FontHandle, text: &str) -> f32 {
        match self.face(font.typeface) {
            Some(face) => self.layout(font, &face, text).1,
            None => 0.0,
        }
    }

    fn ascent(&self, font: FontHandle) -> f32 {
        self.face(font.typeface)
            .map(|face| face.ascent(font.size as f32))
            .unwrap_or(font.size as f32)
    }

    fn draw(
        &self,
        font: FontHandle,
        text: &str,
        origin: (f32, f32),
        pass: DrawPass,
        plot: &mut Plot<'_>,
    ) {
        let Some(face) = self.face(font.typeface) else {
            return;
        };
        let size = font.size as f32;
        let (glyphs, _) = self.layout(font, &face, text);

        for glyph in glyphs {
            let x = origin.0 + glyph.x;
            let fract_x = x - x.floor();
            let Some(image) = self.rasterize(&face, size, glyph.id, fract_x, pass) else {
                continue;
            };

            let left = x.floor() as i32 + image.placement.left;
            let top = (origin.1 + glyph.y).round() as i32 - image.placement.top;
            let width = image.placement.width as usize;

            for row in 0..image.placement.height as usize {
                for col in 0..width {
                    let texel = row * width + col;
                    let paint = match image.content {
                        Content::Mask => Paint::Mask(image.data[texel]),
                        Content::Color => {
                            let idx = texel * 4;
                            let mut rgba = [0u8; 4];
                            rgba.copy_from_slice(&image.data[idx..idx + 4]);
                            Paint::Color(rgba)
                        }
                        Content::SubpixelMask => Paint::Mask(image.data[texel * 4 + 3]),
                    };
                    if paint.alpha() > 0 {
                        plot(left + col as i32, top + row as i32, paint);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SwashProvider {
        let catalog = Arc::new(FontCatalog::bundled());
        let base = catalog.default_typeface().unwrap();
        SwashProvider::new(catalog, base).unwrap()
    }

    #[test]
    fn test_empty_catalog_has_no_provider() {
        let catalog = Arc::new(FontCatalog::empty());
        assert!(SwashProvider::new(catalog, TypefaceId::new(0)).is_none());
    }

    #[test]
    fn test_coverage() {
        let provider = provider();
        let base = FontHandle::new(provider.base(), 48);
        assert!(provider.can_render(base, 'x'));
        assert!(!provider.can_render(base, '中'));
        assert!(!provider.can_render(FontHandle::notdef(48), 'x'));
    }

    #[test]
    fn test_fallback_search_runs_once_per_character() {
        let provider = provider();
        let first = provider.find_fallback(FontHandle::new(provider.base(), 40), '😀', &[]);
        for size in [60, 90, 200] {
            let again = provider.find_fallback(FontHandle::new(provider.base(), size), '😀', &[]);
            assert_eq!(again.map(|f| f.typeface), first.map(|f| f.typeface));
            assert_eq!(again.map(|f| f.size), first.map(|_| size));
        }
        assert_eq!(provider.covering.read().len(), 1);
    }

    #[test]
    fn test_measure_grows_with_size() {
        let provider = provider();
        let small = provider.measure(FontHandle::new(provider.base(), 40), "Hello");
        let large = provider.measure(FontHandle::new(provider.base(), 80), "Hello");
        assert!(small > 0.0);
        assert!((large - 2.0 * small).abs() < 0.5);
    }

    #[test]
    fn test_notdef_measures_per_character() {
        let provider = provider();
        let one = provider.measure(FontHandle::notdef(50), "中");
        let three = provider.measure(FontHandle::notdef(50), "中文字");
        assert!(one > 0.0);
        assert!((three - 3.0 * one).abs() < 0.01);
    }

    #[test]
    fn test_fill_and_stroke_plot_pixels() {
        let provider = provider();
        let font = FontHandle::new(provider.base(), 64);
        let baseline = provider.ascent(font);

        let mut fill = Vec::new();
        provider.draw(font, "H", (10.0, baseline), DrawPass::Fill, &mut |x, y, c| {
            fill.push((x, y, c))
        });
        let mut stroke = Vec::new();
        provider.draw(
            font,
            "H",
            (10.0, baseline),
            DrawPass::Stroke { width: 4.0 },
            &mut |x, y, c| stroke.push((x, y, c)),
        );

        assert!(!fill.is_empty());
        assert!(stroke.len() > fill.len());
        let min_x = fill.iter().map(|p| p.0).min().unwrap();
        let stroke_min_x = stroke.iter().map(|p| p.0).min().unwrap();
        assert!(stroke_min_x < min_x);
    }
}

//! Render entry points.
//!
//! [`Pipeline`] runs wrap → size → segment → draw → encode against any
//! [`FontProvider`]. [`Renderer`] owns the process-wide catalog and builds
//! a [`SwashProvider`] for each call.

use std::sync::Arc;

use xibao_config::{Config, LayoutConfig, SizingMode};
use xibao_fonts::{FallbackCache, FontCatalog, FontProvider, GlyphCoverageResolver, SwashProvider, TypefaceId};

use crate::canvas::Canvas;
use crate::compositor::{Compositor, LayoutPlan, TextStyle};
use crate::error::RenderError;
use crate::solver::{FontSizeSolver, legacy_font_size};
use crate::wrap::wrap;

/// One render call's view of a provider and its settings.
pub struct Pipeline<'a, P: FontProvider + ?Sized> {
    provider: &'a P,
    base: TypefaceId,
    layout: &'a LayoutConfig,
    cache: &'a FallbackCache,
    locales: &'a [String],
}

impl<'a, P: FontProvider + ?Sized> Pipeline<'a, P> {
    pub fn new(
        provider: &'a P,
        base: TypefaceId,
        layout: &'a LayoutConfig,
        cache: &'a FallbackCache,
        locales: &'a [String],
    ) -> Self {
        Self {
            provider,
            base,
            layout,
            cache,
            locales,
        }
    }

    fn resolver(&self) -> GlyphCoverageResolver<'a, P> {
        GlyphCoverageResolver::new(self.provider, self.cache, self.locales)
    }

    /// Font size for `lines` when the caller gives none.
    pub fn choose_size(&self, width: u32, height: u32, text: &str, lines: &[&str]) -> u32 {
        match self.layout.sizing {
            SizingMode::Fit => {
                FontSizeSolver::new(width, height, self.layout).solve(lines, self.base, &self.resolver())
            }
            SizingMode::LengthHeuristic => legacy_font_size(
                text.chars().count(),
                self.layout.min_font_size,
                self.layout.max_font_size,
            ),
        }
    }

    /// Wrapped lines of `text` and the size to draw them at.
    fn size_lines<'t>(
        &self,
        width: u32,
        height: u32,
        text: &'t str,
        explicit_size: Option<u32>,
    ) -> (Vec<&'t str>, u32) {
        let lines = wrap(text, self.layout.wrap_capacity);
        let size = match explicit_size {
            Some(size) => size.max(1),
            None => self.choose_size(width, height, text, &lines),
        };
        log::debug!(
            "Layout: {} char(s), {} line(s), size {}",
            text.chars().count(),
            lines.len(),
            size
        );
        (lines, size)
    }

    /// Wrap, size and lay out `text` on a `width` x `height` canvas.
    pub fn plan(&self, width: u32, height: u32, text: &str, explicit_size: Option<u32>) -> LayoutPlan {
        let (lines, size) = self.size_lines(width, height, text, explicit_size);
        Compositor::new(self.layout).layout(width, height, &lines, size, self.base, &self.resolver())
    }

    /// Full render to PNG bytes.
    pub fn render(
        &self,
        canvas: &Canvas,
        text: &str,
        style: &TextStyle,
        explicit_size: Option<u32>,
    ) -> Result<Vec<u8>, RenderError> {
        let (lines, size) = self.size_lines(canvas.width(), canvas.height(), text, explicit_size);
        Compositor::new(self.layout).render(canvas, &lines, size, self.base, style, &self.resolver())
    }
}

/// Renders against the process-wide font catalog.
///
/// Cheap to clone; the catalog and fallback cache are shared.
#[derive(Clone)]
pub struct Renderer {
    catalog: Arc<FontCatalog>,
    base: TypefaceId,
    layout: LayoutConfig,
    locales: Vec<String>,
    cache: Arc<FallbackCache>,
}

impl Renderer {
    /// Resolve the configured primary typeface in `catalog`.
    ///
    /// Tries `font_path`, then `font_family`, then the catalog default.
    pub fn new(catalog: Arc<FontCatalog>, config: &Config) -> Result<Self, RenderError> {
        let base = resolve_base_typeface(&catalog, config)?;
        Ok(Self {
            catalog,
            base,
            layout: config.layout.clone(),
            locales: config.fallback_locales.clone(),
            cache: Arc::new(FallbackCache::new()),
        })
    }

    pub fn catalog(&self) -> &Arc<FontCatalog> {
        &self.catalog
    }

    pub fn base_typeface(&self) -> TypefaceId {
        self.base
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn cache(&self) -> &Arc<FallbackCache> {
        &self.cache
    }

    /// Load the faces for one call.
    ///
    /// A base face that fails to load falls back once to the catalog
    /// default; if that fails too the call fails.
    pub fn provider(&self) -> Result<SwashProvider, RenderError> {
        if let Some(provider) = SwashProvider::new(Arc::clone(&self.catalog), self.base) {
            return Ok(provider);
        }
        log::warn!("Primary typeface {} failed to load, trying the default", self.base);

        let fallback = self
            .catalog
            .default_typeface()
            .filter(|id| *id != self.base)
            .ok_or_else(|| RenderError::FontLoad(format!("{} could not be loaded", self.base)))?;
        SwashProvider::new(Arc::clone(&self.catalog), fallback).ok_or_else(|| {
            RenderError::FontLoad(format!(
                "{} and default {} could not be loaded",
                self.base, fallback
            ))
        })
    }

    /// Layout only, for diagnostics.
    pub fn plan(&self, width: u32, height: u32, text: &str, explicit_size: Option<u32>) -> Result<LayoutPlan, RenderError> {
        let provider = self.provider()?;
        let pipeline = Pipeline::new(&provider, provider.base(), &self.layout, &self.cache, &self.locales);
        Ok(pipeline.plan(width, height, text, explicit_size))
    }

    /// Draw `text` on `canvas` and return PNG bytes.
    pub fn render(
        &self,
        canvas: &Canvas,
        text: &str,
        style: &TextStyle,
        explicit_size: Option<u32>,
    ) -> Result<Vec<u8>, RenderError> {
        let provider = self.provider()?;
        let pipeline = Pipeline::new(&provider, provider.base(), &self.layout, &self.cache, &self.locales);
        pipeline.render(canvas, text, style, explicit_size)
    }
}

/// Primary typeface: configured file, configured family, then catalog default.
pub fn resolve_base_typeface(catalog: &FontCatalog, config: &Config) -> Result<TypefaceId, RenderError> {
    if let Some(path) = &config.font_path {
        match catalog.find_file(path) {
            Some(id) => return Ok(id),
            None => log::warn!("Font file {:?} is not in the catalog", path),
        }
    }

    if let Some(id) = catalog.find_family(&config.font_family) {
        return Ok(id);
    }
    log::info!(
        "Font family '{}' not installed, using the default typeface",
        config.font_family
    );

    catalog
        .default_typeface()
        .ok_or_else(|| RenderError::FontLoad("the font catalog has no faces".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xibao_config::Color;
    use xibao_fonts::BlockProvider;

    #[test]
    fn test_explicit_size_bypasses_solver() {
        let provider = BlockProvider::latin_and_cjk();
        let cache = FallbackCache::new();
        let layout = LayoutConfig::default();
        let pipeline = Pipeline::new(&provider, TypefaceId::new(0), &layout, &cache, &[]);
        assert_eq!(pipeline.plan(1200, 900, "hello", Some(77)).size, 77);
        assert_eq!(pipeline.plan(1200, 900, "hello", None).size, 250);
    }

    #[test]
    fn test_length_heuristic_mode() {
        let provider = BlockProvider::latin_and_cjk();
        let cache = FallbackCache::new();
        let layout = LayoutConfig {
            sizing: SizingMode::LengthHeuristic,
            ..LayoutConfig::default()
        };
        let pipeline = Pipeline::new(&provider, TypefaceId::new(0), &layout, &cache, &[]);
        assert_eq!(pipeline.plan(1200, 900, "hello", None).size, 210);
    }

    #[test]
    fn test_pipeline_render_matches_compositor_at_planned_size() {
        let provider = BlockProvider::latin_and_cjk();
        let cache = FallbackCache::new();
        let layout = LayoutConfig::default();
        let base = TypefaceId::new(0);
        let pipeline = Pipeline::new(&provider, base, &layout, &cache, &[]);
        let canvas = Canvas::solid(1200, 900, [200, 0, 0, 255]);
        let style = TextStyle::new(Color::YELLOW).with_stroke(Color::WHITE, 4.0);

        let text = "hello 喜报 world";
        let size = pipeline.plan(1200, 900, text, None).size;
        let lines = wrap(text, layout.wrap_capacity);
        let resolver = GlyphCoverageResolver::new(&provider, &cache, &[]);
        let direct = Compositor::new(&layout)
            .render(&canvas, &lines, size, base, &style, &resolver)
            .unwrap();

        assert_eq!(pipeline.render(&canvas, text, &style, None).unwrap(), direct);
    }

    #[test]
    fn test_empty_catalog_is_font_load_error() {
        let catalog = Arc::new(FontCatalog::empty());
        let err = Renderer::new(catalog, &Config::default()).err().unwrap();
        assert!(matches!(err, RenderError::FontLoad(_)));
    }

    #[test]
    fn test_missing_font_path_falls_back() {
        let catalog = Arc::new(FontCatalog::bundled());
        let config = Config::default().with_font_path("/no/such/font.otf");
        let renderer = Renderer::new(Arc::clone(&catalog), &config).unwrap();
        assert_eq!(Some(renderer.base_typeface()), catalog.default_typeface());
    }

    #[test]
    fn test_render_produces_png() {
        let catalog = Arc::new(FontCatalog::bundled());
        let renderer = Renderer::new(catalog, &Config::default()).unwrap();
        let canvas = Canvas::solid(300, 200, [200, 0, 0, 255]);
        let style = TextStyle::new(Color::YELLOW);
        let bytes = renderer.render(&canvas, "Hi", &style, None).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}

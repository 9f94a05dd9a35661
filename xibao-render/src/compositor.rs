//! Layout and drawing of wrapped lines onto a canvas.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use xibao_config::{Color, LayoutConfig, PresetConfig, StrokeConfig};
use xibao_fonts::{
    DrawPass, FontHandle, FontProvider, GlyphCoverageResolver, Paint, Run, TypefaceId, measure_runs, segment,
};

use crate::canvas::Canvas;
use crate::error::RenderError;

/// Fill colour plus optional outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub fill: Color,
    /// `None` skips the stroke pass
    pub stroke: Option<StrokeConfig>,
}

impl TextStyle {
    pub fn new(fill: Color) -> Self {
        Self { fill, stroke: None }
    }

    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(StrokeConfig { color, width });
        self
    }
}

impl From<&PresetConfig> for TextStyle {
    fn from(preset: &PresetConfig) -> Self {
        Self {
            fill: preset.fill,
            stroke: preset.stroke,
        }
    }
}

/// One positioned line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub text: String,
    pub runs: Vec<Run>,
    /// Sum of the run advances, in pixels
    pub width: f32,
    /// Left edge of the first run
    pub x: f32,
    /// Top of the line box
    pub top: f32,
    pub baseline: f32,
}

/// Everything needed to draw: the size, and every line with its runs.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub size: u32,
    pub lines: Vec<LineLayout>,
    pub line_height: f32,
    /// `line_height * lines.len()`
    pub block_height: f32,
}

impl LayoutPlan {
    pub fn widest_line(&self) -> f32 {
        self.lines.iter().map(|line| line.width).fold(0.0, f32::max)
    }
}

/// Places lines on the canvas and draws them stroke-first.
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    line_height: f32,
    vertical_bias: f32,
}

impl Compositor {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            line_height: layout.line_height,
            vertical_bias: layout.vertical_bias,
        }
    }

    /// Segment every line at `size` and centre each one on its own width.
    ///
    /// The block is centred vertically, then shifted down by the vertical bias.
    pub fn layout<P: FontProvider + ?Sized>(
        &self,
        canvas_width: u32,
        canvas_height: u32,
        lines: &[&str],
        size: u32,
        base: TypefaceId,
        resolver: &GlyphCoverageResolver<'_, P>,
    ) -> LayoutPlan {
        let base_font = FontHandle::new(base, size);
        let provider = resolver.provider();
        let ascent = provider.ascent(base_font);

        let line_height = size as f32 * self.line_height;
        let block_height = line_height * lines.len() as f32;
        let block_top = (canvas_height as f32 - block_height) / 2.0 + self.vertical_bias;

        let lines = lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let runs = segment(text, base_font, resolver);
                let width = measure_runs(provider, &runs);
                let top = block_top + i as f32 * line_height;
                LineLayout {
                    text: text.to_string(),
                    runs,
                    width,
                    x: (canvas_width as f32 - width) / 2.0,
                    top,
                    baseline: top + ascent,
                }
            })
            .collect();

        LayoutPlan {
            size,
            lines,
            line_height,
            block_height,
        }
    }

    /// Draw `plan` onto `image`. Each run gets its stroke pass, then its fill.
    pub fn draw<P: FontProvider + ?Sized>(
        &self,
        provider: &P,
        plan: &LayoutPlan,
        style: &TextStyle,
        image: &mut RgbaImage,
    ) {
        let fill = style.fill.as_array();

        for line in &plan.lines {
            let mut x = line.x;
            for run in &line.runs {
                let origin = (x, line.baseline);

                if let Some(stroke) = &style.stroke {
                    let color = stroke.color.as_array();
                    provider.draw(
                        run.font,
                        &run.text,
                        origin,
                        DrawPass::Stroke {
                            width: stroke.width,
                        },
                        &mut |px, py, paint| put(image, px, py, color, paint),
                    );
                }
                provider.draw(
                    run.font,
                    &run.text,
                    origin,
                    DrawPass::Fill,
                    &mut |px, py, paint| put(image, px, py, fill, paint),
                );

                x += provider.measure(run.font, &run.text);
            }
        }
    }

    /// Layout, draw on a copy of `canvas` and encode.
    pub fn render<P: FontProvider + ?Sized>(
        &self,
        canvas: &Canvas,
        lines: &[&str],
        size: u32,
        base: TypefaceId,
        style: &TextStyle,
        resolver: &GlyphCoverageResolver<'_, P>,
    ) -> Result<Vec<u8>, RenderError> {
        let plan = self.layout(canvas.width(), canvas.height(), lines, size, base, resolver);
        let mut image = canvas.working_copy();
        self.draw(resolver.provider(), &plan, style, &mut image);
        encode_png(&image)
    }
}

/// Masks take the pass colour; colour glyph texels keep their own.
fn put(image: &mut RgbaImage, x: i32, y: i32, tint: [u8; 3], paint: Paint) {
    match paint {
        Paint::Mask(coverage) => blend(image, x, y, tint, coverage),
        Paint::Color([r, g, b, a]) => blend(image, x, y, [r, g, b], a),
    }
}

/// Source-over blend of `color` at `coverage` into one pixel; off-canvas
/// coordinates are ignored.
fn blend(image: &mut RgbaImage, x: i32, y: i32, color: [u8; 3], coverage: u8) {
    if x < 0 || y < 0 || x as u32 >= image.width() || y as u32 >= image.height() {
        return;
    }
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    let a = coverage as u32;
    for (channel, src) in pixel.0.iter_mut().zip(color) {
        *channel = ((src as u32 * a + *channel as u32 * (255 - a) + 127) / 255) as u8;
    }
    pixel.0[3] = (a + pixel.0[3] as u32 * (255 - a) / 255) as u8;
}

/// Encode as PNG with maximum compression.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut png_buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut png_buf, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(RenderError::Encode)?;
    Ok(png_buf)
}

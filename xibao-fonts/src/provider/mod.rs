//! Rendering backends behind a single capability interface.
//!
//! Layout code only ever talks to [`FontProvider`]. Two backends exist:
//! - [`SwashProvider`]: real outlines from the [`FontCatalog`](crate::FontCatalog),
//!   shaped with rustybuzz and rasterised with swash
//! - [`BlockProvider`]: synthetic faces that draw every glyph as a solid block

mod block;
mod outline;

pub use block::{BlockFace, BlockProvider};
pub use outline::SwashProvider;

use crate::handle::FontHandle;

/// Which pass of a styled run is being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawPass {
    /// Glyph interiors
    Fill,
    /// Outline extending `width` pixels outward, round joins and caps
    Stroke { width: f32 },
}

/// What a glyph puts on one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Coverage to tint with the pass colour
    Mask(u8),
    /// Colour glyph texel, straight RGBA
    Color([u8; 4]),
}

impl Paint {
    pub fn alpha(&self) -> u8 {
        match self {
            Paint::Mask(coverage) => *coverage,
            Paint::Color(rgba) => rgba[3],
        }
    }
}

/// Pixel sink: `(x, y, paint)` in canvas pixels, possibly off-canvas.
pub type Plot<'a> = dyn FnMut(i32, i32, Paint) + 'a;

/// Glyph coverage, measurement and drawing for one family of typefaces.
///
/// Handles passed in must come from this provider (its own typeface ids,
/// or [`FontHandle::notdef`]).
pub trait FontProvider {
    /// Whether `font` has a real glyph for `ch`. Always false for notdef.
    fn can_render(&self, font: FontHandle, ch: char) -> bool;

    /// A typeface other than `base` that covers `ch`, at `base`'s size.
    fn find_fallback(&self, base: FontHandle, ch: char, locales: &[String]) -> Option<FontHandle>;

    /// Advance width of `text` in pixels.
    fn measure(&self, font: FontHandle, text: &str) -> f32;

    /// Distance from the top of a line box to the baseline, in pixels.
    fn ascent(&self, font: FontHandle) -> f32;

    /// Draw `text` with its baseline starting at `origin`.
    fn draw(
        &self,
        font: FontHandle,
        text: &str,
        origin: (f32, f32),
        pass: DrawPass,
        plot: &mut Plot<'_>,
    );
}

//! Font size selection.
//!
//! Lines come from the character-count wrapper, so only the line with the
//! most characters is measured. For scripts with uneven glyph widths that
//! line is not always the widest once rendered, and the chosen size can
//! overflow on another line.

use xibao_config::LayoutConfig;
use xibao_fonts::{FontHandle, FontProvider, GlyphCoverageResolver, TypefaceId, measure_runs, segment};

/// Binary search for the largest size whose text block fits the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizeSolver {
    canvas_width: u32,
    canvas_height: u32,
    min_size: u32,
    max_size: u32,
    margin_ratio: f32,
    line_height: f32,
}

impl FontSizeSolver {
    pub fn new(canvas_width: u32, canvas_height: u32, layout: &LayoutConfig) -> Self {
        Self {
            canvas_width,
            canvas_height,
            min_size: layout.min_font_size,
            max_size: layout.max_font_size.max(layout.min_font_size),
            margin_ratio: layout.margin_ratio,
            line_height: layout.line_height,
        }
    }

    /// Whether `lines` drawn at `size` leave the margin free on both axes.
    ///
    /// Width is measured on the longest line only; height is estimated as
    /// `lines * size * line_height` rather than from font metrics.
    pub fn fits<P: FontProvider + ?Sized>(
        &self,
        lines: &[&str],
        base: TypefaceId,
        size: u32,
        resolver: &GlyphCoverageResolver<'_, P>,
    ) -> bool {
        let line = longest_line(lines);
        let runs = segment(line, FontHandle::new(base, size), resolver);
        let width = measure_runs(resolver.provider(), &runs);
        let height = lines.len() as f32 * size as f32 * self.line_height;

        let margin_width = self.canvas_width as f32 * self.margin_ratio;
        let margin_height = self.canvas_height as f32 * self.margin_ratio;

        width + margin_width < self.canvas_width as f32
            && height + margin_height < self.canvas_height as f32
    }

    /// Largest fitting size in `[min_size, max_size]`.
    ///
    /// Empty text returns `max_size` without measuring. When nothing fits,
    /// `min_size` is returned and the text may overflow.
    pub fn solve<P: FontProvider + ?Sized>(
        &self,
        lines: &[&str],
        base: TypefaceId,
        resolver: &GlyphCoverageResolver<'_, P>,
    ) -> u32 {
        if lines.iter().all(|line| line.is_empty()) {
            return self.max_size;
        }

        let mut low = self.min_size;
        let mut high = self.max_size;
        let mut best = self.min_size;
        let mut probes = 0;

        while low <= high {
            let mid = low + (high - low) / 2;
            probes += 1;
            if self.fits(lines, base, mid, resolver) {
                best = mid;
                low = mid + 1;
            } else if mid == 0 {
                break;
            } else {
                high = mid - 1;
            }
        }

        log::debug!(
            "Solved font size {} for {} line(s) after {} probes",
            best,
            lines.len(),
            probes
        );
        best
    }
}

/// First line with the greatest character count.
pub fn longest_line<'l>(lines: &[&'l str]) -> &'l str {
    let mut best = "";
    let mut best_len = 0;
    for line in lines {
        let len = line.chars().count();
        if len > best_len {
            best = line;
            best_len = len;
        }
    }
    best
}

/// Size from the character count alone.
///
/// Under 10 characters shrinks 8px per character, between 16 and 19 shrinks
/// 9px, anything else 10px, all from 250 and clamped into `[min, max]`.
pub fn legacy_font_size(char_count: usize, min_size: u32, max_size: u32) -> u32 {
    let n = char_count as i64;
    let size = if n < 10 {
        250 - 8 * n
    } else if n > 15 && n < 20 {
        250 - 9 * n
    } else {
        250 - 10 * n
    };
    size.clamp(min_size as i64, max_size.max(min_size) as i64) as u32
}

//! Split a line into single-font runs.

use crate::handle::{FontHandle, Run};
use crate::provider::FontProvider;
use crate::resolver::GlyphCoverageResolver;

/// Partition `line` into runs, left to right.
///
/// A character stays in the current run while the current font covers it.
/// Otherwise the font switches to `base` if `base` covers it, or to the
/// resolved fallback. A switch to the font already in use (consecutive
/// missing glyphs all resolving to notdef) extends the run instead of
/// starting a new one, so adjacent runs never share a font.
///
/// The empty line has no runs.
pub fn segment<P: FontProvider + ?Sized>(
    line: &str,
    base: FontHandle,
    resolver: &GlyphCoverageResolver<'_, P>,
) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current = base;
    let mut buffer = String::new();

    for ch in line.chars() {
        if resolver.can_render(current, ch) {
            buffer.push(ch);
            continue;
        }

        let next = if current != base && resolver.can_render(base, ch) {
            base
        } else {
            resolver.resolve_fallback(base, ch)
        };

        if next != current && !buffer.is_empty() {
            runs.push(Run::new(std::mem::take(&mut buffer), current));
        }
        current = next;
        buffer.push(ch);
    }

    if !buffer.is_empty() {
        runs.push(Run::new(buffer, current));
    }

    runs
}

/// Total advance of `runs` in pixels.
pub fn measure_runs<P: FontProvider + ?Sized>(provider: &P, runs: &[Run]) -> f32 {
    runs.iter().map(|run| provider.measure(run.font, &run.text)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::TypefaceId;
    use crate::provider::BlockProvider;
    use crate::resolver::FallbackCache;

    fn runs_for(line: &str) -> Vec<Run> {
        let provider = BlockProvider::latin_and_cjk();
        let cache = FallbackCache::new();
        let resolver = GlyphCoverageResolver::new(&provider, &cache, &[]);
        segment(line, FontHandle::new(TypefaceId::new(0), 40), &resolver)
    }

    #[test]
    fn test_single_font_line_is_one_run() {
        let runs = runs_for("hello");
        assert_eq!(runs, vec![Run::new("hello", FontHandle::new(TypefaceId::new(0), 40))]);
    }

    #[test]
    fn test_empty_line_has_no_runs() {
        assert!(runs_for("").is_empty());
    }

    #[test]
    fn test_switches_back_to_base() {
        let runs = runs_for("ab喜报cd");
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", "喜报", "cd"]);
        assert_eq!(runs[0].font, runs[2].font);
        assert_ne!(runs[0].font, runs[1].font);
    }

    #[test]
    fn test_leading_fallback_character() {
        let runs = runs_for("喜a");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].font.typeface, TypefaceId::new(1));
        assert_eq!(runs[1].font.typeface, TypefaceId::new(0));
    }

    #[test]
    fn test_consecutive_missing_glyphs_merge() {
        let runs = runs_for("a😀🎉b");
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "😀🎉", "b"]);
        assert!(runs[1].font.is_notdef());
    }

    #[test]
    fn test_measure_runs_sums_widths() {
        let provider = BlockProvider::latin_and_cjk();
        let runs = vec![
            Run::new("ab", FontHandle::new(TypefaceId::new(0), 40)),
            Run::new("喜", FontHandle::new(TypefaceId::new(1), 40)),
        ];
        assert_eq!(measure_runs(&provider, &runs), 80.0);
    }
}

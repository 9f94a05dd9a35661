//! Integration tests for fallback resolution and run segmentation.

use std::sync::Arc;

use xibao_fonts::{
    BlockProvider, FallbackCache, FontCatalog, FontHandle, FontProvider, GlyphCoverageResolver,
    SwashProvider, TypefaceId, measure_runs, segment,
};

fn locales() -> Vec<String> {
    vec!["zh-Hans".to_string(), "und".to_string()]
}

#[test]
fn test_runs_partition_the_line() {
    let provider = BlockProvider::latin_and_cjk();
    let cache = FallbackCache::new();
    let locales = locales();
    let resolver = GlyphCoverageResolver::new(&provider, &cache, &locales);
    let base = FontHandle::new(TypefaceId::new(0), 64);

    for line in ["", "plain", "喜报", "Rust 喜报 2026!", "a😀b中c", "。。abc。"] {
        let runs = segment(line, base, &resolver);
        let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(joined, line);
        assert!(runs.iter().all(|r| !r.text.is_empty()));
        for pair in runs.windows(2) {
            assert_ne!(pair[0].font, pair[1].font, "adjacent runs in {:?}", line);
        }
        for run in runs.iter().filter(|r| !r.font.is_notdef()) {
            assert!(run.text.chars().all(|ch| provider.can_render(run.font, ch)));
        }
    }
}

#[test]
fn test_mixed_script_line_uses_distinct_fallback() {
    let provider = BlockProvider::latin_and_cjk();
    let cache = FallbackCache::new();
    let locales = locales();
    let resolver = GlyphCoverageResolver::new(&provider, &cache, &locales);
    let base = FontHandle::new(TypefaceId::new(0), 64);

    let runs = segment("good 喜报", base, &resolver);
    assert!(runs.len() >= 2);
    let fallback = runs.iter().find(|r| r.text.contains('喜')).unwrap();
    assert_ne!(fallback.font, base);
    assert_eq!(fallback.font.size, base.size);
}

#[test]
fn test_shared_cache_across_resolvers() {
    let provider = BlockProvider::latin_and_cjk();
    let cache = Arc::new(FallbackCache::new());
    let base = FontHandle::new(TypefaceId::new(0), 32);

    let handles: Vec<FontHandle> = (0..4)
        .map(|_| {
            let provider = provider.clone();
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                let resolver = GlyphCoverageResolver::new(&provider, &cache, &[]);
                resolver.resolve_fallback(base, '报')
            })
        })
        .map(|handle| handle.join().unwrap())
        .collect();

    assert!(handles.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_bundled_face_segments_cjk_as_notdef() {
    let catalog = Arc::new(FontCatalog::bundled());
    let base_id = catalog.default_typeface().unwrap();
    let provider = SwashProvider::new(Arc::clone(&catalog), base_id).unwrap();
    let cache = FallbackCache::new();
    let locales = locales();
    let resolver = GlyphCoverageResolver::new(&provider, &cache, &locales);
    let base = FontHandle::new(base_id, 48);

    let runs = segment("Hi 中文", base, &resolver);
    let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Hi ", "中文"]);
    assert!(runs[1].font.is_notdef());

    // Tofu boxes still take up room
    assert!(measure_runs(&provider, &runs) > provider.measure(base, "Hi "));
}

#[test]
fn test_measure_is_size_monotonic() {
    let catalog = Arc::new(FontCatalog::bundled());
    let base_id = catalog.default_typeface().unwrap();
    let provider = SwashProvider::new(catalog, base_id).unwrap();

    let mut last = 0.0;
    for size in (40..=250).step_by(30) {
        let width = provider.measure(FontHandle::new(base_id, size), "Congratulations");
        assert!(width > last);
        last = width;
    }
}

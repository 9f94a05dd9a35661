//! Per-character font fallback with memoisation.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::handle::{FontHandle, TypefaceId};
use crate::provider::FontProvider;

/// Key of one fallback decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FallbackKey {
    base: TypefaceId,
    ch: char,
    size: u32,
}

/// Memoised fallback decisions.
///
/// Entries are write-once: the first handle stored for a key is the one
/// every later reader sees. The map is behind a `RwLock`, so one cache can
/// be shared across concurrent render calls through an `Arc` as long as
/// they use typeface ids from the same catalog.
#[derive(Debug, Default)]
pub struct FallbackCache {
    entries: RwLock<HashMap<FallbackKey, FontHandle>>,
}

impl FallbackCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, base: TypefaceId, ch: char, size: u32) -> Option<FontHandle> {
        self.entries
            .read()
            .get(&FallbackKey { base, ch, size })
            .copied()
    }

    /// Store `handle` unless the key already has a value; returns the stored value.
    pub fn insert(&self, base: TypefaceId, ch: char, size: u32, handle: FontHandle) -> FontHandle {
        *self
            .entries
            .write()
            .entry(FallbackKey { base, ch, size })
            .or_insert(handle)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Decides which font draws each character.
pub struct GlyphCoverageResolver<'a, P: FontProvider + ?Sized> {
    provider: &'a P,
    cache: &'a FallbackCache,
    /// Locale preference order for catalog lookups
    locales: &'a [String],
}

impl<'a, P: FontProvider + ?Sized> GlyphCoverageResolver<'a, P> {
    pub fn new(provider: &'a P, cache: &'a FallbackCache, locales: &'a [String]) -> Self {
        Self {
            provider,
            cache,
            locales,
        }
    }

    pub fn provider(&self) -> &'a P {
        self.provider
    }

    pub fn can_render(&self, font: FontHandle, ch: char) -> bool {
        self.provider.can_render(font, ch)
    }

    /// Font for `ch` when `base` cannot draw it.
    ///
    /// Never fails: characters no face covers map to the notdef handle at
    /// `base`'s size, and the decision is cached like any other.
    pub fn resolve_fallback(&self, base: FontHandle, ch: char) -> FontHandle {
        if let Some(hit) = self.cache.get(base.typeface, ch, base.size) {
            return hit;
        }

        let handle = match self.provider.find_fallback(base, ch, self.locales) {
            Some(handle) => {
                log::debug!("Fallback for {:?} (U+{:04X}): {}", ch, ch as u32, handle);
                handle
            }
            None => {
                log::debug!(
                    "No installed face covers {:?} (U+{:04X}), using notdef",
                    ch,
                    ch as u32
                );
                FontHandle::notdef(base.size)
            }
        };

        self.cache.insert(base.typeface, ch, base.size, handle)
    }
}

//! Process-wide font catalog with fallback lookup.
//!
//! The catalog is built once at startup from the system font directories,
//! the bundled DejaVu Sans face and any configured font files. It is
//! immutable afterwards and shared between render calls via `Arc`.
//!
//! # Fallback order
//!
//! [`FontCatalog::find_covering`] searches, in order:
//! 1. Other faces of the base face's family
//! 2. Families registered for each preferred locale ([`FALLBACK_FAMILIES`])
//! 3. Every remaining face, in catalog order

mod fallbacks;
mod loader;
mod types;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use fontdb::{Database, Family, ID, Query, Source};

use crate::handle::TypefaceId;

pub use fallbacks::{FALLBACK_FAMILIES, families_for_locale};
pub use loader::{EMBEDDED_FAMILY, load_embedded_font};
pub use types::FontData;

/// Catalog metadata for one face.
#[derive(Debug, Clone)]
struct FaceEntry {
    db_id: ID,
    family: String,
    weight: u16,
    style: fontdb::Style,
    path: Option<PathBuf>,
}

/// Immutable index over every face the process can render with.
pub struct FontCatalog {
    db: Database,
    /// Indexed by `TypefaceId`
    faces: Vec<FaceEntry>,
    by_db_id: HashMap<ID, TypefaceId>,
}

impl FontCatalog {
    /// Discover system fonts plus the bundled face and `extra_fonts`.
    ///
    /// This is I/O-bound. Call once at startup and share the result.
    pub fn discover(extra_fonts: &[PathBuf]) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Loaded {} system font faces", db.len());

        db.load_font_data(loader::EMBEDDED_FONT.to_vec());

        for path in extra_fonts {
            match db.load_font_file(path) {
                Ok(()) => log::info!("Loaded font file {:?}", path),
                Err(e) => log::warn!("Failed to load font file {:?}: {}", path, e),
            }
        }

        Self::from_database(db)
    }

    /// Catalog containing only the bundled DejaVu Sans face.
    pub fn bundled() -> Self {
        let mut db = Database::new();
        db.load_font_data(loader::EMBEDDED_FONT.to_vec());
        Self::from_database(db)
    }

    /// Catalog with no faces at all.
    pub fn empty() -> Self {
        Self::from_database(Database::new())
    }

    /// Index an already populated database.
    ///
    /// Faces are ordered by family, weight and PostScript name so typeface
    /// ids and scan order do not depend on directory enumeration order.
    pub fn from_database(db: Database) -> Self {
        let mut infos: Vec<&fontdb::FaceInfo> = db.faces().collect();
        infos.sort_by(|a, b| {
            primary_family(a)
                .to_lowercase()
                .cmp(&primary_family(b).to_lowercase())
                .then(a.weight.0.cmp(&b.weight.0))
                .then(a.post_script_name.cmp(&b.post_script_name))
                .then(a.index.cmp(&b.index))
        });

        let faces: Vec<FaceEntry> = infos
            .iter()
            .map(|info| FaceEntry {
                db_id: info.id,
                family: primary_family(info).to_string(),
                weight: info.weight.0,
                style: info.style,
                path: match &info.source {
                    Source::File(path) => Some(path.clone()),
                    Source::SharedFile(path, _) => Some(path.clone()),
                    Source::Binary(_) => None,
                },
            })
            .collect();

        let by_db_id = faces
            .iter()
            .enumerate()
            .map(|(idx, face)| (face.db_id, TypefaceId::new(idx as u32)))
            .collect();

        log::debug!("FontCatalog indexed {} faces", faces.len());

        Self {
            db,
            faces,
            by_db_id,
        }
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Sorted, de-duplicated family names.
    pub fn families(&self) -> Vec<String> {
        let mut names: Vec<String> = self.faces.iter().map(|f| f.family.clone()).collect();
        names.dedup();
        names
    }

    pub fn family_name(&self, id: TypefaceId) -> Option<&str> {
        self.entry(id).map(|face| face.family.as_str())
    }

    /// Face loaded from `path`, if that file is in the catalog.
    pub fn find_file(&self, path: &Path) -> Option<TypefaceId> {
        let canonical = path.canonicalize().ok();
        self.faces
            .iter()
            .position(|face| match &face.path {
                Some(p) => p == path || canonical.as_deref() == Some(p.as_path()),
                None => false,
            })
            .map(|idx| TypefaceId::new(idx as u32))
    }

    /// Regular face of a family.
    pub fn find_family(&self, family: &str) -> Option<TypefaceId> {
        self.query(family, fontdb::Weight::NORMAL, fontdb::Style::Normal)
    }

    /// Face used when the configured primary typeface cannot be found.
    ///
    /// Generic sans-serif first, then the bundled family, then any face.
    pub fn default_typeface(&self) -> Option<TypefaceId> {
        let sans = Query {
            families: &[Family::SansSerif],
            ..Query::default()
        };
        self.db
            .query(&sans)
            .and_then(|id| self.by_db_id.get(&id).copied())
            .or_else(|| self.find_family(EMBEDDED_FAMILY))
            .or_else(|| (!self.faces.is_empty()).then(|| TypefaceId::new(0)))
    }

    /// Load a face's bytes.
    pub fn load(&self, id: TypefaceId) -> Option<FontData> {
        let face = self.entry(id)?;
        loader::load_face(&self.db, face.db_id)
    }

    /// Whether face `id` maps `ch` to a real glyph, without keeping it loaded.
    pub fn covers(&self, id: TypefaceId, ch: char) -> bool {
        match self.entry(id) {
            Some(face) => loader::face_has_glyph(&self.db, face.db_id, ch),
            None => false,
        }
    }

    /// Find a face other than `base` that covers `ch`.
    ///
    /// See the module docs for the search order. Returns `None` when no face
    /// in the catalog has the glyph.
    pub fn find_covering(
        &self,
        ch: char,
        base: TypefaceId,
        locales: &[String],
    ) -> Option<TypefaceId> {
        let mut tried: HashSet<TypefaceId> = HashSet::new();
        tried.insert(base);

        let (weight, style) = self
            .entry(base)
            .map(|face| (face.weight, face.style))
            .unwrap_or((fontdb::Weight::NORMAL.0, fontdb::Style::Normal));

        // 1. Sibling faces of the base family, closest weight first
        if let Some(base_face) = self.entry(base) {
            let mut siblings: Vec<TypefaceId> = self
                .faces
                .iter()
                .enumerate()
                .filter(|(_, face)| face.family == base_face.family)
                .map(|(idx, _)| TypefaceId::new(idx as u32))
                .filter(|id| *id != base)
                .collect();
            siblings.sort_by_key(|id| {
                let face = &self.faces[id.index() as usize];
                (face.style != style, face.weight.abs_diff(weight))
            });
            for id in siblings {
                if tried.insert(id) && self.covers(id, ch) {
                    return Some(id);
                }
            }
        }

        // 2. Locale preference order
        for locale in locales {
            for family in families_for_locale(locale) {
                if let Some(id) = self.query(family, fontdb::Weight(weight), style)
                    && tried.insert(id)
                    && self.covers(id, ch)
                {
                    return Some(id);
                }
            }
        }

        // 3. Everything else
        (0..self.faces.len() as u32)
            .map(TypefaceId::new)
            .filter(|id| !tried.contains(id))
            .find(|id| self.covers(*id, ch))
    }

    fn query(&self, family: &str, weight: fontdb::Weight, style: fontdb::Style) -> Option<TypefaceId> {
        let query = Query {
            families: &[Family::Name(family)],
            weight,
            style,
            ..Query::default()
        };
        let id = self.db.query(&query)?;
        self.by_db_id.get(&id).copied()
    }

    fn entry(&self, id: TypefaceId) -> Option<&FaceEntry> {
        if id.is_notdef() {
            return None;
        }
        self.faces.get(id.index() as usize)
    }
}

impl std::fmt::Display for FontCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FontCatalog({} faces, {} families)",
            self.faces.len(),
            self.families().len()
        )
    }
}

fn primary_family(info: &fontdb::FaceInfo) -> &str {
    info.families
        .first()
        .map(|(name, _)| name.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_has_dejavu() {
        let catalog = FontCatalog::bundled();
        assert_eq!(catalog.len(), 1);
        let id = catalog.find_family(EMBEDDED_FAMILY).expect("bundled family");
        assert_eq!(catalog.family_name(id), Some(EMBEDDED_FAMILY));
    }

    #[test]
    fn test_default_typeface_falls_back_to_bundled() {
        let catalog = FontCatalog::bundled();
        assert!(catalog.default_typeface().is_some());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = FontCatalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.default_typeface().is_none());
        assert!(catalog.load(TypefaceId::new(0)).is_none());
    }

    #[test]
    fn test_coverage_queries() {
        let catalog = FontCatalog::bundled();
        let id = catalog.default_typeface().unwrap();
        assert!(catalog.covers(id, 'A'));
        assert!(!catalog.covers(id, '中'));
        assert!(!catalog.covers(TypefaceId::NOTDEF, 'A'));
    }

    #[test]
    fn test_find_covering_without_candidates() {
        let catalog = FontCatalog::bundled();
        let id = catalog.default_typeface().unwrap();
        let locales = vec!["zh-Hans".to_string(), "und".to_string()];
        assert_eq!(catalog.find_covering('中', id, &locales), None);
    }

    #[test]
    fn test_display() {
        let display = format!("{}", FontCatalog::bundled());
        assert!(display.contains("FontCatalog(1 faces"));
    }
}

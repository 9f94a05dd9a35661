//! Font identities passed between the catalog, providers and the layout code.

use std::fmt;

/// Stable identity of one typeface (a single face of a font file).
///
/// Issued by a [`FontProvider`](crate::FontProvider) backend; for the swash
/// backend it indexes the process-wide [`FontCatalog`](crate::FontCatalog).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypefaceId(u32);

impl TypefaceId {
    /// The missing-glyph typeface. Draws the base face's `.notdef` box for
    /// every character and never reports coverage.
    pub const NOTDEF: TypefaceId = TypefaceId(u32::MAX);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }

    pub fn is_notdef(self) -> bool {
        self == Self::NOTDEF
    }
}

impl fmt::Display for TypefaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_notdef() {
            f.write_str("notdef")
        } else {
            write!(f, "typeface#{}", self.0)
        }
    }
}

/// A typeface at a pixel size. Equal handles are interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle {
    pub typeface: TypefaceId,
    pub size: u32,
}

impl FontHandle {
    pub const fn new(typeface: TypefaceId, size: u32) -> Self {
        Self { typeface, size }
    }

    pub const fn notdef(size: u32) -> Self {
        Self::new(TypefaceId::NOTDEF, size)
    }

    pub fn is_notdef(&self) -> bool {
        self.typeface.is_notdef()
    }
}

impl fmt::Display for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}px", self.typeface, self.size)
    }
}

/// A maximal stretch of a line drawn with a single font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    /// Non-empty text of the run
    pub text: String,
    pub font: FontHandle,
}

impl Run {
    pub fn new(text: impl Into<String>, font: FontHandle) -> Self {
        Self {
            text: text.into(),
            font,
        }
    }
}

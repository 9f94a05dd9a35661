/// Banner colours: a small named palette plus arbitrary RGB triples.
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A color in RGB format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The fixed palette the chat commands use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Red,
    Black,
    Yellow,
    White,
}

impl NamedColor {
    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Red => "red",
            NamedColor::Black => "black",
            NamedColor::Yellow => "yellow",
            NamedColor::White => "white",
        }
    }

    pub fn all() -> &'static [NamedColor] {
        &[
            NamedColor::Red,
            NamedColor::Black,
            NamedColor::Yellow,
            NamedColor::White,
        ]
    }

    pub fn color(self) -> Color {
        match self {
            NamedColor::Red => Color::RED,
            NamedColor::Black => Color::BLACK,
            NamedColor::Yellow => Color::YELLOW,
            NamedColor::White => Color::WHITE,
        }
    }
}

impl Color {
    pub const RED: Color = Color::new(255, 0, 0);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Palette name if this colour is one of the named ones.
    pub fn palette_name(&self) -> Option<&'static str> {
        NamedColor::all()
            .iter()
            .find(|named| named.color() == *self)
            .map(|named| named.name())
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::new(r, g, b))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        named.color()
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if let Some(named) = NamedColor::all().iter().find(|n| n.name() == lower) {
            return Ok(named.color());
        }
        Color::from_hex(trimmed).ok_or_else(|| {
            format!("unknown color '{s}' (expected red, black, yellow, white or #rrggbb)")
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.palette_name() {
            Some(name) => f.write_str(name),
            None => f.write_str(&self.to_hex()),
        }
    }
}

// Palette colours serialise by name, everything else as `#rrggbb`.
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NameOrTriple {
            Name(String),
            Triple([u8; 3]),
        }

        match NameOrTriple::deserialize(deserializer)? {
            NameOrTriple::Name(name) => name.parse().map_err(serde::de::Error::custom),
            NameOrTriple::Triple([r, g, b]) => Ok(Color::new(r, g, b)),
        }
    }
}

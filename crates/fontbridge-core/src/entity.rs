//! Host-facing font entity and specification objects

use crate::pattern::FontPattern;

/// A fully resolved font entity the host hands to `open`
///
/// Slot layout mirrors the host's indexed font-entity object: descriptive
/// attributes plus an opaque backing pattern describing where the font
/// actually lives.
#[derive(Debug, Clone, Default)]
pub struct FontEntity {
    pub foundry: Option<String>,
    pub family: Option<String>,
    pub weight: Option<i32>,
    pub slant: Option<i32>,
    pub width: Option<i32>,
    /// Resolved pixel size; zero means "use the caller's requested size"
    pub pixel_size: i32,
    /// The attribute pattern this entity was matched from
    pub backing: Option<FontPattern>,
}

/// Size slot of a [`FontSpec`]: pixels or points, whichever the name gave
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecSize {
    Pixels(i32),
    Points(f64),
}

/// A partially specified font request, filled in from a parsed name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontSpec {
    pub foundry: Option<String>,
    pub family: Option<String>,
    pub weight: Option<i32>,
    /// Host slant convention: the matcher's slant value offset by +100
    pub slant: Option<i32>,
    pub width: Option<i32>,
    pub size: Option<SpecSize>,
}

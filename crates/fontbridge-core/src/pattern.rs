//! Attribute patterns: the flexible font specification format
//!
//! A [`FontPattern`] is an unordered multimap from attribute keys to typed
//! values, the shape the system matcher speaks. Patterns are transient:
//! built per query, dropped after use, except when one is retained as a
//! font entity's backing specification.

// this_file: crates/fontbridge-core/src/pattern.rs

/// Attribute keys a pattern can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    Foundry,
    Family,
    Weight,
    Slant,
    Width,
    PixelSize,
    /// Point size, as distinct from pixel size
    Size,
    Spacing,
    Antialias,
    /// Backing file path; a second value, when present, is a synthesized
    /// display name for the font
    File,
}

/// A single typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum PatternValue {
    Str(String),
    Int(i32),
    Double(f64),
    Bool(bool),
}

/// Reference weight constants the bucket tables compare against
pub mod weight {
    pub const LIGHT: i32 = 50;
    pub const MEDIUM: i32 = 100;
    pub const DEMIBOLD: i32 = 180;
    pub const BOLD: i32 = 200;
    pub const BLACK: i32 = 210;
}

/// Reference slant constants
pub mod slant {
    pub const ROMAN: i32 = 0;
    pub const ITALIC: i32 = 100;
    pub const OBLIQUE: i32 = 110;
}

/// Spacing classes as the matcher encodes them
pub mod spacing {
    pub const PROPORTIONAL: i32 = 0;
    pub const DUAL: i32 = 90;
    pub const MONO: i32 = 100;
    pub const CHARCELL: i32 = 110;
}

/// An unordered mapping from attribute keys to values
///
/// Multiple values per key are allowed; insertion order is preserved per
/// key, which is how the auxiliary display name rides along on `File`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontPattern {
    entries: Vec<(Attr, PatternValue)>,
}

impl FontPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, attr: Attr, value: PatternValue) {
        self.entries.push((attr, value));
    }

    pub fn add_str(&mut self, attr: Attr, value: impl Into<String>) {
        self.add(attr, PatternValue::Str(value.into()));
    }

    pub fn add_int(&mut self, attr: Attr, value: i32) {
        self.add(attr, PatternValue::Int(value));
    }

    pub fn add_double(&mut self, attr: Attr, value: f64) {
        self.add(attr, PatternValue::Double(value));
    }

    pub fn add_bool(&mut self, attr: Attr, value: bool) {
        self.add(attr, PatternValue::Bool(value));
    }

    /// The n-th value stored under ATTR, if any
    pub fn get(&self, attr: Attr, index: usize) -> Option<&PatternValue> {
        self.entries
            .iter()
            .filter(|(a, _)| *a == attr)
            .map(|(_, v)| v)
            .nth(index)
    }

    pub fn get_str(&self, attr: Attr, index: usize) -> Option<&str> {
        match self.get(attr, index) {
            Some(PatternValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_int(&self, attr: Attr, index: usize) -> Option<i32> {
        match self.get(attr, index) {
            Some(PatternValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Doubles also accept integer-typed values; size attributes arrive in
    /// either form depending on which naming format produced the pattern.
    pub fn get_double(&self, attr: Attr, index: usize) -> Option<f64> {
        match self.get(attr, index) {
            Some(PatternValue::Double(v)) => Some(*v),
            Some(PatternValue::Int(v)) => Some(f64::from(*v)),
            _ => None,
        }
    }

    pub fn get_bool(&self, attr: Attr, index: usize) -> Option<bool> {
        match self.get(attr, index) {
            Some(PatternValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multivalue_file() {
        let mut p = FontPattern::new();
        p.add_str(Attr::File, "/fonts/dejavu.ttf");
        p.add_str(Attr::File, ":file=/fonts/dejavu.ttf:pixelsize=12");
        assert_eq!(p.get_str(Attr::File, 0), Some("/fonts/dejavu.ttf"));
        assert_eq!(
            p.get_str(Attr::File, 1),
            Some(":file=/fonts/dejavu.ttf:pixelsize=12")
        );
        assert_eq!(p.get_str(Attr::File, 2), None);
    }

    #[test]
    fn test_typed_getters() {
        let mut p = FontPattern::new();
        p.add_int(Attr::Weight, weight::BOLD);
        p.add_double(Attr::PixelSize, 12.5);
        p.add_bool(Attr::Antialias, true);
        assert_eq!(p.get_int(Attr::Weight, 0), Some(200));
        assert_eq!(p.get_double(Attr::PixelSize, 0), Some(12.5));
        assert_eq!(p.get_bool(Attr::Antialias, 0), Some(true));
        // Wrong-typed reads miss rather than coerce
        assert_eq!(p.get_str(Attr::Weight, 0), None);
    }

    #[test]
    fn test_int_read_as_double() {
        let mut p = FontPattern::new();
        p.add_int(Attr::PixelSize, 14);
        assert_eq!(p.get_double(Attr::PixelSize, 0), Some(14.0));
    }
}

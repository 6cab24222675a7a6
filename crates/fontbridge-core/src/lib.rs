//! Fontbridge core: shared types and seams for the legacy-name font backend
//!
//! The backend sits between a host text-layout engine and the system font
//! matcher/rasterizer. This crate holds everything both sides agree on:
//!
//! - [`pattern::FontPattern`] - the attribute-pattern format the matcher speaks
//! - [`traits`] - the collaborator seams (rasterizer, display session, surface)
//! - [`error`] - the recoverable error kinds, none fatal to the process
//! - [`stats::FontStats`] - the per-session registry the host polls for relayout
//!
//! The driver logic itself lives in the `fontbridge` crate; legacy-name
//! translation lives in `fontbridge-xlfd`.

// this_file: crates/fontbridge-core/src/lib.rs

pub mod entity;
pub mod error;
pub mod pattern;
pub mod stats;
pub mod traits;

pub use entity::{FontEntity, FontSpec, SpecSize};
pub use error::{AllocError, BridgeError, GlyphError, OpenError, ParseError, Result};
pub use pattern::{Attr, FontPattern, PatternValue};
pub use stats::{FontStats, SharedFontStats};
pub use traits::{
    DisplaySession, DrawSurface, GcId, InputGuard, RasterFont, Rasterizer, Style,
};

/// The data structures that cross the seams
pub mod types {
    /// Unique identifier for a glyph within a rasterizer font
    pub type GlyphId = u32;

    /// Sentinel for "this font has no glyph for that codepoint"
    pub const GLYPH_NONE: GlyphId = GlyphId::MAX;

    /// A display pixel value as stored in a graphics context
    pub type Pixel = u64;

    /// Foreground/background pixels read out of a graphics context
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GcValues {
        pub foreground: Pixel,
        pub background: Pixel,
    }

    /// A fully resolved render color: pixel plus 16-bit channels
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct RenderColor {
        pub pixel: Pixel,
        pub red: u16,
        pub green: u16,
        pub blue: u16,
        pub alpha: u16,
    }

    /// Ink-and-advance extents for a measured glyph run
    ///
    /// `x`/`y` locate the ink box relative to the pen origin (positive `y`
    /// is above the baseline); `x_off`/`y_off` are the pen advance.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct GlyphExtents {
        pub x: i32,
        pub y: i32,
        pub width: u32,
        pub height: u32,
        pub x_off: i32,
        pub y_off: i32,
    }

    /// What the host's metrics slots expect for a glyph run
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct TextMetrics {
        pub lbearing: i32,
        pub rbearing: i32,
        /// Total advance of the run
        pub width: i32,
        /// Signed ink extent above the baseline
        pub ascent: i32,
        /// Signed ink extent below the baseline
        pub descent: i32,
    }

    /// Rectangular clip for a draw call
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClipRect {
        pub x: i32,
        pub y: i32,
        pub width: u32,
        pub height: u32,
    }

    /// An outline point in font-design units, not pixels
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OutlinePoint {
        pub x: i64,
        pub y: i64,
    }

    /// Spacing class derived from a font's resolved pattern
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SpacingClass {
        Proportional,
        Fixed,
    }
}

pub use types::{
    ClipRect, GcValues, GlyphExtents, GlyphId, OutlinePoint, Pixel, RenderColor, SpacingClass,
    TextMetrics, GLYPH_NONE,
};

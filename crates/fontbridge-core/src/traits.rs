//! The trait seams between this backend and its collaborators
//!
//! The backend consumes two external libraries it never reimplements: the
//! system font matcher/rasterizer and the display connection. Both are fixed
//! interfaces expressed here as traits, so the driver logic can be exercised
//! against mocks and bound to the real libraries at the edges.

// this_file: crates/fontbridge-core/src/traits.rs

use crate::error::{AllocError, OpenError};
use crate::pattern::FontPattern;
use crate::types::{ClipRect, GcValues, GlyphExtents, GlyphId, OutlinePoint, Pixel, RenderColor};

/// The system font matcher and rasterizer
pub trait Rasterizer: Send + Sync {
    /// Ask the system for the best installed match for PATTERN
    fn match_pattern(&self, pattern: &FontPattern) -> Result<FontPattern, OpenError>;

    /// Open a font resource from a fully resolved pattern
    ///
    /// The rasterizer takes ownership of PATTERN; it is released when the
    /// returned font is dropped.
    fn open_pattern(&self, pattern: FontPattern) -> Result<Box<dyn RasterFont>, OpenError>;
}

/// One opened rasterizer font object
///
/// Dropping the font closes the underlying resource. The outline face is a
/// locked view derived from this object: it must be unlocked before the
/// font is dropped, and [`RasterFont::outline_point`] only answers while
/// the lock is held.
pub trait RasterFont: Send + Sync {
    fn ascent(&self) -> i32;

    fn descent(&self) -> i32;

    fn max_advance_width(&self) -> i32;

    /// The resolved pattern the font was actually opened with
    ///
    /// Spacing, among others, is only reliable here, not on the pattern the
    /// caller supplied.
    fn pattern(&self) -> &FontPattern;

    /// Map a character to this font's glyph index
    ///
    /// Returns None when the font has no glyph for the codepoint.
    fn glyph_index(&self, ch: char) -> Option<GlyphId>;

    /// Batch-measure a run of glyph indices (one display round trip)
    fn glyph_extents(&self, glyphs: &[GlyphId]) -> GlyphExtents;

    /// Batch-measure a run of single-byte characters
    fn text_extents(&self, text: &[u8]) -> GlyphExtents;

    /// Acquire the outline-face view
    fn lock_outline(&mut self) -> Result<(), OpenError>;

    /// Release the outline-face view; required before the font is dropped
    fn unlock_outline(&mut self);

    /// Raw coordinates of an outline point, in font-design units
    ///
    /// None when the outline is not locked, the glyph has no outline
    /// representation (a bitmap, say), or POINT is out of range.
    fn outline_point(&self, glyph: GlyphId, point: usize) -> Option<OutlinePoint>;
}

/// One display connection bound to a target window/visual/colormap
///
/// `suspend_input`/`resume_input` bracket every operation that touches the
/// display or the rasterizer library; this is reentrancy protection against
/// signal-driven input handling, not thread synchronization. Implementations
/// keep a nesting depth, so scopes may nest freely.
pub trait DisplaySession: Send + Sync {
    /// Allocate a drawing surface bound to the session's target triple
    fn create_surface(&self) -> Result<Box<dyn DrawSurface>, AllocError>;

    /// Read the current foreground/background pixels of a graphics context
    fn gc_values(&self, gc: GcId) -> GcValues;

    /// Batched color-table lookup: fill in the rgb channels for each entry's
    /// pixel value, one round trip for the whole slice
    fn query_colors(&self, colors: &mut [RenderColor]);

    fn suspend_input(&self);

    fn resume_input(&self);
}

/// Identity of a graphics-context snapshot
///
/// The color cache compares these to decide whether cached colors were
/// resolved from the context now being drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GcId(pub u64);

/// Scoped input-blocking critical section
///
/// Held for the duration of any display/rasterizer call; the scope exits on
/// every path, including error returns, because the drop runs regardless.
pub struct InputGuard<'a> {
    session: &'a dyn DisplaySession,
}

impl<'a> InputGuard<'a> {
    pub fn new(session: &'a dyn DisplaySession) -> Self {
        session.suspend_input();
        Self { session }
    }
}

impl Drop for InputGuard<'_> {
    fn drop(&mut self) {
        self.session.resume_input();
    }
}

/// A destination surface glyphs are drawn onto
pub trait DrawSurface: Send + Sync {
    /// Restrict subsequent drawing to RECT
    fn set_clip(&mut self, rect: ClipRect);

    /// Return to the unclipped state
    fn clear_clip(&mut self);

    /// Fill a rectangle with COLOR
    fn fill_rect(&mut self, color: &RenderColor, x: i32, y: i32, width: u32, height: u32);

    /// Draw a run of glyph indices in one batched call
    fn draw_glyphs(
        &mut self,
        color: &RenderColor,
        font: &dyn RasterFont,
        x: i32,
        y: i32,
        glyphs: &[GlyphId],
    );
}

/// A style whose resolved colors this backend may cache
///
/// Supplied by the host; `foreground`/`background` are the style's logical
/// pixel values, `gc` identifies the graphics context the style draws with.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub foreground: Pixel,
    pub background: Pixel,
    pub gc: GcId,
}

//! The glyph pipeline: encode, measure, draw, and anchor-point lookup
//!
//! Stateless functions over a [`FontHandle`] and a [`RenderContext`]. The
//! caller has already shaped and selected glyphs; nothing here inspects
//! text.

// this_file: crates/fontbridge/src/glyph.rs

use fontbridge_core::{
    ClipRect, DisplaySession, DrawSurface, GcId, GlyphError, GlyphId, InputGuard, OutlinePoint,
    Style, TextMetrics, GLYPH_NONE,
};

use crate::font::FontHandle;
use crate::render::{resolve_colors, RenderContext};

/// A run of glyph indices with its pen position and advance width
///
/// `width` is the run's total advance as the host layout engine measured
/// it; the background rectangle spans it without a fresh metrics query.
#[derive(Debug, Clone, Copy)]
pub struct GlyphRun<'a> {
    pub glyphs: &'a [GlyphId],
    pub x: i32,
    pub y: i32,
    pub width: i32,
}

/// Clears the surface clip when the scope exits, on every path
struct ClipGuard<'a> {
    surface: &'a mut dyn DrawSurface,
    clipped: bool,
}

impl<'a> ClipGuard<'a> {
    fn new(surface: &'a mut dyn DrawSurface, clip: Option<ClipRect>) -> Self {
        if let Some(rect) = clip {
            surface.set_clip(rect);
        }
        Self {
            surface,
            clipped: clip.is_some(),
        }
    }

    fn surface(&mut self) -> &mut dyn DrawSurface {
        self.surface
    }
}

impl Drop for ClipGuard<'_> {
    fn drop(&mut self) {
        if self.clipped {
            self.surface.clear_clip();
        }
    }
}

/// Map CH to FONT's glyph index
///
/// Returns [`GLYPH_NONE`] when the font has no glyph for the codepoint;
/// this never fails otherwise.
pub fn encode_char(font: &FontHandle, ch: char) -> GlyphId {
    font.glyph_index(ch).unwrap_or(GLYPH_NONE)
}

/// Batch-measure a contiguous run of glyph indices
///
/// The returned ascent/descent are the run's signed ink extents, not the
/// font's fixed metrics.
pub fn measure_glyphs(
    session: &dyn DisplaySession,
    font: &FontHandle,
    glyphs: &[GlyphId],
) -> TextMetrics {
    let extents = {
        let _guard = InputGuard::new(session);
        font.raster().glyph_extents(glyphs)
    };
    TextMetrics {
        lbearing: -extents.x,
        rbearing: extents.width as i32 - extents.x,
        width: extents.x_off,
        ascent: extents.y,
        descent: extents.y - extents.height as i32,
    }
}

/// Draw RUN onto CONTEXT's surface; returns the number of glyphs drawn
///
/// Colors come from the context's cache, re-resolved against GC when the
/// caller draws with a different graphics context than the cache was built
/// from. With `with_background`, the run's advance width times the font's
/// full line height is filled behind the glyphs first. The clip, when set,
/// is scoped to this call.
#[allow(clippy::too_many_arguments)]
pub fn draw_glyphs(
    session: &dyn DisplaySession,
    font: &FontHandle,
    context: &mut RenderContext,
    style: &Style,
    gc: GcId,
    run: &GlyphRun<'_>,
    with_background: bool,
    clip: Option<ClipRect>,
) -> usize {
    let resolved = resolve_colors(session, style, gc, Some(context), with_background);

    let _guard = InputGuard::new(session);
    let ascent = font.ascent();
    let height = font.height();
    let mut scoped = ClipGuard::new(context.surface_mut(), clip);
    if with_background {
        if let Some(bg) = resolved.bg {
            // A non-positive advance fills nothing rather than wrapping.
            let fill_width = run.width.max(0) as u32;
            scoped
                .surface()
                .fill_rect(&bg, run.x, run.y - ascent, fill_width, height as u32);
        }
    }
    scoped
        .surface()
        .draw_glyphs(&resolved.fg, font.raster(), run.x, run.y, run.glyphs);
    drop(scoped);

    run.glyphs.len()
}

/// Raw coordinates of one outline point of GLYPH, in font-design units
///
/// Misses (bitmap-only glyph, point index out of range) are expected and
/// reported as [`GlyphError::NotFound`].
pub fn anchor_point(
    session: &dyn DisplaySession,
    font: &FontHandle,
    glyph: GlyphId,
    point: usize,
) -> Result<OutlinePoint, GlyphError> {
    let _guard = InputGuard::new(session);
    font.raster()
        .outline_point(glyph, point)
        .ok_or(GlyphError::NotFound)
}

//! Fontbridge: a legacy-name font backend over a system rasterizer
//!
//! The host text-layout engine hands this backend fully resolved font
//! specifications; the backend opens fonts, measures and draws glyph runs,
//! and translates between the legacy 14-field name format and the
//! attribute-pattern format the system matcher speaks. It does no shaping,
//! no line layout, and no font discovery policy of its own.
//!
//! The entry points mirror the driver table the host registers:
//!
//! - [`FontBackend::resolve_name`] - match a specification, return a legacy name
//! - [`FontBackend::open`] / [`FontBackend::close`] - font lifecycle
//! - [`FontBackend::prepare_style`] / [`FontBackend::end_style`] - per-style state
//! - [`FontBackend::encode_char`], [`FontBackend::measure_glyphs`],
//!   [`FontBackend::draw_glyphs`], [`FontBackend::anchor_point`] - the glyph
//!   pipeline
//!
//! Everything is single-threaded and synchronous; display round trips are
//! bracketed by the session's input-blocking scope, which is reentrancy
//! protection, not locking.

// this_file: crates/fontbridge/src/lib.rs

use std::sync::Arc;

pub mod font;
pub mod glyph;
pub mod render;

pub use font::{FontHandle, OpenParams};
pub use glyph::GlyphRun;
pub use render::{CacheTier, RenderContext, ResolvedColors};

pub use fontbridge_core::{
    AllocError, Attr, BridgeError, ClipRect, DisplaySession, DrawSurface, FontEntity, FontPattern,
    FontSpec, FontStats, GcId, GlyphError, GlyphId, OpenError, OutlinePoint, ParseError,
    RasterFont, Rasterizer, RenderColor, Result, SharedFontStats, SpacingClass, Style,
    TextMetrics, GLYPH_NONE,
};

/// The backend facade the host drives
///
/// Bundles the two collaborator seams and the per-session stats registry.
/// One backend per display connection; all operations run on the caller's
/// thread.
pub struct FontBackend {
    session: Arc<dyn DisplaySession>,
    rasterizer: Arc<dyn Rasterizer>,
    stats: SharedFontStats,
}

impl FontBackend {
    pub fn new(session: Arc<dyn DisplaySession>, rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self {
            session,
            rasterizer,
            stats: FontStats::shared(),
        }
    }

    /// The session's font statistics, for the host to poll
    pub fn stats(&self) -> &SharedFontStats {
        &self.stats
    }

    /// Match NAME against the installed fonts; the best match comes back
    /// re-encoded as a legacy 14-field name
    pub fn resolve_name(&self, name: &str) -> Result<String> {
        fontbridge_xlfd::resolve_name(self.rasterizer.as_ref(), name)
    }

    /// Fill SPEC's slots from a parsed name, legacy-shaped or free-form
    pub fn parse_name(&self, name: &str, spec: &mut FontSpec) -> Result<()> {
        fontbridge_xlfd::parse_into_spec(name, spec)?;
        Ok(())
    }

    /// Open the font behind ENTITY at the resolved pixel size
    pub fn open(&self, entity: &FontEntity, params: &OpenParams) -> Result<FontHandle> {
        let handle = FontHandle::open(
            self.session.as_ref(),
            self.rasterizer.as_ref(),
            &self.stats,
            entity,
            params,
        )?;
        Ok(handle)
    }

    /// Release HANDLE; exactly one close per successful open
    pub fn close(&self, handle: FontHandle) {
        handle.close(self.session.as_ref(), &self.stats);
    }

    /// Allocate per-style render state for STYLE's target
    pub fn prepare_style(&self, style: &Style) -> Result<RenderContext> {
        let context = render::prepare_style(self.session.as_ref(), style)?;
        Ok(context)
    }

    /// Tear down per-style render state
    pub fn end_style(&self, context: RenderContext) {
        render::end_style(self.session.as_ref(), context);
    }

    /// Map a codepoint to a glyph index, [`GLYPH_NONE`] when absent
    pub fn encode_char(&self, font: &FontHandle, ch: char) -> GlyphId {
        glyph::encode_char(font, ch)
    }

    /// Batch-measure a run of glyph indices
    pub fn measure_glyphs(&self, font: &FontHandle, glyphs: &[GlyphId]) -> TextMetrics {
        glyph::measure_glyphs(self.session.as_ref(), font, glyphs)
    }

    /// Draw a glyph run; returns the number of glyphs drawn
    #[allow(clippy::too_many_arguments)]
    pub fn draw_glyphs(
        &self,
        font: &FontHandle,
        context: &mut RenderContext,
        style: &Style,
        gc: GcId,
        run: &GlyphRun<'_>,
        with_background: bool,
        clip: Option<ClipRect>,
    ) -> usize {
        glyph::draw_glyphs(
            self.session.as_ref(),
            font,
            context,
            style,
            gc,
            run,
            with_background,
            clip,
        )
    }

    /// Outline point lookup in font-design units
    pub fn anchor_point(
        &self,
        font: &FontHandle,
        glyph: GlyphId,
        point: usize,
    ) -> Result<OutlinePoint> {
        let p = glyph::anchor_point(self.session.as_ref(), font, glyph, point)?;
        Ok(p)
    }
}

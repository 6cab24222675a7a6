//! Per-style render state: drawing surface plus the two-color cache
//!
//! Resolving a color through the display's color table costs a round trip,
//! and the hot path (drawing the same styled text over and over) would pay
//! it on every run. The cache built by [`prepare_style`] short-circuits
//! that in two tiers: an exact hit when the caller draws with the same
//! graphics context the cache was built from, and a heuristic hit when the
//! live pixel values still match the style's logical colors, which covers
//! the common foreground/background swap. Only what neither tier resolves
//! goes to the color table, batched into a single query.

// this_file: crates/fontbridge/src/render.rs

use fontbridge_core::{
    AllocError, DisplaySession, DrawSurface, GcId, InputGuard, RenderColor, Style,
};

/// Per-(font, style) render state
pub struct RenderContext {
    surface: Box<dyn DrawSurface>,
    fg: RenderColor,
    bg: RenderColor,
    /// The graphics-context snapshot the cached colors were resolved from
    source_gc: GcId,
}

impl RenderContext {
    pub fn foreground(&self) -> RenderColor {
        self.fg
    }

    pub fn background(&self) -> RenderColor {
        self.bg
    }

    pub fn source_gc(&self) -> GcId {
        self.source_gc
    }

    pub(crate) fn surface_mut(&mut self) -> &mut dyn DrawSurface {
        self.surface.as_mut()
    }
}

/// Which tier of the color cache answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTier {
    /// Same graphics context the cache was built from; zero queries
    Exact,
    /// Live gc pixels matched the style's logical colors; zero queries
    Heuristic,
    /// At least one batched color-table lookup was issued
    Query,
}

/// The outcome of a color resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColors {
    pub fg: RenderColor,
    /// Present only when the caller asked for the background
    pub bg: Option<RenderColor>,
    pub tier: CacheTier,
}

/// Resolve STYLE's drawing colors for the graphics context GC
///
/// CACHED, when given, must be the render context previously prepared for
/// this style; its colors are reused when they can be proven current.
/// Colors are never assumed stale-valid: a gc whose pixels match neither
/// logical color goes to the color table.
pub fn resolve_colors(
    session: &dyn DisplaySession,
    style: &Style,
    gc: GcId,
    cached: Option<&RenderContext>,
    want_background: bool,
) -> ResolvedColors {
    if let Some(context) = cached {
        if context.source_gc == gc {
            return ResolvedColors {
                fg: context.fg,
                bg: want_background.then_some(context.bg),
                tier: CacheTier::Exact,
            };
        }
    }

    let _guard = InputGuard::new(session);
    let values = session.gc_values(gc);
    let mut fg: Option<RenderColor> = None;
    let mut bg: Option<RenderColor> = None;

    if let Some(context) = cached {
        // The gc changed identity but maybe not color: pixel values that
        // still equal the style's logical fg/bg (possibly swapped) map onto
        // the cached pair, each side resolved independently.
        if values.foreground == style.foreground {
            fg = Some(context.fg);
        } else if values.foreground == style.background {
            fg = Some(context.bg);
        }
        if want_background {
            if values.background == style.background {
                bg = Some(context.bg);
            } else if values.background == style.foreground {
                bg = Some(context.fg);
            }
        }
    }

    let need_fg = fg.is_none();
    let need_bg = want_background && bg.is_none();
    if !need_fg && !need_bg {
        return ResolvedColors {
            fg: fg.unwrap_or_default(),
            bg,
            tier: CacheTier::Heuristic,
        };
    }

    // One round trip for up to two colors.
    let mut query = Vec::with_capacity(2);
    if need_fg {
        query.push(RenderColor {
            pixel: values.foreground,
            ..Default::default()
        });
    }
    if need_bg {
        query.push(RenderColor {
            pixel: values.background,
            ..Default::default()
        });
    }
    session.query_colors(&mut query);

    let mut resolved = query.into_iter();
    if need_fg {
        let mut color = resolved.next().unwrap_or_default();
        color.alpha = 0xFFFF;
        fg = Some(color);
    }
    if need_bg {
        let mut color = resolved.next().unwrap_or_default();
        color.alpha = 0xFFFF;
        bg = Some(color);
    }

    ResolvedColors {
        fg: fg.unwrap_or_default(),
        bg,
        tier: CacheTier::Query,
    }
}

/// Allocate the per-style render state: surface plus resolved color pair
pub fn prepare_style(
    session: &dyn DisplaySession,
    style: &Style,
) -> Result<RenderContext, AllocError> {
    let _guard = InputGuard::new(session);
    let surface = session.create_surface()?;
    let resolved = resolve_colors(session, style, style.gc, None, true);
    log::debug!("prepared render context for gc {:?}", style.gc);
    Ok(RenderContext {
        surface,
        fg: resolved.fg,
        bg: resolved.bg.unwrap_or_default(),
        source_gc: style.gc,
    })
}

/// Tear down the per-style render state
pub fn end_style(session: &dyn DisplaySession, context: RenderContext) {
    let _guard = InputGuard::new(session);
    drop(context);
}

//! Mock display session and rasterizer for driving the backend in tests

// Each test binary exercises a different slice of this module.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use fontbridge::{
    AllocError, Attr, ClipRect, DisplaySession, DrawSurface, FontEntity, FontPattern, GcId,
    GlyphId, OpenError, OutlinePoint, RasterFont, Rasterizer, RenderColor,
};
use fontbridge_core::types::{GcValues, GlyphExtents, Pixel};

/// Everything a draw call did to the surface, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    SetClip(ClipRect),
    ClearClip,
    FillRect {
        pixel: Pixel,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    DrawGlyphs {
        pixel: Pixel,
        x: i32,
        y: i32,
        count: usize,
    },
}

pub type OpLog = Arc<Mutex<Vec<SurfaceOp>>>;

pub struct MockSurface {
    ops: OpLog,
}

impl DrawSurface for MockSurface {
    fn set_clip(&mut self, rect: ClipRect) {
        self.ops.lock().push(SurfaceOp::SetClip(rect));
    }

    fn clear_clip(&mut self) {
        self.ops.lock().push(SurfaceOp::ClearClip);
    }

    fn fill_rect(&mut self, color: &RenderColor, x: i32, y: i32, width: u32, height: u32) {
        self.ops.lock().push(SurfaceOp::FillRect {
            pixel: color.pixel,
            x,
            y,
            width,
            height,
        });
    }

    fn draw_glyphs(
        &mut self,
        color: &RenderColor,
        _font: &dyn RasterFont,
        x: i32,
        y: i32,
        glyphs: &[GlyphId],
    ) {
        self.ops.lock().push(SurfaceOp::DrawGlyphs {
            pixel: color.pixel,
            x,
            y,
            count: glyphs.len(),
        });
    }
}

/// Display session whose color table maps pixel P to channel P * 0x101
pub struct MockSession {
    gcs: Mutex<HashMap<u64, GcValues>>,
    color_queries: Mutex<u32>,
    input_depth: Mutex<i32>,
    pub ops: OpLog,
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            gcs: Mutex::new(HashMap::new()),
            color_queries: Mutex::new(0),
            input_depth: Mutex::new(0),
            ops: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_gc(&self, gc: GcId, foreground: Pixel, background: Pixel) {
        self.gcs.lock().insert(
            gc.0,
            GcValues {
                foreground,
                background,
            },
        );
    }

    pub fn color_queries(&self) -> u32 {
        *self.color_queries.lock()
    }

    pub fn input_depth(&self) -> i32 {
        *self.input_depth.lock()
    }

    pub fn take_ops(&self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops.lock())
    }
}

impl DisplaySession for MockSession {
    fn create_surface(&self) -> Result<Box<dyn DrawSurface>, AllocError> {
        Ok(Box::new(MockSurface {
            ops: self.ops.clone(),
        }))
    }

    fn gc_values(&self, gc: GcId) -> GcValues {
        self.gcs.lock().get(&gc.0).copied().unwrap_or(GcValues {
            foreground: 0,
            background: 0,
        })
    }

    fn query_colors(&self, colors: &mut [RenderColor]) {
        *self.color_queries.lock() += 1;
        for color in colors {
            let channel = (color.pixel as u16).wrapping_mul(0x101);
            color.red = channel;
            color.green = channel;
            color.blue = channel;
        }
    }

    fn suspend_input(&self) {
        *self.input_depth.lock() += 1;
    }

    fn resume_input(&self) {
        *self.input_depth.lock() -= 1;
    }
}

/// Rasterizer serving one mock face per open
pub struct MockRasterizer {
    /// Spacing value the opened font's resolved pattern reports
    pub spacing: Option<i32>,
    /// Advance reported for the space character
    pub space_advance: i32,
    /// Advance reported for every other single-byte character
    pub char_advance: i32,
    pub ascent: i32,
    pub descent: i32,
    pub fail_open: bool,
    /// Codepoints the face has no glyph for
    pub missing: Vec<char>,
    /// Outline points per glyph; glyphs absent here are bitmap-only
    pub outlines: HashMap<GlyphId, Vec<OutlinePoint>>,
}

impl Default for MockRasterizer {
    fn default() -> Self {
        Self {
            spacing: None,
            space_advance: 4,
            char_advance: 6,
            ascent: 8,
            descent: 2,
            fail_open: false,
            missing: Vec::new(),
            outlines: HashMap::new(),
        }
    }
}

impl Rasterizer for MockRasterizer {
    fn match_pattern(&self, pattern: &FontPattern) -> Result<FontPattern, OpenError> {
        // Resolve like the system matcher would: symbolic weight/slant
        // become reference values, and the match gains a backing file.
        let mut matched = FontPattern::new();
        if let Some(foundry) = pattern.get_str(Attr::Foundry, 0) {
            matched.add_str(Attr::Foundry, foundry);
        }
        let family = pattern.get_str(Attr::Family, 0).unwrap_or("mockfont");
        matched.add_str(Attr::Family, family);
        if let Some(weight) = pattern
            .get_int(Attr::Weight, 0)
            .or_else(|| pattern.get_str(Attr::Weight, 0).and_then(fontbridge_xlfd::weight_value))
        {
            matched.add_int(Attr::Weight, weight);
        }
        if let Some(slant) = pattern
            .get_int(Attr::Slant, 0)
            .or_else(|| pattern.get_str(Attr::Slant, 0).and_then(fontbridge_xlfd::slant_value))
        {
            matched.add_int(Attr::Slant, slant);
        }
        if let Some(px) = pattern
            .get_double(Attr::PixelSize, 0)
            .or_else(|| pattern.get_double(Attr::Size, 0))
        {
            matched.add_double(Attr::PixelSize, px);
        }
        matched.add_str(Attr::File, format!("/mock/{family}.ttf"));
        Ok(matched)
    }

    fn open_pattern(&self, pattern: FontPattern) -> Result<Box<dyn RasterFont>, OpenError> {
        if self.fail_open {
            return Err(OpenError::Rasterizer("mock open failure".into()));
        }
        let mut resolved = pattern;
        if let Some(spacing) = self.spacing {
            resolved.add_int(Attr::Spacing, spacing);
        }
        Ok(Box::new(MockRasterFont {
            pattern: resolved,
            ascent: self.ascent,
            descent: self.descent,
            max_advance: self.char_advance + 2,
            space_advance: self.space_advance,
            char_advance: self.char_advance,
            missing: self.missing.clone(),
            outlines: self.outlines.clone(),
            locked: false,
        }))
    }
}

pub struct MockRasterFont {
    pattern: FontPattern,
    ascent: i32,
    descent: i32,
    max_advance: i32,
    space_advance: i32,
    char_advance: i32,
    missing: Vec<char>,
    outlines: HashMap<GlyphId, Vec<OutlinePoint>>,
    locked: bool,
}

impl RasterFont for MockRasterFont {
    fn ascent(&self) -> i32 {
        self.ascent
    }

    fn descent(&self) -> i32 {
        self.descent
    }

    fn max_advance_width(&self) -> i32 {
        self.max_advance
    }

    fn pattern(&self) -> &FontPattern {
        &self.pattern
    }

    fn glyph_index(&self, ch: char) -> Option<GlyphId> {
        if self.missing.contains(&ch) {
            None
        } else {
            Some(ch as GlyphId)
        }
    }

    fn glyph_extents(&self, glyphs: &[GlyphId]) -> GlyphExtents {
        let advance = self.char_advance * glyphs.len() as i32;
        GlyphExtents {
            x: 1,
            y: self.ascent,
            width: (advance - 2).max(0) as u32,
            height: (self.ascent + self.descent) as u32,
            x_off: advance,
            y_off: 0,
        }
    }

    fn text_extents(&self, text: &[u8]) -> GlyphExtents {
        let advance: i32 = text
            .iter()
            .map(|b| {
                if *b == b' ' {
                    self.space_advance
                } else {
                    self.char_advance
                }
            })
            .sum();
        GlyphExtents {
            x: 0,
            y: self.ascent,
            width: advance.max(0) as u32,
            height: (self.ascent + self.descent) as u32,
            x_off: advance,
            y_off: 0,
        }
    }

    fn lock_outline(&mut self) -> Result<(), OpenError> {
        self.locked = true;
        Ok(())
    }

    fn unlock_outline(&mut self) {
        self.locked = false;
    }

    fn outline_point(&self, glyph: GlyphId, point: usize) -> Option<OutlinePoint> {
        if !self.locked {
            return None;
        }
        self.outlines.get(&glyph)?.get(point).copied()
    }
}

/// A font entity backed by FILE, the way the matcher would hand it over
pub fn entity_with_file(file: &str) -> FontEntity {
    let mut backing = FontPattern::new();
    backing.add_str(Attr::File, file);
    FontEntity {
        backing: Some(backing),
        ..FontEntity::default()
    }
}

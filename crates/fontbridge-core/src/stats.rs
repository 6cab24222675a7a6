//! Per-session font statistics the host reads to invalidate glyph layout
//!
//! The registry is owned by the display/session context and passed
//! explicitly wherever open/close needs it; it is never a hidden process
//! global. Only open/close mutate it, the host only reads it.

// this_file: crates/fontbridge-core/src/stats.rs

use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handle to a session's font statistics
pub type SharedFontStats = Arc<Mutex<FontStats>>;

/// Counters and minima over the fonts currently open on one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontStats {
    open_fonts: u32,
    smallest_font_height: i32,
    smallest_char_width: i32,
    layout_dirty: bool,
}

impl FontStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh shared registry for a new session
    pub fn shared() -> SharedFontStats {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Record a successful font open
    ///
    /// The dirty flag is raised when the new font shrinks either minimum;
    /// the host must then invalidate any cached glyph-matrix layout.
    pub fn note_open(&mut self, height: i32, min_width: i32) {
        self.open_fonts += 1;
        if self.open_fonts == 1 {
            self.smallest_font_height = height;
            self.smallest_char_width = min_width;
            self.layout_dirty = true;
        } else {
            if self.smallest_font_height > height {
                self.smallest_font_height = height;
                self.layout_dirty = true;
            }
            if self.smallest_char_width > min_width {
                self.smallest_char_width = min_width;
                self.layout_dirty = true;
            }
        }
    }

    /// Record a font close; the count never goes below zero
    pub fn note_close(&mut self) {
        self.open_fonts = self.open_fonts.saturating_sub(1);
    }

    pub fn open_fonts(&self) -> u32 {
        self.open_fonts
    }

    pub fn smallest_font_height(&self) -> i32 {
        self.smallest_font_height
    }

    pub fn smallest_char_width(&self) -> i32 {
        self.smallest_char_width
    }

    pub fn layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Host acknowledges the relayout
    pub fn clear_dirty(&mut self) {
        self.layout_dirty = false;
    }
}

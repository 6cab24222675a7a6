//! Font lifecycle: open a rasterizer font at a pixel size, derive metrics
//!
//! `open` is the only place metrics are computed; everything a [`FontHandle`]
//! exposes afterwards is immutable. The handle is the sole owner of the
//! rasterizer font object and of the outline-face lock derived from it, and
//! `close` consumes the handle, so each successful open is closed at most
//! once by construction.

// this_file: crates/fontbridge/src/font.rs

use std::sync::OnceLock;

use fontbridge_core::pattern::spacing;
use fontbridge_core::{
    Attr, DisplaySession, FontEntity, FontPattern, GlyphId, InputGuard, OpenError, RasterFont,
    Rasterizer, SharedFontStats, SpacingClass,
};

/// How a font should be opened
#[derive(Debug, Clone)]
pub struct OpenParams {
    /// Caller's pixel size, used when the entity leaves its own size at zero
    pub pixel_size: i32,
    pub antialias: bool,
}

impl Default for OpenParams {
    fn default() -> Self {
        Self {
            pixel_size: 16,
            antialias: true,
        }
    }
}

/// The 95 printable ASCII characters, for proportional-width sampling
///
/// Computed once, lazily, then immutable; index 0 is the space character.
fn ascii_printable() -> &'static [u8; 95] {
    static ASCII_PRINTABLE: OnceLock<[u8; 95]> = OnceLock::new();
    ASCII_PRINTABLE.get_or_init(|| {
        let mut buf = [0u8; 95];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = b' ' + i as u8;
        }
        buf
    })
}

/// One opened font resource with its derived metrics
pub struct FontHandle {
    font: Box<dyn RasterFont>,
    name: String,
    file: String,
    pixel_size: i32,
    ascent: i32,
    descent: i32,
    max_advance_width: i32,
    space_width: i32,
    average_width: i32,
    min_width: i32,
    spacing: SpacingClass,
}

impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontHandle")
            .field("name", &self.name)
            .field("file", &self.file)
            .field("pixel_size", &self.pixel_size)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .field("max_advance_width", &self.max_advance_width)
            .field("space_width", &self.space_width)
            .field("average_width", &self.average_width)
            .field("min_width", &self.min_width)
            .field("spacing", &self.spacing)
            .finish_non_exhaustive()
    }
}

impl FontHandle {
    /// Open the font behind ENTITY's backing pattern at the resolved size
    ///
    /// Everything that can fail does so before the stats registry is
    /// touched, and each partially acquired resource is owned by a value
    /// that releases it when the error propagates.
    pub fn open(
        session: &dyn DisplaySession,
        rasterizer: &dyn Rasterizer,
        stats: &SharedFontStats,
        entity: &FontEntity,
        params: &OpenParams,
    ) -> Result<Self, OpenError> {
        let backing = entity.backing.as_ref().ok_or(OpenError::MissingPattern)?;
        let file = backing
            .get_str(Attr::File, 0)
            .ok_or(OpenError::MissingFile)?
            .to_owned();

        let mut size = entity.pixel_size;
        if size == 0 {
            size = params.pixel_size;
        }

        // A second File value, when the matcher left one, is the display
        // name; otherwise synthesize one from the file and size.
        let name = match backing.get_str(Attr::File, 1) {
            Some(name) => name.to_owned(),
            None => format!(":file={file}:pixelsize={size}"),
        };

        let mut pat = FontPattern::new();
        pat.add_str(Attr::File, &file);
        pat.add_double(Attr::PixelSize, f64::from(params.pixel_size));
        pat.add_bool(Attr::Antialias, params.antialias);

        let guard = InputGuard::new(session);
        let mut font = rasterizer.open_pattern(pat)?;
        font.lock_outline()?;
        log::debug!("opened font {name} at pixel size {size}");

        let ascent = font.ascent();
        let descent = font.descent();
        let max_advance_width = font.max_advance_width();

        let spacing_value = font
            .pattern()
            .get_int(Attr::Spacing, 0)
            .unwrap_or(spacing::PROPORTIONAL);

        let (spacing, space_width, average_width) = if spacing_value != spacing::PROPORTIONAL {
            (SpacingClass::Fixed, max_advance_width, max_advance_width)
        } else {
            let printable = ascii_printable();
            let space = font.text_extents(&printable[..1]);
            let mut space_width = space.x_off;
            if space_width <= 0 {
                // Compatibility workaround for faces that report no advance
                // for the space character; do not extend to other metrics.
                log::debug!(
                    "font {name} reports space advance {space_width}, substituting pixel size"
                );
                space_width = params.pixel_size;
            }
            let rest = font.text_extents(&printable[1..]);
            let average_width = (space_width + rest.x_off) / 95;
            (SpacingClass::Proportional, space_width, average_width)
        };
        drop(guard);

        // The rasterizer provides no minimum-width query; the space width
        // is the closest substitute.
        let min_width = space_width;
        let height = ascent + descent;

        stats.lock().note_open(height, min_width);

        Ok(Self {
            font,
            name,
            file,
            pixel_size: size,
            ascent,
            descent,
            max_advance_width,
            space_width,
            average_width,
            min_width,
            spacing,
        })
    }

    /// Release the font: unlock the outline face, then close the
    /// rasterizer object (that order is contractual), then drop the count.
    pub fn close(mut self, session: &dyn DisplaySession, stats: &SharedFontStats) {
        log::debug!("closing font {}", self.name);
        {
            let _guard = InputGuard::new(session);
            self.font.unlock_outline();
            drop(self.font);
        }
        stats.lock().note_close();
    }

    pub(crate) fn raster(&self) -> &dyn RasterFont {
        self.font.as_ref()
    }

    /// Map a codepoint to this font's glyph index, if it has one
    pub(crate) fn glyph_index(&self, ch: char) -> Option<GlyphId> {
        self.font.glyph_index(ch)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn pixel_size(&self) -> i32 {
        self.pixel_size
    }

    pub fn ascent(&self) -> i32 {
        self.ascent
    }

    pub fn descent(&self) -> i32 {
        self.descent
    }

    /// Full line height: ascent plus descent
    pub fn height(&self) -> i32 {
        self.ascent + self.descent
    }

    pub fn max_advance_width(&self) -> i32 {
        self.max_advance_width
    }

    pub fn space_width(&self) -> i32 {
        self.space_width
    }

    pub fn average_width(&self) -> i32 {
        self.average_width
    }

    pub fn min_width(&self) -> i32 {
        self.min_width
    }

    pub fn spacing(&self) -> SpacingClass {
        self.spacing
    }
}

//! Error types for Fontbridge

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for Fontbridge
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("name parsing failed: {0}")]
    Parse(#[from] ParseError),

    #[error("font open failed: {0}")]
    Open(#[from] OpenError),

    #[error("render allocation failed: {0}")]
    Alloc(#[from] AllocError),

    #[error("glyph lookup failed: {0}")]
    Glyph(#[from] GlyphError),
}

/// Name and pattern parsing errors
///
/// Always recoverable: the caller retries with a different specification or
/// fails the font lookup gracefully.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty font name")]
    Empty,

    #[error("field {position} is not numeric: {value:?}")]
    BadField { position: usize, value: String },
}

/// Font opening errors
///
/// Recoverable at the font-selection level; the caller should try the next
/// candidate font.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("font entity carries no backing pattern")]
    MissingPattern,

    #[error("backing pattern has no file path")]
    MissingFile,

    #[error("no installed font matches the pattern: {0}")]
    MatchFailed(String),

    #[error("rasterizer rejected the pattern: {0}")]
    Rasterizer(String),

    #[error("could not lock the outline face: {0}")]
    FaceLock(String),
}

/// Per-style allocation errors
#[derive(Debug, Error)]
pub enum AllocError {
    #[error("drawing surface creation failed: {0}")]
    Surface(String),
}

/// Glyph data lookup misses
///
/// Expected and non-exceptional; the caller treats this as "no data".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlyphError {
    #[error("no outline point at the requested glyph and index")]
    NotFound,
}

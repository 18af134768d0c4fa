//! Format exchange: pure conversions between palette documents and
//! serialized text.
//!
//! Formats are a closed enumeration; parse/format dispatch is an exhaustive
//! match, so adding a format without wiring both directions fails to
//! compile. Parsing is all-or-nothing per file: any malformed declaration
//! fails the whole parse and no palettes are created.

mod css;
mod json;

use crate::model::PaletteDoc;
use thiserror::Error;

/// Fallback stem when exporting more than one palette to a single file.
pub const MULTI_EXPORT_STEM: &str = "MyHuebismPalettes";

/// Exchange errors, surfaced to the user verbatim.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Unsupported file extension: {0:?}")]
    UnknownExtension(String),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed CSS: {0}")]
    Css(String),
    #[error(transparent)]
    Color(#[from] crate::color::ColorError),
}

/// The supported exchange formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatKind {
    #[default]
    Json,
    Css,
}

impl FormatKind {
    /// Every format, in UI order.
    pub const ALL: [FormatKind; 2] = [FormatKind::Json, FormatKind::Css];

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Css => "css",
        }
    }

    /// Dispatch on a file extension, case-insensitive. `None` for anything
    /// unregistered: callers reject the file before reading further.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "css" => Some(Self::Css),
            _ => None,
        }
    }

    /// Dispatch on a full filename.
    pub fn from_filename(filename: &str) -> Result<Self, ExchangeError> {
        let ext = filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        Self::from_extension(ext)
            .ok_or_else(|| ExchangeError::UnknownExtension(ext.to_string()))
    }
}

/// Parse serialized text into palette documents.
pub fn parse(kind: FormatKind, text: &str) -> Result<Vec<PaletteDoc>, ExchangeError> {
    match kind {
        FormatKind::Json => json::parse(text),
        FormatKind::Css => css::parse(text),
    }
}

/// Serialize palette documents into text.
pub fn format(kind: FormatKind, palettes: &[PaletteDoc]) -> String {
    match kind {
        FormatKind::Json => json::format(palettes),
        FormatKind::Css => css::format(palettes),
    }
}

/// Proposed export filename: `<paletteName>.<ext>` for a single palette, a
/// fixed multi-palette stem otherwise.
pub fn export_filename(palettes: &[PaletteDoc], kind: FormatKind) -> String {
    let stem = match palettes {
        [only] => only.name.as_str(),
        _ => MULTI_EXPORT_STEM,
    };
    format!("{stem}.{}", kind.extension())
}

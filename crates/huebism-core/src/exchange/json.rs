//! JSON exchange: lossless for names, colors and order.

use super::ExchangeError;
use crate::color::Hsl;
use crate::model::PaletteDoc;

/// Parse a JSON palette array. Every color is validated up front so a bad
/// hex string fails the whole file.
pub fn parse(text: &str) -> Result<Vec<PaletteDoc>, ExchangeError> {
    let docs: Vec<PaletteDoc> = serde_json::from_str(text)?;
    for doc in &docs {
        for swatch in &doc.swatches {
            Hsl::from_hex(&swatch.color)?;
        }
    }
    Ok(docs)
}

/// Serialize palettes as a pretty-printed JSON array.
pub fn format(palettes: &[PaletteDoc]) -> String {
    // PaletteDoc serialization cannot fail: plain strings and vectors.
    serde_json::to_string_pretty(palettes).unwrap_or_default()
}

//! Predefined reference palettes.
//!
//! The read-only swatch set shown behind the custom palette in the plot
//! (web colors, crayola, …). The data files themselves live outside the
//! core; this module parses their shape and keeps the loaded set. Reference
//! swatches are detached: they never belong to a palette and are not
//! editable.

use crate::color::Hsl;
use crate::model::Swatch;
use serde::Deserialize;
use thiserror::Error;

/// Default set name used when none was persisted.
pub const DEFAULT_REFERENCE: &str = "web colors";

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Malformed reference palette: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Color(#[from] crate::color::ColorError),
}

/// One entry of a reference data file.
#[derive(Debug, Deserialize)]
struct ReferenceEntry {
    name: String,
    hex: String,
}

/// A loaded reference palette.
#[derive(Debug, Default)]
pub struct ReferenceSet {
    /// Display name of the set ("web colors", "xkcd", …). Persisted so the
    /// same set reloads next session.
    pub name: String,
    swatches: Vec<Swatch>,
}

impl ReferenceSet {
    /// An empty set ("none").
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            swatches: Vec::new(),
        }
    }

    /// Parse a reference data file: a JSON array of `{ name, hex }`.
    /// All-or-nothing like every other parse path.
    pub fn from_json(name: impl Into<String>, text: &str) -> Result<Self, ReferenceError> {
        let entries: Vec<ReferenceEntry> = serde_json::from_str(text)?;
        let mut swatches = Vec::with_capacity(entries.len());
        for entry in entries {
            let color = Hsl::from_hex(&entry.hex)?;
            swatches.push(Swatch::new(entry.name, color));
        }
        Ok(Self {
            name: name.into(),
            swatches,
        })
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}

//! Huebism Core Library
//!
//! Platform-agnostic palette data model and editing logic for the Huebism
//! color palette builder. Rendering lives behind the [`views::ViewSink`]
//! seam; persistence behind [`storage::Storage`].

pub mod color;
pub mod editor;
pub mod exchange;
pub mod hue;
pub mod lerp;
pub mod model;
pub mod organize;
pub mod reference;
pub mod selection;
pub mod storage;
pub mod views;

pub use color::{Hsl, lerp_hue};
pub use editor::{DEFAULT_PALETTE_NAME, Editor, ExportFile};
pub use exchange::{ExchangeError, FormatKind};
pub use hue::HueRange;
pub use lerp::{Channel, Easing, LerpError, LerpSession, LerpSettings};
pub use model::{DropTarget, Palette, PaletteDoc, PaletteId, Registry, Swatch, SwatchId};
pub use organize::{DRAG_THRESHOLD, DropOutcome, Hover, OrganizeEngine};
pub use reference::ReferenceSet;
pub use selection::Chosen;
pub use storage::{MemoryStorage, PALETTES_KEY, REFERENCE_KEY, Storage};
pub use views::{NullSink, ViewIndex, ViewSink};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

//! Repaint seam between the core and the rendered views.
//!
//! The core never touches the DOM or a GPU surface. Every mutation ends in
//! calls on an injected [`ViewSink`]; the three real views (3D plot, preview
//! strip, organize panel) re-render from the data handed to them.

use crate::color::Hsl;
use crate::model::{Palette, Swatch, SwatchId};
use std::collections::HashMap;

/// Opaque handle to a plot dot, supplied by the view layer.
pub type DotHandle = u64;

/// Opaque handle to a preview-strip element, supplied by the view layer.
pub type PreviewHandle = u64;

/// Externally-supplied render callbacks.
///
/// `display` is the swatch list the plot and preview strip should show -
/// normally the active palette, a substitute sequence during an
/// interpolation session.
pub trait ViewSink {
    /// Re-render the 3D plot dots: reference swatches plus `display`.
    fn plant_dots(&mut self, reference: &[Swatch], display: &[Swatch]);

    /// Re-render the palette preview strip.
    fn update_preview(&mut self, display: &[Swatch]);

    /// Re-render the organize panel from all palettes.
    fn update_organize(&mut self, palettes: &[Palette]);

    /// Update the shared detail label with the chosen color.
    fn relabel(&mut self, color: Hsl);

    fn highlight_dot(&mut self, dot: DotHandle, on: bool);

    fn highlight_preview(&mut self, preview: PreviewHandle, on: bool);

    /// Attach the drag-handle affordance to a swatch, or remove it.
    fn set_drag_handle(&mut self, target: Option<SwatchId>);

    /// A drag gesture passed the threshold; spawn the floating bucket.
    fn drag_started(&mut self, swatch: SwatchId, cloning: bool) {
        let _ = (swatch, cloning);
    }

    /// The gesture ended without a valid drop; restore prior visible state.
    fn drag_cancelled(&mut self, swatch: SwatchId) {
        let _ = swatch;
    }
}

/// A sink that renders nothing. Headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ViewSink for NullSink {
    fn plant_dots(&mut self, _reference: &[Swatch], _display: &[Swatch]) {}
    fn update_preview(&mut self, _display: &[Swatch]) {}
    fn update_organize(&mut self, _palettes: &[Palette]) {}
    fn relabel(&mut self, _color: Hsl) {}
    fn highlight_dot(&mut self, _dot: DotHandle, _on: bool) {}
    fn highlight_preview(&mut self, _preview: PreviewHandle, _on: bool) {}
    fn set_drag_handle(&mut self, _target: Option<SwatchId>) {}
}

/// View handles associated with one swatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewHandles {
    pub dot: Option<DotHandle>,
    pub preview: Option<PreviewHandle>,
}

/// Indirection table from swatch id to its view handles.
///
/// Lookups for an id with no entry mean "no associated view": display
/// absence, not an error. Entries are invalidated explicitly when a swatch
/// is deleted, so stale view pointers cannot dangle.
#[derive(Debug, Clone, Default)]
pub struct ViewIndex {
    entries: HashMap<SwatchId, ViewHandles>,
}

impl ViewIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for a swatch, created on first access.
    pub fn store(&mut self, id: SwatchId) -> &mut ViewHandles {
        self.entries.entry(id).or_default()
    }

    pub fn get(&self, id: SwatchId) -> Option<&ViewHandles> {
        self.entries.get(&id)
    }

    pub fn dot(&self, id: SwatchId) -> Option<DotHandle> {
        self.entries.get(&id).and_then(|h| h.dot)
    }

    pub fn preview(&self, id: SwatchId) -> Option<PreviewHandle> {
        self.entries.get(&id).and_then(|h| h.preview)
    }

    /// Drop the entry for a deleted swatch.
    pub fn forget(&mut self, id: SwatchId) {
        self.entries.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_missing_entry_is_absence() {
        let index = ViewIndex::new();
        let id = Uuid::new_v4();
        assert!(index.get(id).is_none());
        assert!(index.dot(id).is_none());
        assert!(index.preview(id).is_none());
    }

    #[test]
    fn test_store_and_forget() {
        let mut index = ViewIndex::new();
        let id = Uuid::new_v4();

        index.store(id).dot = Some(7);
        index.store(id).preview = Some(9);
        assert_eq!(index.dot(id), Some(7));
        assert_eq!(index.preview(id), Some(9));

        index.forget(id);
        assert!(index.get(id).is_none());
    }
}

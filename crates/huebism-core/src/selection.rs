//! The "chosen" cursor: the single currently-selected color.
//!
//! Holds at most one swatch id. Every view the cursor touches is reached
//! through the [`ViewIndex`] indirection, so a deleted swatch degrades to
//! display absence instead of a dangling pointer.

use crate::color::Hsl;
use crate::model::SwatchId;
use crate::views::{ViewIndex, ViewSink};

/// Tracks the currently chosen color across the app.
#[derive(Debug, Clone, Default)]
pub struct Chosen {
    /// Highlight-lock: when set, the chosen dot keeps a persistent
    /// highlight marker that follows the selection.
    pub mark: bool,
    current: Option<SwatchId>,
}

impl Chosen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<SwatchId> {
        self.current
    }

    pub fn is_current(&self, id: SwatchId) -> bool {
        self.current == Some(id)
    }

    /// Move the cursor to `next`. A no-op when the id is unchanged -
    /// identity, not color value.
    ///
    /// On change: the old preview is unhighlighted, the highlight marker
    /// moves between dots when `mark` is set, the shared detail label is
    /// updated, and the new preview is highlighted. Missing view handles are
    /// skipped silently.
    pub fn choose(
        &mut self,
        next: Option<(SwatchId, Hsl)>,
        views: &ViewIndex,
        sink: &mut dyn ViewSink,
    ) {
        let next_id = next.map(|(id, _)| id);
        if self.current == next_id {
            return;
        }

        if let Some(old) = self.current {
            if let Some(preview) = views.preview(old) {
                sink.highlight_preview(preview, false);
            }
        }

        if self.mark {
            if let Some(dot) = self.current.and_then(|old| views.dot(old)) {
                sink.highlight_dot(dot, false);
            }
            self.current = next_id;
            if let Some(dot) = next_id.and_then(|id| views.dot(id)) {
                sink.highlight_dot(dot, true);
            }
        } else {
            self.current = next_id;
        }

        if let Some((_, color)) = next {
            sink.relabel(color);
        }

        if let Some(preview) = next_id.and_then(|id| views.preview(id)) {
            sink.highlight_preview(preview, true);
        }
    }

    /// Toggle the highlight-lock, moving the marker onto or off the current
    /// dot.
    pub fn set_mark(&mut self, mark: bool, views: &ViewIndex, sink: &mut dyn ViewSink) {
        if self.mark == mark {
            return;
        }
        self.mark = mark;
        if let Some(dot) = self.current.and_then(|id| views.dot(id)) {
            sink.highlight_dot(dot, mark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Palette, Swatch};
    use crate::views::{DotHandle, PreviewHandle};
    use uuid::Uuid;

    /// Records every sink call for assertions.
    #[derive(Debug, Default)]
    struct RecordingSink {
        relabels: Vec<Hsl>,
        dot_events: Vec<(DotHandle, bool)>,
        preview_events: Vec<(PreviewHandle, bool)>,
    }

    impl ViewSink for RecordingSink {
        fn plant_dots(&mut self, _reference: &[Swatch], _display: &[Swatch]) {}
        fn update_preview(&mut self, _display: &[Swatch]) {}
        fn update_organize(&mut self, _palettes: &[Palette]) {}
        fn relabel(&mut self, color: Hsl) {
            self.relabels.push(color);
        }
        fn highlight_dot(&mut self, dot: DotHandle, on: bool) {
            self.dot_events.push((dot, on));
        }
        fn highlight_preview(&mut self, preview: PreviewHandle, on: bool) {
            self.preview_events.push((preview, on));
        }
        fn set_drag_handle(&mut self, _target: Option<SwatchId>) {}
    }

    #[test]
    fn test_choose_same_is_noop() {
        let mut chosen = Chosen::new();
        let views = ViewIndex::new();
        let mut sink = RecordingSink::default();
        let id = Uuid::new_v4();
        let color = Hsl::new(0.0, 1.0, 0.5);

        chosen.choose(Some((id, color)), &views, &mut sink);
        chosen.choose(Some((id, color)), &views, &mut sink);

        assert_eq!(sink.relabels.len(), 1);
        assert_eq!(chosen.current(), Some(id));
    }

    #[test]
    fn test_choose_moves_preview_highlight() {
        let mut chosen = Chosen::new();
        let mut views = ViewIndex::new();
        let mut sink = RecordingSink::default();

        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        views.store(first).preview = Some(1);
        views.store(second).preview = Some(2);
        let color = Hsl::new(120.0, 1.0, 0.5);

        chosen.choose(Some((first, color)), &views, &mut sink);
        chosen.choose(Some((second, color)), &views, &mut sink);

        assert_eq!(sink.preview_events, vec![(1, true), (1, false), (2, true)]);
    }

    #[test]
    fn test_mark_moves_dot_highlight() {
        let mut chosen = Chosen::new();
        let mut views = ViewIndex::new();
        let mut sink = RecordingSink::default();

        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        views.store(first).dot = Some(10);
        views.store(second).dot = Some(20);
        let color = Hsl::new(240.0, 1.0, 0.5);

        chosen.choose(Some((first, color)), &views, &mut sink);
        chosen.set_mark(true, &views, &mut sink);
        chosen.choose(Some((second, color)), &views, &mut sink);

        assert_eq!(sink.dot_events, vec![(10, true), (10, false), (20, true)]);
    }

    #[test]
    fn test_missing_views_are_display_absence() {
        let mut chosen = Chosen::new();
        let views = ViewIndex::new();
        let mut sink = RecordingSink::default();
        chosen.mark = true;

        // No entries in the index at all: only the label updates.
        chosen.choose(
            Some((Uuid::new_v4(), Hsl::new(0.0, 0.0, 0.0))),
            &views,
            &mut sink,
        );
        assert!(sink.dot_events.is_empty());
        assert!(sink.preview_events.is_empty());
        assert_eq!(sink.relabels.len(), 1);
    }
}

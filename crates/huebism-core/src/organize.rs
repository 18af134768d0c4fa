//! Reorder/transfer engine: the pointer-drag state machine behind the
//! organize panel.
//!
//! One gesture can be live at a time. A gesture arms on pointer-down over a
//! drag handle, becomes a drag once the pointer travels past
//! [`DRAG_THRESHOLD`], recomputes its drop target on every hover change, and
//! commits or cancels on release. Cancellation mutates nothing; commits go
//! through [`Registry::transfer`]/[`Registry::insert_at`] so no repaint can
//! observe a half-moved swatch.

use crate::model::{DropTarget, PaletteId, Registry, Swatch, SwatchId};

/// Pointer travel (px) before an armed gesture becomes a drag. Tunable.
pub const DRAG_THRESHOLD: f64 = 4.0;

/// What the pointer is currently over, as reported by the view layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hover {
    /// Over a swatch element; `midpoint_x` is the element's horizontal
    /// center in the same coordinate space as the pointer.
    Swatch {
        palette: PaletteId,
        swatch: SwatchId,
        midpoint_x: f64,
    },
    /// Over a palette's container but not over a specific swatch.
    Palette(PaletteId),
    /// Outside any palette. No valid drop.
    Void,
}

/// Which side of the hovered swatch the drop lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertSide {
    Before,
    After,
}

/// Live drag gesture state.
#[derive(Debug, Clone)]
struct Gesture {
    /// Palette the dragged swatch came from.
    source: PaletteId,
    /// The dragged swatch: the original when moving, the duplicate's id
    /// when cloning.
    swatch: SwatchId,
    /// Detached duplicate carried by a clone gesture. The source palette is
    /// never touched in clone mode.
    clone: Option<Swatch>,
    /// Last pointer x, for travel direction.
    last_x: f64,
    /// Last hovered swatch and the side the drop resolved to, kept for
    /// midpoint hysteresis.
    hover: Option<(SwatchId, InsertSide)>,
    /// Current drop target. `None` = drop inactive (cancel on release).
    drop: Option<DropTarget>,
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Armed {
        source: PaletteId,
        swatch: SwatchId,
        cloning: bool,
        origin_x: f64,
    },
    Dragging(Gesture),
}

/// Reported by [`OrganizeEngine::drag_move`] when the gesture crosses the
/// drag threshold, so the view can hide the original and spawn the floating
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    None,
    Started { swatch: SwatchId, cloning: bool },
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No gesture was live.
    Idle,
    /// The designed cancellation path: no valid drop target. Nothing was
    /// mutated; the view restores the original at its old position.
    Cancelled { swatch: SwatchId },
    /// The swatch was moved into `palette` at `index`.
    Moved {
        palette: PaletteId,
        swatch: SwatchId,
        index: usize,
    },
    /// A duplicate was inserted into `palette` at `index`; the source
    /// palette is untouched.
    Cloned {
        palette: PaletteId,
        swatch: SwatchId,
        index: usize,
    },
}

/// The drag-and-drop state machine. Process-wide singleton, owned by the
/// editor.
#[derive(Debug, Default)]
pub struct OrganizeEngine {
    phase: Phase,
}

impl OrganizeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between pointer-down on a handle and the matching release.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Id of the swatch being dragged, once past the threshold.
    pub fn dragging(&self) -> Option<SwatchId> {
        match &self.phase {
            Phase::Dragging(g) => Some(g.swatch),
            _ => None,
        }
    }

    /// Current drop target, if the drop is active.
    pub fn drop_target(&self) -> Option<DropTarget> {
        match &self.phase {
            Phase::Dragging(g) => g.drop,
            _ => None,
        }
    }

    /// Pointer-down on a swatch's drag handle. Arms a gesture; the drag
    /// itself starts once the pointer travels past [`DRAG_THRESHOLD`].
    ///
    /// Ignored while another gesture is live. Panics if the swatch is not in
    /// the named palette: the press came from a view element that no longer
    /// matches the model.
    pub fn press(
        &mut self,
        registry: &Registry,
        palette: PaletteId,
        swatch: SwatchId,
        cloning: bool,
        x: f64,
    ) {
        if self.is_active() {
            log::debug!("ignoring press: a drag gesture is already active");
            return;
        }
        let located = registry.locate(swatch);
        assert!(
            located.map(|(p, _)| p) == Some(palette),
            "pressed swatch {swatch} is not in palette {palette}"
        );
        self.phase = Phase::Armed {
            source: palette,
            swatch,
            cloning,
            origin_x: x,
        };
    }

    /// Pointer motion. Promotes an armed gesture past the threshold and
    /// recomputes the drop target from the hover state.
    pub fn drag_move(&mut self, registry: &Registry, x: f64, hover: Hover) -> DragEvent {
        let mut event = DragEvent::None;

        if let Phase::Armed {
            source,
            swatch,
            cloning,
            origin_x,
        } = self.phase
        {
            if (x - origin_x).abs() < DRAG_THRESHOLD {
                return DragEvent::None;
            }
            let clone = cloning.then(|| {
                registry
                    .swatch(swatch)
                    .unwrap_or_else(|| panic!("dragged swatch {swatch} vanished"))
                    .duplicate()
            });
            let dragged = clone.as_ref().map(|c| c.id()).unwrap_or(swatch);
            self.phase = Phase::Dragging(Gesture {
                source,
                swatch: dragged,
                clone,
                last_x: x,
                hover: None,
                drop: None,
            });
            event = DragEvent::Started {
                swatch: dragged,
                cloning,
            };
        }

        if let Phase::Dragging(gesture) = &mut self.phase {
            retarget(gesture, registry, x, hover);
        }
        event
    }

    /// Pointer release. Commits the drop if one is active, otherwise
    /// cancels. Either way the machine resets to idle: no state leaks into
    /// the next gesture.
    pub fn drag_end(&mut self, registry: &mut Registry) -> DropOutcome {
        let phase = std::mem::take(&mut self.phase);
        match phase {
            Phase::Idle => DropOutcome::Idle,
            Phase::Armed { swatch, .. } => DropOutcome::Cancelled { swatch },
            Phase::Dragging(gesture) => {
                let Some(target) = gesture.drop else {
                    return DropOutcome::Cancelled {
                        swatch: gesture.swatch,
                    };
                };
                match gesture.clone {
                    Some(clone) => {
                        let swatch = clone.id();
                        let index = registry.insert_at(target, clone);
                        DropOutcome::Cloned {
                            palette: target.palette,
                            swatch,
                            index,
                        }
                    }
                    None => {
                        let index = registry.transfer(gesture.source, gesture.swatch, target);
                        DropOutcome::Moved {
                            palette: target.palette,
                            swatch: gesture.swatch,
                            index,
                        }
                    }
                }
            }
        }
    }
}

/// Recompute the drop target for the current hover.
fn retarget(gesture: &mut Gesture, registry: &Registry, x: f64, hover: Hover) {
    let dx = x - gesture.last_x;
    gesture.last_x = x;

    gesture.drop = match hover {
        Hover::Void => {
            gesture.hover = None;
            None
        }
        Hover::Palette(palette) => {
            gesture.hover = None;
            registry.palette(palette).map(|p| DropTarget {
                palette: p.id(),
                before: None,
            })
        }
        Hover::Swatch {
            palette,
            swatch,
            midpoint_x,
        } => {
            // Midpoint hysteresis: while the same swatch stays hovered, the
            // side only flips when the pointer crosses the midpoint in its
            // direction of travel. Fresh hovers resolve by plain midpoint
            // comparison.
            let side = match gesture.hover {
                Some((prev, prev_side)) if prev == swatch => {
                    if dx > 0.0 && x > midpoint_x {
                        InsertSide::After
                    } else if dx < 0.0 && x < midpoint_x {
                        InsertSide::Before
                    } else {
                        prev_side
                    }
                }
                _ => {
                    if x > midpoint_x {
                        InsertSide::After
                    } else {
                        InsertSide::Before
                    }
                }
            };
            gesture.hover = Some((swatch, side));

            registry.palette(palette).and_then(|p| {
                let hovered = p.index_of(swatch)?;
                let before = match side {
                    InsertSide::Before => Some(swatch),
                    InsertSide::After => p.swatches().get(hovered + 1).map(|s| s.id()),
                };
                Some(DropTarget {
                    palette: p.id(),
                    before,
                })
            })
        }
    };

    // Dropping a moved swatch back into its own slot is a no-op, not a
    // valid drop. Clone drops always insert something new.
    if gesture.clone.is_none() {
        if let Some(target) = gesture.drop {
            if target.palette == gesture.source {
                if let Some(palette) = registry.palette(gesture.source) {
                    if let Some(current) = palette.index_of(gesture.swatch) {
                        let insertion = target
                            .before
                            .and_then(|b| palette.index_of(b))
                            .unwrap_or(palette.len());
                        if insertion == current || insertion == current + 1 {
                            gesture.drop = None;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Hsl;
    use crate::model::tests::assert_consistent;

    fn registry_ab() -> (Registry, PaletteId, PaletteId, Vec<SwatchId>, SwatchId) {
        let mut registry = Registry::new();
        let a = registry.create("A");
        let b = registry.create("B");
        let mut ids = Vec::new();
        for (name, hex) in [("one", "#ff0000"), ("two", "#00ff00"), ("three", "#0000ff")] {
            let s = Swatch::new(name, Hsl::from_hex(hex).unwrap());
            ids.push(s.id());
            registry.palette_mut(a).unwrap().push(s);
        }
        let y = Swatch::new("Y", Hsl::from_hex("#ffffff").unwrap());
        let y_id = y.id();
        registry.palette_mut(b).unwrap().push(y);
        (registry, a, b, ids, y_id)
    }

    fn names(registry: &Registry, palette: PaletteId) -> Vec<String> {
        registry
            .palette(palette)
            .unwrap()
            .swatches()
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    /// Drag `swatch` far enough to start, then feed one hover.
    fn start_drag(
        engine: &mut OrganizeEngine,
        registry: &Registry,
        palette: PaletteId,
        swatch: SwatchId,
        cloning: bool,
    ) -> DragEvent {
        engine.press(registry, palette, swatch, cloning, 0.0);
        engine.drag_move(registry, DRAG_THRESHOLD + 1.0, Hover::Void)
    }

    #[test]
    fn test_threshold_gates_drag_start() {
        let (registry, a, _, ids, _) = registry_ab();
        let mut engine = OrganizeEngine::new();

        engine.press(&registry, a, ids[0], false, 0.0);
        let event = engine.drag_move(&registry, DRAG_THRESHOLD / 2.0, Hover::Void);
        assert_eq!(event, DragEvent::None);
        assert!(engine.dragging().is_none());

        let event = engine.drag_move(&registry, DRAG_THRESHOLD + 1.0, Hover::Void);
        assert!(matches!(event, DragEvent::Started { cloning: false, .. }));
        assert_eq!(engine.dragging(), Some(ids[0]));
    }

    #[test]
    fn test_cancel_leaves_registry_untouched() {
        let (mut registry, a, b, ids, _) = registry_ab();
        let before = registry.to_docs();
        let mut engine = OrganizeEngine::new();

        start_drag(&mut engine, &registry, a, ids[0], false);
        engine.drag_move(
            &registry,
            50.0,
            Hover::Palette(b),
        );
        engine.drag_move(&registry, 60.0, Hover::Void);

        let outcome = engine.drag_end(&mut registry);
        assert_eq!(outcome, DropOutcome::Cancelled { swatch: ids[0] });
        assert_eq!(registry.to_docs(), before);
        assert!(!engine.is_active());
        assert_consistent(&registry);
    }

    #[test]
    fn test_container_drop_appends() {
        let (mut registry, a, b, ids, _) = registry_ab();
        let mut engine = OrganizeEngine::new();

        start_drag(&mut engine, &registry, a, ids[0], false);
        engine.drag_move(&registry, 50.0, Hover::Palette(b));

        let outcome = engine.drag_end(&mut registry);
        assert_eq!(
            outcome,
            DropOutcome::Moved {
                palette: b,
                swatch: ids[0],
                index: 1,
            }
        );
        assert_eq!(names(&registry, a), ["two", "three"]);
        assert_eq!(names(&registry, b), ["Y", "one"]);
        assert_eq!(registry.swatch(ids[0]).unwrap().palette(), Some(b));
        assert_consistent(&registry);
    }

    #[test]
    fn test_single_swatch_moves_to_other_palette() {
        // Palettes A = [X], B = [Y]; dropping X on B's container leaves A
        // empty and B = [Y, X].
        let mut registry = Registry::new();
        let a = registry.create("A");
        let b = registry.create("B");
        let x = Swatch::new("X", Hsl::from_hex("#ff0000").unwrap());
        let x_id = x.id();
        registry.palette_mut(a).unwrap().push(x);
        registry
            .palette_mut(b)
            .unwrap()
            .push(Swatch::new("Y", Hsl::from_hex("#0000ff").unwrap()));

        let mut engine = OrganizeEngine::new();
        start_drag(&mut engine, &registry, a, x_id, false);
        engine.drag_move(&registry, 50.0, Hover::Palette(b));
        engine.drag_end(&mut registry);

        assert!(registry.palette(a).unwrap().is_empty());
        assert_eq!(names(&registry, b), ["Y", "X"]);
        assert_eq!(registry.swatch(x_id).unwrap().palette(), Some(b));
        assert_consistent(&registry);
    }

    #[test]
    fn test_in_place_drop_is_inactive() {
        let (mut registry, a, _, ids, _) = registry_ab();
        let before = registry.to_docs();
        let mut engine = OrganizeEngine::new();

        // Dragging "one" and hovering the left half of its own next sibling
        // resolves to inserting at index 1: exactly where it already is.
        start_drag(&mut engine, &registry, a, ids[0], false);
        engine.drag_move(
            &registry,
            10.0,
            Hover::Swatch {
                palette: a,
                swatch: ids[1],
                midpoint_x: 100.0,
            },
        );
        assert!(engine.drop_target().is_none());

        let outcome = engine.drag_end(&mut registry);
        assert_eq!(outcome, DropOutcome::Cancelled { swatch: ids[0] });
        assert_eq!(registry.to_docs(), before);
        assert_consistent(&registry);
    }

    #[test]
    fn test_insert_before_hovered_sibling() {
        let (mut registry, a, _, ids, _) = registry_ab();
        let mut engine = OrganizeEngine::new();

        // Drag "three" over the left half of "one": insert before "one".
        start_drag(&mut engine, &registry, a, ids[2], false);
        engine.drag_move(
            &registry,
            10.0,
            Hover::Swatch {
                palette: a,
                swatch: ids[0],
                midpoint_x: 100.0,
            },
        );

        let outcome = engine.drag_end(&mut registry);
        assert_eq!(
            outcome,
            DropOutcome::Moved {
                palette: a,
                swatch: ids[2],
                index: 0,
            }
        );
        assert_eq!(names(&registry, a), ["three", "one", "two"]);
        assert_consistent(&registry);
    }

    #[test]
    fn test_midpoint_hysteresis() {
        let (mut registry, a, _, ids, _) = registry_ab();
        let mut engine = OrganizeEngine::new();

        start_drag(&mut engine, &registry, a, ids[0], false);

        let hover_two = |mid: f64| Hover::Swatch {
            palette: a,
            swatch: ids[1],
            midpoint_x: mid,
        };

        // Left of the midpoint: insert before "two" (in-place for "one", so
        // the drop is inactive).
        engine.drag_move(&registry, 90.0, hover_two(100.0));
        assert!(engine.drop_target().is_none());

        // Travelling right past the midpoint flips to insert-after.
        engine.drag_move(&registry, 110.0, hover_two(100.0));
        assert_eq!(
            engine.drop_target(),
            Some(DropTarget {
                palette: a,
                before: Some(ids[2]),
            })
        );

        // Drifting back left, but not past the midpoint: the side holds.
        engine.drag_move(&registry, 105.0, hover_two(100.0));
        assert_eq!(
            engine.drop_target(),
            Some(DropTarget {
                palette: a,
                before: Some(ids[2]),
            })
        );

        // Crossing back below the midpoint flips to insert-before again.
        engine.drag_move(&registry, 95.0, hover_two(100.0));
        assert!(engine.drop_target().is_none());

        engine.drag_end(&mut registry);
        assert_consistent(&registry);
    }

    #[test]
    fn test_insert_after_last_swatch_appends() {
        let (mut registry, a, b, ids, y_id) = registry_ab();
        let mut engine = OrganizeEngine::new();

        // Hover the right half of B's only swatch: insert after = append.
        start_drag(&mut engine, &registry, a, ids[1], false);
        engine.drag_move(
            &registry,
            150.0,
            Hover::Swatch {
                palette: b,
                swatch: y_id,
                midpoint_x: 100.0,
            },
        );

        let outcome = engine.drag_end(&mut registry);
        assert_eq!(
            outcome,
            DropOutcome::Moved {
                palette: b,
                swatch: ids[1],
                index: 1,
            }
        );
        assert_eq!(names(&registry, b), ["Y", "two"]);
        assert_consistent(&registry);
    }

    #[test]
    fn test_clone_drag_leaves_source_untouched() {
        let (mut registry, a, b, ids, _) = registry_ab();
        let source_before = names(&registry, a);
        let mut engine = OrganizeEngine::new();

        let event = start_drag(&mut engine, &registry, a, ids[0], true);
        let DragEvent::Started {
            swatch: clone_id,
            cloning: true,
        } = event
        else {
            panic!("expected a cloning drag start, got {event:?}");
        };
        assert_ne!(clone_id, ids[0]);

        engine.drag_move(&registry, 50.0, Hover::Palette(b));
        let outcome = engine.drag_end(&mut registry);
        assert_eq!(
            outcome,
            DropOutcome::Cloned {
                palette: b,
                swatch: clone_id,
                index: 1,
            }
        );

        assert_eq!(names(&registry, a), source_before);
        let clone = registry.swatch(clone_id).unwrap();
        let original = registry.swatch(ids[0]).unwrap();
        assert_eq!(clone.name, original.name);
        assert_eq!(clone.color, original.color);
        assert_ne!(clone.id(), original.id());
        assert_eq!(clone.palette(), Some(b));
        assert_consistent(&registry);
    }

    #[test]
    fn test_clone_drop_next_to_original_is_real() {
        let (mut registry, a, _, ids, _) = registry_ab();
        let mut engine = OrganizeEngine::new();

        // In clone mode the in-place rule does not apply: dropping right
        // after the original inserts a duplicate there.
        start_drag(&mut engine, &registry, a, ids[0], true);
        engine.drag_move(
            &registry,
            10.0,
            Hover::Swatch {
                palette: a,
                swatch: ids[1],
                midpoint_x: 100.0,
            },
        );
        assert!(engine.drop_target().is_some());

        let outcome = engine.drag_end(&mut registry);
        assert!(matches!(outcome, DropOutcome::Cloned { index: 1, .. }));
        assert_eq!(names(&registry, a), ["one", "one", "two", "three"]);
        assert_consistent(&registry);
    }

    #[test]
    fn test_second_press_is_ignored() {
        let (registry, a, b, ids, y_id) = registry_ab();
        let mut engine = OrganizeEngine::new();

        engine.press(&registry, a, ids[0], false, 0.0);
        engine.press(&registry, b, y_id, false, 0.0);

        // Still the first gesture: crossing the threshold drags ids[0].
        let mut engine2 = engine;
        let event = engine2.drag_move(&registry, DRAG_THRESHOLD + 1.0, Hover::Void);
        assert_eq!(
            event,
            DragEvent::Started {
                swatch: ids[0],
                cloning: false,
            }
        );
    }

    #[test]
    fn test_release_without_gesture() {
        let (mut registry, ..) = registry_ab();
        let mut engine = OrganizeEngine::new();
        assert_eq!(engine.drag_end(&mut registry), DropOutcome::Idle);
    }

    #[test]
    fn test_armed_release_cancels_without_mutation() {
        let (mut registry, a, _, ids, _) = registry_ab();
        let before = registry.to_docs();
        let mut engine = OrganizeEngine::new();

        engine.press(&registry, a, ids[0], false, 0.0);
        let outcome = engine.drag_end(&mut registry);
        assert_eq!(outcome, DropOutcome::Cancelled { swatch: ids[0] });
        assert_eq!(registry.to_docs(), before);
    }
}

//! Top-level editor controller.
//!
//! Owns the palette registry, the chosen cursor, the drag engine, the
//! optional interpolation session and the injected view sink, and sequences
//! every mutation so that data changes complete before any repaint fires.
//! All mutation happens synchronously inside one event handler; there is no
//! background work.

use crate::color::{ColorError, Hsl};
use crate::exchange::{self, ExchangeError, FormatKind};
use crate::lerp::{Channel, Easing, LerpError, LerpSession, LerpSettings};
use crate::model::{PaletteId, Registry, Swatch, SwatchId};
use crate::organize::{DragEvent, DropOutcome, Hover, OrganizeEngine};
use crate::reference::{ReferenceError, ReferenceSet};
use crate::selection::Chosen;
use crate::views::{ViewIndex, ViewSink};

/// Name given to palettes created without one.
pub const DEFAULT_PALETTE_NAME: &str = "CustomPalette";

/// Suffix for swatches derived from the chosen color.
const COPY_SUFFIX: &str = "-ish";

/// An export ready to hand to the file-save collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub contents: String,
}

/// The application controller. One per process.
pub struct Editor {
    registry: Registry,
    reference: ReferenceSet,
    chosen: Chosen,
    views: ViewIndex,
    organize: OrganizeEngine,
    lerp: Option<LerpSession>,
    sink: Box<dyn ViewSink>,
}

impl Editor {
    pub fn new(sink: Box<dyn ViewSink>) -> Self {
        Self {
            registry: Registry::new(),
            reference: ReferenceSet::empty("none"),
            chosen: Chosen::new(),
            views: ViewIndex::new(),
            organize: OrganizeEngine::new(),
            lerp: None,
            sink,
        }
    }

    /// Restore persisted palettes, or start with a fresh default palette
    /// when nothing (or nothing parseable) was stored.
    pub fn bootstrap(&mut self, stored_palettes: Option<&str>) {
        match stored_palettes {
            Some(text) => {
                if let Err(err) = self.restore_palettes(text) {
                    log::warn!("ignoring stored palettes: {err}");
                }
            }
            None => log::info!("no palettes in storage"),
        }
        if self.registry.is_empty() {
            self.registry.create(DEFAULT_PALETTE_NAME);
        }
        self.repaint_all();
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Direct registry access for wiring code. Callers repaint themselves.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn reference(&self) -> &ReferenceSet {
        &self.reference
    }

    pub fn chosen(&self) -> &Chosen {
        &self.chosen
    }

    /// The view layer registers dot/preview handles here while rendering.
    pub fn view_index_mut(&mut self) -> &mut ViewIndex {
        &mut self.views
    }

    /// True while an interpolation session suspends normal palette editing.
    pub fn lerp_active(&self) -> bool {
        self.lerp.is_some()
    }

    /// The swatch sequence the plot and preview currently show: the active
    /// palette, or the interpolation substitute while a session is open.
    pub fn display_swatches(&self) -> Vec<Swatch> {
        match &self.lerp {
            Some(session) => session.display(&self.registry),
            None => self
                .registry
                .active()
                .map(|p| p.swatches().to_vec())
                .unwrap_or_default(),
        }
    }

    fn repaint_palette(&mut self) {
        let display = self.display_swatches();
        self.sink.plant_dots(self.reference.swatches(), &display);
        self.sink.update_preview(&display);
    }

    fn repaint_all(&mut self) {
        self.repaint_palette();
        self.sink.update_organize(self.registry.palettes());
    }

    /// Find a swatch in the registry or the reference set.
    fn find_swatch(&self, id: SwatchId) -> Option<&Swatch> {
        self.registry
            .swatch(id)
            .or_else(|| self.reference.swatches().iter().find(|s| s.id() == id))
    }

    /// Make the palette at `index` (registry order) the active one.
    pub fn choose_palette_at(&mut self, index: usize) {
        let Some(palette) = self.registry.palettes().get(index) else {
            log::warn!("no palette at index {index}");
            return;
        };
        let id = palette.id();
        self.registry.set_active(id);
        self.repaint_palette();
    }

    /// Create a palette (with the default name when `name` is `None`, as
    /// when the user cancels the prompt) and make it active.
    pub fn create_palette(&mut self, name: Option<&str>) -> PaletteId {
        let id = self
            .registry
            .create(name.unwrap_or(DEFAULT_PALETTE_NAME));
        self.registry.set_active(id);
        self.repaint_all();
        id
    }

    pub fn rename_palette(&mut self, name: &str) {
        if let Some(palette) = self.registry.active_mut() {
            palette.name = name.to_string();
        }
        self.sink.update_organize(self.registry.palettes());
    }

    /// Delete the active palette and all of its swatches. The next palette
    /// becomes active; deleting the last one recreates a default palette.
    pub fn delete_palette(&mut self) {
        if self.lerp.is_some() {
            return;
        }
        let Some(id) = self.registry.active_id() else {
            return;
        };
        let palette = self.registry.delete(id);
        for swatch in palette.swatches() {
            self.views.forget(swatch.id());
        }
        if self.registry.is_empty() {
            self.registry.create(DEFAULT_PALETTE_NAME);
        }
        self.repaint_all();
    }

    /// Select a swatch (from the plot or the preview strip) as the chosen
    /// color.
    pub fn pick(&mut self, id: SwatchId) {
        let Some(swatch) = self.find_swatch(id) else {
            log::warn!("picked swatch {id} has no model entry");
            return;
        };
        let next = Some((swatch.id(), swatch.color));
        self.chosen.choose(next, &self.views, &mut *self.sink);
    }

    /// Toggle the persistent highlight marker on the chosen dot.
    pub fn set_mark(&mut self, mark: bool) {
        self.chosen.set_mark(mark, &self.views, &mut *self.sink);
    }

    /// Add a new swatch derived from the chosen color (name suffixed
    /// `-ish`), or a black one when nothing is chosen. Inserted at `at`, or
    /// appended. Returns the new swatch's id, `None` while an interpolation
    /// session is open.
    pub fn add_custom_color(&mut self, at: Option<usize>) -> Option<SwatchId> {
        if self.lerp.is_some() {
            return None;
        }
        let swatch = match self.chosen.current().and_then(|id| self.find_swatch(id)) {
            Some(source) => Swatch::new(format!("{}{COPY_SUFFIX}", source.name), source.color),
            None => Swatch::new(format!("Black{COPY_SUFFIX}"), Hsl::new(0.0, 0.0, 0.0)),
        };
        let id = swatch.id();
        let color = swatch.color;

        let palette = self.registry.active_mut()?;
        match at {
            Some(index) => palette.insert(index, swatch),
            None => palette.push(swatch),
        }

        self.repaint_palette();
        self.chosen
            .choose(Some((id, color)), &self.views, &mut *self.sink);
        Some(id)
    }

    /// Remove a swatch from its palette. Panics if the swatch is not
    /// attached anywhere: the remove affordance only exists on rendered,
    /// attached swatches.
    pub fn remove_swatch(&mut self, id: SwatchId) {
        if self.lerp.is_some() {
            return;
        }
        let (palette, _) = self
            .registry
            .locate(id)
            .unwrap_or_else(|| panic!("swatch {id} is not part of any palette"));
        self.registry
            .palette_mut(palette)
            .unwrap_or_else(|| panic!("palette {palette} vanished"))
            .remove(id);
        self.views.forget(id);
        self.repaint_palette();
    }

    /// Rename a swatch. Reference swatches are read-only.
    pub fn set_swatch_name(&mut self, id: SwatchId, name: &str) {
        if let Some(swatch) = self.registry.swatch_mut(id) {
            swatch.name = name.to_string();
            let display = self.display_swatches();
            self.sink.update_preview(&display);
        }
    }

    /// Recolor the chosen swatch. Reference swatches are read-only. A live
    /// interpolation session reloads when one of its bounds changes.
    pub fn set_chosen_color(&mut self, color: Hsl) {
        let Some(id) = self.chosen.current() else {
            return;
        };
        let Some(swatch) = self.registry.swatch_mut(id) else {
            return;
        };
        swatch.color = color;

        if let Some(session) = self.lerp.as_mut() {
            if let Err(err) = session.reload(&self.registry) {
                log::warn!("lerp reload failed: {err}");
            }
        }

        self.sink.relabel(color);
        self.repaint_palette();
    }

    /// Recolor the chosen swatch from a hex string.
    pub fn set_chosen_hex(&mut self, hex: &str) -> Result<(), ColorError> {
        let color = Hsl::from_hex(hex)?;
        self.set_chosen_color(color);
        Ok(())
    }

    /// Idle hover: attach or remove the drag-handle affordance.
    pub fn hover_affordance(&mut self, target: Option<SwatchId>) {
        if self.lerp.is_some() || self.organize.is_active() {
            return;
        }
        self.sink.set_drag_handle(target);
    }

    /// Pointer-down on a swatch's drag handle.
    pub fn press_handle(
        &mut self,
        palette: PaletteId,
        swatch: SwatchId,
        cloning: bool,
        x: f64,
    ) {
        if self.lerp.is_some() {
            return;
        }
        self.organize.press(&self.registry, palette, swatch, cloning, x);
    }

    /// Pointer motion during a (potential) drag.
    pub fn drag_move(&mut self, x: f64, hover: Hover) {
        match self.organize.drag_move(&self.registry, x, hover) {
            DragEvent::Started { swatch, cloning } => {
                self.sink.drag_started(swatch, cloning);
            }
            DragEvent::None => {}
        }
    }

    /// Pointer release: commit or cancel the gesture and repaint.
    pub fn drag_release(&mut self) -> DropOutcome {
        let outcome = self.organize.drag_end(&mut self.registry);
        match outcome {
            DropOutcome::Idle => {}
            DropOutcome::Cancelled { swatch } => {
                self.sink.drag_cancelled(swatch);
            }
            DropOutcome::Moved { .. } | DropOutcome::Cloned { .. } => {
                self.repaint_all();
            }
        }
        outcome
    }

    /// Open an interpolation session inserting at `index` into the active
    /// palette. Normal palette editing is suspended until commit or cancel.
    pub fn open_lerp(&mut self, index: usize) -> Result<(), LerpError> {
        if self.lerp.is_some() {
            log::warn!("replacing an already-open lerp session");
        }
        let session = LerpSession::open(&self.registry, index)?;
        self.lerp = Some(session);
        self.repaint_palette();
        Ok(())
    }

    pub fn lerp_settings(&self) -> Option<&LerpSettings> {
        self.lerp.as_ref().map(|s| &s.settings)
    }

    pub fn set_lerp_count(&mut self, count: usize) {
        self.with_lerp(|settings| settings.count = count.max(1));
    }

    pub fn set_lerp_easing(&mut self, channel: Channel, easing: Easing) {
        self.with_lerp(|settings| settings.channel_mut(channel).easing = easing);
    }

    pub fn set_lerp_shape(&mut self, channel: Channel, shape: f64) {
        self.with_lerp(|settings| settings.channel_mut(channel).shape = shape);
    }

    fn with_lerp(&mut self, change: impl FnOnce(&mut LerpSettings)) {
        let Some(session) = self.lerp.as_mut() else {
            return;
        };
        change(&mut session.settings);
        if let Err(err) = session.reload(&self.registry) {
            log::warn!("lerp reload failed: {err}");
        }
        self.repaint_palette();
    }

    /// Splice the previewed swatches into the palette and end the session.
    pub fn commit_lerp(&mut self) -> Vec<SwatchId> {
        let Some(session) = self.lerp.take() else {
            return Vec::new();
        };
        let ids = session.commit(&mut self.registry);
        self.repaint_all();
        ids
    }

    /// Discard the session; the palette is untouched.
    pub fn cancel_lerp(&mut self) {
        if self.lerp.take().is_some() {
            self.repaint_palette();
        }
    }

    /// Import palettes from a file's name and content. The extension picks
    /// the format; anything unregistered is rejected before parsing, and a
    /// parse failure creates no palettes.
    pub fn import(&mut self, filename: &str, text: &str) -> Result<Vec<PaletteId>, ExchangeError> {
        let kind = FormatKind::from_filename(filename)?;
        let docs = exchange::parse(kind, text)?;
        let ids = self.registry.revive_all(&docs)?;
        log::info!("imported {} palette(s) from {filename}", ids.len());
        self.repaint_all();
        Ok(ids)
    }

    /// Export palettes by identity. Panics on an unregistered id: export
    /// selections come from the registry itself.
    pub fn export(&self, ids: &[PaletteId], kind: FormatKind) -> ExportFile {
        let docs: Vec<_> = ids
            .iter()
            .map(|id| {
                self.registry
                    .palette(*id)
                    .unwrap_or_else(|| panic!("palette {id} is not in the registry"))
                    .to_doc()
            })
            .collect();
        ExportFile {
            filename: exchange::export_filename(&docs, kind),
            contents: exchange::format(kind, &docs),
        }
    }

    /// The string persisted under the palettes key.
    pub fn serialized_palettes(&self) -> String {
        exchange::format(FormatKind::Json, &self.registry.to_docs())
    }

    /// Rebuild the registry from a persisted string. All-or-nothing.
    pub fn restore_palettes(&mut self, text: &str) -> Result<(), ExchangeError> {
        let docs = exchange::parse(FormatKind::Json, text)?;
        self.registry.revive_all(&docs)?;
        Ok(())
    }

    /// Swap in a reference palette parsed from its data file.
    pub fn load_reference(&mut self, name: &str, json: &str) -> Result<(), ReferenceError> {
        self.reference = ReferenceSet::from_json(name, json)?;
        log::info!(
            "loaded reference palette {name:?} ({} colors)",
            self.reference.len()
        );
        self.repaint_palette();
        Ok(())
    }
}

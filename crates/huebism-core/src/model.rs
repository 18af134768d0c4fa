//! Palette document model.
//!
//! A [`Registry`] owns every live [`Palette`]; each palette owns an ordered
//! sequence of [`Swatch`]es. A swatch carries a back-reference to its owning
//! palette by id, and the containment invariant is: whenever that
//! back-reference is `Some(pid)`, the registry palette `pid` contains the
//! swatch exactly once. Detached swatches (`palette == None`) exist only
//! outside the registry: drag clones and interpolation previews.
//!
//! Identity misses (deleting a palette that is not registered, removing a
//! swatch that is not in its palette) panic: they mean the invariant was
//! already broken upstream.

use crate::color::{ColorError, Hsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable swatch identifier, used as a diffing key by the views.
pub type SwatchId = Uuid;

/// Stable palette identifier.
pub type PaletteId = Uuid;

/// A single named color entry.
#[derive(Debug, Clone)]
pub struct Swatch {
    /// Display name, freely editable.
    pub name: String,
    /// Generated once at creation, never recomputed, never persisted.
    id: SwatchId,
    /// The color. Clamping lives inside [`Hsl`] itself.
    pub color: Hsl,
    /// Owning palette, or `None` while detached.
    palette: Option<PaletteId>,
}

impl Swatch {
    /// Create a detached swatch. It is not reachable from any palette until
    /// explicitly inserted.
    pub fn new(name: impl Into<String>, color: Hsl) -> Self {
        Self {
            name: name.into(),
            id: Uuid::new_v4(),
            color,
            palette: None,
        }
    }

    pub fn id(&self) -> SwatchId {
        self.id
    }

    /// Owning palette id, `None` if detached.
    pub fn palette(&self) -> Option<PaletteId> {
        self.palette
    }

    /// Copy with a fresh id, same name and color, detached.
    pub fn duplicate(&self) -> Self {
        Self::new(self.name.clone(), self.color)
    }
}

/// A named, ordered collection of swatches. Order is display and export
/// order.
#[derive(Debug, Clone)]
pub struct Palette {
    pub name: String,
    id: PaletteId,
    swatches: Vec<Swatch>,
}

impl Palette {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Uuid::new_v4(),
            swatches: Vec::new(),
        }
    }

    pub fn id(&self) -> PaletteId {
        self.id
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

    /// Position of a swatch in the sequence. Derived query, recomputed on
    /// demand: the sequence mutates underneath.
    pub fn index_of(&self, swatch: SwatchId) -> Option<usize> {
        self.swatches.iter().position(|s| s.id == swatch)
    }

    pub fn swatch(&self, id: SwatchId) -> Option<&Swatch> {
        self.swatches.iter().find(|s| s.id == id)
    }

    pub fn swatch_mut(&mut self, id: SwatchId) -> Option<&mut Swatch> {
        self.swatches.iter_mut().find(|s| s.id == id)
    }

    /// Insert a detached swatch at `index` (clamped to the sequence end),
    /// taking ownership and assigning the back-reference.
    ///
    /// Panics if the swatch is still attached elsewhere: it would end up in
    /// two palettes at once.
    pub fn insert(&mut self, index: usize, mut swatch: Swatch) {
        assert!(
            swatch.palette.is_none(),
            "swatch {:?} is already attached to a palette",
            swatch.name
        );
        swatch.palette = Some(self.id);
        let index = index.min(self.swatches.len());
        self.swatches.insert(index, swatch);
    }

    /// Append a detached swatch.
    pub fn push(&mut self, swatch: Swatch) {
        self.insert(self.swatches.len(), swatch);
    }

    /// Remove a swatch by identity and return it detached.
    ///
    /// Panics if the swatch is not in this palette.
    pub fn remove(&mut self, id: SwatchId) -> Swatch {
        let index = self
            .index_of(id)
            .unwrap_or_else(|| panic!("swatch {id} is not in palette {:?}", self.name));
        let mut swatch = self.swatches.remove(index);
        swatch.palette = None;
        swatch
    }

    /// Serialized form: ids are dropped, colors become hex strings.
    pub fn to_doc(&self) -> PaletteDoc {
        PaletteDoc {
            name: self.name.clone(),
            swatches: self
                .swatches
                .iter()
                .map(|s| SwatchDoc {
                    name: s.name.clone(),
                    color: s.color.to_hex(),
                })
                .collect(),
        }
    }
}

/// Where a dragged or spliced swatch lands: before a specific swatch, or at
/// the end of the palette when `before` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub palette: PaletteId,
    pub before: Option<SwatchId>,
}

/// The process-wide ordered list of live palettes plus the "active" pointer.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    palettes: Vec<Palette>,
    active: Option<PaletteId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a palette and append it to the registry. The first palette
    /// created becomes active.
    pub fn create(&mut self, name: impl Into<String>) -> PaletteId {
        let palette = Palette::new(name);
        let id = palette.id;
        self.palettes.push(palette);
        if self.active.is_none() {
            self.active = Some(id);
        }
        id
    }

    /// Delete a palette by identity and return it.
    ///
    /// Panics if the palette is not registered. Deleting the active palette
    /// moves the active pointer to the first remaining palette.
    pub fn delete(&mut self, id: PaletteId) -> Palette {
        let index = self
            .palettes
            .iter()
            .position(|p| p.id == id)
            .unwrap_or_else(|| panic!("palette {id} is not in the registry"));
        let palette = self.palettes.remove(index);
        if self.active == Some(id) {
            self.active = self.palettes.first().map(|p| p.id);
        }
        palette
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn palette(&self, id: PaletteId) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.id == id)
    }

    pub fn palette_mut(&mut self, id: PaletteId) -> Option<&mut Palette> {
        self.palettes.iter_mut().find(|p| p.id == id)
    }

    /// The active palette id, `None` only before any palette exists.
    pub fn active_id(&self) -> Option<PaletteId> {
        self.active
    }

    pub fn active(&self) -> Option<&Palette> {
        self.active.and_then(|id| self.palette(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Palette> {
        let id = self.active?;
        self.palette_mut(id)
    }

    /// Position of the active palette in the registry order.
    pub fn active_index(&self) -> Option<usize> {
        let id = self.active?;
        self.palettes.iter().position(|p| p.id == id)
    }

    /// Make a registered palette the active one. Panics on identity miss.
    pub fn set_active(&mut self, id: PaletteId) {
        assert!(
            self.palette(id).is_some(),
            "cannot activate palette {id}: not in the registry"
        );
        self.active = Some(id);
    }

    /// Find a swatch anywhere in the registry.
    pub fn swatch(&self, id: SwatchId) -> Option<&Swatch> {
        self.palettes.iter().find_map(|p| p.swatch(id))
    }

    pub fn swatch_mut(&mut self, id: SwatchId) -> Option<&mut Swatch> {
        self.palettes.iter_mut().find_map(|p| p.swatch_mut(id))
    }

    /// Owning palette and position of a swatch, if it is attached anywhere.
    pub fn locate(&self, id: SwatchId) -> Option<(PaletteId, usize)> {
        self.palettes
            .iter()
            .find_map(|p| p.index_of(id).map(|i| (p.id, i)))
    }

    /// Insert a detached swatch into `target`, returning its new index.
    ///
    /// A vanished `before` swatch degrades to an append rather than a panic:
    /// the drop target was computed from hover state, not from the model.
    pub fn insert_at(&mut self, target: DropTarget, swatch: Swatch) -> usize {
        let palette = self
            .palette_mut(target.palette)
            .unwrap_or_else(|| panic!("palette {} is not in the registry", target.palette));
        let index = target
            .before
            .and_then(|before| palette.index_of(before))
            .unwrap_or(palette.len());
        palette.insert(index, swatch);
        index
    }

    /// Move a swatch between (or within) palettes as one logical operation:
    /// remove from source, reassign the back-reference, insert at the
    /// target. No caller can observe the swatch in zero or two palettes.
    pub fn transfer(&mut self, source: PaletteId, swatch: SwatchId, target: DropTarget) -> usize {
        let detached = self
            .palette_mut(source)
            .unwrap_or_else(|| panic!("palette {source} is not in the registry"))
            .remove(swatch);
        self.insert_at(target, detached)
    }

    /// Rebuild palettes from their serialized form. Every document is
    /// validated before the registry is touched, so a malformed color in any
    /// document leaves the registry unchanged.
    pub fn revive_all(&mut self, docs: &[PaletteDoc]) -> Result<Vec<PaletteId>, ColorError> {
        let mut revived = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut palette = Palette::new(doc.name.clone());
            for swatch_doc in &doc.swatches {
                let color = Hsl::from_hex(&swatch_doc.color)?;
                palette.push(Swatch::new(swatch_doc.name.clone(), color));
            }
            revived.push(palette);
        }

        let mut ids = Vec::with_capacity(revived.len());
        for palette in revived {
            ids.push(palette.id);
            self.palettes.push(palette);
        }
        if self.active.is_none() {
            self.active = self.palettes.first().map(|p| p.id);
        }
        Ok(ids)
    }

    /// Serialized form of the whole registry, in registry order.
    pub fn to_docs(&self) -> Vec<PaletteDoc> {
        self.palettes.iter().map(Palette::to_doc).collect()
    }
}

/// Persisted form of a swatch. Ids are never serialized; fresh ones are
/// generated on revive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwatchDoc {
    pub name: String,
    /// Hex color, `#rrggbb`.
    pub color: String,
}

/// Persisted form of a palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteDoc {
    pub name: String,
    pub swatches: Vec<SwatchDoc>,
}

impl PaletteDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            swatches: Vec::new(),
        }
    }
}

//! Color interpolation session.
//!
//! A transient sub-editor that previews N interpolated swatches between two
//! neighbouring swatches of the active palette before committing them. The
//! preview is recomputed from scratch on every parameter change: N is
//! small, correctness wins over cleverness.

use crate::color::{Hsl, lerp_channel, lerp_hue};
use crate::model::{PaletteId, Registry, Swatch, SwatchId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a session could not be opened or reloaded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LerpError {
    #[error("No palette is active")]
    NoActivePalette,
    #[error("Interpolation needs a predecessor swatch; index 0 has none")]
    NoPredecessor,
    #[error("Interpolation needs a successor swatch at the insertion index")]
    NoSuccessor,
}

/// The easing functions offered per channel. A closed set; `Poly*` and
/// `Back*` take a shape parameter (exponent / overshoot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    SinIn,
    SinOut,
    SinInOut,
    PolyIn,
    PolyOut,
    PolyInOut,
    BackIn,
    BackOut,
    BackInOut,
}

impl Easing {
    /// Whether the shape parameter has any effect.
    pub fn is_parametric(self) -> bool {
        matches!(
            self,
            Self::PolyIn
                | Self::PolyOut
                | Self::PolyInOut
                | Self::BackIn
                | Self::BackOut
                | Self::BackInOut
        )
    }

    /// Apply the easing to `t` in `[0, 1]`.
    pub fn apply(self, t: f64, shape: f64) -> f64 {
        use std::f64::consts::{FRAC_PI_2, PI};
        match self {
            Self::Linear => t,
            Self::SinIn => 1.0 - (t * FRAC_PI_2).cos(),
            Self::SinOut => (t * FRAC_PI_2).sin(),
            Self::SinInOut => (1.0 - (PI * t).cos()) / 2.0,
            Self::PolyIn => t.powf(shape),
            Self::PolyOut => 1.0 - (1.0 - t).powf(shape),
            Self::PolyInOut => {
                let t = t * 2.0;
                if t <= 1.0 {
                    t.powf(shape) / 2.0
                } else {
                    (2.0 - (2.0 - t).powf(shape)) / 2.0
                }
            }
            Self::BackIn => t * t * ((shape + 1.0) * t - shape),
            Self::BackOut => {
                let t = t - 1.0;
                t * t * ((shape + 1.0) * t + shape) + 1.0
            }
            Self::BackInOut => {
                let t = t * 2.0;
                if t < 1.0 {
                    (t * t * ((shape + 1.0) * t - shape)) / 2.0
                } else {
                    let t = t - 2.0;
                    (t * t * ((shape + 1.0) * t + shape) + 2.0) / 2.0
                }
            }
        }
    }
}

/// Easing selection for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelEase {
    pub easing: Easing,
    /// Shape parameter; only meaningful for parametric easings.
    pub shape: f64,
}

impl Default for ChannelEase {
    fn default() -> Self {
        Self {
            easing: Easing::Linear,
            shape: 3.0,
        }
    }
}

impl ChannelEase {
    fn ease(&self, t: f64) -> f64 {
        self.easing.apply(t, self.shape)
    }
}

/// The three interpolated channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Hue,
    Saturation,
    Lightness,
}

/// Session parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LerpSettings {
    /// Number of interior samples, at least 1.
    pub count: usize,
    pub hue: ChannelEase,
    pub saturation: ChannelEase,
    pub lightness: ChannelEase,
}

impl LerpSettings {
    pub fn channel_mut(&mut self, channel: Channel) -> &mut ChannelEase {
        match channel {
            Channel::Hue => &mut self.hue,
            Channel::Saturation => &mut self.saturation,
            Channel::Lightness => &mut self.lightness,
        }
    }
}

impl Default for LerpSettings {
    fn default() -> Self {
        Self {
            count: 1,
            hue: ChannelEase::default(),
            saturation: ChannelEase::default(),
            lightness: ChannelEase::default(),
        }
    }
}

/// A live interpolation session over the active palette.
///
/// While a session is open, the editor substitutes the session's
/// [`display`](Self::display) sequence for the active palette. Cancelling is
/// dropping the session; nothing it created ever touched the registry.
#[derive(Debug)]
pub struct LerpSession {
    palette: PaletteId,
    /// Insertion index into the real palette's sequence.
    index: usize,
    start: SwatchId,
    end: SwatchId,
    pub settings: LerpSettings,
    /// Detached preview swatches, rebuilt by [`reload`](Self::reload).
    preview: Vec<Swatch>,
}

impl LerpSession {
    /// Open a session inserting at `index` into the active palette, so the
    /// bounding swatches are `swatches[index - 1]` and `swatches[index]`.
    /// Rejected before any transient state exists when either bound is
    /// missing.
    pub fn open(registry: &Registry, index: usize) -> Result<Self, LerpError> {
        let palette = registry.active().ok_or(LerpError::NoActivePalette)?;
        if index == 0 {
            return Err(LerpError::NoPredecessor);
        }
        let start = palette
            .swatches()
            .get(index - 1)
            .ok_or(LerpError::NoPredecessor)?;
        let end = palette.swatches().get(index).ok_or(LerpError::NoSuccessor)?;

        let mut session = Self {
            palette: palette.id(),
            index,
            start: start.id(),
            end: end.id(),
            settings: LerpSettings::default(),
            preview: Vec::new(),
        };
        session.reload(registry)?;
        Ok(session)
    }

    pub fn palette(&self) -> PaletteId {
        self.palette
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The current preview swatches (detached).
    pub fn preview(&self) -> &[Swatch] {
        &self.preview
    }

    /// Recompute the preview from the bounding colors and the current
    /// settings. Pure: two reloads with the same inputs produce identical
    /// colors.
    pub fn reload(&mut self, registry: &Registry) -> Result<(), LerpError> {
        let palette = registry
            .palette(self.palette)
            .ok_or(LerpError::NoActivePalette)?;
        let start = palette.swatch(self.start).ok_or(LerpError::NoPredecessor)?;
        let end = palette.swatch(self.end).ok_or(LerpError::NoSuccessor)?;

        let count = self.settings.count.max(1);
        let (from, to) = (start.color, end.color);

        self.preview = (1..=count)
            .map(|k| {
                let t = k as f64 / (count + 1) as f64;
                let h = lerp_hue(from.h(), to.h(), self.settings.hue.ease(t) as f32);
                let s = lerp_channel(from.s(), to.s(), self.settings.saturation.ease(t) as f32);
                let l = lerp_channel(from.l(), to.l(), self.settings.lightness.ease(t) as f32);
                Swatch::new(format!("{}-{k}", start.name), Hsl::new(h, s, l))
            })
            .collect();
        Ok(())
    }

    /// The substitute sequence the views show while the session is open:
    /// beforeSlice + preview + afterSlice, rebuilt from the live palette.
    pub fn display(&self, registry: &Registry) -> Vec<Swatch> {
        let Some(palette) = registry.palette(self.palette) else {
            return Vec::new();
        };
        let swatches = palette.swatches();
        let mut display = Vec::with_capacity(swatches.len() + self.preview.len());
        display.extend_from_slice(&swatches[..self.index.min(swatches.len())]);
        display.extend(self.preview.iter().cloned());
        display.extend_from_slice(&swatches[self.index.min(swatches.len())..]);
        display
    }

    /// Splice the preview swatches into the real palette at the insertion
    /// index and end the session. Returns the ids of the committed swatches.
    pub fn commit(self, registry: &mut Registry) -> Vec<SwatchId> {
        let palette = registry
            .palette_mut(self.palette)
            .unwrap_or_else(|| panic!("palette {} vanished during lerp session", self.palette));
        let mut ids = Vec::with_capacity(self.preview.len());
        for (offset, swatch) in self.preview.into_iter().enumerate() {
            ids.push(swatch.id());
            palette.insert(self.index + offset, swatch);
        }
        ids
    }
}

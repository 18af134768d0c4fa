//! HSL color value type.
//!
//! Every write path clamps: hue wraps modulo 360, saturation and lightness
//! clamp to `[0, 1]`. Conversion to and from RGB goes through the `palette`
//! crate; hex strings are parsed and formatted by hand.

use palette::{FromColor, Srgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Malformed hex color: {0:?}")]
    BadHex(String),
}

/// An HSL triple, always within valid ranges.
///
/// Fields are private so the clamping in [`Hsl::new`] and the setters cannot
/// be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    h: f32,
    s: f32,
    l: f32,
}

impl Hsl {
    /// Create a clamped HSL color. Hue in degrees (any value, wrapped),
    /// saturation and lightness in `[0, 1]` (clamped).
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    /// Hue in degrees, `[0, 360)`.
    pub fn h(&self) -> f32 {
        self.h
    }

    /// Saturation, `[0, 1]`.
    pub fn s(&self) -> f32 {
        self.s
    }

    /// Lightness, `[0, 1]`.
    pub fn l(&self) -> f32 {
        self.l
    }

    pub fn set_h(&mut self, h: f32) {
        self.h = wrap_hue(h);
    }

    pub fn set_s(&mut self, s: f32) {
        self.s = s.clamp(0.0, 1.0);
    }

    pub fn set_l(&mut self, l: f32) {
        self.l = l.clamp(0.0, 1.0);
    }

    /// Parse a `#rrggbb` (or shorthand `#rgb`) hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex).trim();
        let bad = || ColorError::BadHex(hex.to_string());

        let (r, g, b) = match digits.len() {
            3 => {
                let r = u8::from_str_radix(&digits[0..1], 16).map_err(|_| bad())? * 17;
                let g = u8::from_str_radix(&digits[1..2], 16).map_err(|_| bad())? * 17;
                let b = u8::from_str_radix(&digits[2..3], 16).map_err(|_| bad())? * 17;
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16).map_err(|_| bad())?;
                let g = u8::from_str_radix(&digits[2..4], 16).map_err(|_| bad())?;
                let b = u8::from_str_radix(&digits[4..6], 16).map_err(|_| bad())?;
                (r, g, b)
            }
            _ => return Err(bad()),
        };

        Ok(Self::from_rgb8(r, g, b))
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Convert from 8-bit RGB components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let rgb: Srgb<f32> = Srgb::new(r, g, b).into_format();
        let hsl = palette::Hsl::from_color(rgb);
        Self::new(
            hsl.hue.into_positive_degrees(),
            hsl.saturation,
            hsl.lightness,
        )
    }

    /// Convert to 8-bit RGB components.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let hsl = palette::Hsl::new_srgb(self.h, self.s, self.l);
        let rgb = Srgb::from_color(hsl).into_format::<u8>();
        (rgb.red, rgb.green, rgb.blue)
    }
}

/// Wrap a hue angle into `[0, 360)`.
pub fn wrap_hue(h: f32) -> f32 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid(360.0) can yield exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Interpolate a hue along the shortest angular path.
///
/// `lerp_hue(350.0, 10.0, 0.5)` passes through 0, not 180.
pub fn lerp_hue(start: f32, end: f32, t: f32) -> f32 {
    let delta = (end - start).rem_euclid(360.0);
    let delta = if delta > 180.0 { delta - 360.0 } else { delta };
    wrap_hue(start + delta * t)
}

/// Linear interpolation for the bounded saturation/lightness channels.
pub fn lerp_channel(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        let c = Hsl::new(725.0, 1.5, -0.25);
        assert!((c.h() - 5.0).abs() < 1e-3);
        assert_eq!(c.s(), 1.0);
        assert_eq!(c.l(), 0.0);

        let mut c = Hsl::new(0.0, 0.5, 0.5);
        c.set_h(-30.0);
        assert!((c.h() - 330.0).abs() < 1e-3);
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Hsl::from_hex("#ff0000").unwrap();
        assert_eq!(c.to_hex(), "#ff0000");

        let c = Hsl::from_hex("#60afbf").unwrap();
        assert_eq!(c.to_hex(), "#60afbf");
    }

    #[test]
    fn test_shorthand_hex() {
        let c = Hsl::from_hex("#f00").unwrap();
        assert_eq!(c.to_hex(), "#ff0000");
    }

    #[test]
    fn test_bad_hex() {
        assert!(Hsl::from_hex("").is_err());
        assert!(Hsl::from_hex("#12345").is_err());
        assert!(Hsl::from_hex("#gggggg").is_err());
        assert!(Hsl::from_hex("not a color").is_err());
    }

    #[test]
    fn test_rgb_conversion() {
        let c = Hsl::from_rgb8(255, 0, 0);
        assert!(c.h().abs() < 1e-3);
        assert!((c.s() - 1.0).abs() < 1e-3);
        assert!((c.l() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_lerp_hue_short_path() {
        let mid = lerp_hue(350.0, 10.0, 0.5);
        assert!(mid < 1e-3 || (360.0 - mid) < 1e-3, "midpoint was {mid}");

        // No wrap needed when the short path is direct.
        assert!((lerp_hue(10.0, 50.0, 0.5) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_lerp_hue_crosses_zero_downward() {
        let mid = lerp_hue(10.0, 350.0, 0.5);
        assert!(mid < 1e-3 || (360.0 - mid) < 1e-3, "midpoint was {mid}");
    }
}

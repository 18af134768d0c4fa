//! Hue range: the window of hues mapped onto the plot's hue axis.
//!
//! The wheel widget's pixel/angle geometry lives outside the core; this is
//! the range arithmetic behind it. The window can wrap past 0° or 360°, in
//! which case [`HueRange::spread`] extends below 0 or above 360 and dots
//! re-enter from the other side.

/// A hue window over the color wheel. Defaults to the full wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueRange {
    start: f32,
    end: f32,
}

impl Default for HueRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 360.0,
        }
    }
}

impl HueRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// Move the start knob. Kept within `[-180, 360)`.
    pub fn set_start(&mut self, mut angle: f32) {
        if angle < -180.0 {
            angle += 360.0;
        } else if angle >= 360.0 {
            angle -= 360.0;
        }
        self.start = angle;
    }

    /// Move the end knob. Kept within `(0, 540]`.
    pub fn set_end(&mut self, mut angle: f32) {
        if angle <= 0.0 {
            angle += 360.0;
        } else if angle > 540.0 {
            angle -= 360.0;
        }
        self.end = angle;
    }

    /// Angular size of the window, `(0, 360]`.
    pub fn delta(&self) -> f32 {
        let delta = (self.end + 360.0 - self.start) % 360.0;
        if delta == 0.0 { 360.0 } else { delta }
    }

    /// Midpoint of the window on the wheel, `[0, 360)`.
    pub fn center(&self) -> f32 {
        (self.delta() / 2.0 + self.start + 360.0) % 360.0
    }

    /// Rotate the whole window so its midpoint lands on `angle`. The
    /// explicit-command counterpart of the [`center`](Self::center) query.
    pub fn set_center(&mut self, angle: f32) {
        let diff = angle - self.center();
        let (start, end) = self.spread();
        self.start = start + diff;
        self.end = end + diff;
    }

    /// Shrink or grow the window symmetrically around its center.
    pub fn widen(&mut self, by: f32) {
        self.set_start(self.start - by);
        self.set_end(self.end + by);
    }

    /// Back to the full wheel.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Normalized `[start, end]` of the window. `start` may be negative or
    /// `end` above 360 when the window wraps; `end - start == delta()`.
    pub fn spread(&self) -> (f32, f32) {
        let mut end = (self.end + 360.0) % 360.0;
        let mut start = end - self.delta();
        if start < -180.0 {
            start += 360.0;
            end += 360.0;
        }
        (start, end)
    }

    /// Axis position of a hue within the current window: the hue itself, or
    /// its ±360° alias when the window wraps. `None` when the hue falls
    /// outside the window and its dot should be hidden.
    pub fn project(&self, hue: f32) -> Option<f32> {
        let (min, max) = self.spread();

        if 0.0 <= min && max <= 360.0 {
            (min <= hue && hue <= max).then_some(hue)
        } else if min < 0.0 {
            if hue <= max {
                Some(hue)
            } else if min <= hue - 360.0 {
                Some(hue - 360.0)
            } else {
                None
            }
        } else {
            // max > 360
            if min <= hue {
                Some(hue)
            } else if hue + 360.0 <= max {
                Some(hue + 360.0)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_wheel_shows_everything() {
        let range = HueRange::new();
        assert_eq!(range.delta(), 360.0);
        assert_eq!(range.spread(), (0.0, 360.0));
        assert_eq!(range.project(0.0), Some(0.0));
        assert_eq!(range.project(359.0), Some(359.0));
    }

    #[test]
    fn test_plain_window() {
        let mut range = HueRange::new();
        range.set_start(100.0);
        range.set_end(200.0);

        assert_eq!(range.delta(), 100.0);
        assert_eq!(range.center(), 150.0);
        assert_eq!(range.project(150.0), Some(150.0));
        assert_eq!(range.project(50.0), None);
        assert_eq!(range.project(250.0), None);
    }

    #[test]
    fn test_window_wrapping_below_zero() {
        let mut range = HueRange::new();
        range.set_start(-30.0);
        range.set_end(30.0);

        let (min, max) = range.spread();
        assert!(min < 0.0 && max <= 360.0);
        // 350° re-enters as -10°.
        assert_eq!(range.project(350.0), Some(-10.0));
        assert_eq!(range.project(10.0), Some(10.0));
        assert_eq!(range.project(180.0), None);
    }

    #[test]
    fn test_window_wrapping_above_360() {
        // A wide window whose end knob sits just behind its start knob
        // normalizes to a spread reaching past 360.
        let mut range = HueRange::new();
        range.set_start(110.0);
        range.set_end(100.0);

        let (min, max) = range.spread();
        assert_eq!((min, max), (110.0, 460.0));
        assert_eq!(range.project(340.0), Some(340.0));
        // 20° re-enters as 380°.
        assert_eq!(range.project(20.0), Some(380.0));
        assert_eq!(range.project(105.0), None);
    }

    #[test]
    fn test_set_center_rotates_window() {
        let mut range = HueRange::new();
        range.set_start(100.0);
        range.set_end(200.0);
        range.set_center(250.0);

        assert!((range.center() - 250.0).abs() < 1e-3);
        assert!((range.delta() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset() {
        let mut range = HueRange::new();
        range.set_start(45.0);
        range.set_end(90.0);
        range.reset();
        assert_eq!(range, HueRange::default());
    }
}

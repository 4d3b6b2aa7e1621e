use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{PlotError, PlotResult};

/// Pan and zoom transform applied to the whole plotted view.
///
/// Live scales are always derived by composing this transform against the
/// initial scale snapshot; the transform is replaced, never accumulated,
/// so no floating error builds up across gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    /// Zoom factor (1.0 = 100%).
    pub k: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            k: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn new(translate_x: f64, translate_y: f64, k: f64) -> PlotResult<Self> {
        if !translate_x.is_finite() || !translate_y.is_finite() {
            return Err(PlotError::InvalidData(
                "transform translation must be finite".to_owned(),
            ));
        }
        if !k.is_finite() || k <= 0.0 {
            return Err(PlotError::InvalidData(
                "transform zoom factor must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            translate_x,
            translate_y,
            k,
        })
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self.translate_x == 0.0 && self.translate_y == 0.0 && self.k == 1.0
    }

    /// Derives the live x scale from the initial snapshot.
    pub fn rescale_x(self, initial: LinearScale) -> PlotResult<LinearScale> {
        let (range_start, range_end) = initial.range();
        let domain_start = initial.invert((range_start - self.translate_x) / self.k);
        let domain_end = initial.invert((range_end - self.translate_x) / self.k);
        initial.with_domain((domain_start, domain_end))
    }

    /// Derives the live y scale from the initial snapshot.
    pub fn rescale_y(self, initial: LinearScale) -> PlotResult<LinearScale> {
        let (range_start, range_end) = initial.range();
        let domain_start = initial.invert((range_start - self.translate_y) / self.k);
        let domain_end = initial.invert((range_end - self.translate_y) / self.k);
        initial.with_domain((domain_start, domain_end))
    }

    /// Translation by a pixel delta at the current zoom level.
    #[must_use]
    pub fn translated_by(self, dx: f64, dy: f64) -> Self {
        Self {
            translate_x: self.translate_x + dx,
            translate_y: self.translate_y + dy,
            k: self.k,
        }
    }

    /// Multiplies the zoom factor around a pixel anchor, clamped to `extent`.
    ///
    /// The anchor keeps its pixel position across the zoom.
    #[must_use]
    pub fn zoomed_around(self, factor: f64, anchor_x: f64, anchor_y: f64, extent: (f64, f64)) -> Self {
        let k = (self.k * factor).clamp(extent.0, extent.1);
        let ratio = k / self.k;
        Self {
            translate_x: anchor_x - (anchor_x - self.translate_x) * ratio,
            translate_y: anchor_y - (anchor_y - self.translate_y) * ratio,
            k,
        }
    }

    /// Componentwise linear interpolation toward `target`.
    #[must_use]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        Self {
            translate_x: self.translate_x + (target.translate_x - self.translate_x) * t,
            translate_y: self.translate_y + (target.translate_y - self.translate_y) * t,
            k: self.k + (target.k - self.k) * t,
        }
    }
}

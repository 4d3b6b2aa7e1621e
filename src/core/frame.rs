use serde::{Deserialize, Serialize};

use crate::core::LinearScale;

/// How frame scales relate plot coordinates to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameMode {
    /// Plot coordinates are data-space values mapped through the scales.
    DomainMapped,
    /// Plot coordinates are already pixels; the scales are identities so
    /// downstream code applies them uniformly in both modes.
    PixelIdentity,
}

/// The live and initial scale pairs for one layout build.
///
/// The initial pair is an immutable snapshot taken at build time; live scales
/// are only ever rewritten by composing a viewport transform against that
/// snapshot, so repeated pan/zoom never accumulates floating error and the
/// view can always be reset exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateFrame {
    mode: FrameMode,
    x: LinearScale,
    y: LinearScale,
    initial_x: LinearScale,
    initial_y: LinearScale,
}

impl CoordinateFrame {
    #[must_use]
    pub fn new(x: LinearScale, y: LinearScale, mode: FrameMode) -> Self {
        Self {
            mode,
            x,
            y,
            initial_x: x,
            initial_y: y,
        }
    }

    #[must_use]
    pub fn mode(self) -> FrameMode {
        self.mode
    }

    #[must_use]
    pub fn x(self) -> LinearScale {
        self.x
    }

    #[must_use]
    pub fn y(self) -> LinearScale {
        self.y
    }

    #[must_use]
    pub fn initial_x(self) -> LinearScale {
        self.initial_x
    }

    #[must_use]
    pub fn initial_y(self) -> LinearScale {
        self.initial_y
    }

    /// Replaces the live pair. The initial snapshot is untouched.
    pub fn set_live(&mut self, x: LinearScale, y: LinearScale) {
        self.x = x;
        self.y = y;
    }

    /// Restores the live pair to the build-time snapshot.
    pub fn reset_to_initial(&mut self) {
        self.x = self.initial_x;
        self.y = self.initial_y;
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{CoordinateFrame, LinearScale};
use crate::error::{PlotError, PlotResult};
use crate::interaction::ViewTransform;

/// Wall-clock length of the host-triggered zoom-view nudge.
pub const ZOOM_VIEW_DURATION_SECONDS: f64 = 1.0;

/// Zoom factor bounds for all zoom paths.
pub const ZOOM_EXTENT: (f64, f64) = (0.5, 3.0);

/// View state mutated only through the engine's event dispatch.
///
/// At most one single-point focus and one multi-point focus are active at a
/// time; setting one clears the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    pub brushing: bool,
    pub background: String,
    focused_point: Option<u64>,
    focused_set: Option<Vec<u64>>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            brushing: false,
            background: "#fff".to_owned(),
            focused_point: None,
            focused_set: None,
        }
    }
}

impl InteractionState {
    /// Default state with a host-configured background color.
    #[must_use]
    pub fn with_background(background: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn focused_point(&self) -> Option<u64> {
        self.focused_point
    }

    #[must_use]
    pub fn focused_set(&self) -> Option<&[u64]> {
        self.focused_set.as_deref()
    }

    pub fn set_focused_point(&mut self, point: Option<u64>) {
        if point.is_some() {
            self.focused_set = None;
        }
        self.focused_point = point;
    }

    pub fn set_focused_set(&mut self, set: Option<Vec<u64>>) {
        if set.is_some() {
            self.focused_point = None;
        }
        self.focused_set = set;
    }
}

/// In-flight zoom-view interpolation.
///
/// Stepped cooperatively by the host; gestures arriving mid-flight are not
/// blocked and race with it, last writer wins on the transform.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ZoomAnimation {
    start: ViewTransform,
    target: ViewTransform,
    elapsed: f64,
    duration: f64,
}

/// Owns live vs. initial scale state and every transform application.
///
/// The initial snapshot inside the frame is never mutated; each gesture
/// frame replaces the transform outright and rewrites the live pair from
/// the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionController {
    frame: CoordinateFrame,
    transform: ViewTransform,
    zoom_extent: (f64, f64),
    plot_width: f64,
    plot_height: f64,
    animation: Option<ZoomAnimation>,
}

impl InteractionController {
    #[must_use]
    pub fn new(frame: CoordinateFrame, plot_width: f64, plot_height: f64) -> Self {
        Self {
            frame,
            transform: ViewTransform::default(),
            zoom_extent: ZOOM_EXTENT,
            plot_width,
            plot_height,
            animation: None,
        }
    }

    #[must_use]
    pub fn frame(&self) -> CoordinateFrame {
        self.frame
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Rewrites the live scales from the initial snapshot through `transform`.
    pub fn apply_transform(
        &mut self,
        transform: ViewTransform,
    ) -> PlotResult<(LinearScale, LinearScale)> {
        let live_x = transform.rescale_x(self.frame.initial_x())?;
        let live_y = transform.rescale_y(self.frame.initial_y())?;
        self.frame.set_live(live_x, live_y);
        self.transform = transform;
        Ok((live_x, live_y))
    }

    /// Restores the build-time snapshot exactly and drops any animation.
    pub fn reset_to_initial(&mut self) {
        self.frame.reset_to_initial();
        self.transform = ViewTransform::default();
        self.animation = None;
    }

    /// Drag pan: replaces the transform with a translated copy.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> PlotResult<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(PlotError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        self.apply_transform(self.transform.translated_by(dx, dy))?;
        Ok(())
    }

    /// Scroll zoom: replaces the transform, anchored at the pointer.
    pub fn zoom_around(&mut self, factor: f64, anchor_x: f64, anchor_y: f64) -> PlotResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PlotError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        self.apply_transform(self.transform.zoomed_around(
            factor,
            anchor_x,
            anchor_y,
            self.zoom_extent,
        ))?;
        Ok(())
    }

    /// Starts the time-boxed zoom-view nudge centered on the current view.
    pub fn begin_zoom_view(&mut self, factor: f64) -> PlotResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PlotError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        let target = self.transform.zoomed_around(
            factor,
            self.plot_width * 0.5,
            self.plot_height * 0.5,
            self.zoom_extent,
        );
        self.animation = Some(ZoomAnimation {
            start: self.transform,
            target,
            elapsed: 0.0,
            duration: ZOOM_VIEW_DURATION_SECONDS,
        });
        Ok(())
    }

    /// Advances the zoom-view animation and applies the interpolated
    /// transform. Returns `false` when no animation is in flight.
    ///
    /// The interpolation always writes from its own start/target pair, so a
    /// gesture that replaced the transform mid-flight is simply overwritten
    /// on the next step: the documented last-writer-wins race.
    pub fn step_animation(&mut self, delta_seconds: f64) -> PlotResult<bool> {
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return Err(PlotError::InvalidData(
                "animation delta seconds must be finite and > 0".to_owned(),
            ));
        }
        let Some(animation) = self.animation.as_mut() else {
            return Ok(false);
        };

        animation.elapsed += delta_seconds;
        let progress = (animation.elapsed / animation.duration).clamp(0.0, 1.0);
        let interpolated = animation
            .start
            .lerp(animation.target, ease_cubic_in_out(progress));
        let finished = progress >= 1.0;
        if finished {
            self.animation = None;
        }

        self.apply_transform(interpolated)?;
        Ok(true)
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inverted = -2.0 * t + 2.0;
        1.0 - inverted * inverted * inverted * 0.5
    }
}

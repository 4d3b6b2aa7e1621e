use tracing::debug;

use crate::core::{Layout, PlotPoint, build_layout};
use crate::error::{PlotError, PlotResult};
use crate::interaction::{
    BrushRect, DispatchChannel, EventKind, InteractionController, InteractionState, PlotEvent,
    SelectionBrush, ViewTransform,
};
use crate::render::{Color, OrdinalPalette, RectPrimitive, RenderBinding, Surface};

use super::callbacks::{HostCallbacks, ImageResolver};
use super::engine_config::ScatterEngineConfig;

/// Semi-transparent fill for the in-progress brush rectangle.
const BRUSH_FILL: Color = Color::rgba(119.0 / 255.0, 119.0 / 255.0, 119.0 / 255.0, 0.3);

/// Which overlay currently owns the pointer stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum PointerMode {
    Idle,
    Panning {
        origin: (f64, f64),
        start: ViewTransform,
    },
    Brushing,
}

/// Facade owning layout, interaction, brush and render binding state.
///
/// All host calls are synchronous; gesture callbacks run to completion
/// before the next is processed, so shared state needs no locking.
pub struct ScatterEngine<S: Surface> {
    pub(super) surface: S,
    pub(super) config: ScatterEngineConfig,
    pub(super) data: Vec<PlotPoint>,
    pub(super) layout: Option<Layout>,
    pub(super) controller: Option<InteractionController>,
    pub(super) binding: RenderBinding,
    pub(super) brush: SelectionBrush,
    pub(super) dispatch: DispatchChannel,
    pub(super) callbacks: HostCallbacks,
    pub(super) image_resolver: Option<Box<dyn ImageResolver>>,
    pub(super) state: InteractionState,
    pub(super) pointer: PointerMode,
    pub(super) hovered: Option<u64>,
}

impl<S: Surface> ScatterEngine<S> {
    pub fn new(surface: S, config: ScatterEngineConfig) -> PlotResult<Self> {
        config.validate()?;
        let palette = OrdinalPalette::with_presets(config.palette_presets.iter().cloned());
        let binding = RenderBinding::new(
            config.marker_radius,
            config.marker_kind,
            config.color_key,
            palette,
        )?;
        let state = InteractionState::with_background(config.background.clone());

        Ok(Self {
            surface,
            config,
            data: Vec::new(),
            layout: None,
            controller: None,
            binding,
            brush: SelectionBrush::new(),
            dispatch: DispatchChannel::new(),
            callbacks: HostCallbacks::default(),
            image_resolver: None,
            state,
            pointer: PointerMode::Idle,
            hovered: None,
        })
    }

    /// Replaces the data set. The current layout is dropped; the next
    /// `draw` rebuilds scales and markers from scratch.
    pub fn set_data(&mut self, points: Vec<PlotPoint>) {
        debug!(point_count = points.len(), "set data points");
        self.data = points;
        self.layout = None;
        self.controller = None;
        self.brush.clear();
        self.pointer = PointerMode::Idle;
        self.hovered = None;
    }

    /// Builds the layout and presents the first frame.
    ///
    /// Empty data is a precondition violation, surfaced before any scale
    /// math runs. Focus and brush state survive a redraw and are re-applied
    /// to the fresh binding.
    pub fn draw(&mut self) -> PlotResult<()> {
        if self.data.is_empty() {
            return Err(PlotError::InvalidData(
                "draw requires a non-empty data set".to_owned(),
            ));
        }

        let layout = build_layout(
            &self.data,
            self.config.mode,
            self.config.viewport,
            self.config.margins,
            &self.config.y_field,
            self.config.resolved_swarm_tuning(),
        )?;
        let plot_width = self.config.margins.inner_width(self.config.viewport);
        let plot_height = self.config.margins.inner_height(self.config.viewport);

        self.controller = Some(InteractionController::new(
            layout.frame,
            plot_width,
            plot_height,
        ));

        let resolver = self.image_resolver.as_deref();
        self.binding.bind(
            &self.data,
            &layout,
            self.config.viewport,
            plot_width,
            plot_height,
            |point| {
                resolver
                    .and_then(|r| r.image_url(point.id))
                    .or_else(|| point.image_ref.clone())
            },
        )?;
        self.layout = Some(layout);
        self.hovered = None;
        // Any earlier rectangle is expressed in the previous pixel space.
        self.brush.clear();

        if let Some(set) = self.state.focused_set().map(<[u64]>::to_vec) {
            self.binding.focus_set(&set);
        }
        if let Some(id) = self.state.focused_point() {
            self.binding.focus_one(id, true);
        }
        if self.state.brushing {
            self.brush.attach();
        } else {
            self.brush.remove();
        }

        self.present()
    }

    /// Host-triggered single-point focus; `None` unfocuses everything.
    pub fn focus_dot(&mut self, id: Option<u64>) -> PlotResult<()> {
        self.handle_event(PlotEvent::FocusOne(id))
    }

    /// Host-triggered multi-point focus; `None` clears the selection.
    pub fn focus_set(&mut self, ids: Option<&[u64]>) -> PlotResult<()> {
        self.handle_event(PlotEvent::FocusSet(ids.map(<[u64]>::to_vec)))
    }

    pub fn toggle_brushing(&mut self, on: bool) -> PlotResult<()> {
        self.handle_event(PlotEvent::ToggleBrushing(on))
    }

    /// Changes the background without a re-draw.
    pub fn toggle_background(&mut self, color: &str) -> PlotResult<()> {
        self.handle_event(PlotEvent::ToggleBackground(color.to_owned()))
    }

    /// Starts the animated zoom-view nudge.
    pub fn zoom_view(&mut self, factor: f64) -> PlotResult<()> {
        self.handle_event(PlotEvent::ZoomView(factor))
    }

    /// Advances the zoom-view animation. Returns `false` once idle.
    pub fn step(&mut self, delta_seconds: f64) -> PlotResult<bool> {
        let Some(controller) = self.controller.as_mut() else {
            return Ok(false);
        };
        if controller.step_animation(delta_seconds)? {
            self.after_transform_change()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Restores the initial scales and transform exactly.
    pub fn reset_view(&mut self) -> PlotResult<()> {
        let Some(controller) = self.controller.as_mut() else {
            return Ok(());
        };
        controller.reset_to_initial();
        self.after_transform_change()
    }

    /// Registers the single active handler for one event kind.
    pub fn on_event(&mut self, kind: EventKind, handler: impl FnMut(&PlotEvent) + 'static) {
        self.dispatch.on(kind, handler);
    }

    pub fn set_image_resolver(&mut self, resolver: Box<dyn ImageResolver>) {
        self.image_resolver = Some(resolver);
    }

    pub fn set_on_selected(&mut self, handler: impl FnMut(&[PlotPoint]) + 'static) {
        self.callbacks.set_on_selected(handler);
    }

    pub fn set_on_dot_clicked(&mut self, handler: impl FnMut(&PlotPoint) + 'static) {
        self.callbacks.set_on_dot_clicked(handler);
    }

    pub fn set_on_dot_hovered(
        &mut self,
        handler: impl FnMut(Option<(&PlotPoint, f64, f64)>) + 'static,
    ) {
        self.callbacks.set_on_dot_hovered(handler);
    }

    #[must_use]
    pub fn config(&self) -> &ScatterEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &[PlotPoint] {
        &self.data
    }

    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn interaction_state(&self) -> &InteractionState {
        &self.state
    }

    #[must_use]
    pub fn view_transform(&self) -> Option<ViewTransform> {
        self.controller.as_ref().map(InteractionController::transform)
    }

    #[must_use]
    pub fn brush_rect(&self) -> Option<BrushRect> {
        self.brush.rect()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.controller
            .as_ref()
            .is_some_and(InteractionController::is_animating)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn binding(&self) -> &RenderBinding {
        &self.binding
    }

    /// Presents the current scene, brush rectangle included.
    pub(super) fn present(&mut self) -> PlotResult<()> {
        let mut frame = self.binding.scene(&self.state.background)?;
        if let Some(rect) = self.brush.rect() {
            let (min_x, min_y, max_x, max_y) = rect.normalized();
            frame.overlay_rects.push(RectPrimitive::new(
                min_x,
                min_y,
                max_x - min_x,
                max_y - min_y,
                BRUSH_FILL,
            ));
        }
        self.surface.present(&frame)
    }

    /// Repositions markers through the new live scales and reconciles the
    /// brush extent, which lives in the same transformed pixel space.
    pub(super) fn after_transform_change(&mut self) -> PlotResult<()> {
        let Some(controller) = self.controller.as_ref() else {
            return Ok(());
        };
        let frame = controller.frame();
        if let Some(layout) = self.layout.as_ref() {
            self.binding.reposition_through(&layout.points, frame);
        }
        self.brush.clear();
        self.present()
    }
}

use crate::error::PlotResult;
use crate::interaction::PlotEvent;
use crate::render::{Color, Surface};

use super::engine::{PointerMode, ScatterEngine};

impl<S: Surface> ScatterEngine<S> {
    /// Applies one event and, when it changed state, emits it on the
    /// dispatch channel.
    ///
    /// No-op events (re-focusing the focused point, unfocusing nothing,
    /// re-toggling the current mode) change no state and emit nothing, so
    /// every observable mutation maps to exactly one emitted event.
    pub(super) fn handle_event(&mut self, event: PlotEvent) -> PlotResult<()> {
        let applied = match &event {
            PlotEvent::FocusOne(Some(id)) => self.apply_focus_one(*id)?,
            PlotEvent::FocusOne(None) => self.apply_unfocus()?,
            PlotEvent::FocusSet(Some(ids)) => self.apply_focus_set(ids.clone())?,
            PlotEvent::FocusSet(None) => self.apply_unfocus_set()?,
            PlotEvent::ToggleBackground(color) => self.apply_background(color.clone())?,
            PlotEvent::ToggleBrushing(on) => self.apply_brushing(*on)?,
            PlotEvent::ZoomView(factor) => self.apply_zoom_view(*factor)?,
        };

        if applied {
            self.dispatch.emit(&event);
        }
        Ok(())
    }

    fn apply_focus_one(&mut self, id: u64) -> PlotResult<bool> {
        let previous = self.state.focused_point();
        if previous == Some(id) {
            return Ok(false);
        }
        if !self.data.iter().any(|point| point.id == id) {
            return Ok(false);
        }

        let had_set = self.state.focused_set().is_some();
        self.state.set_focused_point(Some(id));

        if self.layout.is_some() {
            if had_set {
                self.binding.unfocus_set();
            }
            // Only one point carries the focus visuals at a time.
            if previous.is_some() {
                self.binding.unfocus();
            }
            self.binding.focus_one(id, true);
            self.present()?;
        }
        Ok(true)
    }

    fn apply_unfocus(&mut self) -> PlotResult<bool> {
        if self.state.focused_point().is_none() {
            return Ok(false);
        }
        self.state.set_focused_point(None);

        if self.layout.is_some() {
            self.binding.unfocus();
            self.present()?;
        }
        Ok(true)
    }

    fn apply_focus_set(&mut self, ids: Vec<u64>) -> PlotResult<bool> {
        if self.state.focused_set() == Some(ids.as_slice()) {
            return Ok(false);
        }

        let had_point = self.state.focused_point().is_some();
        self.state.set_focused_set(Some(ids.clone()));

        if self.layout.is_some() {
            if had_point {
                self.binding.unfocus();
            }
            self.binding.focus_set(&ids);
            self.present()?;
        }
        Ok(true)
    }

    fn apply_unfocus_set(&mut self) -> PlotResult<bool> {
        if self.state.focused_set().is_none() {
            return Ok(false);
        }
        self.state.set_focused_set(None);

        if self.layout.is_some() {
            self.binding.unfocus_set();
            self.present()?;
        }
        Ok(true)
    }

    fn apply_background(&mut self, color: String) -> PlotResult<bool> {
        Color::parse_hex(&color)?;
        if self.state.background == color {
            return Ok(false);
        }
        self.state.background = color;

        if self.layout.is_some() {
            self.present()?;
        }
        Ok(true)
    }

    fn apply_brushing(&mut self, on: bool) -> PlotResult<bool> {
        if self.state.brushing == on {
            return Ok(false);
        }
        self.state.brushing = on;

        if on {
            self.brush.attach();
        } else {
            let had_rect = self.brush.rect().is_some();
            self.brush.remove();
            if self.pointer == PointerMode::Brushing {
                self.pointer = PointerMode::Idle;
            }
            if had_rect && self.layout.is_some() {
                self.present()?;
            }
        }
        Ok(true)
    }

    fn apply_zoom_view(&mut self, factor: f64) -> PlotResult<bool> {
        let Some(controller) = self.controller.as_mut() else {
            return Ok(false);
        };
        controller.begin_zoom_view(factor)?;
        Ok(true)
    }
}

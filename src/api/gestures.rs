use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{MarkerKind, PlotPoint};
use crate::error::PlotResult;
use crate::render::{ICON_SIZE_PX, Surface};

use super::engine::{PointerMode, ScatterEngine};

impl<S: Surface> ScatterEngine<S> {
    /// Begins a drag. With the brush attached the brush owns the pointer
    /// stream and the drag draws a rectangle; otherwise it pans the view.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> PlotResult<()> {
        if self.layout.is_none() {
            return Ok(());
        }

        if self.brush.is_attached() {
            self.brush.drag_start(x, y);
            self.pointer = PointerMode::Brushing;
            self.present()?;
        } else if let Some(controller) = self.controller.as_ref() {
            self.pointer = PointerMode::Panning {
                origin: (x, y),
                start: controller.transform(),
            };
        }
        Ok(())
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> PlotResult<()> {
        match self.pointer {
            PointerMode::Brushing => {
                self.brush.drag_move(x, y);
                self.present()
            }
            PointerMode::Panning { origin, start } => {
                let transform = start.translated_by(x - origin.0, y - origin.1);
                if let Some(controller) = self.controller.as_mut() {
                    controller.apply_transform(transform)?;
                }
                self.after_transform_change()
            }
            PointerMode::Idle => self.update_hover(x, y),
        }
    }

    /// Ends a drag. A brush drag inverse-maps the rectangle through the
    /// live scales and reports the contained points to the host.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> PlotResult<()> {
        let mode = std::mem::replace(&mut self.pointer, PointerMode::Idle);
        match mode {
            PointerMode::Brushing => {
                self.brush.drag_move(x, y);
                let Some(controller) = self.controller.as_ref() else {
                    return Ok(());
                };
                let frame = controller.frame();
                let selected_indices = match self.layout.as_ref() {
                    Some(layout) => self.brush.drag_end(&frame, &layout.points),
                    None => Vec::new(),
                };

                let selected: Vec<PlotPoint> = match self.layout.as_ref() {
                    Some(layout) => selected_indices
                        .iter()
                        .filter_map(|&placed_index| {
                            let placement = layout.points.get(placed_index)?;
                            self.data.get(placement.index).cloned()
                        })
                        .collect(),
                    None => Vec::new(),
                };
                if let Some(handler) = self.callbacks.on_selected.as_mut() {
                    handler(&selected);
                }
                self.present()
            }
            PointerMode::Panning { .. } | PointerMode::Idle => Ok(()),
        }
    }

    /// Scroll zoom anchored at the pointer. Ignored while the brush owns
    /// the pointer stream.
    pub fn wheel_zoom(&mut self, factor: f64, x: f64, y: f64) -> PlotResult<()> {
        if self.brush.is_attached() {
            return Ok(());
        }
        let Some(controller) = self.controller.as_mut() else {
            return Ok(());
        };
        controller.zoom_around(factor, x, y)?;
        self.after_transform_change()
    }

    /// Click hit-testing forwards the struck point to the host.
    pub fn click(&mut self, x: f64, y: f64) -> PlotResult<()> {
        let Some(id) = self.hit_test(x, y) else {
            return Ok(());
        };
        let Some(point) = self
            .data
            .iter()
            .find(|point| point.id == id)
            .cloned()
        else {
            return Ok(());
        };
        if let Some(handler) = self.callbacks.on_dot_clicked.as_mut() {
            handler(&point);
        }
        Ok(())
    }

    /// Hover tracking: entering a marker focuses it without a label and
    /// fires `on_dot_hovered` with its pixel position; leaving unfocuses
    /// and fires `on_dot_hovered(None)`.
    fn update_hover(&mut self, x: f64, y: f64) -> PlotResult<()> {
        let hit = self.hit_test(x, y);
        match (self.hovered, hit) {
            (Some(previous), Some(id)) if previous == id => Ok(()),
            (_, Some(id)) => {
                self.hovered = Some(id);
                self.binding.focus_one(id, false);
                self.present()?;

                let Some(marker) = self.binding.marker_of(id) else {
                    return Ok(());
                };
                let (marker_x, marker_y, data_index) = (marker.x, marker.y, marker.index);
                let point = self.data.get(data_index).cloned();
                if let (Some(handler), Some(point)) =
                    (self.callbacks.on_dot_hovered.as_mut(), point.as_ref())
                {
                    handler(Some((point, marker_x, marker_y)));
                }
                Ok(())
            }
            (Some(_), None) => {
                self.hovered = None;
                // Hover-exit unfocuses everything on screen, the focused
                // dot included, so the recorded focus clears with it.
                self.binding.unfocus();
                self.state.set_focused_point(None);
                self.present()?;
                if let Some(handler) = self.callbacks.on_dot_hovered.as_mut() {
                    handler(None);
                }
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }

    /// Nearest marker whose hit area contains the pointer.
    fn hit_test(&self, x: f64, y: f64) -> Option<u64> {
        let mut candidates: SmallVec<[(OrderedFloat<f64>, u64); 4]> = SmallVec::new();
        for marker in self.binding.markers() {
            let hit_radius = match self.config.marker_kind {
                MarkerKind::Circle => marker.radius,
                MarkerKind::Icon => ICON_SIZE_PX * 0.5,
            };
            let dx = x - marker.x;
            let dy = y - marker.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance <= hit_radius {
                candidates.push((OrderedFloat(distance), marker.id));
            }
        }
        candidates
            .into_iter()
            .min_by_key(|candidate| candidate.0)
            .map(|candidate| candidate.1)
    }
}

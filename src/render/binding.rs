use indexmap::IndexMap;
use tracing::trace;

use crate::core::{CoordinateFrame, Layout, MarkerKind, PlacedPoint, PlotPoint, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::render::palette::{ColorKey, DIM_COLOR, OrdinalPalette, resolve_point_color};
use crate::render::{CirclePrimitive, Color, ImagePrimitive, RectPrimitive, SceneFrame, TextPrimitive};

/// Focused markers double their radius.
pub const FOCUS_RADIUS_FACTOR: f64 = 2.0;

/// Label anchor offset from its marker, in pixels.
pub const LABEL_OFFSET_X: f64 = -30.0;
pub const LABEL_OFFSET_Y: f64 = -15.0;

/// Labels never sit closer than this to the frame's left/top edges.
pub const LABEL_EDGE_MIN: f64 = 15.0;

const LABEL_FONT_SIZE_PX: f64 = 12.0;

/// Icon markers draw as squares of this size, centered on the position.
pub const ICON_SIZE_PX: f64 = 20.0;

/// One marker's current visual state.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerVisual {
    pub id: u64,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Current paint, which a multi-point focus may override.
    pub color: Color,
    /// Policy-resolved paint; the dim overlay never touches it.
    pub base_color: Color,
    pub label_text: String,
    pub image_url: Option<String>,
    pub focused: bool,
    pub in_focus_set: bool,
}

/// Handle for an attached focus label, keyed by point identity.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVisual {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Maps placed points to draw primitives and owns highlight visual state.
///
/// Labels are tracked in an identity-keyed registry rather than by matching
/// rendered text, so re-focusing reuses the existing handle.
#[derive(Debug)]
pub struct RenderBinding {
    markers: Vec<MarkerVisual>,
    /// Marker indices in back-to-front draw order.
    draw_order: Vec<usize>,
    labels: IndexMap<u64, LabelVisual>,
    base_radius: f64,
    kind: MarkerKind,
    color_key: ColorKey,
    palette: OrdinalPalette,
    dim_color: Color,
    viewport: Viewport,
    plot_width: f64,
    plot_height: f64,
}

impl RenderBinding {
    pub fn new(
        base_radius: f64,
        kind: MarkerKind,
        color_key: ColorKey,
        palette: OrdinalPalette,
    ) -> PlotResult<Self> {
        if !base_radius.is_finite() || base_radius <= 0.0 {
            return Err(PlotError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            markers: Vec::new(),
            draw_order: Vec::new(),
            labels: IndexMap::new(),
            base_radius,
            kind,
            color_key,
            palette,
            dim_color: Color::parse_hex(DIM_COLOR)?,
            viewport: Viewport::new(1, 1),
            plot_width: 1.0,
            plot_height: 1.0,
        })
    }

    #[must_use]
    pub fn markers(&self) -> &[MarkerVisual] {
        &self.markers
    }

    #[must_use]
    pub fn draw_order(&self) -> &[usize] {
        &self.draw_order
    }

    #[must_use]
    pub fn labels(&self) -> &IndexMap<u64, LabelVisual> {
        &self.labels
    }

    #[must_use]
    pub fn marker_of(&self, id: u64) -> Option<&MarkerVisual> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    /// Rebuilds one marker per placed point, positioned through the live
    /// scales and colored by the configured policy. Focus state is reset;
    /// callers re-apply it from their interaction state.
    pub fn bind(
        &mut self,
        points: &[PlotPoint],
        layout: &Layout,
        viewport: Viewport,
        plot_width: f64,
        plot_height: f64,
        image_url_of: impl Fn(&PlotPoint) -> Option<String>,
    ) -> PlotResult<()> {
        let frame = layout.frame;
        self.markers.clear();
        self.labels.clear();
        self.viewport = viewport;
        self.plot_width = plot_width;
        self.plot_height = plot_height;

        for placed in &layout.points {
            let point = points.get(placed.index).ok_or_else(|| {
                PlotError::InvalidData(format!(
                    "placement index {} has no backing point",
                    placed.index
                ))
            })?;
            let base_color = resolve_point_color(point, self.color_key, &mut self.palette)?;
            self.markers.push(MarkerVisual {
                id: placed.id,
                index: placed.index,
                x: frame.x().scale(placed.plot_x),
                y: frame.y().scale(placed.plot_y),
                radius: self.base_radius,
                color: base_color,
                base_color,
                label_text: point.name.clone(),
                image_url: image_url_of(point),
                focused: false,
                in_focus_set: false,
            });
        }
        self.draw_order = (0..self.markers.len()).collect();
        trace!(marker_count = self.markers.len(), "bound markers");
        Ok(())
    }

    /// Zoom redraw: repositions every marker through the new live scales
    /// without altering color, size, or focus state. Labels stay where
    /// they were attached.
    pub fn reposition_through(&mut self, placed: &[PlacedPoint], frame: CoordinateFrame) {
        for (marker, placement) in self.markers.iter_mut().zip(placed) {
            marker.x = frame.x().scale(placement.plot_x);
            marker.y = frame.y().scale(placement.plot_y);
        }
    }

    /// Enlarges, raises, and (optionally) labels one marker.
    ///
    /// Idempotent: returns `false` when nothing changed. The hover path
    /// passes `with_label = false`.
    pub fn focus_one(&mut self, id: u64, with_label: bool) -> bool {
        let Some(marker_index) = self.markers.iter().position(|marker| marker.id == id) else {
            return false;
        };

        let already_focused = self.markers[marker_index].focused;
        let label_present = self.labels.contains_key(&id);
        if already_focused && (!with_label || label_present) {
            return false;
        }

        {
            let marker = &mut self.markers[marker_index];
            marker.focused = true;
            marker.radius = self.base_radius * FOCUS_RADIUS_FACTOR;
        }
        self.raise_to_top(marker_index);

        if with_label && !label_present {
            let marker = &self.markers[marker_index];
            self.labels.insert(
                id,
                LabelVisual {
                    text: marker.label_text.clone(),
                    x: (marker.x + LABEL_OFFSET_X).max(LABEL_EDGE_MIN),
                    y: (marker.y + LABEL_OFFSET_Y).max(LABEL_EDGE_MIN),
                },
            );
        }
        true
    }

    /// Shrinks focused markers back and drops labels that do not belong to
    /// an active multi-point focus. Idempotent.
    pub fn unfocus(&mut self) -> bool {
        let mut changed = false;
        for marker in &mut self.markers {
            if marker.focused {
                marker.focused = false;
                marker.radius = self.base_radius;
                changed = true;
            }
        }

        let label_count = self.labels.len();
        let kept: IndexMap<u64, LabelVisual> = self
            .labels
            .drain(..)
            .filter(|(id, _)| {
                self.markers
                    .iter()
                    .any(|marker| marker.id == *id && marker.in_focus_set)
            })
            .collect();
        if kept.len() != label_count {
            changed = true;
        }
        self.labels = kept;
        changed
    }

    /// Raises member markers to the top and dims every non-member without
    /// altering its underlying color binding.
    pub fn focus_set(&mut self, ids: &[u64]) -> bool {
        let mut changed = false;
        for marker in &mut self.markers {
            let member = ids.contains(&marker.id);
            if marker.in_focus_set != member {
                marker.in_focus_set = member;
                changed = true;
            }
            let paint = if member { marker.base_color } else { self.dim_color };
            if marker.color != paint {
                marker.color = paint;
                changed = true;
            }
        }
        if changed {
            // Members raise above non-members, keeping relative order.
            let (rest, raised): (Vec<usize>, Vec<usize>) = self
                .draw_order
                .iter()
                .copied()
                .partition(|index| !self.markers[*index].in_focus_set);
            self.draw_order = rest;
            self.draw_order.extend(raised);
        }
        changed
    }

    /// Restores the configured color policy for all markers. Idempotent.
    pub fn unfocus_set(&mut self) -> bool {
        let mut changed = false;
        for marker in &mut self.markers {
            if marker.in_focus_set {
                marker.in_focus_set = false;
                changed = true;
            }
            if marker.color != marker.base_color {
                marker.color = marker.base_color;
                changed = true;
            }
        }
        changed
    }

    /// Builds the scene for one draw pass in back-to-front order.
    pub fn scene(&self, background: &str) -> PlotResult<SceneFrame> {
        let background_rect = RectPrimitive::new(
            0.0,
            0.0,
            self.plot_width,
            self.plot_height,
            Color::parse_hex(background)?,
        );
        let mut frame = SceneFrame::new(self.viewport, background_rect);

        for &marker_index in &self.draw_order {
            let marker = &self.markers[marker_index];
            match self.kind {
                MarkerKind::Circle => frame.circles.push(CirclePrimitive::new(
                    marker.x,
                    marker.y,
                    marker.radius,
                    marker.color,
                )),
                MarkerKind::Icon => match &marker.image_url {
                    Some(url) => frame.images.push(ImagePrimitive::new(
                        url.clone(),
                        marker.x - ICON_SIZE_PX * 0.5,
                        marker.y - ICON_SIZE_PX * 0.5,
                        ICON_SIZE_PX,
                    )),
                    // No resolvable image: draw the circle form instead of
                    // an empty primitive.
                    None => frame.circles.push(CirclePrimitive::new(
                        marker.x,
                        marker.y,
                        marker.radius,
                        marker.color,
                    )),
                },
            }
        }

        for label in self.labels.values() {
            if label.text.is_empty() {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                label.text.clone(),
                label.x,
                label.y,
                LABEL_FONT_SIZE_PX,
                Color::rgb(0.0, 0.0, 0.0),
            ));
        }

        Ok(frame)
    }

    fn raise_to_top(&mut self, marker_index: usize) {
        if let Some(position) = self
            .draw_order
            .iter()
            .position(|index| *index == marker_index)
        {
            self.draw_order.remove(position);
            self.draw_order.push(marker_index);
        }
    }
}

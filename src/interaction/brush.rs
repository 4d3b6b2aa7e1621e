use crate::core::{CoordinateFrame, PlacedPoint};

/// Axis-aligned selection rectangle in transformed pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    /// Corner-normalized bounds: `(min_x, min_y, max_x, max_y)`.
    #[must_use]
    pub fn normalized(self) -> (f64, f64, f64, f64) {
        (
            self.x0.min(self.x1),
            self.y0.min(self.y1),
            self.x0.max(self.x1),
            self.y0.max(self.y1),
        )
    }

    /// Zero-extent along either axis.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }
}

/// Drag-to-rectangle gesture overlay.
///
/// While attached it owns the pointer stream above the render surface; the
/// pan/zoom path never sees those events, which is the whole mutual
/// exclusion between brushing and view gestures. The drawn rectangle lives
/// in the same transformed pixel space as rendered points, so it must be
/// cleared whenever the coordinate frame changes.
#[derive(Debug, Default)]
pub struct SelectionBrush {
    attached: bool,
    drag_origin: Option<(f64, f64)>,
    rect: Option<BrushRect>,
}

impl SelectionBrush {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn rect(&self) -> Option<BrushRect> {
        self.rect
    }

    /// Installs gesture capture above the render surface.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Detaches gesture capture and clears any in-progress rectangle,
    /// including one from a drag still underway.
    pub fn remove(&mut self) {
        self.attached = false;
        self.drag_origin = None;
        self.rect = None;
    }

    /// Removes any drawn rectangle without removing gesture capture.
    pub fn clear(&mut self) {
        self.drag_origin = None;
        self.rect = None;
    }

    pub fn drag_start(&mut self, x: f64, y: f64) {
        if !self.attached {
            return;
        }
        self.drag_origin = Some((x, y));
        self.rect = Some(BrushRect {
            x0: x,
            y0: y,
            x1: x,
            y1: y,
        });
    }

    pub fn drag_move(&mut self, x: f64, y: f64) {
        let Some((origin_x, origin_y)) = self.drag_origin else {
            return;
        };
        self.rect = Some(BrushRect {
            x0: origin_x,
            y0: origin_y,
            x1: x,
            y1: y,
        });
    }

    /// Finishes the drag and reports which placed points the rectangle
    /// contains.
    ///
    /// The pixel corners are inverse-mapped through the current live scales
    /// into data-space bounds and compared against plot coordinates, so the
    /// same code covers domain-mapped and pixel-identity frames. A
    /// degenerate rectangle yields an empty selection. The rectangle stays
    /// drawn until cleared.
    pub fn drag_end(&mut self, frame: &CoordinateFrame, placed: &[PlacedPoint]) -> Vec<usize> {
        self.drag_origin = None;
        let Some(rect) = self.rect else {
            return Vec::new();
        };
        if rect.is_degenerate() {
            return Vec::new();
        }

        let (min_x_px, min_y_px, max_x_px, max_y_px) = rect.normalized();
        let x_a = frame.x().invert(min_x_px);
        let x_b = frame.x().invert(max_x_px);
        let y_a = frame.y().invert(min_y_px);
        let y_b = frame.y().invert(max_y_px);
        // The y scale may run inverted, so normalize again in data space.
        let (x_lo, x_hi) = (x_a.min(x_b), x_a.max(x_b));
        let (y_lo, y_hi) = (y_a.min(y_b), y_a.max(y_b));

        placed
            .iter()
            .enumerate()
            .filter(|(_, point)| {
                point.plot_x >= x_lo
                    && point.plot_x <= x_hi
                    && point.plot_y >= y_lo
                    && point.plot_y <= y_hi
            })
            .map(|(index, _)| index)
            .collect()
    }
}

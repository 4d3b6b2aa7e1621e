mod binding;
mod null_surface;
mod palette;
mod primitives;

pub use binding::{
    FOCUS_RADIUS_FACTOR, ICON_SIZE_PX, LABEL_EDGE_MIN, LABEL_OFFSET_X, LABEL_OFFSET_Y,
    LabelVisual, MarkerVisual, RenderBinding,
};
pub use null_surface::NullSurface;
pub use palette::{
    CATEGORY_CYCLE, ColorKey, DIM_COLOR, FALLBACK_COLOR, OrdinalPalette, resolve_point_color,
};
pub use primitives::{
    CirclePrimitive, Color, ImagePrimitive, RectPrimitive, SceneFrame, TextPrimitive,
};

use crate::error::PlotResult;

/// Contract implemented by any render surface.
///
/// Surfaces receive a fully materialized, deterministic `SceneFrame` so
/// drawing code remains isolated from layout and interaction logic.
pub trait Surface {
    fn present(&mut self, frame: &SceneFrame) -> PlotResult<()>;
}

pub mod brush;
pub mod controller;
pub mod dispatch;
pub mod transform;

pub use brush::{BrushRect, SelectionBrush};
pub use controller::{
    InteractionController, InteractionState, ZOOM_EXTENT, ZOOM_VIEW_DURATION_SECONDS,
};
pub use dispatch::{DispatchChannel, EventKind, PlotEvent};
pub use transform::ViewTransform;

pub mod band_scale;
pub mod data;
pub mod frame;
pub mod layout;
pub mod linear_scale;
pub mod swarm;
pub mod types;

pub use band_scale::BandScale;
pub use data::points_from_json;
pub use frame::{CoordinateFrame, FrameMode};
pub use layout::{BAND_PADDING, DOMAIN_PAD_FACTOR, Layout, build_layout};
pub use linear_scale::LinearScale;
pub use swarm::{RELAXATION_TICKS, SEPARATION_SLACK, SwarmBody, SwarmTuning, relax_band};
pub use types::{FieldValue, LayoutMode, Margins, MarkerKind, PlacedPoint, PlotPoint, Viewport};

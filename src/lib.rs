//! scatter-rs: interactive scatter/beeswarm plot engine.
//!
//! This crate computes coordinate mappings for continuous-scatter and
//! categorical-swarm layouts, binds data points to draw primitives for a
//! host-provided render surface, and keeps pan/zoom, brushing and focus
//! state consistent through a single event-dispatch path.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ScatterEngine, ScatterEngineConfig};
pub use error::{PlotError, PlotResult};

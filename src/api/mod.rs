mod callbacks;
mod engine;
mod engine_config;
mod event_controller;
mod gestures;

pub use callbacks::{HostCallbacks, ImageResolver};
pub use engine::ScatterEngine;
pub use engine_config::ScatterEngineConfig;

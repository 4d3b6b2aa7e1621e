use thiserror::Error;

/// Result alias used throughout the crate.
pub type PlotResult<T> = Result<T, PlotError>;

/// Precondition violations surfaced at build or configuration time.
///
/// Interactive paths (focus, brush, pan/zoom) are infallible once a layout
/// exists; anything that can go wrong is rejected before scales or draw
/// primitives are produced.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),
}

use crate::error::PlotResult;
use crate::render::{SceneFrame, Surface};

/// No-op surface used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is introduced, and keeps the last frame around
/// for inspection.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub present_count: usize,
    pub last_circle_count: usize,
    pub last_image_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<SceneFrame>,
}

impl Surface for NullSurface {
    fn present(&mut self, frame: &SceneFrame) -> PlotResult<()> {
        frame.validate()?;
        self.present_count += 1;
        self.last_circle_count = frame.circles.len();
        self.last_image_count = frame.images.len();
        self.last_text_count = frame.texts.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}

use crate::core::PlotPoint;

/// Collaborator resolving icon image URLs by point id.
pub trait ImageResolver {
    fn image_url(&self, id: u64) -> Option<String>;
}

pub(super) type SelectedHandler = Box<dyn FnMut(&[PlotPoint])>;
pub(super) type ClickHandler = Box<dyn FnMut(&PlotPoint)>;
pub(super) type HoverHandler = Box<dyn FnMut(Option<(&PlotPoint, f64, f64)>)>;

/// Host callback slots; exactly one fires per matching gesture.
///
/// `on_dot_hovered(None)` signals hover-exit.
#[derive(Default)]
pub struct HostCallbacks {
    pub(super) on_selected: Option<SelectedHandler>,
    pub(super) on_dot_clicked: Option<ClickHandler>,
    pub(super) on_dot_hovered: Option<HoverHandler>,
}

impl HostCallbacks {
    pub fn set_on_selected(&mut self, handler: impl FnMut(&[PlotPoint]) + 'static) {
        self.on_selected = Some(Box::new(handler));
    }

    pub fn set_on_dot_clicked(&mut self, handler: impl FnMut(&PlotPoint) + 'static) {
        self.on_dot_clicked = Some(Box::new(handler));
    }

    pub fn set_on_dot_hovered(
        &mut self,
        handler: impl FnMut(Option<(&PlotPoint, f64, f64)>) + 'static,
    ) {
        self.on_dot_hovered = Some(Box::new(handler));
    }
}

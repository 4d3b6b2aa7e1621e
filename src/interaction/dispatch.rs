/// Named event kinds carried by the dispatch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    FocusOne,
    FocusSet,
    ToggleBackground,
    ToggleBrushing,
    ZoomView,
}

const EVENT_KIND_COUNT: usize = 5;

/// Closed set of view events.
///
/// A `None` payload means "clear": `FocusOne(None)` unfocuses everything,
/// `FocusSet(None)` clears the multi-selection.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotEvent {
    FocusOne(Option<u64>),
    FocusSet(Option<Vec<u64>>),
    ToggleBackground(String),
    ToggleBrushing(bool),
    ZoomView(f64),
}

impl PlotEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            PlotEvent::FocusOne(_) => EventKind::FocusOne,
            PlotEvent::FocusSet(_) => EventKind::FocusSet,
            PlotEvent::ToggleBackground(_) => EventKind::ToggleBackground,
            PlotEvent::ToggleBrushing(_) => EventKind::ToggleBrushing,
            PlotEvent::ZoomView(_) => EventKind::ZoomView,
        }
    }
}

type Handler = Box<dyn FnMut(&PlotEvent)>;

/// Per-kind publish/subscribe channel with one active handler per kind.
///
/// Registering a handler for a kind replaces the previous one, mirroring
/// how consumers re-register on redraw.
#[derive(Default)]
pub struct DispatchChannel {
    handlers: [Option<Handler>; EVENT_KIND_COUNT],
}

impl DispatchChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&PlotEvent) + 'static) {
        self.handlers[slot(kind)] = Some(Box::new(handler));
    }

    pub fn off(&mut self, kind: EventKind) {
        self.handlers[slot(kind)] = None;
    }

    pub fn emit(&mut self, event: &PlotEvent) {
        if let Some(handler) = self.handlers[slot(event.kind())].as_mut() {
            handler(event);
        }
    }
}

fn slot(kind: EventKind) -> usize {
    match kind {
        EventKind::FocusOne => 0,
        EventKind::FocusSet => 1,
        EventKind::ToggleBackground => 2,
        EventKind::ToggleBrushing => 3,
        EventKind::ZoomView => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn handler_only_sees_its_own_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut channel = DispatchChannel::new();
        channel.on(EventKind::FocusOne, move |event| {
            sink.borrow_mut().push(event.clone());
        });

        channel.emit(&PlotEvent::FocusOne(Some(7)));
        channel.emit(&PlotEvent::ToggleBrushing(true));

        assert_eq!(seen.borrow().as_slice(), [PlotEvent::FocusOne(Some(7))]);
    }

    #[test]
    fn re_registering_replaces_the_previous_handler() {
        let first_hits = Rc::new(RefCell::new(0_usize));
        let second_hits = Rc::new(RefCell::new(0_usize));

        let mut channel = DispatchChannel::new();
        let sink = Rc::clone(&first_hits);
        channel.on(EventKind::ZoomView, move |_| *sink.borrow_mut() += 1);
        let sink = Rc::clone(&second_hits);
        channel.on(EventKind::ZoomView, move |_| *sink.borrow_mut() += 1);

        channel.emit(&PlotEvent::ZoomView(2.0));

        assert_eq!(*first_hits.borrow(), 0);
        assert_eq!(*second_hits.borrow(), 1);
    }

    #[test]
    fn removed_handler_stops_firing() {
        let hits = Rc::new(RefCell::new(0_usize));
        let sink = Rc::clone(&hits);

        let mut channel = DispatchChannel::new();
        channel.on(EventKind::ToggleBackground, move |_| *sink.borrow_mut() += 1);
        channel.off(EventKind::ToggleBackground);
        channel.emit(&PlotEvent::ToggleBackground("#000".to_owned()));

        assert_eq!(*hits.borrow(), 0);
    }
}

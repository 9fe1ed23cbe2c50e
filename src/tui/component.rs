use ratatui::Frame;
use ratatui::layout::Rect;

/// Something that draws itself into a region of the screen.
///
/// Props are struct fields filled in by the caller each frame
/// (`TitleBar`, `CategoryBar`, `StatusPanel`), or borrowed persistent state
/// wrapped for the duration of one frame (`SearchBox`, `RestaurantList`).
/// `render` takes `&mut self` so wrappers can update list offsets while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Persistent component state that consumes raw key events and turns the
/// ones it cares about into component-level events.
pub trait EventHandler {
    type Event;

    /// `None` when the event is not for this component (or needs no reaction).
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}

pub mod status_bar;
pub mod title_bar;

use ratatui::{Frame, layout::Rect};

use crate::event::AppKeyEvent;
use crate::state::AppState;

pub use status_bar::StatusBar;
pub use title_bar::TitleBar;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq)]
pub enum EventResult {
    /// Event was handled, continue
    Handled,
    /// Event was not handled, pass to parent
    NotHandled,
    /// Request app exit
    Exit,
}

/// Trait for components that can handle input and render
pub trait Component {
    /// Handle a key event
    fn handle_key(&mut self, key: AppKeyEvent, state: &mut AppState) -> EventResult;

    /// Render the component
    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState);
}

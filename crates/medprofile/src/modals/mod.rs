mod helpers;
mod message;

use ratatui::{Frame, layout::Rect};

use crate::event::AppKeyEvent;
use crate::state::{AppState, ModalState};

pub use helpers::{HelpText, ScrolledView, calculate_scroll, render_cursor_line, render_modal_frame};
pub use message::render_message_modal;

/// Result of handling a modal key event
#[derive(Debug, PartialEq, Eq)]
pub enum ModalResult {
    /// Modal was dismissed
    Dismissed,
    /// Key was handled, modal still active
    Continue,
}

/// Render the active modal as an overlay
pub fn render_modal(frame: &mut Frame, state: &AppState) {
    match &state.modal {
        ModalState::None => {}
        ModalState::Message(modal) => render_message_modal(frame, modal),
    }
}

/// Handle key events for the active modal. Open modals capture every key.
pub fn handle_modal_key(key: &AppKeyEvent, state: &mut AppState) -> ModalResult {
    let result = match &state.modal {
        ModalState::None => ModalResult::Continue,
        ModalState::Message(_) => message::handle_message_key(key),
    };
    if result == ModalResult::Dismissed {
        state.dismiss_modal();
    }
    result
}

/// Create a centered rectangle within the given area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use crate::event::KeyCode;
    use crate::state::MessageModal;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(50, 10, area), Rect::new(25, 15, 50, 10));
        // Clamped to the available area
        assert_eq!(centered_rect(200, 80, area), Rect::new(0, 0, 100, 40));
    }

    #[test]
    fn test_alert_captures_keys_until_dismissed() {
        let mut state = AppState::new("tester");
        state.modal = ModalState::Message(MessageModal::info("Success", "Saved"));

        let typed = AppKeyEvent::new(KeyCode::Char('e'));
        assert_eq!(handle_modal_key(&typed, &mut state), ModalResult::Continue);
        assert!(state.modal.is_open());

        let enter = AppKeyEvent::new(KeyCode::Enter);
        assert_eq!(handle_modal_key(&enter, &mut state), ModalResult::Dismissed);
        assert!(!state.modal.is_open());
    }
}

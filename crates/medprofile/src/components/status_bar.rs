use medprofile_core::Mode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Component, EventResult};
use crate::event::AppKeyEvent;
use crate::modals::HelpText;
use crate::state::AppState;

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    fn help_line(state: &AppState) -> Line<'static> {
        if state.modal.is_open() {
            return HelpText::new()
                .key("[Enter/Esc]", Color::Green, "Dismiss")
                .line();
        }
        let busy = |text: &'static str| {
            Line::from(Span::styled(text, Style::default().fg(Color::Yellow)))
        };
        match state.mode() {
            Mode::Loading => busy("Loading profile..."),
            // No save hint while a write is in flight
            Mode::Saving => busy("Saving..."),
            Mode::Viewing => HelpText::new()
                .key("e:", Color::Cyan, "edit")
                .key("q:", Color::Yellow, "back")
                .separator(" | ")
                .line(),
            Mode::Editing => HelpText::new()
                .key("Tab/↑/↓:", Color::DarkGray, "field")
                .key("Ctrl+S/F10:", Color::Cyan, "save")
                .key("Ctrl+C:", Color::Red, "back")
                .separator(" | ")
                .line(),
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: AppKeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let paragraph =
            Paragraph::new(Self::help_line(state)).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use medprofile_core::StorageReply;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_help_follows_mode() {
        let mut state = AppState::new("tester");
        assert_eq!(text(&StatusBar::help_line(&state)), "Loading profile...");

        state.pending_storage.take();
        state.apply_reply(StorageReply::Got(Ok(None)));
        assert_eq!(text(&StatusBar::help_line(&state)), "e: edit | q: back");

        state.begin_edit();
        assert!(text(&StatusBar::help_line(&state)).contains("save"));
    }
}

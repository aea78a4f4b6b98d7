use medprofile_core::Mode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Component, EventResult};
use crate::event::AppKeyEvent;
use crate::state::AppState;

pub struct TitleBar;

impl TitleBar {
    pub fn new() -> Self {
        Self
    }

    fn mode_badge(mode: Mode) -> Span<'static> {
        let (text, color) = match mode {
            Mode::Loading => ("LOADING", Color::DarkGray),
            Mode::Viewing => ("VIEW", Color::Green),
            Mode::Editing => ("EDIT", Color::Cyan),
            Mode::Saving => ("SAVING", Color::Yellow),
        };
        Span::styled(
            format!(" {} ", text),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
    }
}

impl Default for TitleBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TitleBar {
    fn handle_key(&mut self, _key: AppKeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let line = Line::from(vec![
            Span::styled(
                " Medical Profile ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Self::mode_badge(state.mode()),
            Span::styled(
                format!("  user: {}", state.user_id),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(paragraph, area);
    }
}

use medprofile_core::{Mode, ProfileField, ProfileRecord};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Screen;
use crate::components::{Component, EventResult};
use crate::event::{AppKeyEvent, KeyCode};
use crate::modals::{calculate_scroll, render_cursor_line};
use crate::state::AppState;

/// Label line plus a bordered one-line input.
const FIELD_HEIGHT: u16 = 4;
const LABEL_WIDTH: u16 = 26;

pub struct ProfileScreen;

impl ProfileScreen {
    pub fn new() -> Self {
        Self
    }

    fn handle_view_key(&self, key: &AppKeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char('e') if key.no_modifiers() => {
                state.begin_edit();
                EventResult::Handled
            }
            KeyCode::Char('q') | KeyCode::Esc => EventResult::Exit,
            _ => EventResult::NotHandled,
        }
    }

    fn handle_edit_key(&self, key: &AppKeyEvent, state: &mut AppState) -> EventResult {
        if key.is_submit() {
            state.request_save();
            return EventResult::Handled;
        }
        if key.is_back_tab() {
            state.cycle_focus(false);
            return EventResult::Handled;
        }
        if let Some(c) = key.typed_char() {
            state.edit_focused(|cursor, value| cursor.insert_char(value, c));
            return EventResult::Handled;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => state.cycle_focus(true),
            KeyCode::Up => state.cycle_focus(false),
            KeyCode::Backspace => state.edit_focused(|cursor, value| cursor.backspace(value)),
            KeyCode::Delete => state.edit_focused(|cursor, value| cursor.delete(value)),
            KeyCode::Left => state.edit_focused(|cursor, _| cursor.move_left()),
            KeyCode::Right => state.edit_focused(|cursor, value| cursor.move_right(value)),
            KeyCode::Home => state.edit_focused(|cursor, _| cursor.move_home()),
            KeyCode::End => state.edit_focused(|cursor, value| cursor.move_end(value)),
            // No cancel: the draft is kept until saved or the screen is left
            KeyCode::Esc => {}
            _ => return EventResult::NotHandled,
        }
        EventResult::Handled
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let loading = Paragraph::new(Line::from(Span::styled(
            "Loading profile...",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(loading, chunks[1]);
    }

    fn render_view(&self, frame: &mut Frame, area: Rect, record: &ProfileRecord) {
        let today = jiff::Zoned::now().date();
        let lines: Vec<Line> = ProfileField::ALL
            .iter()
            .map(|&field| view_line(record, field, today))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Profile ");

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let saving = state.mode() == Mode::Saving;
        let (border_color, title) = if saving {
            (Color::Yellow, " Edit Profile (Saving...) ")
        } else {
            (Color::Cyan, " Edit Profile ")
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = (inner.height / FIELD_HEIGHT).max(1) as usize;
        let focused = state.cursor.field.index();
        let first = first_visible_field(focused, visible);

        let fields = &ProfileField::ALL[first..(first + visible).min(ProfileField::ALL.len())];
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                fields
                    .iter()
                    .map(|_| Constraint::Length(FIELD_HEIGHT))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(inner);

        let record = state.profile.displayed();
        for (chunk, &field) in chunks.iter().zip(fields) {
            let is_focused = field == state.cursor.field;
            render_input(
                frame,
                *chunk,
                field,
                record.get(field),
                is_focused,
                is_focused && !saving,
                state.cursor.pos,
            );
        }
    }
}

impl Default for ProfileScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the first form field to draw so `focused` stays on screen.
fn first_visible_field(focused: usize, visible: usize) -> usize {
    let last_start = ProfileField::ALL.len().saturating_sub(visible);
    focused.saturating_sub(visible.saturating_sub(1)).min(last_start)
}

fn view_line(record: &ProfileRecord, field: ProfileField, today: jiff::civil::Date) -> Line<'static> {
    let label = Span::styled(
        format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH as usize),
        Style::default().add_modifier(Modifier::BOLD),
    );

    let value = record.get(field).trim();
    if value.is_empty() {
        return Line::from(vec![
            label,
            Span::styled("Not set", Style::default().fg(Color::DarkGray)),
        ]);
    }

    let mut spans = vec![label, Span::raw(value.to_string())];
    if field == ProfileField::DateOfBirth
        && let Some(age) = record.age_on(today)
    {
        spans.push(Span::styled(
            format!("  (age {})", age),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    field: ProfileField,
    value: &str,
    is_focused: bool,
    show_cursor: bool,
    cursor_pos: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3)])
        .split(area);

    let label_style = if is_focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let label = if field.is_required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    };
    frame.render_widget(Paragraph::new(Span::styled(label, label_style)), chunks[0]);

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let input_inner = input_block.inner(chunks[1]);
    frame.render_widget(input_block, chunks[1]);

    if show_cursor {
        let scrolled = calculate_scroll(value, cursor_pos, input_inner.width as usize);
        if value.is_empty() {
            let mut line = render_cursor_line("", 0, "");
            line.spans.push(Span::styled(
                field.placeholder(),
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(Paragraph::new(line), input_inner);
        } else {
            let line = render_cursor_line(&scrolled.display_value, scrolled.cursor_pos, "");
            frame.render_widget(Paragraph::new(line), input_inner);
        }
    } else if value.is_empty() {
        let placeholder = Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(placeholder), input_inner);
    } else {
        frame.render_widget(Paragraph::new(value.to_string()), input_inner);
    }
}

impl Component for ProfileScreen {
    fn handle_key(&mut self, key: AppKeyEvent, state: &mut AppState) -> EventResult {
        match state.mode() {
            Mode::Viewing => self.handle_view_key(&key, state),
            Mode::Editing => self.handle_edit_key(&key, state),
            // Nothing to act on until storage answers
            Mode::Loading | Mode::Saving => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        match state.mode() {
            Mode::Loading => self.render_loading(frame, area),
            Mode::Viewing => self.render_view(frame, area, state.profile.record()),
            Mode::Editing | Mode::Saving => self.render_form(frame, area, state),
        }
    }
}

impl Screen for ProfileScreen {
    fn title(&self) -> &str {
        "Medical Profile"
    }
}

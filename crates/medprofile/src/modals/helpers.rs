//! Common rendering helpers for modals and text inputs.

use std::rc::Rc;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;

// ========== Cursor Rendering ==========

/// Render a line of text with a visible cursor at the specified position.
///
/// The cursor is shown as a white background block; at the end of the text
/// it is an extra blank cell.
pub fn render_cursor_line(display_value: &str, cursor_pos: usize, prefix: &str) -> Line<'static> {
    let mut spans = Vec::new();

    if !prefix.is_empty() {
        spans.push(Span::raw(prefix.to_string()));
    }

    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
    let chars: Vec<char> = display_value.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i == cursor_pos {
            spans.push(Span::styled(c.to_string(), cursor_style));
        } else {
            spans.push(Span::raw(c.to_string()));
        }
    }

    if cursor_pos >= chars.len() {
        spans.push(Span::styled(" ", cursor_style));
    }

    Line::from(spans)
}

// ========== Horizontal Scroll ==========

/// The visible window of a text input that's wider than its container.
#[derive(Debug, PartialEq, Eq)]
pub struct ScrolledView {
    pub display_value: String,
    /// Cursor position within `display_value`, in characters
    pub cursor_pos: usize,
}

/// Window `value` to `width` characters, centering the cursor once the text
/// no longer fits. Positions are character counts.
pub fn calculate_scroll(value: &str, cursor_pos: usize, width: usize) -> ScrolledView {
    let len = value.chars().count();

    // One cell is reserved for the cursor block at the end
    if len < width {
        return ScrolledView {
            display_value: value.to_string(),
            cursor_pos,
        };
    }

    let visible = width.saturating_sub(1).max(1);
    let start = cursor_pos.saturating_sub(visible / 2);
    let end = (start + visible).min(len);
    let start = end.saturating_sub(visible);

    ScrolledView {
        display_value: value.chars().skip(start).take(end - start).collect(),
        cursor_pos: cursor_pos.saturating_sub(start),
    }
}

// ========== Modal Frame ==========

/// Layout produced by [`render_modal_frame`].
pub struct ModalFrame {
    pub chunks: Rc<[Rect]>,
}

/// Render a centered, bordered, titled modal over a cleared background and
/// split its inside vertically by `constraints`.
pub fn render_modal_frame(
    frame: &mut Frame,
    title: &str,
    width: u16,
    height: u16,
    border_color: Color,
    constraints: &[Constraint],
) -> ModalFrame {
    let modal_area = centered_rect(width, height, frame.area());

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    ModalFrame { chunks }
}

// ========== Help Text Builder ==========

/// Builder for key-hint lines: colored keys followed by plain descriptions.
///
/// ```ignore
/// let help = HelpText::new()
///     .key("[Enter]", Color::Green, "Confirm")
///     .key("[Esc]", Color::Yellow, "Cancel")
///     .build();
/// frame.render_widget(help, area);
/// ```
pub struct HelpText {
    items: Vec<(String, Color, String)>,
    separator: String,
}

impl HelpText {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            separator: "  ".to_string(),
        }
    }

    /// Set a custom separator between key-description pairs.
    pub fn separator(mut self, sep: &str) -> Self {
        self.separator = sep.to_string();
        self
    }

    pub fn key(mut self, key: &str, color: Color, desc: &str) -> Self {
        self.items.push((key.to_string(), color, desc.to_string()));
        self
    }

    pub fn line(self) -> Line<'static> {
        let mut spans: Vec<Span> = Vec::new();

        for (i, (key, color, desc)) in self.items.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(self.separator.clone()));
            }
            spans.push(Span::styled(key, Style::default().fg(color)));
            spans.push(Span::raw(format!(" {}", desc)));
        }

        Line::from(spans)
    }

    pub fn build(self) -> Paragraph<'static> {
        Paragraph::new(self.line())
    }
}

impl Default for HelpText {
    fn default() -> Self {
        Self::new()
    }
}

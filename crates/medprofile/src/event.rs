//! Platform-agnostic keyboard event types.
//!
//! This module provides a unified event type that works with both:
//! - Native: crossterm::event::KeyEvent
//! - Web: ratzilla::event::KeyEvent
//!
//! Screens only match on key codes that exist on both platforms.

/// Key code abstraction that works on both native and web.
/// Re-exports from crossterm on native, from ratzilla on web.
#[cfg(feature = "native")]
pub use crossterm::event::KeyCode;

#[cfg(all(feature = "web", not(feature = "native")))]
pub use ratzilla::event::KeyCode;

/// Unified key event that abstracts over platform-specific implementations.
#[derive(Debug, Clone)]
pub struct AppKeyEvent {
    pub code: KeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl AppKeyEvent {
    /// A key press with no modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Check if no modifiers are pressed.
    pub fn no_modifiers(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }

    /// Text input: a character typed without Ctrl or Alt.
    pub fn typed_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.ctrl && !self.alt => Some(c),
            _ => None,
        }
    }

    /// Ctrl+S or F10. Ctrl+Enter is unreliable in some terminals.
    pub fn is_submit(&self) -> bool {
        matches!(self.code, KeyCode::Char('s') | KeyCode::Char('S')) && self.ctrl
            || matches!(self.code, KeyCode::F(10))
    }

    /// Ctrl+C
    pub fn is_interrupt(&self) -> bool {
        matches!(self.code, KeyCode::Char('c')) && self.ctrl
    }

    /// Check if this is a "back tab" (Shift+Tab).
    /// On native, this matches KeyCode::BackTab.
    /// On web, this matches Shift+Tab since BackTab doesn't exist.
    #[cfg(feature = "native")]
    pub fn is_back_tab(&self) -> bool {
        matches!(self.code, KeyCode::BackTab) || (matches!(self.code, KeyCode::Tab) && self.shift)
    }

    #[cfg(all(feature = "web", not(feature = "native")))]
    pub fn is_back_tab(&self) -> bool {
        matches!(self.code, KeyCode::Tab) && self.shift
    }
}

#[cfg(feature = "native")]
impl From<crossterm::event::KeyEvent> for AppKeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            code: event.code,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
        }
    }
}

#[cfg(all(feature = "web", not(feature = "native")))]
impl From<&ratzilla::event::KeyEvent> for AppKeyEvent {
    fn from(event: &ratzilla::event::KeyEvent) -> Self {
        Self {
            code: event.code.clone(),
            ctrl: event.ctrl,
            alt: event.alt,
            shift: event.shift,
        }
    }
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;

    #[test]
    fn test_typed_char_ignores_control_chords() {
        assert_eq!(AppKeyEvent::new(KeyCode::Char('a')).typed_char(), Some('a'));
        assert_eq!(
            AppKeyEvent::new(KeyCode::Char('A')).with_shift().typed_char(),
            Some('A')
        );
        assert_eq!(
            AppKeyEvent::new(KeyCode::Char('s')).with_ctrl().typed_char(),
            None
        );
        assert_eq!(AppKeyEvent::new(KeyCode::Enter).typed_char(), None);
    }

    #[test]
    fn test_submit_keys() {
        assert!(AppKeyEvent::new(KeyCode::Char('s')).with_ctrl().is_submit());
        assert!(AppKeyEvent::new(KeyCode::F(10)).is_submit());
        assert!(!AppKeyEvent::new(KeyCode::Char('s')).is_submit());
    }

    #[test]
    fn test_back_tab() {
        assert!(AppKeyEvent::new(KeyCode::BackTab).is_back_tab());
        assert!(AppKeyEvent::new(KeyCode::Tab).with_shift().is_back_tab());
        assert!(!AppKeyEvent::new(KeyCode::Tab).is_back_tab());
    }
}

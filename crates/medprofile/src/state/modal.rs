//! Modal overlays. Only alerts exist on this screen.

use medprofile_core::Notification;

#[derive(Debug, Default)]
pub enum ModalState {
    #[default]
    None,
    Message(MessageModal),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageModal {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl MessageModal {
    pub fn info(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            is_error: false,
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            is_error: true,
        }
    }
}

impl From<&Notification> for MessageModal {
    fn from(notice: &Notification) -> Self {
        if notice.is_error() {
            Self::error(&notice.title, &notice.message)
        } else {
            Self::info(&notice.title, &notice.message)
        }
    }
}

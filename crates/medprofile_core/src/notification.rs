//! User-facing alerts raised by the profile screen.

/// The four conditions that produce a blocking alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    LoadFailure,
    ValidationFailure,
    SaveFailure,
    SaveSuccess,
}

impl NoticeKind {
    pub fn title(self) -> &'static str {
        match self {
            NoticeKind::LoadFailure | NoticeKind::SaveFailure => "Error",
            NoticeKind::ValidationFailure => "Validation Error",
            NoticeKind::SaveSuccess => "Success",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            NoticeKind::LoadFailure => "Failed to load profile data",
            NoticeKind::ValidationFailure => "Please enter your full name",
            NoticeKind::SaveFailure => "Failed to save profile data",
            NoticeKind::SaveSuccess => "Profile saved successfully",
        }
    }

    pub fn is_error(self) -> bool {
        self != NoticeKind::SaveSuccess
    }
}

/// A title + message pair for the alert boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NoticeKind) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            message: kind.message().to_string(),
        }
    }

    pub fn save_success() -> Self {
        Self::new(NoticeKind::SaveSuccess)
    }

    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_success_is_not_an_error() {
        let errors = [
            NoticeKind::LoadFailure,
            NoticeKind::ValidationFailure,
            NoticeKind::SaveFailure,
        ];
        for kind in errors {
            assert!(Notification::new(kind).is_error(), "{kind:?}");
        }
        assert!(!Notification::save_success().is_error());
    }

    #[test]
    fn test_alert_text() {
        let notice = Notification::new(NoticeKind::ValidationFailure);
        assert_eq!(notice.title, "Validation Error");
        assert_eq!(notice.message, "Please enter your full name");
        assert_eq!(Notification::save_success().message, "Profile saved successfully");
    }
}

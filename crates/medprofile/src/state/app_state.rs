use medprofile_core::{
    Mode, Navigator, Notification, ProfileController, ProfileField, SaveOutcome, StorageReply,
    StorageRequest,
};

use super::{FieldCursor, MessageModal, ModalState};

/// Everything the screen renders from and mutates in response to keys.
///
/// Storage calls are not run here. They are queued in `pending_storage` and
/// the app hands them to its worker on the next tick.
#[derive(Debug)]
pub struct AppState {
    pub profile: ProfileController,
    pub user_id: String,
    pub modal: ModalState,
    pub cursor: FieldCursor,
    pub pending_storage: Option<StorageRequest>,
    pub exit: bool,
}

impl AppState {
    /// State for `user_id`'s profile with the initial load already queued.
    pub fn new(user_id: &str) -> Self {
        let mut profile = ProfileController::for_user(user_id);
        let pending_storage = profile.begin_load();
        Self {
            profile,
            user_id: user_id.to_string(),
            modal: ModalState::None,
            cursor: FieldCursor::default(),
            pending_storage,
            exit: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.profile.mode()
    }

    pub fn show_notice(&mut self, notice: &Notification) {
        self.modal = ModalState::Message(MessageModal::from(notice));
    }

    pub fn dismiss_modal(&mut self) {
        self.modal = ModalState::None;
    }

    /// Switch to the edit form with the first field focused.
    pub fn begin_edit(&mut self) {
        match self.profile.begin_edit() {
            Ok(()) => {
                let first = ProfileField::ALL[0];
                let value = self.profile.displayed().get(first).to_string();
                self.cursor.focus(first, &value);
            }
            Err(e) => tracing::debug!(error = %e, "Edit request ignored"),
        }
    }

    /// Edit the focused field's text through the cursor and stage the result.
    pub fn edit_focused(&mut self, edit: impl FnOnce(&mut FieldCursor, &mut String)) {
        let field = self.cursor.field;
        let mut value = self.profile.displayed().get(field).to_string();
        let before = value.clone();
        edit(&mut self.cursor, &mut value);
        if value != before
            && let Err(e) = self.profile.update_field(field, value)
        {
            tracing::debug!(error = %e, "Field edit ignored");
        }
    }

    /// Move focus to the next (or previous) field.
    pub fn cycle_focus(&mut self, forward: bool) {
        let field = if forward {
            self.cursor.field.next()
        } else {
            self.cursor.field.prev()
        };
        let value = self.profile.displayed().get(field).to_string();
        self.cursor.focus(field, &value);
    }

    /// Ask the controller to save. Validation failures open an alert; an
    /// accepted save queues its write for the worker.
    pub fn request_save(&mut self) {
        match self.profile.save() {
            SaveOutcome::Write(request) => self.pending_storage = Some(request),
            SaveOutcome::Rejected(notice) => self.show_notice(&notice),
            SaveOutcome::Ignored => {}
        }
    }

    /// Feed a worker reply to the controller and surface any alert.
    pub fn apply_reply(&mut self, reply: StorageReply) {
        if let Some(notice) = self.profile.apply(reply) {
            self.show_notice(&notice);
        }
        if let Some(draft) = self.profile.draft() {
            self.cursor.clamp(draft.get(self.cursor.field));
        }
    }
}

impl Navigator for AppState {
    fn go_back(&mut self) {
        tracing::info!(mode = ?self.profile.mode(), "Leaving profile screen");
        self.exit = true;
    }
}

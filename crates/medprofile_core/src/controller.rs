//! Edit/view state machine for the medical profile screen.
//!
//! ```text
//! Loading --(load succeeds or fails)--> Viewing
//! Viewing --(begin_edit)--> Editing
//! Editing --(update_field)--> Editing
//! Editing --(save: full name empty)--> Editing   [ValidationFailure]
//! Editing --(save: write succeeds)--> Viewing    [SaveSuccess]
//! Editing --(save: write fails)--> Editing       [SaveFailure, draft kept]
//! ```
//!
//! Loading and saving suspend on storage, so each is split in two: a `begin`
//! half that changes mode and hands back the [`StorageRequest`] to run, and a
//! `finish` half that takes the storage result. [`ProfileController::load_from`]
//! and [`ProfileController::save_to`] run both halves against a synchronous store.

use crate::error::{
    LoadCause, ProfileError, SaveCause, StorageError, TransitionError, ValidationError,
};
use crate::notification::Notification;
use crate::record::{ProfileField, ProfileRecord};
use crate::storage::{KeyValueStore, StorageReply, StorageRequest, profile_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Loading,
    Viewing,
    Editing,
    Saving,
}

/// What a call to [`ProfileController::save`] decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Validation passed; run this write, then call `finish_save`
    Write(StorageRequest),
    /// Validation failed; nothing changed
    Rejected(Notification),
    /// Not editing (including a save already in flight); nothing changed
    Ignored,
}

/// Owns the committed record, the staged draft and the current [`Mode`].
///
/// The draft exists only while editing or saving. It is committed to the
/// record only after storage confirms the write.
#[derive(Debug, Clone)]
pub struct ProfileController {
    key: String,
    mode: Mode,
    record: ProfileRecord,
    draft: Option<ProfileRecord>,
    load_in_flight: bool,
}

impl ProfileController {
    /// A controller in `Loading` mode for the given storage key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            mode: Mode::Loading,
            record: ProfileRecord::default(),
            draft: None,
            load_in_flight: false,
        }
    }

    pub fn for_user(user_id: &str) -> Self {
        Self::new(profile_key(user_id))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The last record loaded or successfully saved
    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    pub fn draft(&self) -> Option<&ProfileRecord> {
        self.draft.as_ref()
    }

    /// The record the screen should show: the draft while one exists
    pub fn displayed(&self) -> &ProfileRecord {
        self.draft.as_ref().unwrap_or(&self.record)
    }

    /// A storage call is outstanding
    pub fn is_busy(&self) -> bool {
        matches!(self.mode, Mode::Loading | Mode::Saving)
    }

    pub fn can_save(&self) -> bool {
        self.mode == Mode::Editing
    }

    // ========== Load ==========

    /// Start the initial read. Returns the request only once, while `Loading`.
    pub fn begin_load(&mut self) -> Option<StorageRequest> {
        if self.mode != Mode::Loading || self.load_in_flight {
            return None;
        }
        self.load_in_flight = true;
        tracing::debug!(key = self.key.as_str(), "Loading profile");
        Some(StorageRequest::Get {
            key: self.key.clone(),
        })
    }

    /// Apply the result of the read started by [`begin_load`](Self::begin_load).
    ///
    /// Always ends in `Viewing`. On failure the record stays at its defaults
    /// and a `LoadFailure` notification is returned.
    pub fn finish_load(
        &mut self,
        result: Result<Option<String>, StorageError>,
    ) -> Option<Notification> {
        if self.mode != Mode::Loading || !self.load_in_flight {
            tracing::debug!(mode = ?self.mode, "Ignoring load result with no load in flight");
            return None;
        }
        self.load_in_flight = false;
        self.mode = Mode::Viewing;

        let decoded = match result {
            Ok(None) => Ok(ProfileRecord::default()),
            Ok(Some(text)) => {
                ProfileRecord::merged_over_defaults(&text).map_err(LoadCause::Record)
            }
            Err(e) => Err(LoadCause::Storage(e)),
        };

        match decoded {
            Ok(record) => {
                tracing::info!(key = self.key.as_str(), "Profile loaded");
                self.record = record;
                None
            }
            Err(cause) => {
                let err = ProfileError::Load(cause);
                tracing::warn!(key = self.key.as_str(), error = %err, "Falling back to default profile");
                self.record = ProfileRecord::default();
                Some(err.notification())
            }
        }
    }

    // ========== Edit ==========

    /// Enter edit mode with a draft copied from the committed record.
    pub fn begin_edit(&mut self) -> Result<(), TransitionError> {
        if self.mode != Mode::Viewing {
            return Err(TransitionError {
                operation: "begin_edit",
                mode: self.mode,
            });
        }
        self.draft = Some(self.record.clone());
        self.mode = Mode::Editing;
        Ok(())
    }

    /// Replace one field of the draft. No validation happens here.
    pub fn update_field(
        &mut self,
        field: ProfileField,
        value: impl Into<String>,
    ) -> Result<(), TransitionError> {
        let err = TransitionError {
            operation: "update_field",
            mode: self.mode,
        };
        if self.mode != Mode::Editing {
            return Err(err);
        }
        let draft = self.draft.as_mut().ok_or(err)?;
        draft.set(field, value);
        Ok(())
    }

    // ========== Save ==========

    /// Validate the draft and, if it passes, move to `Saving`.
    pub fn save(&mut self) -> SaveOutcome {
        if self.mode != Mode::Editing {
            tracing::debug!(mode = ?self.mode, "Ignoring save outside edit mode");
            return SaveOutcome::Ignored;
        }
        let Some(draft) = self.draft.as_ref() else {
            return SaveOutcome::Ignored;
        };

        if !draft.has_full_name() {
            let err = ProfileError::Validation(ValidationError::MissingFullName);
            tracing::info!(error = %err, "Save rejected");
            return SaveOutcome::Rejected(err.notification());
        }

        match draft.to_json() {
            Ok(value) => {
                self.mode = Mode::Saving;
                tracing::debug!(key = self.key.as_str(), "Saving profile");
                SaveOutcome::Write(StorageRequest::Set {
                    key: self.key.clone(),
                    value,
                })
            }
            Err(e) => {
                let err = ProfileError::Save(SaveCause::Record(e));
                tracing::warn!(error = %err, "Could not encode profile");
                SaveOutcome::Rejected(err.notification())
            }
        }
    }

    /// Apply the result of the write started by [`save`](Self::save).
    ///
    /// On success the draft becomes the record and the mode returns to
    /// `Viewing`. On failure the mode returns to `Editing` and the draft is
    /// left exactly as it was.
    pub fn finish_save(&mut self, result: Result<(), StorageError>) -> Option<Notification> {
        if self.mode != Mode::Saving {
            tracing::debug!(mode = ?self.mode, "Ignoring save result with no save in flight");
            return None;
        }

        match result {
            Ok(()) => {
                if let Some(draft) = self.draft.take() {
                    self.record = draft;
                }
                self.mode = Mode::Viewing;
                tracing::info!(key = self.key.as_str(), "Profile saved");
                Some(Notification::save_success())
            }
            Err(e) => {
                let err = ProfileError::Save(SaveCause::Storage(e));
                tracing::warn!(key = self.key.as_str(), error = %err, "Keeping edits after failed save");
                self.mode = Mode::Editing;
                Some(err.notification())
            }
        }
    }

    /// Route a storage reply to the matching `finish` half.
    pub fn apply(&mut self, reply: StorageReply) -> Option<Notification> {
        match reply {
            StorageReply::Got(result) => self.finish_load(result),
            StorageReply::Stored(result) => self.finish_save(result),
        }
    }

    // ========== Blocking drivers ==========

    /// Run the whole load against a synchronous store.
    pub fn load_from(&mut self, store: &dyn KeyValueStore) -> Option<Notification> {
        let request = self.begin_load()?;
        self.apply(request.execute(store))
    }

    /// Run the whole save against a synchronous store.
    pub fn save_to(&mut self, store: &dyn KeyValueStore) -> Option<Notification> {
        match self.save() {
            SaveOutcome::Write(request) => self.apply(request.execute(store)),
            SaveOutcome::Rejected(notice) => Some(notice),
            SaveOutcome::Ignored => None,
        }
    }
}

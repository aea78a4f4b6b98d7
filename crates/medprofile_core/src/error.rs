use std::fmt;

use crate::controller::Mode;
use crate::notification::{NoticeKind, Notification};

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// I/O error (file not found, permission denied, etc.)
    Io(String),
    /// Stored bytes could not be read back as text
    Parse(String),
    /// Value could not be encoded for storage
    Serialize(String),
    /// Storage not available (e.g., LocalStorage disabled or full)
    NotAvailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {msg}"),
            StorageError::Parse(msg) => write!(f, "Parse error: {msg}"),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
            StorageError::NotAvailable(msg) => write!(f, "Storage not available: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Errors decoding or encoding a persisted profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Stored text is not valid JSON
    Malformed(String),
    /// Stored JSON is valid but not an object
    NotAnObject,
    /// A known field holds something other than a string
    FieldNotText { key: String, found: &'static str },
    Serialize(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Malformed(msg) => write!(f, "malformed profile data: {msg}"),
            RecordError::NotAnObject => write!(f, "profile data is not an object"),
            RecordError::FieldNotText { key, found } => {
                write!(f, "profile field {key} is not text (found {found})")
            }
            RecordError::Serialize(msg) => write!(f, "failed to encode profile: {msg}"),
        }
    }
}

impl std::error::Error for RecordError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingFullName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFullName => write!(f, "full name is required"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Why a load attempt failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadCause {
    Storage(StorageError),
    Record(RecordError),
}

impl fmt::Display for LoadCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadCause::Storage(e) => e.fmt(f),
            LoadCause::Record(e) => e.fmt(f),
        }
    }
}

/// Failures of the profile screen's operations.
///
/// None of these leave the screen; each maps to exactly one alert through
/// [`ProfileError::notification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    Load(LoadCause),
    Validation(ValidationError),
    Save(SaveCause),
}

/// Why a save attempt failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveCause {
    Storage(StorageError),
    Record(RecordError),
}

impl fmt::Display for SaveCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveCause::Storage(e) => e.fmt(f),
            SaveCause::Record(e) => e.fmt(f),
        }
    }
}

impl ProfileError {
    pub fn kind(&self) -> NoticeKind {
        match self {
            ProfileError::Load(_) => NoticeKind::LoadFailure,
            ProfileError::Validation(_) => NoticeKind::ValidationFailure,
            ProfileError::Save(_) => NoticeKind::SaveFailure,
        }
    }

    pub fn notification(&self) -> Notification {
        Notification::new(self.kind())
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Load(cause) => write!(f, "failed to load profile: {cause}"),
            ProfileError::Validation(e) => write!(f, "invalid profile: {e}"),
            ProfileError::Save(cause) => write!(f, "failed to save profile: {cause}"),
        }
    }
}

impl std::error::Error for ProfileError {}

/// An operation was called in a mode that does not accept it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub operation: &'static str,
    pub mode: Mode,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not allowed while {:?}", self.operation, self.mode)
    }
}

impl std::error::Error for TransitionError {}

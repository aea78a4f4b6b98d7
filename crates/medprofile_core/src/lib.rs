//! Medical profile core library
//!
//! This crate holds everything about the medical profile screen that does not
//! depend on a terminal or a browser:
//! - The flat [`ProfileRecord`] and its field catalogue
//! - Decoding persisted records by merging them over defaults
//! - The [`KeyValueStore`] contract and per-user storage keys
//! - The [`ProfileController`] edit/view state machine
//!
//! # Driving the controller
//!
//! ```ignore
//! use medprofile_core::{MemoryStore, ProfileController, ProfileField, SaveOutcome};
//!
//! let store = MemoryStore::new();
//! let mut screen = ProfileController::for_user("default");
//! screen.load_from(&store);
//! screen.begin_edit()?;
//! screen.update_field(ProfileField::FullName, "Jane Doe")?;
//! let notice = screen.save_to(&store);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod controller;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod record;
pub mod storage;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use controller::{Mode, ProfileController, SaveOutcome};
pub use error::{
    LoadCause, ProfileError, RecordError, SaveCause, StorageError, TransitionError, ValidationError,
};
pub use navigation::Navigator;
pub use notification::{NoticeKind, Notification};
pub use record::{ProfileField, ProfileRecord};
pub use storage::{
    DEFAULT_USER, KeyValueStore, MemoryStore, StorageReply, StorageRequest, profile_key,
};

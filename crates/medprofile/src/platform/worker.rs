//! Background worker abstraction for profile storage.

use medprofile_core::{StorageReply, StorageRequest};

/// Platform-independent storage worker interface.
///
/// Requests are answered in the order they were sent, one reply each.
pub trait StorageWorker {
    /// Send a storage request to the worker
    ///
    /// Returns true if the request was sent successfully
    fn send(&self, request: StorageRequest) -> bool;

    /// Try to receive a reply (non-blocking)
    fn try_recv(&self) -> Option<StorageReply>;

    /// Shutdown the worker
    fn shutdown(&self);
}

//! Web worker implementation for profile storage.
//!
//! LocalStorage is synchronous and only reachable from the main thread, so
//! requests run immediately and their replies wait in a queue for the next
//! frame.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use medprofile_core::{StorageReply, StorageRequest};

use super::WebStore;
use crate::platform::worker::StorageWorker;

pub struct WebWorker {
    store: WebStore,
    /// Queue of pending replies
    replies: RefCell<VecDeque<StorageReply>>,
    stopped: Cell<bool>,
}

impl WebWorker {
    pub fn new(store: WebStore) -> Self {
        Self {
            store,
            replies: RefCell::new(VecDeque::new()),
            stopped: Cell::new(false),
        }
    }
}

impl Default for WebWorker {
    fn default() -> Self {
        Self::new(WebStore::new())
    }
}

impl StorageWorker for WebWorker {
    fn send(&self, request: StorageRequest) -> bool {
        if self.stopped.get() {
            return false;
        }
        let reply = request.execute(&self.store);
        self.replies.borrow_mut().push_back(reply);
        true
    }

    fn try_recv(&self) -> Option<StorageReply> {
        self.replies.borrow_mut().pop_front()
    }

    fn shutdown(&self) {
        self.stopped.set(true);
    }
}

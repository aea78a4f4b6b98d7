//! Native worker implementation using std::thread.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

use medprofile_core::{KeyValueStore, StorageReply, StorageRequest};

use crate::platform::worker::StorageWorker;

enum Job {
    Run(StorageRequest),
    Shutdown,
}

/// Runs storage requests on a background thread that owns the store.
pub struct NativeWorker {
    request_tx: Sender<Job>,
    reply_rx: Receiver<StorageReply>,
    thread: Option<JoinHandle<()>>,
}

impl NativeWorker {
    pub fn new(store: Box<dyn KeyValueStore + Send>) -> Self {
        let (request_tx, request_rx) = channel();
        let (reply_tx, reply_rx) = channel();

        let thread = thread::spawn(move || run(store, request_rx, reply_tx));

        Self {
            request_tx,
            reply_rx,
            thread: Some(thread),
        }
    }
}

fn run(
    store: Box<dyn KeyValueStore + Send>,
    request_rx: Receiver<Job>,
    reply_tx: Sender<StorageReply>,
) {
    while let Ok(job) = request_rx.recv() {
        match job {
            Job::Shutdown => break,
            Job::Run(request) => {
                tracing::debug!(key = request.key(), "Running storage request");
                let reply = request.execute(&*store);
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("Storage worker stopped");
}

impl StorageWorker for NativeWorker {
    fn send(&self, request: StorageRequest) -> bool {
        self.request_tx.send(Job::Run(request)).is_ok()
    }

    fn try_recv(&self) -> Option<StorageReply> {
        self.reply_rx.try_recv().ok()
    }

    fn shutdown(&self) {
        if self.request_tx.send(Job::Shutdown).is_err() {
            tracing::debug!("Storage worker already stopped");
        }
    }
}

impl Drop for NativeWorker {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use medprofile_core::MemoryStore;

    fn wait_for_reply(worker: &NativeWorker) -> StorageReply {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(reply) = worker.try_recv() {
                return reply;
            }
            assert!(Instant::now() < deadline, "worker did not reply");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_requests_answered_in_order() {
        let store = Arc::new(MemoryStore::new());
        let worker = NativeWorker::new(Box::new(store.clone()));

        assert!(worker.send(StorageRequest::Set {
            key: "k".to_string(),
            value: "v".to_string(),
        }));
        assert!(worker.send(StorageRequest::Get {
            key: "k".to_string(),
        }));

        assert_eq!(wait_for_reply(&worker), StorageReply::Stored(Ok(())));
        assert_eq!(
            wait_for_reply(&worker),
            StorageReply::Got(Ok(Some("v".to_string())))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_send_after_shutdown_fails() {
        let worker = NativeWorker::new(Box::new(MemoryStore::new()));
        worker.shutdown();

        // The thread drains the shutdown job and drops its receiver
        let deadline = Instant::now() + Duration::from_secs(5);
        while worker.send(StorageRequest::Get {
            key: "k".to_string(),
        }) {
            assert!(Instant::now() < deadline, "worker kept accepting requests");
            thread::sleep(Duration::from_millis(5));
        }

        // Stopping a stopped worker is harmless, and so is the drop after it
        worker.shutdown();
        assert!(worker.try_recv().is_none());
    }
}

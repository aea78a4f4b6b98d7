//! Native platform implementations using filesystem and threads.

mod storage;
mod worker;

pub use storage::FileStore;
pub use worker::NativeWorker;

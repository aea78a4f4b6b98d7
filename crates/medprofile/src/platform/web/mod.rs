//! Web platform implementations using browser APIs.

mod storage;
mod worker;

pub use storage::WebStore;
pub use worker::WebWorker;

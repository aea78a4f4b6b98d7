//! Platform abstraction layer for native/web compatibility.
//!
//! Profile records go through [`medprofile_core::KeyValueStore`]; this module
//! supplies the backends and the [`StorageWorker`] that runs them off the
//! render loop:
//! - Native: one JSON file per key, served by a background thread
//! - Web: browser LocalStorage, served synchronously between frames

mod worker;

#[cfg(feature = "native")]
pub mod native;

#[cfg(all(feature = "web", not(feature = "native")))]
pub mod web;

pub use worker::StorageWorker;

#[cfg(feature = "native")]
pub use native::{FileStore, NativeWorker};

#[cfg(all(feature = "web", not(feature = "native")))]
pub use web::{WebStore, WebWorker};

//! Medical profile screen
//!
//! A terminal (and browser) front end for the profile controller in
//! `medprofile_core`. It provides:
//! - A read-only summary and an editable form over the same record
//! - Blocking alerts for load, validation and save outcomes
//! - Storage I/O on a background worker so the UI keeps drawing
//! - File-backed storage on native builds and LocalStorage on the web

pub mod app;
pub mod components;
pub mod config;
pub mod event;
pub mod logging;
pub mod modals;
pub mod platform;
pub mod screens;
pub mod state;

#[cfg(all(feature = "web", not(feature = "native")))]
pub mod web;

pub use app::App;
pub use config::AppConfig;
#[cfg(feature = "native")]
pub use logging::init_logging;
#[cfg(feature = "web")]
pub use logging::init_logging_web;

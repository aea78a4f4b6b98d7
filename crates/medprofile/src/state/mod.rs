mod app_state;
mod field_cursor;
mod modal;

pub use app_state::*;
pub use field_cursor::*;
pub use modal::*;

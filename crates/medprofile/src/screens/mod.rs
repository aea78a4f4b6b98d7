pub mod profile;

use crate::components::Component;

pub use profile::ProfileScreen;

/// Trait for full screen views
pub trait Screen: Component {
    /// Get the screen title
    fn title(&self) -> &str;
}

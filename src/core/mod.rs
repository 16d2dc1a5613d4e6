//! Core module hosting the session clock and application flow states.
pub mod plugin;

pub use plugin::{AppState, CorePlugin, SessionClock};

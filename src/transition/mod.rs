//! Transition module: screen fades and the location swap behind them.
pub mod components;
pub mod events;
pub mod fade;
pub mod orchestrator;
pub mod plugin;
pub mod systems;

pub use events::{LocationPresentedEvent, LocationTeardownEvent, TransitionStartedEvent};
pub use fade::ScreenFader;
pub use plugin::{TransitionPlugin, TransitionSet};

//! Tour module: the navigation controller and its notifications.
pub mod config;
pub mod errors;
pub mod events;
pub mod plugin;
pub mod state;
pub mod systems;
pub mod telemetry;

pub use config::TourSettings;
pub use events::{
    LocationChangedEvent, NavigateRequest, NavigationTarget, TourCompletedEvent,
    TourStartedEvent,
};
pub use plugin::{NavigationSet, TourPlugin};
pub use state::TourState;

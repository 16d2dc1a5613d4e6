//! Messages emitted while a location transition runs.
use std::sync::Arc;

use bevy::prelude::Message;

use crate::location::Location;

/// A fade-out toward `destination` has begun.
#[derive(Message, Debug, Clone, Copy)]
pub struct TransitionStartedEvent {
    pub destination: usize,
}

/// The previous location's hotspots were removed.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct LocationTeardownEvent;

/// Internal hand-off from the phase machine to the spawner.
#[derive(Message, Debug, Clone, Copy)]
pub struct LocationSpawnRequest {
    pub index: usize,
}

/// The location's environment and hotspots are in the scene.
#[derive(Message, Debug, Clone)]
pub struct LocationPresentedEvent {
    pub index: usize,
    pub location: Arc<Location>,
}

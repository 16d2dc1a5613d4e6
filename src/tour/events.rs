//! Messages consumed and emitted by the navigation controller.
use std::sync::Arc;

use bevy::prelude::Message;

use crate::location::Location;

/// Where a navigation request wants to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    Index(usize),
    Next,
    Previous,
}

/// Command asking the navigation controller to change location.
#[derive(Message, Debug, Clone, Copy)]
pub struct NavigateRequest {
    pub target: NavigationTarget,
}

impl NavigateRequest {
    pub fn to_index(index: usize) -> Self {
        Self {
            target: NavigationTarget::Index(index),
        }
    }
}

/// Fired once when the tour starts, carrying the starting location.
#[derive(Message, Debug, Clone)]
pub struct TourStartedEvent {
    pub index: usize,
    pub location: Arc<Location>,
}

/// Fired after every accepted navigation.
#[derive(Message, Debug, Clone)]
pub struct LocationChangedEvent {
    pub previous: usize,
    pub index: usize,
    pub location: Arc<Location>,
}

/// Fired whenever a navigation leaves every location visited.
#[derive(Message, Debug, Clone, Copy)]
pub struct TourCompletedEvent {
    pub visited: usize,
    pub total: usize,
}

//! Navigation controller state: current location, visited set, and session start.
use std::{collections::BTreeSet, time::Duration};

use bevy::prelude::*;

use super::errors::NavigationError;

/// Result of an accepted navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOutcome {
    pub previous: usize,
    pub current: usize,
    /// True whenever the visited set covers every location after this call.
    pub completed: bool,
}

/// Process-wide tour progress. Created when the tour starts, mutated only by
/// the navigation systems, never persisted.
///
/// `current_index` is always inside `[0, location_count)` and `visited` only grows.
#[derive(Resource, Debug, Clone)]
pub struct TourState {
    current_index: usize,
    visited: BTreeSet<usize>,
    location_count: usize,
    started_at: Duration,
}

impl TourState {
    pub fn new(
        start_index: usize,
        location_count: usize,
        started_at: Duration,
    ) -> Result<Self, NavigationError> {
        if location_count == 0 {
            return Err(NavigationError::NoLocations);
        }
        if start_index >= location_count {
            return Err(NavigationError::OutOfRange {
                index: start_index,
                location_count,
            });
        }

        Ok(Self {
            current_index: start_index,
            visited: BTreeSet::new(),
            location_count,
            started_at,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn location_count(&self) -> usize {
        self.location_count
    }

    pub fn visited(&self) -> &BTreeSet<usize> {
        &self.visited
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn has_visited(&self, index: usize) -> bool {
        self.visited.contains(&index)
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.location_count
    }

    pub fn is_complete(&self) -> bool {
        self.visited.len() >= self.location_count
    }

    /// Fraction of locations visited, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.visited.len() as f32 / self.location_count as f32
    }

    pub fn session_duration(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    /// Moves to `index`, marking the location being left as visited.
    ///
    /// Completion is reported every time the visited set covers all locations,
    /// including revisits after the tour is already complete.
    pub fn navigate(&mut self, index: usize) -> Result<NavigationOutcome, NavigationError> {
        if index >= self.location_count {
            return Err(NavigationError::OutOfRange {
                index,
                location_count: self.location_count,
            });
        }

        let previous = self.current_index;
        self.visited.insert(previous);
        self.current_index = index;

        Ok(NavigationOutcome {
            previous,
            current: index,
            completed: self.is_complete(),
        })
    }

    pub fn next(&mut self) -> Result<NavigationOutcome, NavigationError> {
        if self.is_last() {
            return Err(NavigationError::AtLastLocation);
        }
        self.navigate(self.current_index + 1)
    }

    pub fn previous(&mut self) -> Result<NavigationOutcome, NavigationError> {
        if self.is_first() {
            return Err(NavigationError::AtFirstLocation);
        }
        self.navigate(self.current_index - 1)
    }
}

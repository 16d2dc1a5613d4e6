//! Systems that start the tour and apply navigation requests.
use bevy::prelude::*;

use crate::{core::SessionClock, location::LocationRegistry};

use super::{
    config::TourSettings,
    errors::NavigationError,
    events::{
        LocationChangedEvent, NavigateRequest, NavigationTarget, TourCompletedEvent,
        TourStartedEvent,
    },
    state::TourState,
};

/// Creates a fresh `TourState` each time the tour is entered.
///
/// An empty registry leaves the tour without state: navigation is then ignored
/// but nothing crashes.
pub fn start_tour(
    mut commands: Commands,
    registry: Res<LocationRegistry>,
    settings: Res<TourSettings>,
    clock: Res<SessionClock>,
    mut started: MessageWriter<TourStartedEvent>,
) {
    let mut start_index = settings.starting_index;
    if start_index >= registry.len() && !registry.is_empty() {
        error!(
            "Starting location {} is outside the registry ({} locations); starting at 0",
            start_index,
            registry.len()
        );
        start_index = 0;
    }

    match TourState::new(start_index, registry.len(), clock.elapsed()) {
        Ok(state) => {
            let Some(location) = registry.get(start_index) else {
                return;
            };
            info!(
                "Tour started at '{}' ({} locations)",
                location.name,
                registry.len()
            );
            started.write(TourStartedEvent {
                index: start_index,
                location: location.clone(),
            });
            commands.insert_resource(state);
        }
        Err(err) => {
            error!("Cannot start tour: {}", err);
            commands.remove_resource::<TourState>();
        }
    }
}

/// Applies queued navigation requests in order, raising change and completion
/// notifications for each accepted one.
pub fn apply_navigation_requests(
    mut requests: MessageReader<NavigateRequest>,
    tour: Option<ResMut<TourState>>,
    registry: Res<LocationRegistry>,
    settings: Res<TourSettings>,
    mut changed: MessageWriter<LocationChangedEvent>,
    mut completed: MessageWriter<TourCompletedEvent>,
) {
    let Some(mut tour) = tour else {
        for request in requests.read() {
            warn!(
                "Navigation request {:?} ignored: {}",
                request.target,
                NavigationError::TourNotStarted
            );
        }
        return;
    };

    for request in requests.read() {
        let result = match request.target {
            NavigationTarget::Index(index) => tour.navigate(index),
            NavigationTarget::Next => tour.next(),
            NavigationTarget::Previous => tour.previous(),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Navigation request ignored: {}", err);
                continue;
            }
        };

        let Some(location) = registry.get(outcome.current) else {
            error!(
                "Location {} accepted by the tour is missing from the registry",
                outcome.current
            );
            continue;
        };

        info!("Navigating to: {}", location.name);
        if settings.debug {
            log_tour_state(&tour, &registry);
        }

        changed.write(LocationChangedEvent {
            previous: outcome.previous,
            index: outcome.current,
            location: location.clone(),
        });

        if outcome.completed {
            info!(
                "Tour completed: {}/{} locations visited",
                tour.visited_count(),
                tour.location_count()
            );
            completed.write(TourCompletedEvent {
                visited: tour.visited_count(),
                total: tour.location_count(),
            });
        }
    }
}

fn log_tour_state(tour: &TourState, registry: &LocationRegistry) {
    let current = registry
        .get(tour.current_index())
        .map(|location| location.name.as_str())
        .unwrap_or("None");
    info!(
        "Tour state: location '{}' ({}/{}) | visited {:?} | progress {:.0}%",
        current,
        tour.current_index(),
        tour.location_count(),
        tour.visited(),
        tour.progress() * 100.0
    );
}

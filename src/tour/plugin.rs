//! Tour plugin wiring the navigation controller, its messages, and telemetry.
use bevy::prelude::*;

use crate::core::AppState;

use super::{
    config::TourSettings,
    events::{LocationChangedEvent, NavigateRequest, TourCompletedEvent, TourStartedEvent},
    systems::{apply_navigation_requests, start_tour},
    telemetry::{flush_tour_telemetry_log, record_tour_telemetry, TourTelemetryLog},
};

/// System set containing the navigation controller; presentation systems run after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationSet;

pub struct TourPlugin {
    settings: TourSettings,
}

impl TourPlugin {
    pub fn new(settings: TourSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for TourPlugin {
    fn build(&self, app: &mut App) {
        info!(
            "TourPlugin configured: start index {}, fade {:.2}s, debug {}",
            self.settings.starting_index, self.settings.fade_seconds, self.settings.debug
        );

        app.insert_resource(self.settings.clone())
            .init_resource::<TourTelemetryLog>()
            .add_message::<NavigateRequest>()
            .add_message::<TourStartedEvent>()
            .add_message::<LocationChangedEvent>()
            .add_message::<TourCompletedEvent>()
            .add_systems(OnEnter(AppState::Touring), start_tour)
            .add_systems(
                Update,
                apply_navigation_requests
                    .in_set(NavigationSet)
                    .run_if(in_state(AppState::Touring)),
            )
            .add_systems(
                Update,
                (record_tour_telemetry, flush_tour_telemetry_log)
                    .chain()
                    .after(NavigationSet),
            );
    }
}

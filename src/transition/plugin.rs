//! TransitionPlugin runs fades and swaps the location scene behind them.
use bevy::prelude::*;

use crate::{core::AppState, tour::NavigationSet};

use super::{
    components::ActiveTransition,
    events::{
        LocationPresentedEvent, LocationSpawnRequest, LocationTeardownEvent,
        TransitionStartedEvent,
    },
    fade::ScreenFader,
    systems::{
        advance_location_transition, apply_panorama, begin_location_transition,
        begin_tour_reveal, clear_tour_scene, setup_transition_scene, spawn_location_hotspots,
        tear_down_location,
    },
};

/// Transition systems; they consume navigation output from the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionSet;

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        info!("TransitionPlugin registered");

        app.init_resource::<ScreenFader>()
            .init_resource::<ActiveTransition>()
            .add_message::<TransitionStartedEvent>()
            .add_message::<LocationTeardownEvent>()
            .add_message::<LocationSpawnRequest>()
            .add_message::<LocationPresentedEvent>()
            .configure_sets(Update, TransitionSet.after(NavigationSet))
            .add_systems(Startup, setup_transition_scene)
            .add_systems(
                Update,
                (
                    begin_tour_reveal,
                    begin_location_transition,
                    advance_location_transition,
                    tear_down_location,
                    spawn_location_hotspots,
                    apply_panorama,
                )
                    .chain()
                    .in_set(TransitionSet)
                    .run_if(in_state(AppState::Touring)),
            )
            .add_systems(OnExit(AppState::Touring), clear_tour_scene);
    }
}

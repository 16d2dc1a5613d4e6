//! TourAudioPlugin owns the ambience, music, and effect players.
use bevy::prelude::*;

use crate::{core::AppState, interaction::GazeSet, transition::TransitionSet};

use super::{
    config::AudioSettings,
    systems::{
        advance_ambience_crossfade, play_interaction_sfx, queue_location_ambience,
        start_welcome_music, stop_ambience, stop_music, AmbienceState,
    },
};

pub struct TourAudioPlugin;

impl Plugin for TourAudioPlugin {
    fn build(&self, app: &mut App) {
        let settings = AudioSettings::load_or_default();
        info!(
            "Audio configured: master {:.2}, ambience {:.2}, sfx {:.2}, fade {:.2}s",
            settings.master_volume,
            settings.ambience_volume,
            settings.sfx_volume,
            settings.fade_seconds
        );

        app.insert_resource(settings)
            .init_resource::<AmbienceState>()
            .add_systems(OnEnter(AppState::Welcome), start_welcome_music)
            .add_systems(OnExit(AppState::Welcome), stop_music)
            .add_systems(OnExit(AppState::Touring), stop_ambience)
            .add_systems(
                Update,
                (
                    (queue_location_ambience, advance_ambience_crossfade).chain(),
                    play_interaction_sfx,
                )
                    .after(TransitionSet)
                    .after(GazeSet)
                    .run_if(in_state(AppState::Touring)),
            );
    }
}

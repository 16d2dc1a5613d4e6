// src/ui/screens/plugin.rs
//
// ScreensPlugin shows the welcome screen before the tour and the outro after it.

use bevy::prelude::*;

use crate::core::AppState;

use super::systems::{
    animate_screen_intro, despawn_outro_screen, despawn_welcome_screen, handle_outro_keys,
    handle_screen_buttons, handle_welcome_keys, spawn_outro_screen, spawn_welcome_screen,
};

pub struct ScreensPlugin;

impl Plugin for ScreensPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Welcome), spawn_welcome_screen)
            .add_systems(OnExit(AppState::Welcome), despawn_welcome_screen)
            .add_systems(OnEnter(AppState::Outro), spawn_outro_screen)
            .add_systems(OnExit(AppState::Outro), despawn_outro_screen)
            .add_systems(
                Update,
                (
                    animate_screen_intro,
                    handle_screen_buttons,
                    handle_welcome_keys.run_if(in_state(AppState::Welcome)),
                    handle_outro_keys.run_if(in_state(AppState::Outro)),
                ),
            );
    }
}

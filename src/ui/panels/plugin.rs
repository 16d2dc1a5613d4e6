// src/ui/panels/plugin.rs
//
// PanelsPlugin owns the in-tour HUD and panels.

use bevy::prelude::*;

use crate::{core::AppState, transition::TransitionSet};

use super::systems::{
    despawn_tour_ui, handle_panel_buttons, handle_tour_keys, hide_info_panel_on_teardown,
    highlight_buttons, show_completion_banner, show_info_panel, spawn_tour_ui,
    sync_panel_visibility, update_hud,
};

pub struct PanelsPlugin;

impl Plugin for PanelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Touring), spawn_tour_ui)
            .add_systems(OnExit(AppState::Touring), despawn_tour_ui)
            .add_systems(
                Update,
                (
                    handle_tour_keys,
                    handle_panel_buttons,
                    (
                        update_hud,
                        show_info_panel,
                        hide_info_panel_on_teardown,
                        show_completion_banner,
                        sync_panel_visibility,
                    )
                        .chain()
                        .after(TransitionSet),
                )
                    .run_if(in_state(AppState::Touring)),
            )
            .add_systems(Update, highlight_buttons);
    }
}

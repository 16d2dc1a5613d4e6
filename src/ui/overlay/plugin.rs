// src/ui/overlay/plugin.rs
//
// OverlayPlugin keeps the fade overlay, reticle, and hotspot labels in step with their state.

use bevy::prelude::*;

use crate::core::AppState;

use super::systems::{
    follow_hotspot_labels, hide_reticle, show_reticle, spawn_hotspot_labels, spawn_overlay,
    sync_fade_overlay, sync_reticle,
};

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_overlay)
            .add_systems(OnEnter(AppState::Touring), show_reticle)
            .add_systems(OnExit(AppState::Touring), hide_reticle)
            .add_systems(
                PostUpdate,
                (
                    sync_fade_overlay,
                    sync_reticle.run_if(in_state(AppState::Touring)),
                    (spawn_hotspot_labels, follow_hotspot_labels).chain(),
                ),
            );
    }
}

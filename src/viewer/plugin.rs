//! ViewerPlugin spawns the camera the tour is seen (and gazed) through.
use bevy::prelude::*;

use super::{
    config::ViewerSettings,
    systems::{desktop_keyboard_look, desktop_mouse_look, spawn_viewer},
};

pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        let settings = ViewerSettings::load_or_default();
        info!(
            "Viewer configured: eye height {:.2}m, vertical limit {:.1}°",
            settings.eye_height, settings.vertical_limit_degrees
        );

        app.insert_resource(settings)
            .add_systems(Startup, spawn_viewer)
            .add_systems(Update, (desktop_mouse_look, desktop_keyboard_look));
    }
}

// src/ui/plugin.rs
//
// UiPlugin aggregates every screen-space UI plugin.

use bevy::prelude::*;

use super::{overlay::OverlayPlugin, panels::PanelsPlugin, screens::ScreensPlugin};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.add_plugins((OverlayPlugin, PanelsPlugin, ScreensPlugin));
    }
}

use bevy::prelude::*;

mod audio;
mod core;
mod interaction;
mod location;
mod tour;
mod transition;
mod ui;
mod viewer;

use crate::{
    audio::TourAudioPlugin, core::CorePlugin, interaction::InteractionPlugin,
    location::LocationPlugin, tour::TourPlugin, tour::TourSettings,
    transition::TransitionPlugin, ui::UiPlugin, viewer::ViewerPlugin,
};

fn main() {
    let tour_settings = TourSettings::load_or_default();
    let registry_path = tour_settings.registry_path.clone();

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Campus Virtual Tour".to_string(),
                    ..default()
                }),
                ..default()
            }),
            CorePlugin,
            LocationPlugin::new(registry_path),
            TourPlugin::new(tour_settings),
            ViewerPlugin,
            InteractionPlugin,
            TransitionPlugin,
            TourAudioPlugin,
            UiPlugin,
        ))
        .run();
}

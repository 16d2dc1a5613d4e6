//! InteractionPlugin wires the gaze loop and hotspot behaviour into the app.
use bevy::prelude::*;

use crate::{core::AppState, tour::NavigationSet};

use super::{
    components::GazeCursor,
    config::InteractionSettings,
    events::{GazeHoverEvent, HotspotActivatedEvent, ShowInfoPanelEvent},
    systems::{
        animate_hotspots, apply_gaze_hover, apply_hotspot_activation, update_gaze,
        update_gaze_feedback,
    },
};

/// Gaze resolution and activation routing; runs before navigation so an
/// activated hotspot moves the tour in the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GazeSet;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        let settings = InteractionSettings::load_or_default();
        info!(
            "Interaction configured: dwell {:.2}s, gaze distance {:.1}m",
            settings.dwell_seconds, settings.gaze_distance
        );

        app.insert_resource(GazeCursor::new(&settings))
            .insert_resource(settings)
            .add_message::<GazeHoverEvent>()
            .add_message::<HotspotActivatedEvent>()
            .add_message::<ShowInfoPanelEvent>()
            .configure_sets(Update, GazeSet.before(NavigationSet))
            .add_systems(
                Update,
                (update_gaze, apply_hotspot_activation)
                    .chain()
                    .in_set(GazeSet)
                    .run_if(in_state(AppState::Touring)),
            )
            .add_systems(
                Update,
                (
                    update_gaze_feedback.after(GazeSet),
                    (apply_gaze_hover, animate_hotspots)
                        .chain()
                        .after(GazeSet),
                )
                    .run_if(in_state(AppState::Touring)),
            );
    }
}

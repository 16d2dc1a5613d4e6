//! Scene entities and shared render handles owned by the transition module.
use bevy::prelude::*;

use super::orchestrator::LocationTransition;

/// Inward-facing sphere textured with the current panorama.
#[derive(Component, Debug)]
pub struct PanoramaSphere;

/// The transition in flight, if any. A new transition replaces it.
#[derive(Resource, Debug, Default)]
pub struct ActiveTransition(pub Option<LocationTransition>);

/// Meshes shared by every spawned hotspot.
#[derive(Resource, Debug, Clone)]
pub struct HotspotMeshes {
    pub info: Handle<Mesh>,
    pub navigation: Handle<Mesh>,
}

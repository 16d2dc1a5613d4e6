//! LocationPlugin loads the authored registry before any tour system runs.
use std::path::PathBuf;

use bevy::prelude::*;

use super::data::LocationRegistry;

pub struct LocationPlugin {
    registry_path: PathBuf,
}

impl LocationPlugin {
    pub fn new(registry_path: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
        }
    }
}

impl Plugin for LocationPlugin {
    fn build(&self, app: &mut App) {
        let registry = match LocationRegistry::load(&self.registry_path) {
            Ok(registry) => {
                info!(
                    "Location registry loaded from {:?}: {} locations",
                    self.registry_path,
                    registry.len()
                );
                for (location, label, destination) in registry.dangling_destinations() {
                    warn!(
                        "Navigation hotspot '{}' in location {} points at missing location {}",
                        label, location, destination
                    );
                }
                registry
            }
            Err(err) => {
                // The tour stays idle with an empty registry rather than aborting.
                error!("{}", err);
                LocationRegistry::default()
            }
        };

        app.insert_resource(registry);
    }
}

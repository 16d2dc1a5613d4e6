//! Authored location records and the read-only registry that owns them.
use std::{fs, path::Path, sync::Arc};

use bevy::prelude::*;
use serde::Deserialize;

use super::errors::RegistryError;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawRegistry {
    #[serde(default)]
    locations: Vec<RawLocation>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawLocation {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    environment: Option<String>,
    #[serde(default)]
    ambience: Option<String>,
    #[serde(default)]
    info_hotspots: Vec<RawInfoHotspot>,
    #[serde(default)]
    nav_hotspots: Vec<RawNavHotspot>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawInfoHotspot {
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    position: [f32; 3],
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawNavHotspot {
    label: String,
    destination: usize,
    #[serde(default)]
    position: [f32; 3],
    #[serde(default)]
    preview: Option<String>,
}

/// One 360° panoramic scene node with its own hotspots and ambience.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub description: String,
    /// Panorama texture path, relative to the asset folder.
    pub environment: Option<String>,
    /// Looping ambience clip path, relative to the asset folder.
    pub ambience: Option<String>,
    pub info_hotspots: Vec<InfoHotspotData>,
    pub nav_hotspots: Vec<NavHotspotData>,
}

/// Informational hotspot: shows a text panel when activated.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoHotspotData {
    pub title: String,
    pub body: String,
    pub position: Vec3,
    pub icon: Option<String>,
}

/// Navigational hotspot: requests a location change when activated.
#[derive(Debug, Clone, PartialEq)]
pub struct NavHotspotData {
    pub label: String,
    pub destination: usize,
    pub position: Vec3,
    pub preview: Option<String>,
}

/// Optional references are treated as absent when blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl From<RawLocation> for Location {
    fn from(value: RawLocation) -> Self {
        Self {
            name: value.name,
            description: value.description,
            environment: non_blank(value.environment),
            ambience: non_blank(value.ambience),
            info_hotspots: value
                .info_hotspots
                .into_iter()
                .map(|raw| InfoHotspotData {
                    title: raw.title,
                    body: raw.body,
                    position: Vec3::from_array(raw.position),
                    icon: non_blank(raw.icon),
                })
                .collect(),
            nav_hotspots: value
                .nav_hotspots
                .into_iter()
                .map(|raw| NavHotspotData {
                    label: raw.label,
                    destination: raw.destination,
                    position: Vec3::from_array(raw.position),
                    preview: non_blank(raw.preview),
                })
                .collect(),
        }
    }
}

/// Ordered, immutable list of tour locations.
///
/// Locations are shared behind `Arc` so notifications can reference a record
/// without copying it.
#[derive(Resource, Debug, Clone, Default)]
pub struct LocationRegistry {
    locations: Vec<Arc<Location>>,
}

impl LocationRegistry {
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations: locations.into_iter().map(Arc::new).collect(),
        }
    }

    /// Reads and validates the registry file. An empty registry is a configuration error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| RegistryError::read(path, err))?;
        Self::from_toml_str(&raw).map_err(|err| match err {
            RegistryError::Parse { message, .. } => RegistryError::parse(path, message),
            RegistryError::Empty { .. } => RegistryError::empty(path),
            other => other,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, RegistryError> {
        let parsed = toml::from_str::<RawRegistry>(raw)
            .map_err(|err| RegistryError::parse("<inline>", err.to_string()))?;
        if parsed.locations.is_empty() {
            return Err(RegistryError::empty("<inline>"));
        }

        Ok(Self::new(
            parsed.locations.into_iter().map(Location::from).collect(),
        ))
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Location>> {
        self.locations.get(index)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Location>> {
        self.locations.iter()
    }

    /// Lists `(location, hotspot label, destination)` for every navigation hotspot
    /// pointing outside the registry.
    pub fn dangling_destinations(&self) -> Vec<(usize, String, usize)> {
        self.locations
            .iter()
            .enumerate()
            .flat_map(|(index, location)| {
                location
                    .nav_hotspots
                    .iter()
                    .filter(|nav| nav.destination >= self.locations.len())
                    .map(move |nav| (index, nav.label.clone(), nav.destination))
            })
            .collect()
    }
}

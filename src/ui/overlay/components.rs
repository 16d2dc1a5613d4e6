// src/ui/overlay/components.rs
//
// Markers for the always-present overlay nodes.

use bevy::prelude::*;

/// Full-screen node whose alpha mirrors the screen fader.
#[derive(Component, Debug)]
pub struct FadeOverlay;

/// Centre-of-view reticle root; shown only during the tour.
#[derive(Component, Debug)]
pub struct Reticle;

/// Centre dot tinted with the gaze feedback colour.
#[derive(Component, Debug)]
pub struct ReticleDot;

/// Dwell progress bar under the dot.
#[derive(Component, Debug)]
pub struct ReticleFill;

/// Screen-space caption that follows a navigation hotspot.
#[derive(Component, Debug)]
pub struct HotspotLabel {
    pub hotspot: Entity,
}

//! Components and resources for hotspot entities and the gaze cursor.
use bevy::prelude::*;

use super::{
    config::{HotspotStyle, InteractionSettings},
    gaze::{GazeFeedback, GazeTracker},
};

/// Marks every hotspot spawned for the current location; teardown despawns them all.
#[derive(Component, Debug, Default)]
pub struct TourHotspot;

/// Hotspots only take part in gaze resolution while enabled.
#[derive(Component, Debug, Clone, Copy)]
pub struct Interactable {
    pub enabled: bool,
}

impl Default for Interactable {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Spherical hit volume centred on the hotspot.
#[derive(Component, Debug, Clone, Copy)]
pub struct HotspotCollider {
    pub radius: f32,
}

/// What a hotspot does when activated.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum HotspotAction {
    ShowInfo { title: String, body: String },
    Navigate { destination: usize, label: String },
}

/// Routed to the presentation layer or the navigation controller.
#[derive(Debug, Clone, PartialEq)]
pub enum HotspotCommand {
    ShowInfoPanel { title: String, body: String },
    Navigate(usize),
}

impl HotspotAction {
    pub fn activate(&self) -> HotspotCommand {
        match self {
            Self::ShowInfo { title, body } => HotspotCommand::ShowInfoPanel {
                title: title.clone(),
                body: body.clone(),
            },
            Self::Navigate { destination, .. } => HotspotCommand::Navigate(*destination),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::ShowInfo { title, .. } => title,
            Self::Navigate { label, .. } => label,
        }
    }
}

/// Hover-driven animation state of a hotspot.
#[derive(Component, Debug, Clone)]
pub struct HotspotVisual {
    pub hovered: bool,
    /// Navigation hotspots pulse while idle.
    pub pulses: bool,
    pub normal_colour: Vec3,
    pub hover_colour: Vec3,
    pub colour: Vec3,
    pub scale: f32,
}

impl HotspotVisual {
    pub fn info(style: &HotspotStyle) -> Self {
        Self {
            hovered: false,
            pulses: false,
            normal_colour: style.info_colour,
            hover_colour: style.info_hover_colour,
            colour: style.info_colour,
            scale: 1.0,
        }
    }

    pub fn navigation(style: &HotspotStyle) -> Self {
        Self {
            hovered: false,
            pulses: true,
            normal_colour: style.nav_colour,
            hover_colour: style.nav_hover_colour,
            colour: style.nav_colour,
            scale: 1.0,
        }
    }

    /// Scale the hotspot is easing toward at time `elapsed` (seconds).
    pub fn target_scale(&self, elapsed: f32, style: &HotspotStyle) -> f32 {
        if self.hovered {
            style.hover_scale
        } else if self.pulses {
            1.0 + (elapsed * style.pulse_speed).sin() * style.pulse_amount
        } else {
            1.0
        }
    }

    /// Eases scale and colour toward their targets.
    pub fn animate(&mut self, elapsed: f32, delta: f32, style: &HotspotStyle) {
        let factor = (delta * style.animation_speed).clamp(0.0, 1.0);
        let target_scale = self.target_scale(elapsed, style);
        self.scale += (target_scale - self.scale) * factor;

        let target_colour = if self.hovered {
            self.hover_colour
        } else {
            self.normal_colour
        };
        self.colour = self.colour.lerp(target_colour, factor);
    }
}

/// The gaze tracker over hotspot entities plus its reticle feedback.
#[derive(Resource, Debug, Clone)]
pub struct GazeCursor {
    pub tracker: GazeTracker<Entity>,
    pub feedback: GazeFeedback,
}

impl GazeCursor {
    pub fn new(settings: &InteractionSettings) -> Self {
        Self {
            tracker: GazeTracker::new(settings.dwell_seconds),
            feedback: GazeFeedback::new(settings.reticle.normal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_routes_by_variant() {
        let info = HotspotAction::ShowInfo {
            title: "Library".to_string(),
            body: "Open late.".to_string(),
        };
        assert_eq!(
            info.activate(),
            HotspotCommand::ShowInfoPanel {
                title: "Library".to_string(),
                body: "Open late.".to_string()
            }
        );

        let nav = HotspotAction::Navigate {
            destination: 3,
            label: "Cafeteria".to_string(),
        };
        assert_eq!(nav.activate(), HotspotCommand::Navigate(3));
        assert_eq!(nav.label(), "Cafeteria");
    }

    #[test]
    fn hovered_hotspot_grows_toward_hover_scale() {
        let style = InteractionSettings::default().hotspots;
        let mut visual = HotspotVisual::info(&style);
        visual.hovered = true;

        for _ in 0..120 {
            visual.animate(0.0, 1.0 / 60.0, &style);
        }
        assert!((visual.scale - style.hover_scale).abs() < 0.01);
        assert!(visual.colour.distance(style.info_hover_colour) < 0.01);
    }

    #[test]
    fn idle_navigation_hotspot_pulses_within_amount() {
        let style = InteractionSettings::default().hotspots;
        let visual = HotspotVisual::navigation(&style);

        for step in 0..100 {
            let scale = visual.target_scale(step as f32 * 0.1, &style);
            assert!(scale <= 1.0 + style.pulse_amount + f32::EPSILON);
            assert!(scale >= 1.0 - style.pulse_amount - f32::EPSILON);
        }
        assert!((HotspotVisual::info(&style).target_scale(0.7, &style) - 1.0).abs() < f32::EPSILON);
    }
}

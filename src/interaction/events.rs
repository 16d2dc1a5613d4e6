//! Messages emitted by the gaze interaction loop.
use bevy::prelude::{Entity, Message};

/// Gaze target changes, written in the order the tracker produced them.
///
/// Enter and exit share one queue so an activation on the first frame a
/// hotspot is hit (enter, activate, exit) leaves it un-hovered.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GazeHoverEvent {
    Entered(Entity),
    Exited(Entity),
}

/// Dwell or confirm completed on this hotspot.
#[derive(Message, Debug, Clone, Copy)]
pub struct HotspotActivatedEvent {
    pub entity: Entity,
}

/// Request for the presentation layer to show an information panel.
#[derive(Message, Debug, Clone)]
pub struct ShowInfoPanelEvent {
    pub title: String,
    pub body: String,
}

//! Components used by the viewer module.
use bevy::prelude::*;

/// Marker for the viewer camera, storing its look orientation in radians.
///
/// The gaze ray is cast along this camera's forward vector.
#[derive(Component, Debug, Clone, Copy)]
pub struct ViewerCamera {
    pub yaw: f32,
    pub pitch: f32,
}

impl ViewerCamera {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Turns by the given angles (degrees), keeping pitch within `±vertical_limit` degrees.
    /// Positive yaw turns right, positive pitch looks up.
    pub fn turn(&mut self, yaw_degrees: f32, pitch_degrees: f32, vertical_limit: f32) {
        let limit = vertical_limit.to_radians();
        self.yaw -= yaw_degrees.to_radians();
        self.pitch = (self.pitch + pitch_degrees.to_radians()).clamp(-limit, limit);
    }

    pub fn rotation(&self) -> Quat {
        (Quat::from_axis_angle(Vec3::Y, self.yaw) * Quat::from_axis_angle(Vec3::X, self.pitch))
            .normalize()
    }
}

//! Systems for the viewer camera and desktop look controls.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    prelude::*,
};

use crate::core::SessionClock;

use super::{components::ViewerCamera, config::ViewerSettings};

/// Spawns the viewer camera at eye level, looking down -Z.
pub fn spawn_viewer(mut commands: Commands, settings: Res<ViewerSettings>) {
    let viewer = ViewerCamera::new(0.0, 0.0);
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, settings.eye_height, 0.0).with_rotation(viewer.rotation()),
        viewer,
        Name::new("Viewer Camera"),
    ));
}

/// Mouse look while either mouse button is held.
pub fn desktop_mouse_look(
    mut motion_events: MessageReader<MouseMotion>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    settings: Res<ViewerSettings>,
    clock: Res<SessionClock>,
    mut query: Query<(&mut ViewerCamera, &mut Transform)>,
) {
    let mut cumulative_delta = Vec2::ZERO;
    for ev in motion_events.read() {
        cumulative_delta += ev.delta;
    }

    if clock.is_paused() || cumulative_delta == Vec2::ZERO {
        return;
    }
    if !mouse_buttons.any_pressed([MouseButton::Left, MouseButton::Right]) {
        return;
    }

    if let Ok((mut viewer, mut transform)) = query.single_mut() {
        viewer.turn(
            cumulative_delta.x * settings.mouse_sensitivity,
            -cumulative_delta.y * settings.mouse_sensitivity,
            settings.vertical_limit_degrees,
        );
        transform.rotation = viewer.rotation();
    }
}

/// Arrow-key look, scaled by the session delta.
pub fn desktop_keyboard_look(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<ViewerSettings>,
    clock: Res<SessionClock>,
    mut query: Query<(&mut ViewerCamera, &mut Transform)>,
) {
    let mut horizontal = 0.0;
    let mut vertical = 0.0;
    if keyboard.pressed(KeyCode::ArrowLeft) {
        horizontal = -1.0;
    } else if keyboard.pressed(KeyCode::ArrowRight) {
        horizontal = 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowUp) {
        vertical = 1.0;
    } else if keyboard.pressed(KeyCode::ArrowDown) {
        vertical = -1.0;
    }

    if horizontal == 0.0 && vertical == 0.0 {
        return;
    }

    let step = settings.keyboard_sensitivity * clock.delta_secs();
    if let Ok((mut viewer, mut transform)) = query.single_mut() {
        viewer.turn(
            horizontal * step,
            vertical * step,
            settings.vertical_limit_degrees,
        );
        transform.rotation = viewer.rotation();
    }
}

// src/ui/overlay/systems.rs
//
// Spawning and syncing the fade overlay, the gaze reticle, and hotspot labels.

use bevy::prelude::*;

use crate::{
    interaction::{GazeCursor, HotspotAction, TourHotspot},
    transition::ScreenFader,
    viewer::ViewerCamera,
};

use super::components::{FadeOverlay, HotspotLabel, Reticle, ReticleDot, ReticleFill};

const FADE_COLOR: Color = Color::BLACK;
const DOT_SIZE: f32 = 8.0;
const BAR_WIDTH: f32 = 48.0;
const BAR_HEIGHT: f32 = 4.0;
const BAR_TRACK_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);
const LABEL_WIDTH: f32 = 180.0;
const LABEL_FONT_SIZE: f32 = 16.0;
const LABEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.55);
// World-space drop below the hotspot centre.
const LABEL_DROP: f32 = 0.4;

pub fn spawn_overlay(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(FADE_COLOR.with_alpha(0.0)),
        GlobalZIndex(100),
        FadeOverlay,
        Name::new("Fade Overlay"),
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(6.0),
                ..default()
            },
            Visibility::Hidden,
            Reticle,
            Name::new("Reticle"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(DOT_SIZE),
                    height: Val::Px(DOT_SIZE),
                    // Keep the dot centred; the bar hangs below it.
                    margin: UiRect::top(Val::Px(BAR_HEIGHT + 6.0)),
                    ..default()
                },
                BackgroundColor(Color::WHITE),
                ReticleDot,
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Px(BAR_WIDTH),
                        height: Val::Px(BAR_HEIGHT),
                        ..default()
                    },
                    BackgroundColor(BAR_TRACK_COLOR),
                ))
                .with_children(|track| {
                    track.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::WHITE),
                        ReticleFill,
                    ));
                });
        });
}

pub fn sync_fade_overlay(
    fader: Res<ScreenFader>,
    mut overlay: Query<&mut BackgroundColor, With<FadeOverlay>>,
) {
    if !fader.is_changed() {
        return;
    }
    for mut background in overlay.iter_mut() {
        background.0 = FADE_COLOR.with_alpha(fader.opacity());
    }
}

pub fn sync_reticle(
    cursor: Res<GazeCursor>,
    mut dots: Query<&mut BackgroundColor, (With<ReticleDot>, Without<ReticleFill>)>,
    mut fills: Query<(&mut Node, &mut BackgroundColor), With<ReticleFill>>,
) {
    let feedback = cursor.feedback;
    let colour = Color::srgb(feedback.colour.x, feedback.colour.y, feedback.colour.z);

    for mut dot in dots.iter_mut() {
        dot.0 = colour;
    }
    for (mut node, mut background) in fills.iter_mut() {
        node.width = Val::Percent(feedback.fill * 100.0);
        background.0 = colour;
    }
}

pub fn show_reticle(mut reticle: Query<&mut Visibility, With<Reticle>>) {
    for mut visibility in reticle.iter_mut() {
        *visibility = Visibility::Inherited;
    }
}

pub fn hide_reticle(mut reticle: Query<&mut Visibility, With<Reticle>>) {
    for mut visibility in reticle.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

/// Gives every new navigation hotspot a caption with its destination name.
pub fn spawn_hotspot_labels(
    mut commands: Commands,
    hotspots: Query<(Entity, &HotspotAction), Added<HotspotAction>>,
) {
    for (hotspot, action) in hotspots.iter() {
        let HotspotAction::Navigate { label, .. } = action else {
            continue;
        };
        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(LABEL_WIDTH),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                Visibility::Hidden,
                HotspotLabel { hotspot },
                Name::new(format!("Label: {}", label)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Node {
                        padding: UiRect::axes(Val::Px(8.0), Val::Px(3.0)),
                        ..default()
                    },
                    Text::new(label.clone()),
                    TextFont {
                        font_size: LABEL_FONT_SIZE,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    BackgroundColor(LABEL_BACKGROUND),
                ));
            });
    }
}

/// Pins captions under their hotspot on screen; drops captions whose hotspot is gone.
pub fn follow_hotspot_labels(
    mut commands: Commands,
    viewer: Query<(&Camera, &GlobalTransform), With<ViewerCamera>>,
    hotspots: Query<&GlobalTransform, With<TourHotspot>>,
    mut labels: Query<(Entity, &HotspotLabel, &mut Node, &mut Visibility)>,
) {
    let camera = viewer.single().ok();

    for (entity, label, mut node, mut visibility) in labels.iter_mut() {
        let Ok(hotspot) = hotspots.get(label.hotspot) else {
            commands.entity(entity).despawn();
            continue;
        };
        let Some((camera, camera_transform)) = camera else {
            continue;
        };

        let anchor = hotspot.translation() - Vec3::Y * LABEL_DROP;
        let in_front =
            (anchor - camera_transform.translation()).dot(camera_transform.forward().as_vec3()) > 0.0;
        match camera.world_to_viewport(camera_transform, anchor) {
            Ok(screen) if in_front => {
                node.left = Val::Px(screen.x - LABEL_WIDTH * 0.5);
                node.top = Val::Px(screen.y);
                *visibility = Visibility::Inherited;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

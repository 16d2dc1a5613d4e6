//! Systems that run location transitions and build each location's scene.
use bevy::{math::primitives::Sphere, prelude::*};

use crate::{
    core::SessionClock,
    interaction::{
        systems::face_towards, GazeCursor, HotspotAction, HotspotCollider, HotspotVisual,
        InteractionSettings, Interactable, TourHotspot,
    },
    location::LocationRegistry,
    tour::{LocationChangedEvent, TourSettings, TourStartedEvent},
    viewer::ViewerCamera,
};

use super::{
    components::{ActiveTransition, HotspotMeshes, PanoramaSphere},
    events::{
        LocationPresentedEvent, LocationSpawnRequest, LocationTeardownEvent,
        TransitionStartedEvent,
    },
    fade::ScreenFader,
    orchestrator::{LocationTransition, TransitionAction},
};

const PANORAMA_RADIUS: f32 = 500.0;
const PANORAMA_FALLBACK_COLOR: Color = Color::srgb(0.12, 0.12, 0.14);
const INFO_HOTSPOT_RADIUS: f32 = 0.2;
const NAV_HOTSPOT_INNER_RADIUS: f32 = 0.18;
const NAV_HOTSPOT_OUTER_RADIUS: f32 = 0.26;

/// Authored positions at exactly y = 0 are lifted to eye level.
pub fn eye_level_position(authored: Vec3, eye_level_height: f32) -> Vec3 {
    if authored.y == 0.0 {
        Vec3::new(authored.x, eye_level_height, authored.z)
    } else {
        authored
    }
}

/// Spawns the panorama sphere and the shared hotspot meshes.
pub fn setup_transition_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Sphere::new(PANORAMA_RADIUS)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: PANORAMA_FALLBACK_COLOR,
            unlit: true,
            cull_mode: None,
            ..default()
        })),
        // Mirrored so the texture reads correctly from inside.
        Transform::from_scale(Vec3::new(-1.0, 1.0, 1.0)),
        PanoramaSphere,
        Name::new("Panorama"),
    ));

    commands.insert_resource(HotspotMeshes {
        info: meshes.add(Circle::new(INFO_HOTSPOT_RADIUS)),
        navigation: meshes.add(Annulus::new(
            NAV_HOTSPOT_INNER_RADIUS,
            NAV_HOTSPOT_OUTER_RADIUS,
        )),
    });
}

/// The starting location is revealed from an opaque screen.
pub fn begin_tour_reveal(
    mut started: MessageReader<TourStartedEvent>,
    settings: Res<TourSettings>,
    mut fader: ResMut<ScreenFader>,
    mut active: ResMut<ActiveTransition>,
) {
    if let Some(event) = started.read().last() {
        info!("Revealing starting location '{}'", event.location.name);
        active.0 = Some(LocationTransition::reveal(
            event.index,
            settings.fade_seconds,
            &mut fader,
        ));
    }
}

/// Starts a transition for the latest location change, replacing one in flight.
pub fn begin_location_transition(
    mut changed: MessageReader<LocationChangedEvent>,
    settings: Res<TourSettings>,
    mut fader: ResMut<ScreenFader>,
    mut active: ResMut<ActiveTransition>,
    mut started: MessageWriter<TransitionStartedEvent>,
) {
    let Some(event) = changed.read().last() else {
        return;
    };

    if let Some(previous) = active.0.as_ref() {
        debug!(
            "Transition to {} superseded by {}",
            previous.destination(),
            event.index
        );
    }

    active.0 = Some(LocationTransition::begin(
        event.index,
        settings.fade_seconds,
        &mut fader,
    ));
    started.write(TransitionStartedEvent {
        destination: event.index,
    });
}

/// Steps the active transition (or a stray fade) by the session delta.
pub fn advance_location_transition(
    clock: Res<SessionClock>,
    mut fader: ResMut<ScreenFader>,
    mut active: ResMut<ActiveTransition>,
    mut teardown: MessageWriter<LocationTeardownEvent>,
    mut spawn: MessageWriter<LocationSpawnRequest>,
) {
    let delta = clock.delta_secs();
    let Some(transition) = active.0.as_mut() else {
        fader.advance(delta);
        return;
    };

    match transition.advance(&mut fader, delta) {
        Some(TransitionAction::TearDown) => {
            teardown.write(LocationTeardownEvent);
        }
        Some(TransitionAction::Spawn(index)) => {
            spawn.write(LocationSpawnRequest { index });
        }
        Some(TransitionAction::Finished) => {
            debug!("Transition to {} finished", transition.destination());
            active.0 = None;
        }
        None => {}
    }
}

/// Removes every hotspot of the outgoing location and drops the gaze target.
pub fn tear_down_location(
    mut commands: Commands,
    mut teardown: MessageReader<LocationTeardownEvent>,
    hotspots: Query<Entity, With<TourHotspot>>,
    mut cursor: ResMut<GazeCursor>,
) {
    if teardown.read().count() == 0 {
        return;
    }

    let mut removed = 0;
    for entity in hotspots.iter() {
        commands.entity(entity).despawn();
        removed += 1;
    }
    cursor.tracker.reset();
    debug!("Cleared {} hotspots", removed);
}

/// Spawns the hotspots of the requested location, facing the viewer.
#[allow(clippy::too_many_arguments)]
pub fn spawn_location_hotspots(
    mut commands: Commands,
    mut requests: MessageReader<LocationSpawnRequest>,
    registry: Res<LocationRegistry>,
    tour_settings: Res<TourSettings>,
    interaction: Res<InteractionSettings>,
    hotspot_meshes: Res<HotspotMeshes>,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    viewer: Query<&GlobalTransform, With<ViewerCamera>>,
    mut presented: MessageWriter<LocationPresentedEvent>,
) {
    let viewer_position = viewer.single().ok().map(GlobalTransform::translation);
    let style = &interaction.hotspots;

    for request in requests.read() {
        let Some(location) = registry.get(request.index) else {
            error!("Cannot present location {}: not in the registry", request.index);
            continue;
        };

        let mut spawn_hotspot = |name: String,
                                 position: Vec3,
                                 mesh: Handle<Mesh>,
                                 texture: Option<&String>,
                                 visual: HotspotVisual,
                                 action: HotspotAction| {
            let mut transform = Transform::from_translation(eye_level_position(
                position,
                tour_settings.eye_level_height,
            ));
            if let Some(target) = viewer_position {
                face_towards(&mut transform, target);
            }
            let colour = visual.colour;
            commands.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(colour.x, colour.y, colour.z),
                    base_color_texture: texture.map(|path| asset_server.load(path.clone())),
                    alpha_mode: AlphaMode::Blend,
                    unlit: true,
                    cull_mode: None,
                    ..default()
                })),
                transform,
                TourHotspot,
                Interactable::default(),
                HotspotCollider {
                    radius: style.collider_radius,
                },
                visual,
                action,
                Name::new(name),
            ));
        };

        for info in &location.info_hotspots {
            spawn_hotspot(
                format!("Info: {}", info.title),
                info.position,
                hotspot_meshes.info.clone(),
                info.icon.as_ref(),
                HotspotVisual::info(style),
                HotspotAction::ShowInfo {
                    title: info.title.clone(),
                    body: info.body.clone(),
                },
            );
        }

        for nav in &location.nav_hotspots {
            spawn_hotspot(
                format!("Navigate: {}", nav.label),
                nav.position,
                hotspot_meshes.navigation.clone(),
                nav.preview.as_ref(),
                HotspotVisual::navigation(style),
                HotspotAction::Navigate {
                    destination: nav.destination,
                    label: nav.label.clone(),
                },
            );
        }

        info!(
            "Loaded location: {} ({} info, {} navigation hotspots)",
            location.name,
            location.info_hotspots.len(),
            location.nav_hotspots.len()
        );
        presented.write(LocationPresentedEvent {
            index: request.index,
            location: location.clone(),
        });
    }
}

/// Swaps the panorama texture for the presented location.
pub fn apply_panorama(
    mut presented: MessageReader<LocationPresentedEvent>,
    asset_server: Res<AssetServer>,
    panorama: Query<&MeshMaterial3d<StandardMaterial>, With<PanoramaSphere>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(event) = presented.read().last() else {
        return;
    };
    let Ok(handle) = panorama.single() else {
        return;
    };
    let Some(mut material) = materials.get_mut(&handle.0) else {
        return;
    };
    debug!(
        "Panorama for location {}: {:?}",
        event.index, event.location.environment
    );

    match &event.location.environment {
        Some(path) => {
            material.base_color = Color::WHITE;
            material.base_color_texture = Some(asset_server.load(path.clone()));
        }
        None => {
            material.base_color = PANORAMA_FALLBACK_COLOR;
            material.base_color_texture = None;
        }
    }
}

/// Leaving the tour drops the scene and any transition in flight.
pub fn clear_tour_scene(
    mut commands: Commands,
    hotspots: Query<Entity, With<TourHotspot>>,
    mut active: ResMut<ActiveTransition>,
    mut fader: ResMut<ScreenFader>,
    mut cursor: ResMut<GazeCursor>,
) {
    for entity in hotspots.iter() {
        commands.entity(entity).despawn();
    }
    active.0 = None;
    fader.set_opacity(0.0);
    cursor.tracker.reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use std::sync::Arc;

    #[test]
    fn ground_level_positions_are_lifted_to_eye_level() {
        assert_eq!(
            eye_level_position(Vec3::new(2.0, 0.0, -4.0), 1.5),
            Vec3::new(2.0, 1.5, -4.0)
        );
        assert_eq!(
            eye_level_position(Vec3::new(2.0, 0.3, -4.0), 1.5),
            Vec3::new(2.0, 0.3, -4.0)
        );
        assert_eq!(
            eye_level_position(Vec3::new(0.0, -0.5, 3.0), 1.5),
            Vec3::new(0.0, -0.5, 3.0)
        );
    }

    #[derive(Resource, Default)]
    struct PendingChanges(Vec<usize>);

    #[derive(Resource, Default)]
    struct Observed {
        teardowns: usize,
        spawns: Vec<usize>,
        started: Vec<usize>,
    }

    fn feed_changes(
        mut pending: ResMut<PendingChanges>,
        mut writer: MessageWriter<LocationChangedEvent>,
    ) {
        for index in pending.0.drain(..) {
            writer.write(LocationChangedEvent {
                previous: 0,
                index,
                location: Arc::new(Location {
                    name: format!("L{index}"),
                    description: String::new(),
                    environment: None,
                    ambience: None,
                    info_hotspots: Vec::new(),
                    nav_hotspots: Vec::new(),
                }),
            });
        }
    }

    fn observe(
        mut teardown: MessageReader<LocationTeardownEvent>,
        mut spawn: MessageReader<LocationSpawnRequest>,
        mut started: MessageReader<TransitionStartedEvent>,
        mut observed: ResMut<Observed>,
    ) {
        observed.teardowns += teardown.read().count();
        for request in spawn.read() {
            observed.spawns.push(request.index);
        }
        for event in started.read() {
            observed.started.push(event.destination);
        }
    }

    fn transition_app() -> App {
        let settings = TourSettings {
            fade_seconds: 0.0,
            ..TourSettings::default()
        };

        let mut app = App::new();
        app.add_message::<LocationChangedEvent>()
            .add_message::<TransitionStartedEvent>()
            .add_message::<LocationTeardownEvent>()
            .add_message::<LocationSpawnRequest>()
            .insert_resource(settings)
            .insert_resource(SessionClock::new())
            .insert_resource(GazeCursor::new(&InteractionSettings::default()))
            .init_resource::<ScreenFader>()
            .init_resource::<ActiveTransition>()
            .init_resource::<PendingChanges>()
            .init_resource::<Observed>()
            .add_systems(
                Update,
                (
                    feed_changes,
                    begin_location_transition,
                    advance_location_transition,
                    tear_down_location,
                    observe,
                )
                    .chain(),
            );
        app
    }

    #[test]
    fn teardown_removes_hotspots_before_spawn_is_requested() {
        let mut app = transition_app();
        let hotspot = app.world_mut().spawn(TourHotspot).id();
        let bystander = app.world_mut().spawn_empty().id();

        app.world_mut().resource_mut::<PendingChanges>().0.push(2);
        app.update();
        assert_eq!(app.world().resource::<Observed>().started, vec![2]);

        app.update();
        assert_eq!(app.world().resource::<Observed>().teardowns, 1);
        assert!(app.world().get_entity(hotspot).is_err());
        assert!(app.world().get_entity(bystander).is_ok());
        assert!(app.world().resource::<Observed>().spawns.is_empty());

        app.update();
        assert_eq!(app.world().resource::<Observed>().spawns, vec![2]);

        app.update();
        assert!(app.world().resource::<ActiveTransition>().0.is_none());
        assert_eq!(app.world().resource::<ScreenFader>().opacity(), 0.0);
    }

    #[test]
    fn latest_change_replaces_the_transition_in_flight() {
        let mut app = transition_app();

        app.world_mut().resource_mut::<PendingChanges>().0.push(1);
        app.update();
        app.world_mut().resource_mut::<PendingChanges>().0.push(3);
        for _ in 0..5 {
            app.update();
        }

        let observed = app.world().resource::<Observed>();
        assert_eq!(observed.started, vec![1, 3]);
        assert_eq!(observed.spawns, vec![3]);
    }
}

//! Systems for the gaze loop, hotspot activation, and hotspot animation.
use bevy::prelude::*;

use crate::{
    core::SessionClock,
    tour::NavigateRequest,
    viewer::ViewerCamera,
};

use super::{
    components::{
        GazeCursor, HotspotAction, HotspotCollider, HotspotCommand, HotspotVisual, Interactable,
    },
    config::InteractionSettings,
    events::{GazeHoverEvent, HotspotActivatedEvent, ShowInfoPanelEvent},
    gaze::GazeSignal,
};

/// Distance along a normalised ray to the first intersection with a sphere.
///
/// Returns `None` when the sphere is missed or lies entirely behind the origin.
/// An origin inside the sphere reports distance zero.
pub fn ray_sphere_distance(origin: Vec3, direction: Vec3, centre: Vec3, radius: f32) -> Option<f32> {
    let to_centre = centre - origin;
    let along = to_centre.dot(direction);
    let closest_sq = to_centre.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }

    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if far < 0.0 {
        None
    } else {
        Some(near.max(0.0))
    }
}

/// Nearest candidate along the ray within `max_distance`.
pub fn nearest_hit<T>(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    candidates: impl IntoIterator<Item = (T, Vec3, f32)>,
) -> Option<T> {
    candidates
        .into_iter()
        .filter_map(|(id, centre, radius)| {
            ray_sphere_distance(origin, direction, centre, radius)
                .filter(|distance| *distance <= max_distance)
                .map(|distance| (id, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Casts the gaze ray, steps the tracker, and publishes the resulting signals.
#[allow(clippy::too_many_arguments)]
pub fn update_gaze(
    clock: Res<SessionClock>,
    settings: Res<InteractionSettings>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut cursor: ResMut<GazeCursor>,
    viewer: Query<&GlobalTransform, With<ViewerCamera>>,
    hotspots: Query<(Entity, &GlobalTransform, &HotspotCollider, &Interactable)>,
    mut hover: MessageWriter<GazeHoverEvent>,
    mut activated: MessageWriter<HotspotActivatedEvent>,
) {
    if clock.is_paused() {
        return;
    }
    let Ok(viewer_transform) = viewer.single() else {
        return;
    };

    let origin = viewer_transform.translation();
    let direction = viewer_transform.forward().as_vec3();
    let hit = nearest_hit(
        origin,
        direction,
        settings.gaze_distance,
        hotspots
            .iter()
            .filter(|(_, _, _, interactable)| interactable.enabled)
            .map(|(entity, transform, collider, _)| {
                (entity, transform.translation(), collider.radius)
            }),
    );

    let confirm = mouse_buttons.just_pressed(MouseButton::Left)
        || keyboard.any_just_pressed([KeyCode::Enter, KeyCode::Space]);

    for signal in cursor.tracker.step(hit, clock.delta_secs(), confirm) {
        match signal {
            GazeSignal::Enter(entity) => {
                hover.write(GazeHoverEvent::Entered(entity));
            }
            GazeSignal::Exit(entity) => {
                hover.write(GazeHoverEvent::Exited(entity));
            }
            GazeSignal::Activate(entity) => {
                activated.write(HotspotActivatedEvent { entity });
            }
        }
    }
}

/// Updates the derived reticle fill and colour.
pub fn update_gaze_feedback(
    clock: Res<SessionClock>,
    settings: Res<InteractionSettings>,
    mut cursor: ResMut<GazeCursor>,
) {
    let progress = cursor.tracker.progress();
    cursor.feedback.update(
        progress,
        clock.delta_secs(),
        settings.fill_decay_rate,
        settings.colour_lerp_rate,
        &settings.reticle,
    );
}

/// Runs each activated hotspot's action.
pub fn apply_hotspot_activation(
    mut activated: MessageReader<HotspotActivatedEvent>,
    actions: Query<&HotspotAction>,
    mut navigate: MessageWriter<NavigateRequest>,
    mut show_info: MessageWriter<ShowInfoPanelEvent>,
) {
    for event in activated.read() {
        let Ok(action) = actions.get(event.entity) else {
            debug!("Activated hotspot {:?} no longer exists", event.entity);
            continue;
        };

        match action.activate() {
            HotspotCommand::ShowInfoPanel { title, body } => {
                info!("Info hotspot activated: {}", title);
                show_info.write(ShowInfoPanelEvent { title, body });
            }
            HotspotCommand::Navigate(destination) => {
                info!("Navigation hotspot activated: {}", action.label());
                navigate.write(NavigateRequest::to_index(destination));
            }
        }
    }
}

/// Mirrors gaze enter/exit onto the hotspot's hover flag, in arrival order.
pub fn apply_gaze_hover(
    mut hover: MessageReader<GazeHoverEvent>,
    mut visuals: Query<&mut HotspotVisual>,
) {
    for event in hover.read() {
        let (entity, hovered) = match *event {
            GazeHoverEvent::Entered(entity) => (entity, true),
            GazeHoverEvent::Exited(entity) => (entity, false),
        };
        if let Ok(mut visual) = visuals.get_mut(entity) {
            visual.hovered = hovered;
        }
    }
}

/// Per-frame hotspot update: face the viewer, ease scale and colour.
pub fn animate_hotspots(
    clock: Res<SessionClock>,
    settings: Res<InteractionSettings>,
    viewer: Query<&GlobalTransform, With<ViewerCamera>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut hotspots: Query<
        (
            &mut HotspotVisual,
            &mut Transform,
            &MeshMaterial3d<StandardMaterial>,
        ),
        Without<ViewerCamera>,
    >,
) {
    let viewer_position = viewer.single().ok().map(GlobalTransform::translation);
    let elapsed = clock.elapsed().as_secs_f32();
    let delta = clock.delta_secs();
    let style = &settings.hotspots;

    for (mut visual, mut transform, material) in hotspots.iter_mut() {
        visual.animate(elapsed, delta, style);
        transform.scale = Vec3::splat(visual.scale);

        if let Some(target) = viewer_position {
            face_towards(&mut transform, target);
        }

        if let Some(mut material) = materials.get_mut(&material.0) {
            let colour = visual.colour;
            material.base_color = Color::srgb(colour.x, colour.y, colour.z);
        }
    }
}

/// Orients a hotspot so its front (+Z) faces `target`.
pub fn face_towards(transform: &mut Transform, target: Vec3) {
    if transform.translation.distance_squared(target) <= f32::EPSILON {
        return;
    }
    transform.look_at(target, Vec3::Y);
    transform.rotate_local_y(std::f32::consts::PI);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_sphere_in_front() {
        let distance =
            ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -5.0), 1.0)
                .expect("sphere ahead");
        assert!((distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_offset_or_behind_spheres() {
        assert!(
            ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(3.0, 0.0, -5.0), 1.0).is_none()
        );
        assert!(
            ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 5.0), 1.0).is_none()
        );
    }

    #[test]
    fn origin_inside_sphere_counts_as_hit() {
        assert_eq!(
            ray_sphere_distance(Vec3::ZERO, Vec3::X, Vec3::ZERO, 1.0),
            Some(0.0)
        );
    }

    #[test]
    fn nearest_candidate_wins() {
        let hit = nearest_hit(
            Vec3::ZERO,
            Vec3::NEG_Z,
            100.0,
            [
                ("far", Vec3::new(0.0, 0.0, -9.0), 0.5),
                ("near", Vec3::new(0.0, 0.1, -3.0), 0.5),
                ("aside", Vec3::new(4.0, 0.0, -1.0), 0.5),
            ],
        );
        assert_eq!(hit, Some("near"));
    }

    #[test]
    fn hits_beyond_range_are_ignored() {
        let hit = nearest_hit(
            Vec3::ZERO,
            Vec3::NEG_Z,
            10.0,
            [("distant", Vec3::new(0.0, 0.0, -50.0), 1.0)],
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn facing_points_front_at_target() {
        let mut transform = Transform::from_xyz(0.0, 1.5, -4.0);
        face_towards(&mut transform, Vec3::new(0.0, 1.5, 0.0));

        let front = transform.rotation * Vec3::Z;
        assert!(front.distance(Vec3::Z) < 1e-4);
    }

    #[derive(Resource, Default)]
    struct Collected {
        navigations: Vec<usize>,
        panels: Vec<String>,
    }

    #[derive(Resource)]
    struct PendingActivations(Vec<Entity>);

    fn feed(
        mut pending: ResMut<PendingActivations>,
        mut writer: MessageWriter<HotspotActivatedEvent>,
    ) {
        for entity in pending.0.drain(..) {
            writer.write(HotspotActivatedEvent { entity });
        }
    }

    fn collect(
        mut navigate: MessageReader<NavigateRequest>,
        mut panels: MessageReader<ShowInfoPanelEvent>,
        mut collected: ResMut<Collected>,
    ) {
        for request in navigate.read() {
            if let crate::tour::NavigationTarget::Index(index) = request.target {
                collected.navigations.push(index);
            }
        }
        for panel in panels.read() {
            collected.panels.push(panel.title.clone());
        }
    }

    #[test]
    fn activation_routes_to_navigation_and_presentation() {
        let mut app = App::new();
        app.add_message::<HotspotActivatedEvent>()
            .add_message::<NavigateRequest>()
            .add_message::<ShowInfoPanelEvent>()
            .init_resource::<Collected>()
            .add_systems(Update, (feed, apply_hotspot_activation, collect).chain());

        let info = app
            .world_mut()
            .spawn(HotspotAction::ShowInfo {
                title: "Founding".to_string(),
                body: "2015".to_string(),
            })
            .id();
        let nav = app
            .world_mut()
            .spawn(HotspotAction::Navigate {
                destination: 2,
                label: "Library".to_string(),
            })
            .id();
        let gone = app.world_mut().spawn_empty().id();
        app.world_mut().despawn(gone);

        app.insert_resource(PendingActivations(vec![info, nav, gone]));
        app.update();

        let collected = app.world().resource::<Collected>();
        assert_eq!(collected.navigations, vec![2]);
        assert_eq!(collected.panels, vec!["Founding".to_string()]);
    }

    #[derive(Resource, Default)]
    struct ObservedGaze {
        hover: Vec<GazeHoverEvent>,
        activations: Vec<Entity>,
    }

    fn observe_gaze(
        mut hover: MessageReader<GazeHoverEvent>,
        mut activated: MessageReader<HotspotActivatedEvent>,
        mut observed: ResMut<ObservedGaze>,
    ) {
        observed.hover.extend(hover.read().copied());
        observed
            .activations
            .extend(activated.read().map(|event| event.entity));
    }

    const AHEAD: Vec3 = Vec3::new(0.0, 0.0, -4.0);

    fn gaze_app() -> App {
        let settings = InteractionSettings::default();
        let mut app = App::new();
        app.add_message::<GazeHoverEvent>()
            .add_message::<HotspotActivatedEvent>()
            .insert_resource(GazeCursor::new(&settings))
            .insert_resource(settings)
            .insert_resource(SessionClock::new())
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ObservedGaze>()
            .add_systems(
                Update,
                (update_gaze, apply_gaze_hover, observe_gaze).chain(),
            );
        app.world_mut()
            .spawn((ViewerCamera::new(0.0, 0.0), GlobalTransform::IDENTITY));
        app
    }

    fn spawn_target(app: &mut App, enabled: bool) -> Entity {
        let style = InteractionSettings::default().hotspots;
        app.world_mut()
            .spawn((
                GlobalTransform::from_translation(AHEAD),
                HotspotCollider { radius: 0.5 },
                Interactable { enabled },
                HotspotVisual::info(&style),
            ))
            .id()
    }

    fn tick(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<SessionClock>()
            .tick(std::time::Duration::from_secs_f32(seconds));
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();
    }

    fn hovered(app: &App, entity: Entity) -> bool {
        app.world()
            .get::<HotspotVisual>(entity)
            .expect("hotspot keeps its visual")
            .hovered
    }

    #[test]
    fn dwelling_on_a_hotspot_activates_it_on_the_fourth_half_second() {
        let mut app = gaze_app();
        let target = spawn_target(&mut app, true);

        for _ in 0..3 {
            tick(&mut app, 0.5);
        }
        assert!(app.world().resource::<ObservedGaze>().activations.is_empty());
        assert!(hovered(&app, target));

        tick(&mut app, 0.5);
        let observed = app.world().resource::<ObservedGaze>();
        assert_eq!(observed.activations, vec![target]);
        assert_eq!(
            observed.hover,
            vec![
                GazeHoverEvent::Entered(target),
                GazeHoverEvent::Exited(target)
            ]
        );
        assert!(!hovered(&app, target));
    }

    #[test]
    fn click_on_first_frame_leaves_the_hotspot_unhovered() {
        let mut app = gaze_app();
        let target = spawn_target(&mut app, true);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        tick(&mut app, 0.1);

        assert_eq!(
            app.world().resource::<ObservedGaze>().activations,
            vec![target]
        );
        assert!(!hovered(&app, target));

        app.world_mut()
            .entity_mut(target)
            .insert(GlobalTransform::from_translation(Vec3::new(10.0, 0.0, -4.0)));
        for _ in 0..3 {
            tick(&mut app, 0.1);
        }
        assert!(!hovered(&app, target));
        assert_eq!(
            app.world().resource::<ObservedGaze>().hover,
            vec![
                GazeHoverEvent::Entered(target),
                GazeHoverEvent::Exited(target)
            ]
        );
    }

    #[test]
    fn disabled_hotspots_are_not_targeted() {
        let mut app = gaze_app();
        let target = spawn_target(&mut app, false);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        for _ in 0..5 {
            tick(&mut app, 0.5);
        }

        let observed = app.world().resource::<ObservedGaze>();
        assert!(observed.hover.is_empty());
        assert!(observed.activations.is_empty());
        assert!(!hovered(&app, target));
    }

    #[test]
    fn paused_session_neither_targets_nor_activates() {
        let mut app = gaze_app();
        spawn_target(&mut app, true);
        app.world_mut()
            .resource_mut::<SessionClock>()
            .set_paused(true);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        for _ in 0..5 {
            tick(&mut app, 0.5);
        }

        let observed = app.world().resource::<ObservedGaze>();
        assert!(observed.hover.is_empty());
        assert!(observed.activations.is_empty());
        assert_eq!(
            app.world().resource::<GazeCursor>().tracker.progress(),
            None
        );
    }
}

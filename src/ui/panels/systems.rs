// src/ui/panels/systems.rs
//
// Systems for the HUD, info panel, navigation menu, pause label, and
// completion banner shown during the tour.

use bevy::prelude::*;

use crate::{
    core::{AppState, SessionClock},
    interaction::ShowInfoPanelEvent,
    location::LocationRegistry,
    tour::{NavigateRequest, TourCompletedEvent, TourState},
    transition::LocationTeardownEvent,
};

use super::components::{
    ClosedPanel, CompletionBanner, HudDescriptionText, HudLocationText, HudProgressText, InfoPanel,
    InfoPanelBody, InfoPanelCloseButton, InfoPanelTitle, NavigationMenu, NavigationMenuButton,
    NavigationMenuLabel, PauseLabel, TourPanels, TourUi,
};

// Visual constants
const PANEL_COLOR: Color = Color::srgba(0.08, 0.08, 0.1, 0.88);
const BORDER_COLOR: Color = Color::srgb(0.3, 0.3, 0.35);
const TEXT_COLOR: Color = Color::WHITE;
const TITLE_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const HINT_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.6);
const VISITED_COLOR: Color = Color::srgb(0.55, 0.85, 0.55);
const CURRENT_COLOR: Color = Color::srgb(0.3, 0.8, 1.0);
const BUTTON_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.08);
const BUTTON_HOVER_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);

const HINT_TEXT: &str = "Gaze or click hotspots  |  M: map  P: pause  F: finish";

pub fn progress_label(tour: &TourState) -> String {
    format!(
        "Visited {}/{}",
        tour.visited_count(),
        tour.location_count()
    )
}

fn text(content: impl Into<String>, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(content),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}

fn panel_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        padding: UiRect::all(Val::Px(14.0)),
        border: UiRect::all(Val::Px(2.0)),
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(8.0),
        ..default()
    }
}

/// Builds every in-tour panel; only the HUD starts visible.
pub fn spawn_tour_ui(mut commands: Commands, registry: Res<LocationRegistry>) {
    commands.insert_resource(TourPanels::default());

    // HUD (top-left)
    commands
        .spawn((
            Node {
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                ..panel_node()
            },
            BackgroundColor(PANEL_COLOR),
            BorderColor::from(BORDER_COLOR),
            TourUi,
            Name::new("HUD"),
        ))
        .with_children(|parent| {
            parent.spawn((text("", 24.0, TITLE_COLOR), HudLocationText));
            parent.spawn((
                text("", 14.0, TEXT_COLOR),
                Node {
                    max_width: Val::Px(360.0),
                    ..default()
                },
                HudDescriptionText,
            ));
            parent.spawn((text("", 16.0, TEXT_COLOR), HudProgressText));
            parent.spawn(text(HINT_TEXT, 13.0, HINT_COLOR));
        });

    // Info panel (bottom-centre)
    commands
        .spawn((
            Node {
                bottom: Val::Px(32.0),
                left: Val::Percent(25.0),
                width: Val::Percent(50.0),
                ..panel_node()
            },
            BackgroundColor(PANEL_COLOR),
            BorderColor::from(BORDER_COLOR),
            Visibility::Hidden,
            InfoPanel,
            TourUi,
            Name::new("Info Panel"),
        ))
        .with_children(|parent| {
            parent.spawn((text("", 22.0, TITLE_COLOR), InfoPanelTitle));
            parent.spawn((text("", 16.0, TEXT_COLOR), InfoPanelBody));
            parent
                .spawn((
                    Button,
                    Node {
                        align_self: AlignSelf::FlexEnd,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(BUTTON_COLOR),
                    InfoPanelCloseButton,
                ))
                .with_children(|button| {
                    button.spawn(text("Close (Esc)", 14.0, TEXT_COLOR));
                });
        });

    // Navigation menu (right)
    commands
        .spawn((
            Node {
                top: Val::Px(16.0),
                right: Val::Px(16.0),
                min_width: Val::Px(240.0),
                ..panel_node()
            },
            BackgroundColor(PANEL_COLOR),
            BorderColor::from(BORDER_COLOR),
            Visibility::Hidden,
            NavigationMenu,
            TourUi,
            Name::new("Navigation Menu"),
        ))
        .with_children(|parent| {
            parent.spawn(text("Campus Map", 20.0, TITLE_COLOR));
            for (index, location) in registry.iter().enumerate() {
                parent
                    .spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                            ..default()
                        },
                        BackgroundColor(BUTTON_COLOR),
                        NavigationMenuButton { index },
                    ))
                    .with_children(|button| {
                        button.spawn((
                            text(location.name.clone(), 16.0, TEXT_COLOR),
                            NavigationMenuLabel { index },
                        ));
                    });
            }
        });

    // Pause label (centre-top)
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(20.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Visibility::Hidden,
        PauseLabel,
        TourUi,
        Name::new("Pause Label"),
        children![text("Paused (P to resume)", 32.0, TEXT_COLOR)],
    ));

    // Completion banner (top-centre)
    commands.spawn((
        Node {
            top: Val::Px(16.0),
            left: Val::Percent(30.0),
            width: Val::Percent(40.0),
            align_items: AlignItems::Center,
            ..panel_node()
        },
        BackgroundColor(PANEL_COLOR),
        BorderColor::from(VISITED_COLOR),
        Visibility::Hidden,
        CompletionBanner,
        TourUi,
        Name::new("Completion Banner"),
        children![
            text("You have explored every location!", 20.0, VISITED_COLOR),
            text("Press F to finish the tour", 14.0, HINT_COLOR),
        ],
    ));
}

pub fn despawn_tour_ui(mut commands: Commands, roots: Query<Entity, With<TourUi>>) {
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<TourPanels>();
}

/// Rewrites the HUD and menu colours whenever the tour state changes.
pub fn update_hud(
    tour: Option<Res<TourState>>,
    registry: Res<LocationRegistry>,
    mut hud_text: Query<(
        &mut Text,
        Has<HudLocationText>,
        Has<HudDescriptionText>,
        Has<HudProgressText>,
    )>,
    mut labels: Query<(&NavigationMenuLabel, &mut TextColor)>,
) {
    let Some(tour) = tour else {
        return;
    };
    if !tour.is_changed() {
        return;
    }

    let location = registry.get(tour.current_index());
    for (mut text, is_name, is_description, is_progress) in hud_text.iter_mut() {
        if is_name {
            text.0 = location.map(|l| l.name.clone()).unwrap_or_default();
        } else if is_description {
            text.0 = location.map(|l| l.description.clone()).unwrap_or_default();
        } else if is_progress {
            text.0 = progress_label(&tour);
        }
    }

    for (label, mut colour) in labels.iter_mut() {
        colour.0 = if label.index == tour.current_index() {
            CURRENT_COLOR
        } else if tour.has_visited(label.index) {
            VISITED_COLOR
        } else {
            TEXT_COLOR
        };
    }
}

pub fn show_info_panel(
    mut events: MessageReader<ShowInfoPanelEvent>,
    mut panels: ResMut<TourPanels>,
    mut titles: Query<&mut Text, (With<InfoPanelTitle>, Without<InfoPanelBody>)>,
    mut bodies: Query<&mut Text, (With<InfoPanelBody>, Without<InfoPanelTitle>)>,
) {
    let Some(event) = events.read().last() else {
        return;
    };

    for mut text in titles.iter_mut() {
        text.0 = event.title.clone();
    }
    for mut text in bodies.iter_mut() {
        text.0 = event.body.clone();
    }
    panels.open_info();
}

pub fn hide_info_panel_on_teardown(
    mut teardown: MessageReader<LocationTeardownEvent>,
    mut panels: ResMut<TourPanels>,
) {
    if teardown.read().count() > 0 && panels.info_open {
        panels.close_info();
    }
}

pub fn show_completion_banner(
    mut completed: MessageReader<TourCompletedEvent>,
    mut panels: ResMut<TourPanels>,
) {
    if completed.read().count() > 0 && !panels.completion_shown {
        panels.completion_shown = true;
    }
}

/// Keyboard shortcuts available during the tour.
pub fn handle_tour_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut panels: ResMut<TourPanels>,
    mut clock: ResMut<SessionClock>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard.just_pressed(KeyCode::KeyM) {
        let open = panels.toggle_menu();
        debug!("Navigation menu {}", if open { "opened" } else { "closed" });
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        match panels.close_topmost() {
            Some(ClosedPanel::Info) => debug!("Info panel closed"),
            Some(ClosedPanel::Menu) => debug!("Navigation menu closed"),
            None => {}
        }
    }

    if keyboard.just_pressed(KeyCode::KeyP) {
        let paused = clock.toggle_pause();
        info!("Tour {}", if paused { "paused" } else { "resumed" });
    }

    if keyboard.just_pressed(KeyCode::KeyF) {
        info!("Finishing tour");
        next_state.set(AppState::Outro);
    }
}

pub fn handle_panel_buttons(
    menu_buttons: Query<(&Interaction, &NavigationMenuButton), Changed<Interaction>>,
    close_buttons: Query<&Interaction, (Changed<Interaction>, With<InfoPanelCloseButton>)>,
    mut panels: ResMut<TourPanels>,
    mut navigate: MessageWriter<NavigateRequest>,
) {
    for (interaction, button) in menu_buttons.iter() {
        if *interaction == Interaction::Pressed {
            navigate.write(NavigateRequest::to_index(button.index));
            panels.close_menu();
        }
    }

    for interaction in close_buttons.iter() {
        if *interaction == Interaction::Pressed {
            panels.close_info();
        }
    }
}

pub fn highlight_buttons(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in buttons.iter_mut() {
        background.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => BUTTON_HOVER_COLOR,
            Interaction::None => BUTTON_COLOR,
        };
    }
}

fn visibility(shown: bool) -> Visibility {
    if shown {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

#[allow(clippy::type_complexity)]
pub fn sync_panel_visibility(
    panels: Res<TourPanels>,
    clock: Res<SessionClock>,
    mut info: Query<
        &mut Visibility,
        (
            With<InfoPanel>,
            Without<NavigationMenu>,
            Without<PauseLabel>,
            Without<CompletionBanner>,
        ),
    >,
    mut menu: Query<
        &mut Visibility,
        (With<NavigationMenu>, Without<PauseLabel>, Without<CompletionBanner>),
    >,
    mut pause: Query<&mut Visibility, (With<PauseLabel>, Without<CompletionBanner>)>,
    mut banner: Query<&mut Visibility, With<CompletionBanner>>,
) {
    for mut visible in info.iter_mut() {
        visible.set_if_neq(visibility(panels.info_open));
    }
    for mut visible in menu.iter_mut() {
        visible.set_if_neq(visibility(panels.menu_open));
    }
    for mut visible in pause.iter_mut() {
        visible.set_if_neq(visibility(clock.is_paused()));
    }
    for mut visible in banner.iter_mut() {
        visible.set_if_neq(visibility(panels.completion_shown));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn progress_label_counts_visited_locations() {
        let mut tour = TourState::new(0, 3, Duration::ZERO).expect("valid tour");
        assert_eq!(progress_label(&tour), "Visited 0/3");

        tour.navigate(2).expect("in range");
        assert_eq!(progress_label(&tour), "Visited 1/3");
    }

    #[derive(Resource)]
    struct PendingInfo(Option<ShowInfoPanelEvent>);

    fn feed_info(mut pending: ResMut<PendingInfo>, mut writer: MessageWriter<ShowInfoPanelEvent>) {
        if let Some(event) = pending.0.take() {
            writer.write(event);
        }
    }

    #[test]
    fn info_event_fills_and_opens_the_panel() {
        let mut app = App::new();
        app.add_message::<ShowInfoPanelEvent>()
            .init_resource::<TourPanels>()
            .insert_resource(PendingInfo(Some(ShowInfoPanelEvent {
                title: "Library".to_string(),
                body: "Open until midnight.".to_string(),
            })))
            .add_systems(Update, (feed_info, show_info_panel).chain());

        let title = app.world_mut().spawn((Text::new(""), InfoPanelTitle)).id();
        let body = app.world_mut().spawn((Text::new(""), InfoPanelBody)).id();
        app.update();

        assert!(app.world().resource::<TourPanels>().info_open);
        assert_eq!(app.world().get::<Text>(title).map(|t| t.0.as_str()), Some("Library"));
        assert_eq!(
            app.world().get::<Text>(body).map(|t| t.0.as_str()),
            Some("Open until midnight.")
        );
    }
}

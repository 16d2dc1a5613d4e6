// src/ui/screens/systems.rs
//
// Systems for the welcome and outro screens.

use bevy::{app::AppExit, prelude::*};

use crate::{
    core::{AppState, SessionClock},
    tour::TourState,
};

use super::components::{
    FadeInText, OutroScreen, ScreenButton, ScreenIntro, TourSummary, WelcomeScreen,
};

// Visual constants
const SCREEN_COLOR: Color = Color::srgb(0.04, 0.05, 0.08);
const TITLE_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const TEXT_COLOR: Color = Color::WHITE;
const BUTTON_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.08);

const WELCOME_INTRO_DELAY: f32 = 1.0;
const SCREEN_FADE_IN: f32 = 2.0;

fn screen_root() -> (Node, BackgroundColor) {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            row_gap: Val::Px(18.0),
            ..default()
        },
        BackgroundColor(SCREEN_COLOR),
    )
}

fn fading_text(content: impl Into<String>, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(content),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color.with_alpha(0.0)),
        FadeInText { base: color },
    )
}

fn screen_button(parent: &mut ChildSpawnerCommands, label: &str, action: ScreenButton) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(24.0), Val::Px(10.0)),
                min_width: Val::Px(220.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(BUTTON_COLOR),
            action,
        ))
        .with_children(|button| {
            button.spawn(fading_text(label, 20.0, TEXT_COLOR));
        });
}

pub fn spawn_welcome_screen(mut commands: Commands) {
    commands.insert_resource(ScreenIntro::new(WELCOME_INTRO_DELAY, SCREEN_FADE_IN));
    commands
        .spawn((screen_root(), WelcomeScreen, Name::new("Welcome Screen")))
        .with_children(|parent| {
            parent.spawn(fading_text("Campus Virtual Tour", 48.0, TITLE_COLOR));
            parent.spawn(fading_text(
                "Look around, gaze at a hotspot to learn more or to move on.",
                20.0,
                TEXT_COLOR,
            ));
            screen_button(parent, "Start Tour (Enter)", ScreenButton::Start);
            screen_button(parent, "Quit (Esc)", ScreenButton::Quit);
        });
}

pub fn despawn_welcome_screen(mut commands: Commands, roots: Query<Entity, With<WelcomeScreen>>) {
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<ScreenIntro>();
}

/// Captures the session statistics and shows them.
pub fn spawn_outro_screen(
    mut commands: Commands,
    tour: Option<Res<TourState>>,
    clock: Res<SessionClock>,
) {
    let summary = match tour {
        Some(tour) => TourSummary::from_tour(&tour, clock.elapsed()),
        None => TourSummary {
            explored: 0,
            total: 0,
            duration: Default::default(),
        },
    };
    info!(
        "Tour finished: {}/{} locations in {}",
        summary.explored,
        summary.total,
        summary.time_label()
    );

    commands.insert_resource(ScreenIntro::new(0.0, SCREEN_FADE_IN));
    commands
        .spawn((screen_root(), OutroScreen, Name::new("Outro Screen")))
        .with_children(|parent| {
            parent.spawn(fading_text(
                "Thank you for exploring the campus!",
                40.0,
                TITLE_COLOR,
            ));
            parent.spawn(fading_text(summary.stats_text(), 22.0, TEXT_COLOR));
            screen_button(parent, "Restart Tour (R)", ScreenButton::Restart);
            screen_button(parent, "Main Menu (Enter)", ScreenButton::MainMenu);
            screen_button(parent, "Quit (Esc)", ScreenButton::Quit);
        });
    commands.insert_resource(summary);
}

pub fn despawn_outro_screen(mut commands: Commands, roots: Query<Entity, With<OutroScreen>>) {
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<ScreenIntro>();
    commands.remove_resource::<TourSummary>();
}

pub fn animate_screen_intro(
    time: Res<Time>,
    intro: Option<ResMut<ScreenIntro>>,
    mut texts: Query<(&FadeInText, &mut TextColor)>,
) {
    let Some(mut intro) = intro else {
        return;
    };
    let alpha = intro.advance(time.delta_secs());
    for (fade, mut colour) in texts.iter_mut() {
        colour.0 = fade.base.with_alpha(fade.base.alpha() * alpha);
    }
}

pub fn handle_screen_buttons(
    buttons: Query<(&Interaction, &ScreenButton), Changed<Interaction>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            ScreenButton::Start | ScreenButton::Restart => next_state.set(AppState::Touring),
            ScreenButton::MainMenu => next_state.set(AppState::Welcome),
            ScreenButton::Quit => {
                info!("Quitting");
                exit.write(AppExit::Success);
            }
        }
    }
}

pub fn handle_welcome_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        info!("Starting tour");
        next_state.set(AppState::Touring);
    } else if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

pub fn handle_outro_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        info!("Restarting tour");
        next_state.set(AppState::Touring);
    } else if keyboard.just_pressed(KeyCode::Enter) {
        next_state.set(AppState::Welcome);
    } else if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

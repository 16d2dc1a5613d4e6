//! CorePlugin wires the session clock and the top-level application flow states.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

/// Top-level flow of the application: welcome screen, the tour itself, then the outro.
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AppState {
    #[default]
    Welcome,
    Touring,
    Outro,
}

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Pause-aware session time derived from real frame deltas.
///
/// Every multi-frame unit (fades, dwell, crossfades) reads its delta from here so
/// that pausing the tour freezes all of them at once.
#[derive(Resource, Debug, Default)]
pub struct SessionClock {
    paused: bool,
    last_real_delta: Duration,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Last real (unscaled) delta reported by Bevy's Time resource.
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    /// Delta that session systems should advance by; zero while paused.
    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    pub fn delta_secs(&self) -> f32 {
        self.last_scaled_delta.as_secs_f32()
    }

    /// Total unpaused time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_scaled_delta = if self.paused {
            Duration::ZERO
        } else {
            real_delta
        };
        self.elapsed += self.last_scaled_delta;
    }
}

/// Registers session timing and the application flow states.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SessionClock::new())
            .init_state::<AppState>()
            .add_systems(Startup, log_startup_clock)
            .add_systems(PreUpdate, update_session_clock)
            .add_systems(OnEnter(AppState::Touring), resume_session_clock)
            .add_systems(OnExit(AppState::Touring), resume_session_clock);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_session_ticks);
        }
    }
}

fn update_session_clock(mut clock: ResMut<SessionClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn resume_session_clock(mut clock: ResMut<SessionClock>) {
    clock.set_paused(false);
}

fn log_startup_clock(clock: Res<SessionClock>) {
    info!(
        "CorePlugin initialised (session clock paused: {})",
        clock.is_paused()
    );
}

#[cfg(feature = "core_debug")]
fn log_session_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<SessionClock>) {
    if timer.timer.tick(clock.last_real_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Session elapsed: {:.2}s | paused: {} | real dt: {:.4}s | session dt: {:.4}s",
            clock.elapsed().as_secs_f32(),
            clock.is_paused(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_scaled_delta().as_secs_f32(),
        );
    }
}

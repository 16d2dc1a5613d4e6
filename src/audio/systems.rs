//! Ambience, music, and one-shot effect systems.
use bevy::{
    audio::{AudioSinkPlayback, Volume},
    prelude::*,
};

use crate::{
    core::SessionClock,
    interaction::{GazeHoverEvent, HotspotActivatedEvent},
    transition::{LocationPresentedEvent, TransitionStartedEvent},
};

use super::{
    config::AudioSettings,
    crossfade::{Crossfade, CrossfadeStep},
};

const HOVER_VOLUME_SCALE: f32 = 0.5;

/// The looping ambience player of the current location.
#[derive(Component, Debug)]
pub struct AmbienceTrack;

/// The looping background music player.
#[derive(Component, Debug)]
pub struct MusicTrack;

/// Which ambience is playing and the crossfade toward the next one.
#[derive(Resource, Debug, Default)]
pub struct AmbienceState {
    pub current: Option<String>,
    pub crossfade: Option<Crossfade>,
}

impl AmbienceState {
    /// Starts a crossfade toward `clip` unless it is already playing or queued.
    pub fn request(
        &mut self,
        clip: &str,
        current_volume: Option<f32>,
        settings: &AudioSettings,
    ) -> bool {
        let queued = self.crossfade.as_ref().map(Crossfade::clip);
        if queued == Some(clip) || (queued.is_none() && self.current.as_deref() == Some(clip)) {
            return false;
        }

        self.crossfade = Some(Crossfade::new(
            clip,
            current_volume,
            settings.ambience_level(),
            settings.fade_seconds,
        ));
        true
    }
}

/// Queues an ambience crossfade for each presented location that has one.
pub fn queue_location_ambience(
    mut presented: MessageReader<LocationPresentedEvent>,
    settings: Res<AudioSettings>,
    mut state: ResMut<AmbienceState>,
    sinks: Query<&AudioSink, With<AmbienceTrack>>,
) {
    let Some(event) = presented.read().last() else {
        return;
    };
    let Some(clip) = event.location.ambience.as_deref() else {
        debug!("'{}' has no ambience; keeping the current track", event.location.name);
        return;
    };

    let current_volume = match (&state.current, sinks.iter().next()) {
        (Some(_), Some(sink)) => Some(sink.volume().to_linear()),
        (Some(_), None) => Some(settings.ambience_level()),
        (None, _) => None,
    };
    if state.request(clip, current_volume, &settings) {
        debug!("Crossfading ambience to {}", clip);
    }
}

/// Steps the ambience crossfade with the session delta and applies its volume.
pub fn advance_ambience_crossfade(
    mut commands: Commands,
    clock: Res<SessionClock>,
    asset_server: Res<AssetServer>,
    mut state: ResMut<AmbienceState>,
    mut tracks: Query<(Entity, Option<&mut AudioSink>), With<AmbienceTrack>>,
) {
    let Some(crossfade) = state.crossfade.as_mut() else {
        return;
    };

    let step = crossfade.advance(clock.delta_secs());
    let volume = crossfade.volume();

    match step {
        Some(CrossfadeStep::Swap(clip)) => {
            for (entity, _) in tracks.iter() {
                commands.entity(entity).despawn();
            }
            commands.spawn((
                AudioPlayer::new(asset_server.load(clip.clone())),
                PlaybackSettings::LOOP.with_volume(Volume::Linear(0.0)),
                AmbienceTrack,
                Name::new("Ambience"),
            ));
            state.current = Some(clip);
        }
        Some(CrossfadeStep::Finished) => {
            state.crossfade = None;
            apply_volume(&mut tracks, volume);
        }
        None => apply_volume(&mut tracks, volume),
    }
}

fn apply_volume(
    tracks: &mut Query<(Entity, Option<&mut AudioSink>), With<AmbienceTrack>>,
    volume: f32,
) {
    for (_, sink) in tracks.iter_mut() {
        if let Some(mut sink) = sink {
            sink.set_volume(Volume::Linear(volume));
        }
    }
}

/// Stops the ambience when the tour ends.
pub fn stop_ambience(
    mut commands: Commands,
    mut state: ResMut<AmbienceState>,
    tracks: Query<Entity, With<AmbienceTrack>>,
) {
    for entity in tracks.iter() {
        commands.entity(entity).despawn();
    }
    *state = AmbienceState::default();
}

pub fn start_welcome_music(
    mut commands: Commands,
    settings: Res<AudioSettings>,
    asset_server: Res<AssetServer>,
    playing: Query<(), With<MusicTrack>>,
) {
    let Some(clip) = settings.welcome_music.as_ref() else {
        return;
    };
    if !playing.is_empty() {
        return;
    }
    commands.spawn((
        AudioPlayer::new(asset_server.load(clip.clone())),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(settings.music_level())),
        MusicTrack,
        Name::new("Welcome Music"),
    ));
}

pub fn stop_music(mut commands: Commands, tracks: Query<Entity, With<MusicTrack>>) {
    for entity in tracks.iter() {
        commands.entity(entity).despawn();
    }
}

/// One-shot cues for gaze hover, activation, and transitions.
pub fn play_interaction_sfx(
    mut commands: Commands,
    settings: Res<AudioSettings>,
    asset_server: Res<AssetServer>,
    mut hover: MessageReader<GazeHoverEvent>,
    mut activated: MessageReader<HotspotActivatedEvent>,
    mut transitions: MessageReader<TransitionStartedEvent>,
) {
    let mut play = |clip: &Option<String>, scale: f32| {
        let Some(clip) = clip else {
            return;
        };
        commands.spawn((
            AudioPlayer::new(asset_server.load(clip.clone())),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(settings.sfx_level(scale))),
        ));
    };

    for event in hover.read() {
        if matches!(event, GazeHoverEvent::Entered(_)) {
            play(&settings.hover_clip, HOVER_VOLUME_SCALE);
        }
    }
    for _ in activated.read() {
        play(&settings.select_clip, 1.0);
    }
    for event in transitions.read() {
        debug!("Transition cue toward location {}", event.destination);
        play(&settings.transition_clip, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_ambience_is_not_restarted() {
        let settings = AudioSettings::default();
        let mut state = AmbienceState {
            current: Some("audio/quad.ogg".to_string()),
            crossfade: None,
        };

        assert!(!state.request("audio/quad.ogg", Some(0.4), &settings));
        assert!(state.crossfade.is_none());
    }

    #[test]
    fn new_request_replaces_the_crossfade_in_flight() {
        let settings = AudioSettings::default();
        let mut state = AmbienceState::default();

        assert!(state.request("audio/quad.ogg", None, &settings));
        assert!(!state.request("audio/quad.ogg", None, &settings));
        assert!(state.request("audio/library.ogg", None, &settings));
        assert_eq!(
            state.crossfade.as_ref().map(Crossfade::clip),
            Some("audio/library.ogg")
        );
    }
}

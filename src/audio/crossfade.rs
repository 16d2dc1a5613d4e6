//! Track crossfade as a resumable unit: fade the current track out, swap the
//! clip, fade the new one in.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossfadePhase {
    FadingOut,
    Swap,
    FadingIn,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossfadeStep {
    /// Replace the playing clip with this one, starting silent.
    Swap(String),
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Crossfade {
    phase: CrossfadePhase,
    next_clip: String,
    duration: f32,
    elapsed: f32,
    fade_out_from: f32,
    target_volume: f32,
    volume: f32,
}

impl Crossfade {
    /// `current_volume` is `None` when nothing is playing; the swap then
    /// happens on the first step.
    pub fn new(
        next_clip: impl Into<String>,
        current_volume: Option<f32>,
        target_volume: f32,
        duration: f32,
    ) -> Self {
        let (phase, volume) = match current_volume {
            Some(volume) => (CrossfadePhase::FadingOut, volume),
            None => (CrossfadePhase::Swap, 0.0),
        };
        Self {
            phase,
            next_clip: next_clip.into(),
            duration: duration.max(0.0),
            elapsed: 0.0,
            fade_out_from: volume,
            target_volume,
            volume,
        }
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> CrossfadePhase {
        self.phase
    }

    pub fn clip(&self) -> &str {
        &self.next_clip
    }

    /// Volume the playing track should have after the latest step.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    fn progress(&mut self, delta: f32) -> f32 {
        self.elapsed += delta.max(0.0);
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn advance(&mut self, delta: f32) -> Option<CrossfadeStep> {
        match self.phase {
            CrossfadePhase::FadingOut => {
                let t = self.progress(delta);
                self.volume = self.fade_out_from * (1.0 - t);
                if t >= 1.0 {
                    self.phase = CrossfadePhase::Swap;
                }
                None
            }
            CrossfadePhase::Swap => {
                self.phase = CrossfadePhase::FadingIn;
                self.elapsed = 0.0;
                self.volume = 0.0;
                Some(CrossfadeStep::Swap(self.next_clip.clone()))
            }
            CrossfadePhase::FadingIn => {
                let t = self.progress(delta);
                self.volume = self.target_volume * t;
                if t >= 1.0 {
                    self.phase = CrossfadePhase::Done;
                    Some(CrossfadeStep::Finished)
                } else {
                    None
                }
            }
            CrossfadePhase::Done => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fades_out_swaps_then_fades_in_to_target() {
        let mut fade = Crossfade::new("quad.ogg", Some(0.4), 0.4, 0.5);

        assert_eq!(fade.advance(0.25), None);
        assert!((fade.volume() - 0.2).abs() < 1e-6);
        assert_eq!(fade.advance(0.25), None);
        assert_eq!(fade.volume(), 0.0);

        assert_eq!(
            fade.advance(0.016),
            Some(CrossfadeStep::Swap("quad.ogg".to_string()))
        );
        assert_eq!(fade.advance(0.25), None);
        assert!((fade.volume() - 0.2).abs() < 1e-6);
        assert_eq!(fade.advance(0.25), Some(CrossfadeStep::Finished));
        assert!((fade.volume() - 0.4).abs() < 1e-6);
        assert_eq!(fade.phase(), CrossfadePhase::Done);
    }

    #[test]
    fn silent_start_swaps_immediately() {
        let mut fade = Crossfade::new("birds.ogg", None, 0.4, 0.5);
        assert_eq!(
            fade.advance(0.1),
            Some(CrossfadeStep::Swap("birds.ogg".to_string()))
        );
        assert_eq!(fade.volume(), 0.0);
    }

    #[test]
    fn zero_delta_freezes_the_fade() {
        let mut fade = Crossfade::new("quad.ogg", Some(0.4), 0.4, 0.5);
        fade.advance(0.1);
        let held = fade.volume();
        for _ in 0..10 {
            assert_eq!(fade.advance(0.0), None);
        }
        assert_eq!(fade.volume(), held);
        assert_eq!(fade.phase(), CrossfadePhase::FadingOut);
    }
}

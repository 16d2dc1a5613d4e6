//! Screen fade as a resumable unit advanced by the session clock.
use bevy::prelude::*;

/// Cubic ease-in-out (smoothstep) on a clamped `t`.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// A single fade between two opacities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenFade {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl ScreenFade {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from: from.clamp(0.0, 1.0),
            to: to.clamp(0.0, 1.0),
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current eased opacity.
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ease_in_out(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    /// Advances by `delta` seconds; returns true once the fade has reached its target.
    pub fn advance(&mut self, delta: f32) -> bool {
        self.elapsed = (self.elapsed + delta.max(0.0)).min(self.duration);
        self.is_finished()
    }
}

/// Full-screen fade state mirrored by the fade overlay.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScreenFader {
    opacity: f32,
    active: Option<ScreenFade>,
}

impl ScreenFader {
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_fading(&self) -> bool {
        self.active.is_some()
    }

    /// Starts a fade from the current opacity, replacing any fade in flight.
    pub fn fade_to(&mut self, target: f32, duration: f32) {
        let fade = ScreenFade::new(self.opacity, target, duration);
        if fade.is_finished() {
            self.opacity = fade.target();
            self.active = None;
        } else {
            self.active = Some(fade);
        }
    }

    /// Jumps to `opacity` and cancels any fade.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.active = None;
    }

    /// Advances the fade in flight; returns true on the frame it completes.
    pub fn advance(&mut self, delta: f32) -> bool {
        let Some(fade) = self.active.as_mut() else {
            return false;
        };
        let finished = fade.advance(delta);
        self.opacity = fade.value();
        if finished {
            self.active = None;
        }
        finished
    }
}

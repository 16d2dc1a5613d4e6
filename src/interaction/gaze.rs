//! Gaze dwell state machine and the reticle feedback derived from it.
//!
//! Both types are engine-agnostic: they are stepped once per frame with the
//! current ray hit and the frame delta, and report what happened as signals.
use bevy::math::Vec3;

/// The single "current target" slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GazeState<T> {
    NoTarget,
    Targeting { target: T, dwell: f32 },
}

/// Notifications produced by one step of the tracker, in the order they occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GazeSignal<T> {
    Enter(T),
    Exit(T),
    Activate(T),
}

#[derive(Debug, Clone)]
pub struct GazeTracker<T> {
    state: GazeState<T>,
    dwell_threshold: f32,
    // Target that just activated; ignored until the ray leaves it.
    spent: Option<T>,
}

impl<T: Copy + PartialEq> GazeTracker<T> {
    pub fn new(dwell_threshold: f32) -> Self {
        Self {
            state: GazeState::NoTarget,
            dwell_threshold: dwell_threshold.max(f32::EPSILON),
            spent: None,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> GazeState<T> {
        self.state
    }

    /// Dwell progress in `[0, 1]`, or `None` when nothing is targeted.
    pub fn progress(&self) -> Option<f32> {
        match self.state {
            GazeState::Targeting { dwell, .. } => {
                Some((dwell / self.dwell_threshold).clamp(0.0, 1.0))
            }
            GazeState::NoTarget => None,
        }
    }

    /// Advances the tracker by one frame.
    ///
    /// `hit` is the interactable the ray resolved to this frame and `confirm`
    /// is an explicit click/trigger press. Activation fires at most once per
    /// dwell cycle and is followed by an exit of the same target.
    pub fn step(&mut self, hit: Option<T>, delta: f32, confirm: bool) -> Vec<GazeSignal<T>> {
        let mut signals = Vec::new();

        if self.spent.is_some() && self.spent != hit {
            self.spent = None;
        }
        let hit = hit.filter(|candidate| self.spent != Some(*candidate));

        match (self.state, hit) {
            (GazeState::Targeting { target, dwell }, Some(current)) if target == current => {
                self.state = GazeState::Targeting {
                    target,
                    dwell: dwell + delta,
                };
            }
            (previous, hit) => {
                if let GazeState::Targeting { target, .. } = previous {
                    signals.push(GazeSignal::Exit(target));
                }
                self.state = match hit {
                    Some(target) => {
                        signals.push(GazeSignal::Enter(target));
                        GazeState::Targeting {
                            target,
                            dwell: delta,
                        }
                    }
                    None => GazeState::NoTarget,
                };
            }
        }

        if let GazeState::Targeting { target, dwell } = self.state {
            if dwell >= self.dwell_threshold || confirm {
                signals.push(GazeSignal::Activate(target));
                signals.push(GazeSignal::Exit(target));
                self.state = GazeState::NoTarget;
                self.spent = Some(target);
            }
        }

        signals
    }

    /// Drops the current target and latch without emitting signals.
    pub fn reset(&mut self) {
        self.state = GazeState::NoTarget;
        self.spent = None;
    }
}

/// Colours the reticle moves between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReticlePalette {
    pub normal: Vec3,
    pub hover: Vec3,
    pub active: Vec3,
}

/// Derived visual state of the reticle. Never feeds back into the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeFeedback {
    pub fill: f32,
    pub colour: Vec3,
}

impl GazeFeedback {
    pub fn new(colour: Vec3) -> Self {
        Self { fill: 0.0, colour }
    }

    /// `progress` is the tracker's dwell progress; `None` lets the fill decay
    /// exponentially toward zero.
    pub fn update(
        &mut self,
        progress: Option<f32>,
        delta: f32,
        decay_rate: f32,
        colour_rate: f32,
        palette: &ReticlePalette,
    ) {
        let target_colour = match progress {
            Some(progress) => {
                self.fill = progress.clamp(0.0, 1.0);
                if progress >= 1.0 {
                    palette.active
                } else {
                    palette.hover
                }
            }
            None => {
                self.fill += (0.0 - self.fill) * (delta * decay_rate).min(1.0);
                palette.normal
            }
        };

        self.colour = self
            .colour
            .lerp(target_colour, (delta * colour_rate).clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dwell_activates_once_after_threshold() {
        let mut tracker = GazeTracker::new(2.0);
        let mut activations = Vec::new();

        for tick in 1..=5 {
            let signals = tracker.step(Some(7u32), 0.5, false);
            for signal in signals {
                if signal == GazeSignal::Activate(7) {
                    activations.push(tick);
                }
            }
        }

        assert_eq!(activations, vec![4]);
    }

    #[test]
    fn first_hit_enters_and_counts_the_frame() {
        let mut tracker = GazeTracker::new(2.0);
        let signals = tracker.step(Some(1u32), 0.25, false);

        assert_eq!(signals, vec![GazeSignal::Enter(1)]);
        assert_eq!(
            tracker.state(),
            GazeState::Targeting {
                target: 1,
                dwell: 0.25
            }
        );
    }

    #[test]
    fn switching_targets_exits_previous_and_resets_dwell() {
        let mut tracker = GazeTracker::new(2.0);
        tracker.step(Some(1u32), 1.5, false);

        let signals = tracker.step(Some(2), 0.5, false);
        assert_eq!(signals, vec![GazeSignal::Exit(1), GazeSignal::Enter(2)]);
        assert_eq!(
            tracker.state(),
            GazeState::Targeting {
                target: 2,
                dwell: 0.5
            }
        );
    }

    #[test]
    fn losing_the_target_exits_and_clears_dwell() {
        let mut tracker = GazeTracker::new(2.0);
        tracker.step(Some(1u32), 1.0, false);

        let signals = tracker.step(None, 0.5, false);
        assert_eq!(signals, vec![GazeSignal::Exit(1)]);
        assert_eq!(tracker.state(), GazeState::NoTarget);
        assert_eq!(tracker.progress(), None);
    }

    #[test]
    fn confirm_activates_immediately() {
        let mut tracker = GazeTracker::new(2.0);
        let signals = tracker.step(Some(3u32), 0.1, true);

        assert_eq!(
            signals,
            vec![
                GazeSignal::Enter(3),
                GazeSignal::Activate(3),
                GazeSignal::Exit(3)
            ]
        );
        assert_eq!(tracker.state(), GazeState::NoTarget);
    }

    #[test]
    fn activated_target_needs_the_gaze_to_leave_before_refiring() {
        let mut tracker = GazeTracker::new(1.0);
        tracker.step(Some(4u32), 1.0, false);

        for _ in 0..10 {
            let signals = tracker.step(Some(4), 0.5, true);
            assert!(signals.is_empty());
        }

        tracker.step(None, 0.1, false);
        let signals = tracker.step(Some(4), 1.0, false);
        assert!(signals.contains(&GazeSignal::Activate(4)));
    }

    #[test]
    fn another_target_is_available_right_after_an_activation() {
        let mut tracker = GazeTracker::new(1.0);
        tracker.step(Some(1u32), 1.0, false);

        let signals = tracker.step(Some(2), 0.2, false);
        assert_eq!(signals, vec![GazeSignal::Enter(2)]);
    }

    #[test]
    fn progress_is_clamped_ratio() {
        let mut tracker = GazeTracker::new(2.0);
        tracker.step(Some(1u32), 0.5, false);
        assert_eq!(tracker.progress(), Some(0.25));
    }

    fn palette() -> ReticlePalette {
        ReticlePalette {
            normal: Vec3::ONE,
            hover: Vec3::new(0.0, 1.0, 1.0),
            active: Vec3::new(0.0, 1.0, 0.0),
        }
    }

    #[test]
    fn feedback_tracks_progress_then_decays() {
        let palette = palette();
        let mut feedback = GazeFeedback::new(palette.normal);

        feedback.update(Some(0.5), 0.1, 5.0, 10.0, &palette);
        assert!((feedback.fill - 0.5).abs() < f32::EPSILON);

        let mut previous = feedback.fill;
        for _ in 0..5 {
            feedback.update(None, 0.1, 5.0, 10.0, &palette);
            assert!(feedback.fill < previous);
            assert!(feedback.fill >= 0.0);
            previous = feedback.fill;
        }

        feedback.update(None, 1.0, 5.0, 10.0, &palette);
        assert_eq!(feedback.fill, 0.0);
    }

    #[test]
    fn feedback_colour_moves_toward_state_colour() {
        let palette = palette();
        let mut feedback = GazeFeedback::new(palette.normal);

        feedback.update(Some(0.3), 1.0, 5.0, 10.0, &palette);
        assert_eq!(feedback.colour, palette.hover);

        feedback.update(Some(1.0), 0.05, 5.0, 10.0, &palette);
        assert!(feedback.colour.distance(palette.active) < palette.hover.distance(palette.active));
    }
}

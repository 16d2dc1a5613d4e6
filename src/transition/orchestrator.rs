//! Location transition phase machine.
//!
//! A transition is advanced once per frame. It drives the [`ScreenFader`] and
//! reports the scene work the caller has to perform on that frame. Teardown
//! and spawn are reported on separate frames so removal is applied first.
use super::fade::ScreenFader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    FadingOut,
    Teardown,
    Spawn,
    FadingIn,
    Finished,
}

/// Scene work requested by one step of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    TearDown,
    Spawn(usize),
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationTransition {
    destination: usize,
    fade_seconds: f32,
    phase: TransitionPhase,
}

impl LocationTransition {
    /// Fade out from whatever is on screen, swap the scene, fade back in.
    pub fn begin(destination: usize, fade_seconds: f32, fader: &mut ScreenFader) -> Self {
        fader.fade_to(1.0, fade_seconds);
        Self {
            destination,
            fade_seconds,
            phase: TransitionPhase::FadingOut,
        }
    }

    /// Starts from an opaque screen; used for the first location of a tour.
    pub fn reveal(destination: usize, fade_seconds: f32, fader: &mut ScreenFader) -> Self {
        fader.set_opacity(1.0);
        Self {
            destination,
            fade_seconds,
            phase: TransitionPhase::Teardown,
        }
    }

    pub fn destination(&self) -> usize {
        self.destination
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    #[allow(dead_code)]
    pub fn is_finished(&self) -> bool {
        self.phase == TransitionPhase::Finished
    }

    pub fn advance(&mut self, fader: &mut ScreenFader, delta: f32) -> Option<TransitionAction> {
        match self.phase {
            TransitionPhase::FadingOut => {
                fader.advance(delta);
                if !fader.is_fading() {
                    self.phase = TransitionPhase::Teardown;
                }
                None
            }
            TransitionPhase::Teardown => {
                self.phase = TransitionPhase::Spawn;
                Some(TransitionAction::TearDown)
            }
            TransitionPhase::Spawn => {
                fader.fade_to(0.0, self.fade_seconds);
                self.phase = TransitionPhase::FadingIn;
                Some(TransitionAction::Spawn(self.destination))
            }
            TransitionPhase::FadingIn => {
                fader.advance(delta);
                if fader.is_fading() {
                    None
                } else {
                    self.phase = TransitionPhase::Finished;
                    Some(TransitionAction::Finished)
                }
            }
            TransitionPhase::Finished => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(transition: &mut LocationTransition, fader: &mut ScreenFader) -> Vec<TransitionAction> {
        let mut actions = Vec::new();
        for _ in 0..100 {
            if let Some(action) = transition.advance(fader, 0.25) {
                actions.push(action);
            }
            if transition.is_finished() {
                break;
            }
        }
        actions
    }

    #[test]
    fn full_transition_orders_teardown_before_spawn() {
        let mut fader = ScreenFader::default();
        let mut transition = LocationTransition::begin(2, 1.0, &mut fader);

        let actions = run(&mut transition, &mut fader);
        assert_eq!(
            actions,
            vec![
                TransitionAction::TearDown,
                TransitionAction::Spawn(2),
                TransitionAction::Finished
            ]
        );
        assert_eq!(fader.opacity(), 0.0);
    }

    #[test]
    fn teardown_waits_for_an_opaque_screen() {
        let mut fader = ScreenFader::default();
        let mut transition = LocationTransition::begin(1, 1.0, &mut fader);

        for _ in 0..3 {
            assert_eq!(transition.advance(&mut fader, 0.25), None);
            assert!(fader.opacity() < 1.0);
        }
        assert_eq!(transition.advance(&mut fader, 0.25), None);
        assert_eq!(fader.opacity(), 1.0);
        assert_eq!(transition.phase(), TransitionPhase::Teardown);
        assert_eq!(
            transition.advance(&mut fader, 0.25),
            Some(TransitionAction::TearDown)
        );
    }

    #[test]
    fn reveal_skips_the_fade_out() {
        let mut fader = ScreenFader::default();
        let mut transition = LocationTransition::reveal(0, 1.0, &mut fader);
        assert_eq!(fader.opacity(), 1.0);

        assert_eq!(
            transition.advance(&mut fader, 0.0),
            Some(TransitionAction::TearDown)
        );
        assert_eq!(
            transition.advance(&mut fader, 0.0),
            Some(TransitionAction::Spawn(0))
        );
        assert_eq!(fader.opacity(), 1.0);
    }

    #[test]
    fn replacement_fades_out_from_the_current_opacity() {
        let mut fader = ScreenFader::default();
        let mut first = LocationTransition::begin(1, 1.0, &mut fader);
        first.advance(&mut fader, 0.5);
        let partial = fader.opacity();
        assert!(partial > 0.0 && partial < 1.0);

        let mut second = LocationTransition::begin(2, 1.0, &mut fader);
        second.advance(&mut fader, 0.0);
        assert!((fader.opacity() - partial).abs() < 1e-5);

        let actions = run(&mut second, &mut fader);
        assert_eq!(actions[1], TransitionAction::Spawn(2));
    }

    #[test]
    fn zero_duration_transition_still_separates_frames() {
        let mut fader = ScreenFader::default();
        let mut transition = LocationTransition::begin(3, 0.0, &mut fader);

        assert_eq!(transition.advance(&mut fader, 0.016), None);
        assert_eq!(
            transition.advance(&mut fader, 0.016),
            Some(TransitionAction::TearDown)
        );
        assert_eq!(
            transition.advance(&mut fader, 0.016),
            Some(TransitionAction::Spawn(3))
        );
        assert_eq!(
            transition.advance(&mut fader, 0.016),
            Some(TransitionAction::Finished)
        );
    }
}

// src/ui/screens/components.rs
//
// Components for the welcome and outro screens plus the end-of-tour summary.

use std::time::Duration;

use bevy::prelude::*;

use crate::{tour::TourState, transition::fade::ScreenFade};

#[derive(Component, Debug)]
pub struct WelcomeScreen;

#[derive(Component, Debug)]
pub struct OutroScreen;

/// Screen buttons and what they do.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenButton {
    Start,
    Restart,
    MainMenu,
    Quit,
}

/// Text that fades in with its screen; `base` is the fully visible colour.
#[derive(Component, Debug, Clone, Copy)]
pub struct FadeInText {
    pub base: Color,
}

/// Delayed fade-in of a screen's contents.
#[derive(Resource, Debug, Clone)]
pub struct ScreenIntro {
    delay: f32,
    fade: ScreenFade,
}

impl ScreenIntro {
    pub fn new(delay: f32, duration: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            fade: ScreenFade::new(0.0, 1.0, duration),
        }
    }

    /// Advances by `delta` seconds and returns the content alpha.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let mut remaining = delta.max(0.0);
        if self.delay > 0.0 {
            let consumed = remaining.min(self.delay);
            self.delay -= consumed;
            remaining -= consumed;
        }
        if self.delay <= 0.0 {
            self.fade.advance(remaining);
        }
        self.alpha()
    }

    pub fn alpha(&self) -> f32 {
        if self.delay > 0.0 {
            0.0
        } else {
            self.fade.value()
        }
    }
}

/// Session statistics shown on the outro screen.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TourSummary {
    pub explored: usize,
    pub total: usize,
    pub duration: Duration,
}

impl TourSummary {
    /// Locations left behind plus the one the tour ended at.
    pub fn from_tour(tour: &TourState, now: Duration) -> Self {
        let mut explored = tour.visited_count();
        if !tour.has_visited(tour.current_index()) {
            explored += 1;
        }
        Self {
            explored: explored.min(tour.location_count()),
            total: tour.location_count(),
            duration: tour.session_duration(now),
        }
    }

    pub fn completion_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.explored as f32 / self.total as f32) * 100.0).round() as u32
    }

    pub fn time_label(&self) -> String {
        let seconds = self.duration.as_secs();
        format!("{}m {}s", seconds / 60, seconds % 60)
    }

    pub fn stats_text(&self) -> String {
        format!(
            "Locations Explored: {}\nTime Spent: {}\nTour Completion: {}%",
            self.explored,
            self.time_label(),
            self.completion_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intro_waits_for_delay_then_fades_in() {
        let mut intro = ScreenIntro::new(1.0, 2.0);
        assert_eq!(intro.advance(0.5), 0.0);
        assert_eq!(intro.advance(0.5), 0.0);
        let partial = intro.advance(1.0);
        assert!(partial > 0.0 && partial < 1.0);
        assert_eq!(intro.advance(1.0), 1.0);
    }

    #[test]
    fn summary_counts_the_final_location() {
        let mut tour = TourState::new(0, 4, Duration::from_secs(10)).expect("valid tour");
        tour.navigate(1).expect("in range");
        tour.navigate(2).expect("in range");

        let summary = TourSummary::from_tour(&tour, Duration::from_secs(10 + 125));
        assert_eq!(summary.explored, 3);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.completion_percent(), 75);
        assert_eq!(summary.time_label(), "2m 5s");
        assert!(summary.stats_text().contains("Locations Explored: 3"));
    }

    #[test]
    fn revisiting_does_not_double_count() {
        let mut tour = TourState::new(0, 2, Duration::ZERO).expect("valid tour");
        tour.navigate(1).expect("in range");
        tour.navigate(0).expect("in range");

        let summary = TourSummary::from_tour(&tour, Duration::from_secs(3));
        assert_eq!(summary.explored, 2);
        assert_eq!(summary.completion_percent(), 100);
    }
}

//! Error types returned by the navigation controller.
use std::fmt;

/// Reasons a navigation request is rejected. Rejections never change tour state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    OutOfRange { index: usize, location_count: usize },
    AtFirstLocation,
    AtLastLocation,
    NoLocations,
    TourNotStarted,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                index,
                location_count,
            } => write!(
                f,
                "Invalid location index {} (tour has {} locations)",
                index, location_count
            ),
            Self::AtFirstLocation => write!(f, "Already at first location"),
            Self::AtLastLocation => write!(f, "Already at last location"),
            Self::NoLocations => write!(f, "Tour has no locations"),
            Self::TourNotStarted => write!(f, "Tour has not started"),
        }
    }
}

impl std::error::Error for NavigationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_mentions_index_and_count() {
        let err = NavigationError::OutOfRange {
            index: 9,
            location_count: 3,
        };
        let message = err.to_string();
        assert!(message.contains('9'));
        assert!(message.contains('3'));
        assert_eq!(
            NavigationError::AtLastLocation.to_string(),
            "Already at last location"
        );
    }
}

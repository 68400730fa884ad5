//! Boundary transition tracking
//!
//! Pure state machine turning "is the point outside right now" into a
//! fireable event, given what the zone looked like on the previous sample.
//! Enter and exit are transient events; only inside/outside are stored.

use serde::{Deserialize, Serialize};

use crate::zones::GeofenceEventType;

/// Boundary state a zone was last sampled in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryState {
    /// Not sampled since the last reset
    #[default]
    Unknown,
    /// Last sample was inside the zone
    Inside,
    /// Last sample was outside the zone
    Outside,
}

impl BoundaryState {
    /// State matching a classification result
    pub fn from_outside(outside: bool) -> Self {
        if outside {
            BoundaryState::Outside
        } else {
            BoundaryState::Inside
        }
    }
}

impl std::fmt::Display for BoundaryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryState::Unknown => write!(f, "Unknown"),
            BoundaryState::Inside => write!(f, "Inside"),
            BoundaryState::Outside => write!(f, "Outside"),
        }
    }
}

/// Result of one evaluation of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Event to dispatch, if any
    pub fired: Option<GeofenceEventType>,
    /// State to store for the next evaluation
    pub next: BoundaryState,
}

/// Decide whether a zone fires and what it remembers.
///
/// `next` always follows the classification, whether or not anything fired,
/// so the first evaluation after a reset only records a baseline for
/// enter/exit zones.
pub fn next_transition(
    currently_outside: bool,
    configured: GeofenceEventType,
    previous: BoundaryState,
) -> Transition {
    let fires = match configured {
        GeofenceEventType::Outside => currently_outside,
        GeofenceEventType::Inside => !currently_outside,
        GeofenceEventType::Exit => currently_outside && previous == BoundaryState::Inside,
        GeofenceEventType::Enter => !currently_outside && previous == BoundaryState::Outside,
        GeofenceEventType::Unknown => false,
    };

    Transition {
        fired: fires.then_some(configured),
        next: BoundaryState::from_outside(currently_outside),
    }
}

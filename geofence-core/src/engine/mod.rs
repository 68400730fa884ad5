//! GeofenceEngine - zone evaluation and event dispatch
//!
//! This module provides the single entry point an application wires into
//! its location source and its periodic scheduler.
//!
//! # Architecture
//!
//! The engine owns a fixed number of zones, one boundary state per zone
//! (same index), and the subscriber list. Samples arrive through a
//! [`PositionFeed`] that may live in another execution context.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  location source ──push──▶ PositionFeed (pending flag)         │
//! │                                  │                             │
//! │  scheduler ──tick──▶ GeofenceEngine                            │
//! │                      ├─ zones[i]   ──▶ GeofenceZone::is_outside│
//! │                      ├─ states[i]  ──▶ next_transition         │
//! │                      └─ dispatcher ──▶ subscribers             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Zone configuration is not synchronised with `tick`. Callers that
//! reconfigure zones from another context must serialise that with ticking
//! themselves; `&mut self` on both makes this the default in safe code.

use serde::{Deserialize, Serialize};

use crate::dispatch::{CallbackContext, EventDispatcher};
use crate::error::{GeofenceError, SubscriberError};
use crate::feed::{PositionFeed, PositionSample};
use crate::transition::{next_transition, BoundaryState};
use crate::zones::GeofenceZone;

/// Zone count used by [`GeofenceSettings::default`]
pub const DEFAULT_ZONE_COUNT: usize = 4;

/// Engine construction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceSettings {
    /// Number of zone slots; fixed for the engine's lifetime
    pub zone_count: usize,
}

impl Default for GeofenceSettings {
    fn default() -> Self {
        GeofenceSettings {
            zone_count: DEFAULT_ZONE_COUNT,
        }
    }
}

/// Zone status for status queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStatus {
    /// Zone index
    pub index: usize,
    /// Zone definition
    pub zone: GeofenceZone,
    /// Boundary state from the last evaluation
    pub state: BoundaryState,
}

/// Geofence evaluation engine.
///
/// Zones are addressed by index in `[0, zone_count)`; the index is the
/// zone's identity.
#[derive(Debug)]
pub struct GeofenceEngine {
    /// Configured zones
    zones: Vec<GeofenceZone>,
    /// Boundary state per zone, index-aligned with `zones`
    states: Vec<BoundaryState>,
    /// Subscribers
    dispatcher: EventDispatcher,
    /// Incoming samples
    feed: PositionFeed,
}

impl Default for GeofenceEngine {
    fn default() -> Self {
        Self::with_settings(GeofenceSettings::default())
    }
}

impl GeofenceEngine {
    /// Create an engine with `zone_count` disabled zones
    pub fn new(zone_count: usize) -> Self {
        Self::with_settings(GeofenceSettings { zone_count })
    }

    /// Create an engine from settings
    pub fn with_settings(settings: GeofenceSettings) -> Self {
        log::info!("Geofence engine with {} zones", settings.zone_count);
        GeofenceEngine {
            zones: vec![GeofenceZone::default(); settings.zone_count],
            states: vec![BoundaryState::Unknown; settings.zone_count],
            dispatcher: EventDispatcher::new(),
            feed: PositionFeed::new(),
        }
    }

    /// Prepare for the first tick. Same as [`reset`](Self::reset).
    pub fn init(&mut self) {
        self.reset();
    }

    /// Forget every zone's boundary state.
    ///
    /// The next evaluation of each zone only records a baseline, so enter
    /// and exit zones will not fire on it.
    pub fn reset(&mut self) {
        log::info!("Resetting boundary state of {} zones", self.states.len());
        self.states.fill(BoundaryState::Unknown);
    }

    /// Number of zone slots
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    fn check_index(&self, index: usize) -> Result<(), GeofenceError> {
        if index < self.zones.len() {
            Ok(())
        } else {
            Err(GeofenceError::ZoneIndexOutOfRange {
                index,
                count: self.zones.len(),
            })
        }
    }

    // =========================================================================
    // Zone configuration
    // =========================================================================

    /// Get a zone by index
    pub fn zone(&self, index: usize) -> Result<&GeofenceZone, GeofenceError> {
        self.check_index(index)?;
        Ok(&self.zones[index])
    }

    /// Get a mutable zone by index, for in-place edits
    pub fn zone_mut(&mut self, index: usize) -> Result<&mut GeofenceZone, GeofenceError> {
        self.check_index(index)?;
        Ok(&mut self.zones[index])
    }

    /// Replace a zone's whole configuration.
    ///
    /// The zone's boundary state is kept; call [`reset`](Self::reset) after
    /// a configuration overhaul to re-arm enter/exit zones.
    pub fn set_zone(&mut self, index: usize, zone: GeofenceZone) -> Result<(), GeofenceError> {
        *self.zone_mut(index)? = zone;
        Ok(())
    }

    /// Enable or disable a zone
    pub fn set_zone_enabled(&mut self, index: usize, enabled: bool) -> Result<(), GeofenceError> {
        self.zone_mut(index)?.enabled = enabled;
        Ok(())
    }

    /// Enable or disable one vertex of a polygonal zone
    pub fn set_vertex_enabled(
        &mut self,
        index: usize,
        vertex: usize,
        enabled: bool,
    ) -> Result<(), GeofenceError> {
        let zone = self.zone_mut(index)?;
        let vertices = match zone.vertices_mut() {
            Some(vertices) => vertices,
            None => {
                return Err(GeofenceError::VertexIndexOutOfRange {
                    zone: index,
                    index: vertex,
                    count: 0,
                })
            }
        };
        let count = vertices.len();
        match vertices.get_mut(vertex) {
            Some(v) => {
                v.enabled = enabled;
                Ok(())
            }
            None => Err(GeofenceError::VertexIndexOutOfRange {
                zone: index,
                index: vertex,
                count,
            }),
        }
    }

    /// Boundary state recorded for a zone
    pub fn zone_state(&self, index: usize) -> Result<BoundaryState, GeofenceError> {
        self.check_index(index)?;
        Ok(self.states[index])
    }

    /// Zone definition together with its boundary state
    pub fn zone_status(&self, index: usize) -> Result<ZoneStatus, GeofenceError> {
        self.check_index(index)?;
        Ok(ZoneStatus {
            index,
            zone: self.zones[index].clone(),
            state: self.states[index],
        })
    }

    /// Status of every zone in index order
    pub fn all_zone_status(&self) -> Vec<ZoneStatus> {
        self.zones
            .iter()
            .zip(self.states.iter())
            .enumerate()
            .map(|(index, (zone, state))| ZoneStatus {
                index,
                zone: zone.clone(),
                state: *state,
            })
            .collect()
    }

    // =========================================================================
    // Samples
    // =========================================================================

    /// Handle for pushing samples from another context
    pub fn feed(&self) -> PositionFeed {
        self.feed.clone()
    }

    /// Pass a new position to be evaluated on the next tick.
    ///
    /// Returns `false` if the position equals the stored one; nothing is
    /// scheduled in that case.
    pub fn push_sample(&self, sample: PositionSample) -> bool {
        self.feed.push(sample)
    }

    /// Have the next tick evaluate the stored sample again, e.g. after the
    /// zones were reconfigured. Returns `false` if no sample was ever pushed.
    pub fn request_evaluation(&self) -> bool {
        self.feed.mark_pending()
    }

    /// Most recently pushed sample
    pub fn last_sample(&self) -> Option<PositionSample> {
        self.feed.last_sample()
    }

    /// Check if a sample is waiting for the next tick
    pub fn is_pending(&self) -> bool {
        self.feed.is_pending()
    }

    // =========================================================================
    // Subscribers
    // =========================================================================

    /// Register a subscriber for all fired events
    pub fn register_callback<F>(&mut self, callback: F) -> Result<(), GeofenceError>
    where
        F: FnMut(&CallbackContext) -> Result<(), SubscriberError> + Send + 'static,
    {
        self.dispatcher.register(callback);
        Ok(())
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.dispatcher.len()
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Evaluate the pending sample against every enabled zone.
    ///
    /// Returns immediately with `Ok(0)` when no new sample arrived since the
    /// last tick. Otherwise zones are evaluated in index order and each fired
    /// event is dispatched to all subscribers before the next zone is looked
    /// at. Returns the number of events dispatched.
    ///
    /// A failing subscriber aborts the pass: its error is returned, zones
    /// after the failing one keep their previous state, and the sample is
    /// not evaluated again unless a new one is pushed or
    /// [`request_evaluation`](Self::request_evaluation) is called.
    pub fn tick(&mut self) -> Result<usize, GeofenceError> {
        let sample = match self.feed.take_pending() {
            Some(sample) => sample,
            None => {
                log::trace!("No new position, skipping evaluation");
                return Ok(0);
            }
        };

        let mut fired_count = 0;

        let zones = self.zones.iter().zip(self.states.iter_mut()).enumerate();
        for (index, (zone, state)) in zones {
            if !zone.enabled {
                continue;
            }

            let outside = zone.is_outside(sample.lat, sample.lon);
            let transition = next_transition(outside, zone.event_type, *state);
            *state = transition.next;

            let event_type = match transition.fired {
                Some(event_type) => event_type,
                None => continue,
            };
            debug_assert_eq!(event_type, zone.event_type);

            log::debug!(
                "Zone {} fired {} at {:.6},{:.6}",
                index,
                event_type,
                sample.lat,
                sample.lon
            );

            let context = CallbackContext { index, event_type };
            if let Err(source) = self.dispatcher.dispatch(&context) {
                log::warn!(
                    "Subscriber failed on zone {} ({}), aborting evaluation: {}",
                    index,
                    event_type,
                    source
                );
                return Err(GeofenceError::Subscriber {
                    zone_index: index,
                    event: event_type,
                    source,
                });
            }
            fired_count += 1;
        }

        Ok(fired_count)
    }
}

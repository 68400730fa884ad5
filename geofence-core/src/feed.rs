//! Position samples and the coalescing sample slot
//!
//! The producer (location source) and the consumer (periodic tick) may run
//! in different contexts. They share one slot holding the latest sample and
//! an atomic "pending" flag. Pushing a sample between two ticks overwrites
//! the previous one; only the latest sample before a tick is evaluated.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A location fix from the positioning source
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSample {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Horizontal accuracy in meters
    pub horizontal_accuracy: f32,
    /// Vertical accuracy in meters
    pub vertical_accuracy: f32,
    /// Epoch time from the device sources, seconds
    pub epoch_time: i64,
}

impl PositionSample {
    /// Create a sample with no accuracy or time metadata
    pub fn new(lat: f64, lon: f64) -> Self {
        PositionSample {
            lat,
            lon,
            ..Default::default()
        }
    }

    /// Check if two samples describe the same position.
    ///
    /// Accuracy and time are ignored: a fix that only refines its
    /// metadata is not a new position.
    pub fn same_position(&self, other: &PositionSample) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }
}

#[derive(Debug, Default)]
struct FeedInner {
    /// Set when a sample arrived that no tick has evaluated yet
    pending: AtomicBool,
    /// Most recent sample
    sample: Mutex<Option<PositionSample>>,
}

/// Producer handle for pushing position samples.
///
/// Cheap to clone; all clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct PositionFeed {
    inner: Arc<FeedInner>,
}

impl PositionFeed {
    /// Create an empty feed
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sample and mark it pending.
    ///
    /// Returns `false` (and does nothing) when the position equals the
    /// stored one.
    pub fn push(&self, sample: PositionSample) -> bool {
        let mut slot = self
            .inner
            .sample
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(last) = slot.as_ref() {
            if last.same_position(&sample) {
                log::trace!("Ignoring repeated position {:.6},{:.6}", sample.lat, sample.lon);
                return false;
            }
        }

        *slot = Some(sample);
        // Flag is raised while the slot is still held so a concurrent take
        // never sees the flag without the sample that raised it
        self.inner.pending.store(true, Ordering::Release);
        log::debug!("New position {:.6},{:.6}", sample.lat, sample.lon);
        true
    }

    /// Re-arm the pending flag for the stored sample.
    ///
    /// Returns `false` if nothing was ever pushed.
    pub fn mark_pending(&self) -> bool {
        let slot = self
            .inner
            .sample
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if slot.is_some() {
            self.inner.pending.store(true, Ordering::Release);
            true
        } else {
            false
        }
    }

    /// Test-and-clear the pending flag, returning the sample to evaluate.
    ///
    /// Returns `None` without touching the lock when nothing is pending.
    /// A push that lands after this returns stays pending for the next call.
    pub fn take_pending(&self) -> Option<PositionSample> {
        if !self.inner.pending.load(Ordering::Acquire) {
            return None;
        }

        let slot = self
            .inner
            .sample
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Clear under the slot lock so the flag and the sample it belongs
        // to are consumed together
        if !self.inner.pending.swap(false, Ordering::AcqRel) {
            return None;
        }
        *slot
    }

    /// Check if a sample is waiting to be evaluated
    pub fn is_pending(&self) -> bool {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// Most recently stored sample
    pub fn last_sample(&self) -> Option<PositionSample> {
        *self
            .inner
            .sample
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

//! Error types for zone configuration and event dispatch

use thiserror::Error;

use crate::zones::GeofenceEventType;

/// Error a subscriber callback may hand back to the engine
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync>;

/// Errors reported by the geofence engine
#[derive(Error, Debug)]
pub enum GeofenceError {
    /// Zone index is outside `[0, zone_count)`
    #[error("Zone index out of range: {index} (zone count {count})")]
    ZoneIndexOutOfRange { index: usize, count: usize },

    /// Polygon vertex index doesn't exist on the zone
    #[error("Vertex index out of range: zone {zone} has {count} vertices, got {index}")]
    VertexIndexOutOfRange {
        zone: usize,
        index: usize,
        count: usize,
    },

    /// A subscriber failed while an event was being dispatched.
    /// The remaining zones of that tick were not evaluated.
    #[error("Subscriber failed on zone {zone_index} ({event}): {source}")]
    Subscriber {
        zone_index: usize,
        event: GeofenceEventType,
        #[source]
        source: SubscriberError,
    },
}

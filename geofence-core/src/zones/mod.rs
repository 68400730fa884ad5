//! Geofence Zones
//!
//! This module provides the zone definitions evaluated by the engine.
//! A zone is either a circle around a center point or an arbitrary
//! polygon, and carries the event kind it should raise.
//!
//! # Features
//!
//! - Circular zones (center + radius in meters, haversine distance)
//! - Polygonal zones with per-vertex enable flags
//! - Date-line crossing polygons
//!
//! # Example
//!
//! ```rust
//! use geofence_core::zones::{GeofenceEventType, GeofenceZone};
//!
//! let park = GeofenceZone::new_circular(37.76887, -122.48248, 2700.0, GeofenceEventType::Enter);
//!
//! assert!(!park.is_outside(37.76705, -122.48593));
//! assert!(park.is_outside(-37.76887, 122.48248));
//! ```

mod polygon;
mod zone;

pub use polygon::polygon_contains;
pub use zone::*;

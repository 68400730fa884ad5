//! Geofence Zone Implementation
//!
//! Defines zone shapes, the configured event kinds and the per-zone
//! boundary test.

use serde::{Deserialize, Serialize};

use super::polygon::polygon_contains;
use crate::geo;

/// Event kind a zone is configured to raise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeofenceEventType {
    /// Every evaluation where the point is inside the zone
    Inside,
    /// Every evaluation where the point is outside the zone
    Outside,
    /// The evaluation where the point crosses from outside to inside
    Enter,
    /// The evaluation where the point crosses from inside to outside
    Exit,
    /// Never fires
    #[default]
    Unknown,
}

impl std::fmt::Display for GeofenceEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeofenceEventType::Inside => write!(f, "Inside"),
            GeofenceEventType::Outside => write!(f, "Outside"),
            GeofenceEventType::Enter => write!(f, "Enter"),
            GeofenceEventType::Exit => write!(f, "Exit"),
            GeofenceEventType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Polygon corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonVertex {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Whether this vertex takes part in the polygon
    pub enabled: bool,
}

impl PolygonVertex {
    /// Create an enabled vertex
    pub fn new(lat: f64, lon: f64) -> Self {
        PolygonVertex {
            lat,
            lon,
            enabled: true,
        }
    }
}

impl From<(f64, f64)> for PolygonVertex {
    fn from((lat, lon): (f64, f64)) -> Self {
        PolygonVertex::new(lat, lon)
    }
}

/// Geofence zone shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ZoneShape {
    /// Circle around a center point
    #[serde(rename_all = "camelCase")]
    Circular {
        /// Center latitude in degrees
        center_lat: f64,
        /// Center longitude in degrees
        center_lon: f64,
        /// Radius in meters
        radius: f64,
    },
    /// Arbitrary polygon, possibly crossing the date line
    #[serde(rename_all = "camelCase")]
    Polygonal {
        /// Ordered vertices; the last connects back to the first
        vertices: Vec<PolygonVertex>,
    },
}

impl Default for ZoneShape {
    fn default() -> Self {
        ZoneShape::Circular {
            center_lat: 0.0,
            center_lon: 0.0,
            radius: 0.0,
        }
    }
}

impl ZoneShape {
    /// Check if a point (latitude, longitude in degrees) is outside this shape.
    ///
    /// A point exactly on a circle's radius counts as inside.
    pub fn is_outside(&self, lat: f64, lon: f64) -> bool {
        match self {
            ZoneShape::Circular {
                center_lat,
                center_lon,
                radius,
            } => geo::distance_meters(*center_lat, *center_lon, lat, lon) > *radius,
            ZoneShape::Polygonal { vertices } => !polygon_contains(vertices, lat, lon),
        }
    }
}

/// Geofence zone definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceZone {
    /// Whether the zone is evaluated at all
    pub enabled: bool,
    /// Zone shape
    pub shape: ZoneShape,
    /// Event kind raised by this zone
    pub event_type: GeofenceEventType,
    /// Number meant to reduce false positives; carried, not evaluated
    pub confidence: u8,
}

impl GeofenceZone {
    /// Create a new enabled circular zone
    pub fn new_circular(
        center_lat: f64,
        center_lon: f64,
        radius: f64,
        event_type: GeofenceEventType,
    ) -> Self {
        GeofenceZone {
            enabled: true,
            shape: ZoneShape::Circular {
                center_lat,
                center_lon,
                radius,
            },
            event_type,
            confidence: 0,
        }
    }

    /// Create a new enabled polygonal zone
    pub fn new_polygonal<V>(vertices: V, event_type: GeofenceEventType) -> Self
    where
        V: IntoIterator,
        V::Item: Into<PolygonVertex>,
    {
        GeofenceZone {
            enabled: true,
            shape: ZoneShape::Polygonal {
                vertices: vertices.into_iter().map(Into::into).collect(),
            },
            event_type,
            confidence: 0,
        }
    }

    /// Check if a point is outside this zone
    #[inline]
    pub fn is_outside(&self, lat: f64, lon: f64) -> bool {
        self.shape.is_outside(lat, lon)
    }

    /// Check if a point is inside this zone
    #[inline]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        !self.is_outside(lat, lon)
    }

    /// Polygon vertices, `None` for circular zones
    pub fn vertices(&self) -> Option<&[PolygonVertex]> {
        match &self.shape {
            ZoneShape::Polygonal { vertices } => Some(vertices.as_slice()),
            ZoneShape::Circular { .. } => None,
        }
    }

    /// Mutable polygon vertices, `None` for circular zones
    pub fn vertices_mut(&mut self) -> Option<&mut Vec<PolygonVertex>> {
        match &mut self.shape {
            ZoneShape::Polygonal { vertices } => Some(vertices),
            ZoneShape::Circular { .. } => None,
        }
    }
}

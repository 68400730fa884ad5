//! Point-in-polygon classification
//!
//! Even-odd ray casting over the enabled vertices of a polygon. Disabled
//! vertices are skipped when edges are formed, so toggling a vertex reshapes
//! the effective polygon in place.

use super::PolygonVertex;

/// Shift negative longitudes east by a full turn on date-line polygons
#[inline]
fn unwrap_longitude(lon: f64, crosses_dateline: bool) -> f64 {
    if crosses_dateline && lon < 0.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Check whether the point lies inside the polygon formed by the enabled
/// vertices.
///
/// A polygon whose enabled longitudes span more than 180 degrees is taken
/// to cross the antimeridian; its negative longitudes (and the query's) are
/// moved into `[180, 360)` before the parity test.
///
/// A polygon with no enabled vertices is always outside. Points
/// exactly on an edge or vertex get a stable but unspecified answer.
pub fn polygon_contains(vertices: &[PolygonVertex], lat: f64, lon: f64) -> bool {
    let enabled = vertices.iter().filter(|v| v.enabled);

    let last = match enabled.clone().last() {
        Some(v) => v,
        None => return false,
    };

    let (min_lon, max_lon) = enabled
        .clone()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v.lon), hi.max(v.lon))
        });
    let crosses_dateline = max_lon - min_lon > 180.0;

    let lon = unwrap_longitude(lon, crosses_dateline);
    let mut inside = false;

    // Walk edges (prev -> current), starting with the closing edge last -> first
    let mut prev_lat = last.lat;
    let mut prev_lon = unwrap_longitude(last.lon, crosses_dateline);

    for vertex in enabled {
        let cur_lat = vertex.lat;
        let cur_lon = unwrap_longitude(vertex.lon, crosses_dateline);

        if (cur_lat > lat) != (prev_lat > lat) {
            let crossing_lon =
                cur_lon + (lat - cur_lat) * (prev_lon - cur_lon) / (prev_lat - cur_lat);
            if lon > crossing_lon {
                inside = !inside;
            }
        }

        prev_lat = cur_lat;
        prev_lon = cur_lon;
    }

    inside
}

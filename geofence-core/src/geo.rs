//! Great-circle distance between geographic coordinates

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in meters between two points given in degrees.
///
/// Uses the `atan2` form, which stays well conditioned near antipodal
/// points where the `asin` form loses its domain.
#[inline]
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();

    let half_lat = (d_lat * 0.5).sin();
    let half_lon = (d_lon * 0.5).sin();
    let a = half_lat * half_lat + lat1.cos() * lat2.cos() * half_lon * half_lon;

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt()) * 1000.0
}

use geo::{point, HaversineDistance};

use crate::models::Coordinate;

/// Great-circle distance between two coordinates in meters
#[inline]
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let from = point!(x: a.lng, y: a.lat);
    let to = point!(x: b.lng, y: b.lat);
    from.haversine_distance(&to)
}

/// Whether the midpoint's search circle is small relative to the origins' separation
///
/// A fixed radius around a midpoint between far-apart origins tends to
/// return few or no venues; callers log this rather than adapting.
pub fn is_sparse_search(separation_meters: f64, search_radius_meters: u32) -> bool {
    separation_meters > f64::from(search_radius_meters) * 50.0
}

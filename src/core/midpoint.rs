use crate::models::{Coordinate, Midpoint};

/// Default search radius around the midpoint in meters
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 1000;

/// Reduces two origins to a single midpoint
///
/// Latitude and longitude are averaged independently. This is not a
/// great-circle midpoint: pairs straddling the antimeridian or close to a
/// pole produce a point that is not between them on the globe.
///
/// The search radius is a fixed policy value and does not grow with the
/// distance between the origins.
#[derive(Debug, Clone, Copy)]
pub struct MidpointCalculator {
    search_radius_meters: u32,
}

impl MidpointCalculator {
    pub fn new(search_radius_meters: u32) -> Self {
        Self { search_radius_meters }
    }

    #[inline]
    pub fn compute(&self, a: Coordinate, b: Coordinate) -> Midpoint {
        Midpoint {
            coordinate: Coordinate {
                lat: (a.lat + b.lat) / 2.0,
                lng: (a.lng + b.lng) / 2.0,
            },
            search_radius_meters: self.search_radius_meters,
        }
    }
}

impl Default for MidpointCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_RADIUS_METERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seattle_portland_midpoint() {
        let seattle = Coordinate::new(47.6062, -122.3321);
        let portland = Coordinate::new(45.5152, -122.6784);

        let midpoint = MidpointCalculator::default().compute(seattle, portland);

        assert!((midpoint.coordinate.lat - 46.5607).abs() < 1e-9);
        assert!((midpoint.coordinate.lng - -122.50525).abs() < 1e-9);
        assert_eq!(midpoint.search_radius_meters, 1000);
    }

    #[test]
    fn test_commutative() {
        let calculator = MidpointCalculator::new(2500);
        let a = Coordinate::new(40.7128, -74.0060);
        let b = Coordinate::new(34.0522, -118.2437);

        assert_eq!(calculator.compute(a, b), calculator.compute(b, a));
    }

    #[test]
    fn test_antimeridian_is_plain_average() {
        // Known limitation: averaging across the antimeridian lands near 0°
        let a = Coordinate::new(0.0, 179.0);
        let b = Coordinate::new(0.0, -179.0);

        let midpoint = MidpointCalculator::default().compute(a, b);
        assert_eq!(midpoint.coordinate.lng, 0.0);
    }
}

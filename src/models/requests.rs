use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Coordinate, VenueOrder};

/// Request to find venues between two addresses
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMeetupRequest {
    #[validate(length(min = 1, max = 512))]
    #[serde(alias = "location_a", rename = "locationA")]
    pub location_a: String,
    #[validate(length(min = 1, max = 512))]
    #[serde(alias = "location_b", rename = "locationB")]
    pub location_b: String,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub order: VenueOrder,
}

/// Query string for the geocode endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeocodeQuery {
    #[validate(length(min = 1, max = 512))]
    pub address: String,
}

/// Query string for the midpoint endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MidpointQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(rename = "latA")]
    pub lat_a: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(rename = "lngA")]
    pub lng_a: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(rename = "latB")]
    pub lat_b: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(rename = "lngB")]
    pub lng_b: f64,
}

impl MidpointQuery {
    /// Both origins, or `None` if any value is NaN or infinite
    ///
    /// Range rules never fire for NaN, so this is checked separately.
    pub fn origins(&self) -> Option<(Coordinate, Coordinate)> {
        let values = [self.lat_a, self.lng_a, self.lat_b, self.lng_b];
        if !values.iter().all(|v| v.is_finite()) {
            return None;
        }
        Some((
            Coordinate::new(self.lat_a, self.lng_a),
            Coordinate::new(self.lat_b, self.lng_b),
        ))
    }
}

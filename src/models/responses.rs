use serde::{Deserialize, Serialize};

use crate::models::domain::{Coordinate, Midpoint, Venue};

/// Response for the find meetup endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMeetupResponse {
    pub success: bool,
    pub midpoint: MidpointResponse,
    pub origins: OriginsResponse,
    pub suggestions: Vec<Venue>,
    #[serde(rename = "mapsScriptUrl", skip_serializing_if = "Option::is_none", default)]
    pub maps_script_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MidpointResponse {
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "searchRadius")]
    pub search_radius: u32,
    #[serde(
        rename = "originSeparationMeters",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub origin_separation_meters: Option<f64>,
}

impl From<Midpoint> for MidpointResponse {
    fn from(midpoint: Midpoint) -> Self {
        Self {
            lat: midpoint.coordinate.lat,
            lng: midpoint.coordinate.lng,
            search_radius: midpoint.search_radius_meters,
            origin_separation_meters: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginsResponse {
    pub a: GeocodeResponse,
    pub b: GeocodeResponse,
}

/// A resolved address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResponse {
    pub fn new(address: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            address: address.into(),
            lat: coordinate.lat,
            lng: coordinate.lng,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Free-text address supplied by the caller
///
/// Guaranteed non-empty after trimming whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Place-type tag understood by the places provider (e.g. "restaurant")
///
/// `None` inside means no type filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(Option<String>);

impl Category {
    pub const ANY: &'static str = "any";

    pub fn parse(raw: &str) -> Option<Self> {
        let tag = raw.trim().to_ascii_lowercase();
        if tag.is_empty() || tag == Self::ANY {
            return Some(Self(None));
        }
        if !tag.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
            return None;
        }
        Some(Self(Some(tag)))
    }

    pub fn any() -> Self {
        Self(None)
    }

    /// The tag to send to the provider, if any
    pub fn tag(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or(Self::ANY))
    }
}

/// Midpoint between two origins plus the radius used to search around it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Midpoint {
    pub coordinate: Coordinate,
    #[serde(rename = "searchRadiusMeters")]
    pub search_radius_meters: u32,
}

/// Travel duration from one origin to a venue
///
/// Rendered as `"<n> mins"`, or the sentinel `"Unknown"` when the
/// distance-matrix provider could not supply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveTime {
    Minutes(u32),
    Unknown,
}

impl DriveTime {
    pub const UNKNOWN: &'static str = "Unknown";

    /// Rounds a provider duration in seconds to whole minutes
    pub fn from_seconds(seconds: u64) -> Self {
        DriveTime::Minutes((seconds as f64 / 60.0).round() as u32)
    }

    pub fn minutes(&self) -> Option<u32> {
        match self {
            DriveTime::Minutes(m) => Some(*m),
            DriveTime::Unknown => None,
        }
    }
}

impl fmt::Display for DriveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveTime::Minutes(m) => write!(f, "{} mins", m),
            DriveTime::Unknown => f.write_str(Self::UNKNOWN),
        }
    }
}

impl FromStr for DriveTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::UNKNOWN {
            return Ok(DriveTime::Unknown);
        }
        s.strip_suffix(" mins")
            .and_then(|m| m.parse().ok())
            .map(DriveTime::Minutes)
            .ok_or_else(|| format!("invalid drive time: {}", s))
    }
}

impl Serialize for DriveTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DriveTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Travel mode passed to the distance-matrix provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

/// How venues are ordered after enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueOrder {
    /// Keep the places provider's relevance order
    #[default]
    Provider,
    /// Highest rating first, ties broken by rating count
    Rating,
    /// Fairest split of travel time between the two origins
    Balanced,
}

/// Candidate venue near the midpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub rating: f64,
    #[serde(rename = "ratingCount")]
    pub rating_count: u32,
    #[serde(rename = "priceLevel", skip_serializing_if = "Option::is_none", default)]
    pub price_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub coordinate: Option<Coordinate>,
    #[serde(rename = "placeId", skip_serializing_if = "Option::is_none", default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(rename = "driveTimeFromA", skip_serializing_if = "Option::is_none", default)]
    pub drive_time_from_a: Option<DriveTime>,
    #[serde(rename = "driveTimeFromB", skip_serializing_if = "Option::is_none", default)]
    pub drive_time_from_b: Option<DriveTime>,
    #[serde(
        rename = "distanceFromMidpointMeters",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub distance_from_midpoint_meters: Option<f64>,
    #[serde(rename = "mapsUrl", skip_serializing_if = "Option::is_none", default)]
    pub maps_url: Option<String>,
    #[serde(rename = "staticMapUrl", skip_serializing_if = "Option::is_none", default)]
    pub static_map_url: Option<String>,
}

impl Venue {
    /// A venue as reported by the places provider, before enrichment
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            rating: 0.0,
            rating_count: 0,
            price_level: None,
            coordinate: None,
            place_id: None,
            photos: Vec::new(),
            drive_time_from_a: None,
            drive_time_from_b: None,
            distance_from_midpoint_meters: None,
            maps_url: None,
            static_map_url: None,
        }
    }
}

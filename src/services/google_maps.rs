use crate::models::{Address, Category, Coordinate, DriveTime, TravelMode};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Status code reported in the body of every Google Maps web service response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Ok,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    NotFound,
    MaxElementsExceeded,
    UnknownError,
    Other(String),
}

impl ProviderStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "OK" => ProviderStatus::Ok,
            "ZERO_RESULTS" => ProviderStatus::ZeroResults,
            "OVER_QUERY_LIMIT" => ProviderStatus::OverQueryLimit,
            "REQUEST_DENIED" => ProviderStatus::RequestDenied,
            "INVALID_REQUEST" => ProviderStatus::InvalidRequest,
            "NOT_FOUND" => ProviderStatus::NotFound,
            "MAX_ELEMENTS_EXCEEDED" => ProviderStatus::MaxElementsExceeded,
            "UNKNOWN_ERROR" => ProviderStatus::UnknownError,
            other => ProviderStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProviderStatus::Ok => "OK",
            ProviderStatus::ZeroResults => "ZERO_RESULTS",
            ProviderStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            ProviderStatus::RequestDenied => "REQUEST_DENIED",
            ProviderStatus::InvalidRequest => "INVALID_REQUEST",
            ProviderStatus::NotFound => "NOT_FOUND",
            ProviderStatus::MaxElementsExceeded => "MAX_ELEMENTS_EXCEEDED",
            ProviderStatus::UnknownError => "UNKNOWN_ERROR",
            ProviderStatus::Other(other) => other,
        }
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when talking to Google Maps
#[derive(Debug, Error)]
pub enum GoogleMapsError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[source] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Provider returned status {status}")]
    Status {
        status: ProviderStatus,
        message: Option<String>,
    },

    #[error("Provider returned HTTP {0}")]
    Http(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for GoogleMapsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GoogleMapsError::Timeout
        } else {
            GoogleMapsError::RequestError(err)
        }
    }
}

impl GoogleMapsError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GoogleMapsError::Timeout)
    }

    /// Provider status carried by this error, if the provider answered
    pub fn status(&self) -> Option<&ProviderStatus> {
        match self {
            GoogleMapsError::Status { status, .. } => Some(status),
            _ => None,
        }
    }
}

/// A place as reported by the nearby-search endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub rating_count: u32,
    pub price_level: Option<u8>,
    pub coordinate: Option<Coordinate>,
    pub place_id: Option<String>,
    pub photo_references: Vec<String>,
}

// Wire formats, decoded once here so nothing downstream sees raw JSON.

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for Coordinate {
    fn from(location: LatLng) -> Self {
        Coordinate::new(location.lat, location.lng)
    }
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct GeocodeBody {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct NearbySearchBody {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    name: String,
    place_id: Option<String>,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    rating: Option<f64>,
    user_ratings_total: Option<i64>,
    // Levels outside 0..=4 are dropped when converting to `Place`
    price_level: Option<i64>,
    #[serde(default)]
    photos: Vec<PlacePhoto>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct PlacePhoto {
    photo_reference: String,
}

impl From<PlaceResult> for Place {
    fn from(result: PlaceResult) -> Self {
        Place {
            name: result.name,
            address: result
                .formatted_address
                .or(result.vicinity)
                .unwrap_or_default(),
            rating: result.rating.unwrap_or(0.0),
            rating_count: result
                .user_ratings_total
                .and_then(|count| u32::try_from(count).ok())
                .unwrap_or(0),
            price_level: result
                .price_level
                .filter(|level| (0..=4).contains(level))
                .and_then(|level| u8::try_from(level).ok()),
            coordinate: result.geometry.map(|g| g.location.into()),
            place_id: result.place_id,
            photo_references: result
                .photos
                .into_iter()
                .map(|p| p.photo_reference)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixBody {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    duration: Option<MatrixDuration>,
}

#[derive(Debug, Deserialize)]
struct MatrixDuration {
    value: u64,
}

impl MatrixElement {
    fn drive_time(&self) -> DriveTime {
        match (&self.duration, ProviderStatus::parse(&self.status)) {
            (Some(duration), ProviderStatus::Ok) => DriveTime::from_seconds(duration.value),
            _ => DriveTime::Unknown,
        }
    }
}

/// Google Maps web service client
///
/// Covers the three endpoints the finder needs:
/// - Geocoding (address to coordinate)
/// - Places nearby search
/// - Distance matrix
///
/// The API key is held by the client and never logged.
pub struct GoogleMapsClient {
    base_url: Url,
    api_key: String,
    client: Client,
}

impl GoogleMapsClient {
    /// Create a new client with a per-request timeout
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, GoogleMapsError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| GoogleMapsError::InvalidUrl(e.to_string()))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GoogleMapsError> {
        self.base_url
            .join(path)
            .map_err(|e| GoogleMapsError::InvalidUrl(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GoogleMapsError> {
        let url = self.endpoint(path)?;

        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Google Maps {} returned HTTP {}", path, status);
            return Err(GoogleMapsError::Http(status.as_u16()));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                GoogleMapsError::Timeout
            } else {
                GoogleMapsError::InvalidResponse(e.to_string())
            }
        })
    }

    /// Resolve a free-text address to a coordinate
    ///
    /// Anything other than status `OK` is an error.
    #[tracing::instrument(skip_all, fields(address = %address))]
    pub async fn geocode(&self, address: &Address) -> Result<Coordinate, GoogleMapsError> {
        let body: GeocodeBody = self
            .get_json(
                "maps/api/geocode/json",
                &[("address", address.as_str().to_string())],
            )
            .await?;

        let status = ProviderStatus::parse(&body.status);
        if status != ProviderStatus::Ok {
            tracing::debug!("Geocoding returned {}: {:?}", status, body.error_message);
            return Err(GoogleMapsError::Status {
                status,
                message: body.error_message,
            });
        }

        body.results
            .into_iter()
            .next()
            .map(|result| result.geometry.location.into())
            .ok_or_else(|| GoogleMapsError::InvalidResponse("Geocoding returned no results".into()))
    }

    /// Search for places of `category` within `radius_meters` of `location`
    ///
    /// `ZERO_RESULTS` is an empty list, not an error.
    #[tracing::instrument(skip_all, fields(location = %location, category = %category))]
    pub async fn nearby_search(
        &self,
        location: Coordinate,
        radius_meters: u32,
        category: &Category,
    ) -> Result<Vec<Place>, GoogleMapsError> {
        let mut query = vec![
            ("location", location.to_string()),
            ("radius", radius_meters.to_string()),
        ];
        if let Some(tag) = category.tag() {
            query.push(("type", tag.to_string()));
        }

        let body: NearbySearchBody = self
            .get_json("maps/api/place/nearbysearch/json", &query)
            .await?;

        match ProviderStatus::parse(&body.status) {
            ProviderStatus::Ok => {
                let places: Vec<Place> = body.results.into_iter().map(Place::from).collect();
                tracing::debug!("Nearby search returned {} places", places.len());
                Ok(places)
            }
            ProviderStatus::ZeroResults => Ok(Vec::new()),
            status => Err(GoogleMapsError::Status {
                status,
                message: body.error_message,
            }),
        }
    }

    /// Travel times from one origin to every destination, in destination order
    ///
    /// Per-destination failures become `DriveTime::Unknown`; only a failure of
    /// the whole request is an error. The result always has one entry per
    /// destination.
    #[tracing::instrument(skip_all, fields(origin = %origin, destinations = destinations.len()))]
    pub async fn distance_matrix(
        &self,
        origin: &Address,
        destinations: &[String],
        mode: TravelMode,
    ) -> Result<Vec<DriveTime>, GoogleMapsError> {
        if destinations.is_empty() {
            return Ok(Vec::new());
        }

        // '|' separates destinations on the wire
        let joined = destinations
            .iter()
            .map(|d| d.replace('|', " "))
            .collect::<Vec<_>>()
            .join("|");

        let body: DistanceMatrixBody = self
            .get_json(
                "maps/api/distancematrix/json",
                &[
                    ("origins", origin.as_str().to_string()),
                    ("destinations", joined),
                    ("mode", mode.as_str().to_string()),
                ],
            )
            .await?;

        let status = ProviderStatus::parse(&body.status);
        if status != ProviderStatus::Ok {
            return Err(GoogleMapsError::Status {
                status,
                message: body.error_message,
            });
        }

        let row = body
            .rows
            .into_iter()
            .next()
            .ok_or_else(|| GoogleMapsError::InvalidResponse("Distance matrix returned no rows".into()))?;

        let mut times: Vec<DriveTime> = row.elements.iter().map(MatrixElement::drive_time).collect();
        times.resize(destinations.len(), DriveTime::Unknown);

        Ok(times)
    }
}

use crate::config::{GoogleSettings, SearchSettings};
use crate::core::{attach_drive_times, haversine_meters, is_sparse_search, order_venues, MidpointCalculator};
use crate::models::{Address, Category, Coordinate, DriveTime, Midpoint, TravelMode, Venue, VenueOrder};
use crate::services::google_maps::{GoogleMapsClient, GoogleMapsError, Place};
use crate::services::map_urls::{search_link, MapUrlBuilder, StaticMap};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the meeting point finder
///
/// Drive-time failures are not represented here: they degrade to
/// `DriveTime::Unknown` on the affected venues.
#[derive(Debug, Error)]
pub enum FinderError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Geocoding failed for address: {address}")]
    GeocodingFailed {
        address: String,
        #[source]
        source: GoogleMapsError,
    },

    #[error("Places search failed: {0}")]
    VenueSearchFailed(#[source] GoogleMapsError),

    #[error("Timed out during {operation}")]
    Timeout { operation: &'static str },
}

impl FinderError {
    pub fn status_code(&self) -> u16 {
        match self {
            FinderError::InvalidInput(_) => 400,
            FinderError::GeocodingFailed { .. } => 422,
            FinderError::VenueSearchFailed(_) => 502,
            FinderError::Timeout { .. } => 504,
        }
    }

    /// Short machine-readable error name
    pub fn kind(&self) -> &'static str {
        match self {
            FinderError::InvalidInput(_) => "invalid_input",
            FinderError::GeocodingFailed { .. } => "geocoding_failed",
            FinderError::VenueSearchFailed(_) => "venue_search_failed",
            FinderError::Timeout { .. } => "timeout",
        }
    }
}

/// An address together with its geocoded coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    pub address: Address,
    pub coordinate: Coordinate,
}

/// One meeting point search
#[derive(Debug, Clone)]
pub struct MeetupQuery {
    pub location_a: String,
    pub location_b: String,
    pub category: Category,
    pub order: VenueOrder,
}

/// Result of a meeting point search
#[derive(Debug, Clone)]
pub struct MeetingPoint {
    pub origin_a: ResolvedAddress,
    pub origin_b: ResolvedAddress,
    pub midpoint: Midpoint,
    pub origin_separation_meters: f64,
    pub venues: Vec<Venue>,
}

/// Finds venues halfway between two addresses
///
/// # Pipeline
/// 1. Geocode both addresses (concurrently)
/// 2. Average the coordinates into a midpoint
/// 3. Search for venues around the midpoint
/// 4. Fetch travel times from each origin (concurrently) and order the result
///
/// Provider calls are awaited inside the caller's future and never spawned,
/// so dropping the future cancels whatever is still in flight.
pub struct MeetingPointFinder {
    maps: GoogleMapsClient,
    urls: MapUrlBuilder,
    calculator: MidpointCalculator,
    travel_mode: TravelMode,
}

impl MeetingPointFinder {
    pub fn new(
        maps: GoogleMapsClient,
        urls: MapUrlBuilder,
        calculator: MidpointCalculator,
        travel_mode: TravelMode,
    ) -> Self {
        Self {
            maps,
            urls,
            calculator,
            travel_mode,
        }
    }

    pub fn from_settings(google: &GoogleSettings, search: &SearchSettings) -> Result<Self, GoogleMapsError> {
        let maps = GoogleMapsClient::new(
            &google.base_url,
            google.api_key.clone(),
            Duration::from_secs(google.timeout_secs),
        )?;
        let urls = MapUrlBuilder::new(&google.base_url, google.browser_key().to_string(), search.max_photos)?;

        Ok(Self::new(
            maps,
            urls,
            MidpointCalculator::new(search.radius_meters),
            search.travel_mode,
        ))
    }

    pub fn calculator(&self) -> &MidpointCalculator {
        &self.calculator
    }

    pub fn urls(&self) -> &MapUrlBuilder {
        &self.urls
    }

    /// Validate a caller-supplied address without touching the network
    pub fn parse_address(raw: &str) -> Result<Address, FinderError> {
        Address::parse(raw).ok_or_else(|| FinderError::InvalidInput("Please enter a valid address".into()))
    }

    /// Resolve a free-text address to a coordinate
    ///
    /// Blank input fails with `InvalidInput` before any request is made.
    /// One provider call, no retries.
    pub async fn resolve(&self, raw: &str) -> Result<ResolvedAddress, FinderError> {
        let address = Self::parse_address(raw)?;
        self.locate(address).await
    }

    async fn locate(&self, address: Address) -> Result<ResolvedAddress, FinderError> {
        match self.maps.geocode(&address).await {
            Ok(coordinate) => Ok(ResolvedAddress { address, coordinate }),
            Err(e) if e.is_timeout() => Err(FinderError::Timeout { operation: "geocoding" }),
            Err(e) => {
                tracing::info!("Geocoding failed for {}: {}", address, e);
                Err(FinderError::GeocodingFailed {
                    address: address.to_string(),
                    source: e,
                })
            }
        }
    }

    /// Venues near the midpoint in the provider's order, annotated with
    /// travel times from both origins
    pub async fn find_and_rank(
        &self,
        midpoint: &Midpoint,
        category: &Category,
        origin_a: &Address,
        origin_b: &Address,
    ) -> Result<Vec<Venue>, FinderError> {
        self.find_and_rank_by(midpoint, category, origin_a, origin_b, VenueOrder::Provider)
            .await
    }

    /// Same as [`find_and_rank`](Self::find_and_rank) with an explicit ordering
    pub async fn find_and_rank_by(
        &self,
        midpoint: &Midpoint,
        category: &Category,
        origin_a: &Address,
        origin_b: &Address,
        order: VenueOrder,
    ) -> Result<Vec<Venue>, FinderError> {
        let places = self
            .maps
            .nearby_search(midpoint.coordinate, midpoint.search_radius_meters, category)
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FinderError::Timeout { operation: "venue search" }
                } else {
                    tracing::error!("Places search failed: {}", e);
                    FinderError::VenueSearchFailed(e)
                }
            })?;

        let mut venues: Vec<Venue> = places
            .into_iter()
            .map(|place| self.to_venue(place, midpoint, origin_a, origin_b))
            .collect();

        if venues.is_empty() {
            tracing::info!("No {} venues within {}m of the midpoint", category, midpoint.search_radius_meters);
            return Ok(venues);
        }

        let destinations: Vec<String> = venues.iter().map(destination_of).collect();

        let (from_a, from_b) = tokio::join!(
            self.drive_times(origin_a, &destinations),
            self.drive_times(origin_b, &destinations),
        );

        attach_drive_times(&mut venues, &from_a, &from_b);
        order_venues(&mut venues, order);

        Ok(venues)
    }

    /// Travel times from `origin`; any failure yields `Unknown` for every destination
    async fn drive_times(&self, origin: &Address, destinations: &[String]) -> Vec<DriveTime> {
        match self
            .maps
            .distance_matrix(origin, destinations, self.travel_mode)
            .await
        {
            Ok(times) => times,
            Err(e) => {
                tracing::warn!("Drive times from {} unavailable: {}", origin, e);
                vec![DriveTime::Unknown; destinations.len()]
            }
        }
    }

    fn to_venue(&self, place: Place, midpoint: &Midpoint, origin_a: &Address, origin_b: &Address) -> Venue {
        let mut venue = Venue::new(place.name, place.address);
        venue.rating = place.rating;
        venue.rating_count = place.rating_count;
        venue.price_level = place.price_level;
        venue.coordinate = place.coordinate;
        venue.place_id = place.place_id;
        venue.photos = self.urls.photo_urls(&place.photo_references);
        venue.distance_from_midpoint_meters = place
            .coordinate
            .map(|c| haversine_meters(midpoint.coordinate, c));
        venue.maps_url = Some(search_link(&venue.name, &venue.address));
        venue.static_map_url = Some(
            self.urls
                .static_map_url(&StaticMap::for_venue(origin_a, origin_b, place.coordinate)),
        );
        venue
    }

    /// Run the whole pipeline for one request
    #[tracing::instrument(skip_all, fields(category = %query.category))]
    pub async fn find(&self, query: &MeetupQuery) -> Result<MeetingPoint, FinderError> {
        // Both addresses are checked before either geocoding call starts
        let address_a = Self::parse_address(&query.location_a)?;
        let address_b = Self::parse_address(&query.location_b)?;

        let (origin_a, origin_b) = tokio::try_join!(self.locate(address_a), self.locate(address_b))?;

        let midpoint = self.calculator.compute(origin_a.coordinate, origin_b.coordinate);
        let origin_separation_meters = haversine_meters(origin_a.coordinate, origin_b.coordinate);

        if is_sparse_search(origin_separation_meters, midpoint.search_radius_meters) {
            tracing::info!(
                "Origins are {:.0}m apart but the search radius is {}m; results may be sparse",
                origin_separation_meters,
                midpoint.search_radius_meters
            );
        }

        let venues = self
            .find_and_rank_by(
                &midpoint,
                &query.category,
                &origin_a.address,
                &origin_b.address,
                query.order,
            )
            .await?;

        tracing::info!(
            "Found {} venues between {} and {}",
            venues.len(),
            origin_a.address,
            origin_b.address
        );

        Ok(MeetingPoint {
            origin_a,
            origin_b,
            midpoint,
            origin_separation_meters,
            venues,
        })
    }
}

/// Distance-matrix destination for a venue: its address, or its coordinate if the address is blank
fn destination_of(venue: &Venue) -> String {
    match (venue.address.trim().is_empty(), venue.coordinate) {
        (true, Some(coordinate)) => coordinate.to_string(),
        _ => venue.address.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_rejects_blank() {
        assert!(matches!(
            MeetingPointFinder::parse_address("   "),
            Err(FinderError::InvalidInput(_))
        ));
        assert!(MeetingPointFinder::parse_address("Seattle, WA").is_ok());
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(FinderError::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(FinderError::Timeout { operation: "geocoding" }.status_code(), 504);
        assert_eq!(
            FinderError::VenueSearchFailed(GoogleMapsError::Http(500)).status_code(),
            502
        );
    }

    #[test]
    fn test_geocoding_error_message_names_address() {
        let error = FinderError::GeocodingFailed {
            address: "Nowhere".into(),
            source: GoogleMapsError::Http(500),
        };
        assert_eq!(error.to_string(), "Geocoding failed for address: Nowhere");
    }

    #[test]
    fn test_destination_falls_back_to_coordinate() {
        let mut venue = Venue::new("Kiosk", "");
        venue.coordinate = Some(Coordinate::new(1.5, 2.5));
        assert_eq!(destination_of(&venue), "1.5,2.5");

        let venue = Venue::new("Diner", "1 Main St");
        assert_eq!(destination_of(&venue), "1 Main St");
    }
}

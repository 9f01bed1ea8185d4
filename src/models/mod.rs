// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Address, Category, Coordinate, DriveTime, Midpoint, TravelMode, Venue, VenueOrder};
pub use requests::{FindMeetupRequest, GeocodeQuery, MidpointQuery};
pub use responses::{
    ErrorResponse, FindMeetupResponse, GeocodeResponse, HealthResponse, MidpointResponse,
    OriginsResponse,
};

//! Meet Halfway - finds places to meet between two addresses
//!
//! Geocodes both addresses, averages them into a midpoint, searches for
//! venues around it and annotates each venue with travel times from both
//! origins. Geocoding, place search, travel times and map rendering are
//! delegated to Google Maps.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{MidpointCalculator, haversine_meters};
pub use models::{Address, Category, Coordinate, DriveTime, Midpoint, Venue, VenueOrder};
pub use services::{FinderError, MeetingPointFinder};

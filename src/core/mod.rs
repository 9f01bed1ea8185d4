// Core algorithm exports
pub mod distance;
pub mod midpoint;
pub mod ranking;

pub use distance::{haversine_meters, is_sparse_search};
pub use midpoint::{MidpointCalculator, DEFAULT_SEARCH_RADIUS_METERS};
pub use ranking::{attach_drive_times, order_venues};

// Service exports
pub mod finder;
pub mod google_maps;
pub mod map_urls;

pub use finder::{FinderError, MeetingPoint, MeetingPointFinder, MeetupQuery, ResolvedAddress};
pub use google_maps::{GoogleMapsClient, GoogleMapsError, Place, ProviderStatus};
pub use map_urls::{search_link, MapUrlBuilder, Marker, MarkerLocation, StaticMap};

use crate::models::{Address, Coordinate};
use crate::services::google_maps::GoogleMapsError;
use reqwest::Url;

/// Marker colour for the two origins
pub const ORIGIN_MARKER_COLOR: &str = "0x0071e3";
/// Marker colour for the venue
pub const VENUE_MARKER_COLOR: &str = "0xDC2626";

const PHOTO_MAX_WIDTH: u32 = 800;

/// Dark map styling applied to every static map
const STATIC_MAP_STYLES: [&str; 4] = [
    "feature:all|element:labels|visibility:on",
    "feature:all|element:geometry|color:0x242f3e",
    "feature:road|element:geometry|color:0x38414e",
    "feature:water|element:geometry|color:0x17263c",
];

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerLocation {
    Coordinate(Coordinate),
    Address(String),
}

/// One `markers=` entry of a static map request
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub color: &'static str,
    pub label: Option<char>,
    pub location: MarkerLocation,
}

impl Marker {
    fn spec(&self) -> String {
        let mut spec = format!("color:{}", self.color);
        if let Some(label) = self.label {
            spec.push_str(&format!("|label:{}", label));
        }
        match &self.location {
            MarkerLocation::Coordinate(c) => spec.push_str(&format!("|{}", c)),
            // '|' separates marker fields
            MarkerLocation::Address(a) => spec.push_str(&format!("|{}", a.replace('|', " "))),
        }
        spec
    }
}

/// Static map request: markers plus presentation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMap {
    pub markers: Vec<Marker>,
    pub width: u32,
    pub height: u32,
    pub scale: u8,
    pub zoom: u8,
}

impl StaticMap {
    /// Both origins in blue, labelled A and B, and the venue in red if it has a coordinate
    pub fn for_venue(origin_a: &Address, origin_b: &Address, venue: Option<Coordinate>) -> Self {
        let mut markers = vec![
            Marker {
                color: ORIGIN_MARKER_COLOR,
                label: Some('A'),
                location: MarkerLocation::Address(origin_a.to_string()),
            },
            Marker {
                color: ORIGIN_MARKER_COLOR,
                label: Some('B'),
                location: MarkerLocation::Address(origin_b.to_string()),
            },
        ];

        if let Some(coordinate) = venue {
            markers.push(Marker {
                color: VENUE_MARKER_COLOR,
                label: None,
                location: MarkerLocation::Coordinate(coordinate),
            });
        }

        Self {
            markers,
            width: 400,
            height: 400,
            scale: 2,
            zoom: 12,
        }
    }
}

/// Builds URLs that end up in a browser
///
/// These carry the public API key, never the server key.
#[derive(Debug, Clone)]
pub struct MapUrlBuilder {
    base_url: Url,
    public_api_key: String,
    max_photos: usize,
}

impl MapUrlBuilder {
    pub fn new(base_url: &str, public_api_key: String, max_photos: usize) -> Result<Self, GoogleMapsError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| GoogleMapsError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            base_url,
            public_api_key,
            max_photos,
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        // Paths are constants relative to a URL that already parsed
        self.base_url.join(path).unwrap_or_else(|_| self.base_url.clone())
    }

    pub fn static_map_url(&self, map: &StaticMap) -> String {
        let mut url = self.endpoint("maps/api/staticmap");
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("size", &format!("{}x{}", map.width, map.height))
                .append_pair("scale", &map.scale.to_string())
                .append_pair("zoom", &map.zoom.to_string())
                .append_pair("key", &self.public_api_key);
            for style in STATIC_MAP_STYLES {
                query.append_pair("style", style);
            }
            for marker in &map.markers {
                query.append_pair("markers", &marker.spec());
            }
        }
        url.into()
    }

    /// Photo URLs for up to `max_photos` provider photo references
    pub fn photo_urls(&self, references: &[String]) -> Vec<String> {
        references
            .iter()
            .take(self.max_photos)
            .map(|reference| {
                let mut url = self.endpoint("maps/api/place/photo");
                url.query_pairs_mut()
                    .append_pair("maxwidth", &PHOTO_MAX_WIDTH.to_string())
                    .append_pair("photo_reference", reference)
                    .append_pair("key", &self.public_api_key);
                url.into()
            })
            .collect()
    }

    /// Maps JavaScript loader with the places library
    pub fn script_loader_url(&self) -> String {
        let mut url = self.endpoint("maps/api/js");
        url.query_pairs_mut()
            .append_pair("key", &self.public_api_key)
            .append_pair("libraries", "places");
        url.into()
    }
}

/// Google Maps search link for a venue
pub fn search_link(name: &str, address: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        urlencoding::encode(&format!("{} {}", name, address))
    )
}

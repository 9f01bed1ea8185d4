//! Integration tests for the HTTP API.

use actix_web::{test, web, App};
use meet_halfway::core::MidpointCalculator;
use meet_halfway::models::TravelMode;
use meet_halfway::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use meet_halfway::services::{GoogleMapsClient, MapUrlBuilder, MeetingPointFinder};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn create_state(base_url: &str, interactive_maps: bool) -> AppState {
    let maps = GoogleMapsClient::new(base_url, "server-key".to_string(), Duration::from_secs(5)).unwrap();
    let urls = MapUrlBuilder::new(base_url, "public-key".to_string(), 3).unwrap();

    AppState {
        finder: Arc::new(MeetingPointFinder::new(
            maps,
            urls,
            MidpointCalculator::default(),
            TravelMode::Driving,
        )),
        default_category: "restaurant".to_string(),
        interactive_maps,
    }
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test_app!(create_state("http://127.0.0.1:9", false));

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_midpoint_endpoint() {
    let app = test_app!(create_state("http://127.0.0.1:9", false));

    let req = test::TestRequest::get()
        .uri("/api/v1/midpoint?latA=10&lngA=20&latB=20&lngB=40")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["lat"], 15.0);
    assert_eq!(body["lng"], 30.0);
    assert_eq!(body["searchRadius"], 1000);
}

#[actix_web::test]
async fn test_midpoint_endpoint_rejects_out_of_range() {
    let app = test_app!(create_state("http://127.0.0.1:9", false));

    let req = test::TestRequest::get()
        .uri("/api/v1/midpoint?latA=95&lngA=20&latB=20&lngB=40")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_midpoint_endpoint_rejects_nan() {
    let app = test_app!(create_state("http://127.0.0.1:9", false));

    let req = test::TestRequest::get()
        .uri("/api/v1/midpoint?latA=NaN&lngA=20&latB=20&lngB=40")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_input");
}

#[actix_web::test]
async fn test_find_rejects_whitespace_address() {
    let app = test_app!(create_state("http://127.0.0.1:9", false));

    let req = test::TestRequest::post()
        .uri("/api/v1/meetups/find")
        .set_json(json!({"locationA": "Seattle, WA", "locationB": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_input");
}

#[actix_web::test]
async fn test_find_rejects_malformed_json() {
    let app = test_app!(create_state("http://127.0.0.1:9", false));

    let req = test::TestRequest::post()
        .uri("/api/v1/meetups/find")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_find_rejects_bad_category() {
    let app = test_app!(create_state("http://127.0.0.1:9", false));

    let req = test::TestRequest::post()
        .uri("/api/v1/meetups/find")
        .set_json(json!({"locationA": "Seattle, WA", "locationB": "Portland, OR", "category": "bar;drop"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_find_end_to_end_response_shape() {
    let mut server = Server::new_async().await;

    for (address, lat, lng) in [("Seattle, WA", 47.6062, -122.3321), ("Portland, OR", 45.5152, -122.6784)] {
        server
            .mock("GET", "/maps/api/geocode/json")
            .match_query(Matcher::UrlEncoded("address".into(), address.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"status": "OK", "results": [{"geometry": {"location": {"lat": lat, "lng": lng}}}]}).to_string())
            .create_async()
            .await;
    }

    server
        .mock("GET", "/maps/api/place/nearbysearch/json")
        .match_query(Matcher::UrlEncoded("type".into(), "restaurant".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"status": "OK", "results": [{"name": "Example Diner", "vicinity": "1 Main St", "rating": 4.4, "user_ratings_total": 87}]})
                .to_string(),
        )
        .create_async()
        .await;

    for (origin, seconds) in [("Seattle, WA", 5520), ("Portland, OR", 5280)] {
        server
            .mock("GET", "/maps/api/distancematrix/json")
            .match_query(Matcher::UrlEncoded("origins".into(), origin.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"status": "OK", "rows": [{"elements": [{"status": "OK", "duration": {"value": seconds}}]}]}).to_string())
            .create_async()
            .await;
    }

    let app = test_app!(create_state(&server.url(), true));

    let req = test::TestRequest::post()
        .uri("/api/v1/meetups/find")
        .set_json(json!({"locationA": "Seattle, WA", "locationB": "Portland, OR"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["midpoint"]["searchRadius"], 1000);
    assert_eq!(body["origins"]["a"]["address"], "Seattle, WA");
    assert_eq!(body["suggestions"][0]["name"], "Example Diner");
    assert_eq!(body["suggestions"][0]["driveTimeFromA"], "92 mins");
    assert_eq!(body["suggestions"][0]["driveTimeFromB"], "88 mins");
    assert!(body["mapsScriptUrl"].as_str().unwrap().contains("libraries=places"));
}

#[actix_web::test]
async fn test_venue_search_failure_maps_to_bad_gateway() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"status": "OK", "results": [{"geometry": {"location": {"lat": 1.0, "lng": 2.0}}}]}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/maps/api/place/nearbysearch/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"status": "OVER_QUERY_LIMIT"}).to_string())
        .create_async()
        .await;

    let app = test_app!(create_state(&server.url(), false));

    let req = test::TestRequest::post()
        .uri("/api/v1/meetups/find")
        .set_json(json!({"locationA": "A town", "locationB": "B town", "category": "cafe"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 502);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "venue_search_failed");
}

#[actix_web::test]
async fn test_geocode_endpoint_failure_is_unprocessable() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"status": "ZERO_RESULTS", "results": []}).to_string())
        .create_async()
        .await;

    let app = test_app!(create_state(&server.url(), false));

    let req = test::TestRequest::get()
        .uri("/api/v1/geocode?address=Atlantis")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Geocoding failed for address: Atlantis");
}

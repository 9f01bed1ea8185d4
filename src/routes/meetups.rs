use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::haversine_meters;
use crate::models::{
    Category, ErrorResponse, FindMeetupRequest, FindMeetupResponse, GeocodeQuery,
    GeocodeResponse, HealthResponse, MidpointQuery, MidpointResponse, OriginsResponse,
};
use crate::services::{FinderError, MeetingPointFinder, MeetupQuery};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<MeetingPointFinder>,
    pub default_category: String,
    /// Clients can load the Maps JavaScript API
    pub interactive_maps: bool,
}

/// Configure all meetup-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/meetups/find", web::post().to(find_meetup))
        .route("/geocode", web::get().to(geocode))
        .route("/midpoint", web::get().to(midpoint));
}

fn error_response(error: &FinderError) -> HttpResponse {
    let status = StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse {
        error: error.kind().to_string(),
        message: error.to_string(),
        status_code: status.as_u16(),
    })
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find meetup endpoint
///
/// POST /api/v1/meetups/find
///
/// Request body:
/// ```json
/// {
///   "locationA": "Seattle, WA",
///   "locationB": "Portland, OR",
///   "category": "restaurant",
///   "order": "provider"
/// }
/// ```
async fn find_meetup(
    state: web::Data<AppState>,
    req: web::Json<FindMeetupRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_meetup request: {:?}", errors);
        return validation_error(errors);
    }

    let raw_category = req.category.as_deref().unwrap_or(state.default_category.as_str());
    let category = match Category::parse(raw_category) {
        Some(category) => category,
        None => {
            return error_response(&FinderError::InvalidInput(format!(
                "Unknown place category: {}",
                raw_category
            )))
        }
    };

    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, "Finding {} venues, order: {:?}", category, req.order);

    let query = MeetupQuery {
        location_a: req.location_a.clone(),
        location_b: req.location_b.clone(),
        category,
        order: req.order,
    };

    match state.finder.find(&query).await {
        Ok(found) => {
            let mut midpoint = MidpointResponse::from(found.midpoint);
            midpoint.origin_separation_meters = Some(found.origin_separation_meters);

            let maps_script_url = state
                .interactive_maps
                .then(|| state.finder.urls().script_loader_url());

            HttpResponse::Ok().json(FindMeetupResponse {
                success: true,
                midpoint,
                origins: OriginsResponse {
                    a: GeocodeResponse::new(found.origin_a.address.as_str(), found.origin_a.coordinate),
                    b: GeocodeResponse::new(found.origin_b.address.as_str(), found.origin_b.coordinate),
                },
                suggestions: found.venues,
                maps_script_url,
            })
        }
        Err(e) => {
            tracing::warn!(%request_id, "Meetup search failed: {}", e);
            error_response(&e)
        }
    }
}

/// Geocode endpoint
///
/// GET /api/v1/geocode?address={address}
async fn geocode(
    state: web::Data<AppState>,
    query: web::Query<GeocodeQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    match state.finder.resolve(&query.address).await {
        Ok(resolved) => HttpResponse::Ok().json(GeocodeResponse::new(
            resolved.address.as_str(),
            resolved.coordinate,
        )),
        Err(e) => error_response(&e),
    }
}

/// Midpoint endpoint; pure computation, no provider calls
///
/// GET /api/v1/midpoint?latA=..&lngA=..&latB=..&lngB=..
async fn midpoint(
    state: web::Data<AppState>,
    query: web::Query<MidpointQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let (a, b) = match query.origins() {
        Some(origins) => origins,
        None => {
            return error_response(&FinderError::InvalidInput(
                "Coordinates must be finite numbers".to_string(),
            ))
        }
    };

    let mut response = MidpointResponse::from(state.finder.calculator().compute(a, b));
    response.origin_separation_meters = Some(haversine_meters(a, b));

    HttpResponse::Ok().json(response)
}

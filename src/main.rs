use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use meet_halfway::config::{LoggingSettings, Settings};
use meet_halfway::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use meet_halfway::services::MeetingPointFinder;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Logging is not up yet, so configuration errors go to stderr
    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting Meet Halfway service...");

    let finder = MeetingPointFinder::from_settings(&settings.google, &settings.search).map_err(|e| {
        error!("Failed to initialize Google Maps client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Finder initialized (radius: {}m, travel mode: {}, timeout: {}s)",
        settings.search.radius_meters,
        settings.search.travel_mode.as_str(),
        settings.google.timeout_secs
    );

    let app_state = AppState {
        finder: Arc::new(finder),
        default_category: settings.search.default_category.clone(),
        interactive_maps: settings.platform.interactive_maps,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

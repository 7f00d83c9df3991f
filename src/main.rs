use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use provider_directory::config::{LogFormat, LoggingSettings, Settings};
use provider_directory::core::{parse_providers, RecordStore};
use provider_directory::routes::{self, providers::AppState};
use provider_directory::services::GeocodingClient;
use provider_directory::view::{DirectorySession, MapState};
use std::io;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

fn load_store(path: &str) -> io::Result<RecordStore> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        error!("Failed to read provider data from {}: {}", path, e);
        e
    })?;

    let providers = parse_providers(&text).map_err(|e| {
        error!("Failed to parse provider data from {}: {}", path, e);
        io::Error::new(io::ErrorKind::InvalidData, e)
    })?;

    Ok(RecordStore::new(providers))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    info!("Starting provider directory...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    // A failed load is fatal: never serve a partial record set
    let store = load_store(&settings.data.providers_csv)?;

    let geocoder = GeocodingClient::new(
        settings.geocoding.endpoint.clone(),
        settings.geocoding.api_key.clone(),
        settings.geocoding.region.clone(),
        settings.geocoding.timeout_secs,
        settings.geocoding.cache_size,
        settings.geocoding.cache_ttl_secs,
    )
    .map_err(|e| {
        error!("Failed to create geocoding client: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;

    info!("Geocoding client initialized (region: {})", geocoder.region());

    let options = settings.map.view_options();
    let map = MapState::new(options.default_center, options.default_zoom);
    let session = DirectorySession::new(store, map, options);

    let app_state = AppState {
        session: Arc::new(Mutex::new(session)),
        geocoder: Arc::new(geocoder),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(2);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
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

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, FacetsResponse, FocusResponse, HealthResponse, ProviderSummary, SearchRequest, SearchResponse,
};
use crate::services::GeocodingClient;
use crate::view::{resolve_origin, DirectorySession, MapState, SearchOutcome};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<DirectorySession<MapState>>>,
    pub geocoder: Arc<GeocodingClient>,
}

/// Configure all provider-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/providers/facets", web::get().to(facets))
        .route("/providers/search", web::post().to(search_providers))
        .route("/providers/clear", web::post().to(clear_search))
        .route("/providers/{id}/focus", web::get().to(focus_provider))
        .route("/map", web::get().to(map_state));
}

fn build_response(session: &DirectorySession<MapState>, outcome: SearchOutcome) -> SearchResponse {
    let region_code = &session.options().region_code;

    SearchResponse {
        count: outcome.result.len(),
        count_label: outcome.result.count_label(),
        providers: outcome
            .result
            .iter()
            .map(|p| ProviderSummary::from_provider(p, region_code))
            .collect(),
        map: session.map().clone(),
        stats: outcome.stats,
        notice: outcome.notice,
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let providers = state.session.lock().await.store().len();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers,
        timestamp: chrono::Utc::now(),
    })
}

/// Specialty facet endpoint
///
/// GET /api/v1/providers/facets
async fn facets(state: web::Data<AppState>) -> impl Responder {
    let session = state.session.lock().await;

    HttpResponse::Ok().json(FacetsResponse {
        specialties: session.store().facet_specialties().to_vec(),
    })
}

/// Search endpoint
///
/// POST /api/v1/providers/search
///
/// Request body:
/// ```json
/// {
///   "name": "lee",
///   "specialties": ["Pediatrics"],
///   "zip": "02903",
///   "radiusMiles": 10,
///   "gender": "Female",
///   "acceptingOnly": true
/// }
/// ```
async fn search_providers(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Resolve before locking; a late lookup only affects its own search
    let origin = resolve_origin(&req, state.geocoder.as_ref()).await;

    let mut session = state.session.lock().await;
    let outcome = session.apply_search(&req, origin);

    tracing::info!(
        "Search returned {} providers ({} markers)",
        outcome.result.len(),
        outcome.stats.markers
    );

    HttpResponse::Ok().json(build_response(&session, outcome))
}

/// Clear endpoint
///
/// POST /api/v1/providers/clear
async fn clear_search(state: web::Data<AppState>) -> impl Responder {
    let mut session = state.session.lock().await;
    let outcome = session.clear();

    HttpResponse::Ok().json(build_response(&session, outcome))
}

/// Marker focus endpoint
///
/// GET /api/v1/providers/{id}/focus
async fn focus_provider(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let provider_id = path.into_inner();
    let mut session = state.session.lock().await;

    match session.focus(&provider_id) {
        Some(provider) => {
            let summary = ProviderSummary::from_provider(&provider, &session.options().region_code);
            HttpResponse::Ok().json(FocusResponse {
                provider: summary,
                map: session.map().clone(),
            })
        }
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Provider not on map".to_string(),
            message: format!("No marker is shown for provider {}", provider_id),
            status_code: 404,
        }),
    }
}

/// Current map overlay
///
/// GET /api/v1/map
async fn map_state(state: web::Data<AppState>) -> impl Responder {
    let session = state.session.lock().await;
    HttpResponse::Ok().json(session.map())
}

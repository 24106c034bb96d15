use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::RecommendationEngine;
use crate::models::{ErrorResponse, HealthResponse, RecommendationsRequest, RecommendationsResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: RecommendationEngine,
}

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommendations));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "profile": { "name": "string", "eventPreferences": { "categories": ["CULTURAL"] } }
/// }
/// ```
///
/// Always answers 200 once the request is valid; a degraded answer is
/// reported through `source` (`fallback` or `none`), never as an error.
async fn recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendationsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendations request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = uuid::Uuid::new_v4().to_string();

    tracing::info!("Recommending events for user: {} (request {})", req.user_id, request_id);

    let result = state.engine.recommend(&req.profile).await;

    let response = RecommendationsResponse {
        request_id,
        user_id: req.user_id.clone(),
        source: result.source,
        total_results: result.matches.len(),
        events: result.matches,
    };

    HttpResponse::Ok().json(response)
}

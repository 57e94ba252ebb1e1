use crate::models::health::HealthResponse;
use crate::validation::tld;
use actix_web::{HttpResponse, Responder, get};

/// # Health Check Endpoint
///
/// ## Response
///
/// - **200 OK**: Service is healthy
///   - Body: JSON object with `status` ("UP"), `timestamp` in ISO 8601 format
///     and `registry_locked`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health Check"
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::up(tld::registry().is_locked()))
}

pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(health);
}

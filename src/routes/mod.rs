// Route exports
pub mod matching;
pub mod pets;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{AuthError, CacheManager, JwtVerifier, PostgresClient, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PostgresClient>,
    pub cache: Arc<CacheManager>,
    pub auth: JwtVerifier,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/pets")
            // Literal segments must register before the {pet_id} patterns
            .configure(matching::configure)
            .configure(pets::configure),
    );
}

pub(crate) fn error_body(error: &str, message: impl Into<String>, status_code: u16) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    }
}

pub(crate) fn unauthorized(err: AuthError) -> HttpResponse {
    HttpResponse::Unauthorized().json(error_body("unauthorized", err.to_string(), 401))
}

pub(crate) fn not_found(message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(error_body("not_found", message, 404))
}

pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(error_body("validation_failed", message, 400))
}

pub(crate) fn forbidden(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(error_body("ownership_violation", message, 403))
}

pub(crate) fn store_failure(err: StoreError) -> HttpResponse {
    tracing::error!("Store operation failed: {}", err);
    HttpResponse::InternalServerError().json(error_body("storage_error", err.to_string(), 500))
}

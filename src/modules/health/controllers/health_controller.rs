use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::core::clock::format_iso8601;
use crate::modules::quotes::services::QuoteService;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub stores: bool,
    pub price_candidates: usize,
    pub tax_rules: usize,
}

/// GET /health - Liveness probe
/// Returns 200 if the application can respond to requests
pub async fn health_check() -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: format_iso8601(chrono::Utc::now()),
        service: "pricetax".to_string(),
    };

    HttpResponse::Ok().json(response)
}

/// GET /ready - Readiness probe
/// Returns 200 once both stores answer
pub async fn readiness_check(service: web::Data<QuoteService>) -> impl Responder {
    match service.store_status().await {
        Ok(status) => HttpResponse::Ok().json(ReadinessResponse {
            ready: true,
            checks: ReadinessChecks {
                stores: true,
                price_candidates: status.price_candidates,
                tax_rules: status.tax_rules,
            },
        }),
        Err(e) => {
            tracing::error!("Store readiness check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(ReadinessResponse {
                ready: false,
                checks: ReadinessChecks {
                    stores: false,
                    price_candidates: 0,
                    tax_rules: 0,
                },
            })
        }
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}

//! Quote controller for HTTP endpoints
//!
//! Thin JSON adapter over `QuoteService`. Errors render through
//! `AppError`'s `ResponseError` impl.

use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::modules::quotes::models::{EvaluateQuoteRequest, QuoteRequest};
use crate::modules::quotes::services::QuoteService;

/// Quote a variant from the configured stores
///
/// POST /quotes
pub async fn create_quote(
    service: web::Data<QuoteService>,
    request: web::Json<QuoteRequest>,
) -> Result<HttpResponse> {
    let quote = service.quote(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quote))
}

/// Quote a variant from caller-supplied candidates and rules
///
/// POST /quotes/evaluate
pub async fn evaluate_quote(
    service: web::Data<QuoteService>,
    request: web::Json<EvaluateQuoteRequest>,
) -> Result<HttpResponse> {
    let quote = service.evaluate(request.into_inner())?;
    Ok(HttpResponse::Ok().json(quote))
}

/// Configure quote routes
pub fn configure_quote_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/quotes")
            .route("", web::post().to(create_quote))
            .route("/evaluate", web::post().to(evaluate_quote)),
    );
}

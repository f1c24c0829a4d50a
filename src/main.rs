use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricetax::config::{Config, LogFormat, PricingCatalog};
use pricetax::core::SystemClock;
use pricetax::middleware::{json_error_handler, ErrorHandler, RequestId};
use pricetax::modules;
use pricetax::prices::InMemoryPriceCandidateRepository;
use pricetax::quotes::QuoteService;
use pricetax::taxes::InMemoryTaxRuleRepository;

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("pricetax={},actix_web=info", config.app.log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting price & tax resolution service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let catalog = match &config.pricing.data_path {
        Some(path) => PricingCatalog::from_path(path)
            .with_context(|| format!("Failed to load pricing catalog from {}", path))?,
        None => {
            tracing::warn!("PRICING_DATA_PATH not set, starting with empty stores");
            PricingCatalog::default()
        }
    };

    let quote_service = web::Data::new(QuoteService::new(
        Arc::new(InMemoryPriceCandidateRepository::new(catalog.price_candidates)),
        Arc::new(InMemoryTaxRuleRepository::new(catalog.tax_rules)),
        Arc::new(SystemClock),
        config.pricing.max_quantity,
    ));

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(quote_service.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

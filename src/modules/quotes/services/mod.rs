pub mod pricing_service;
pub mod quote_service;

pub use pricing_service::PricingService;
pub use quote_service::{QuoteService, StoreStatus};

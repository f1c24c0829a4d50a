pub mod controllers;
pub mod models;
pub mod services;

pub use models::{EvaluateQuoteRequest, Quote, QuoteRequest};
pub use services::{PricingService, QuoteService};

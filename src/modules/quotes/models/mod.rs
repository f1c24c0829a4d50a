pub mod quote;

pub use quote::{EvaluateQuoteRequest, Quote, QuoteRequest};

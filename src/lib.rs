//! Price & tax resolution engine
//!
//! Resolves the effective unit price of a product variant for a purchasing
//! context and the itemized tax breakdown on that price. The engine itself is
//! pure; `QuoteService` and the HTTP adapter wrap it with store lookups.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::prices;
pub use modules::quotes;
pub use modules::taxes;

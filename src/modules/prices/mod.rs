pub mod models;
pub mod repositories;
pub mod services;

pub use models::{PriceCandidate, PriceContext, PriceContextInput, ResolvedPrice};
pub use repositories::{InMemoryPriceCandidateRepository, PriceCandidateRepository};
pub use services::PriceResolver;

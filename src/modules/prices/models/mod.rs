pub mod price_candidate;
pub mod price_context;
pub mod resolved_price;

pub use price_candidate::PriceCandidate;
pub use price_context::{PriceContext, PriceContextInput};
pub use resolved_price::ResolvedPrice;

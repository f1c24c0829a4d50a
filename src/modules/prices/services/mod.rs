pub mod price_resolver;

pub use price_resolver::{PriceResolver, RankedCandidate};

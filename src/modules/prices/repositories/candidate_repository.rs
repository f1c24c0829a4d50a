use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::Result;
use crate::modules::prices::models::PriceCandidate;

/// Store of raw price records
///
/// Returns every record for a variant; the resolver does all filtering.
#[async_trait]
pub trait PriceCandidateRepository: Send + Sync {
    /// All candidates for a variant, unfiltered
    async fn find_by_variant(&self, variant_id: &str) -> Result<Vec<PriceCandidate>>;

    /// Number of stored candidates
    async fn count(&self) -> Result<usize>;
}

/// Candidate store held in memory, seeded from the pricing catalog
#[derive(Default)]
pub struct InMemoryPriceCandidateRepository {
    candidates: RwLock<Vec<PriceCandidate>>,
}

impl InMemoryPriceCandidateRepository {
    pub fn new(candidates: Vec<PriceCandidate>) -> Self {
        Self {
            candidates: RwLock::new(candidates),
        }
    }
}

#[async_trait]
impl PriceCandidateRepository for InMemoryPriceCandidateRepository {
    async fn find_by_variant(&self, variant_id: &str) -> Result<Vec<PriceCandidate>> {
        let candidates = self.candidates.read().await;
        Ok(candidates
            .iter()
            .filter(|c| c.variant_id == variant_id)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.candidates.read().await.len())
    }
}

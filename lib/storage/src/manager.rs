use crate::catalog::CatalogStore;
use catalogrec_core::{IndexState, Recommendation, Result, ScoredProduct, Tier, DEFAULT_RECOMMENDATIONS};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Owns the active tier's index and swaps it on tier changes.
///
/// Queries clone the current `Arc<IndexState>` and work on that, so a
/// reload never exposes a half-built state: the replacement is built
/// without holding the lock and published with one pointer swap.
pub struct RecommenderService {
    store: Arc<dyn CatalogStore>,
    state: RwLock<Arc<IndexState>>,
    reload_lock: Mutex<()>,
}

impl RecommenderService {
    /// Load `tier` from `store` and build its index
    pub fn new(store: Arc<dyn CatalogStore>, tier: Tier) -> Result<Self> {
        let rows = store.fetch_all(tier)?;
        let state = IndexState::build(tier, rows);
        tracing::info!(tier = %tier, products = state.len(), "recommender initialized");

        Ok(Self {
            store,
            state: RwLock::new(Arc::new(state)),
            reload_lock: Mutex::new(()),
        })
    }

    /// Current index state. Stays valid across later reloads.
    #[inline]
    pub fn state(&self) -> Arc<IndexState> {
        self.state.read().clone()
    }

    #[inline]
    pub fn current_tier(&self) -> Tier {
        self.state.read().tier()
    }

    /// Reload `tier` from the store, rebuild, and publish.
    ///
    /// On a store failure the previous state stays in place.
    pub fn reload(&self, tier: Tier) -> Result<Arc<IndexState>> {
        let _guard = self.reload_lock.lock();

        let rows = self.store.fetch_all(tier).map_err(|e| {
            tracing::warn!(tier = %tier, error = %e, "catalog reload failed");
            e
        })?;
        let state = Arc::new(IndexState::build(tier, rows));

        *self.state.write() = state.clone();
        tracing::info!(
            tier = %tier,
            products = state.len(),
            vocabulary = state.model().vocabulary_len(),
            build_ms = state.build_time().as_millis() as u64,
            "index published"
        );
        Ok(state)
    }

    /// Switch to the tier at `tier_index` and rebuild.
    /// An out-of-range index is rejected and nothing changes.
    pub fn select(&self, tier_index: usize) -> Result<Tier> {
        let tier = Tier::from_index(tier_index)?;
        self.reload(tier)?;
        Ok(tier)
    }

    pub fn recommend(&self, category: &str, limit: usize) -> Vec<Recommendation> {
        self.state().recommend(category, limit)
    }

    pub fn recommend_default(&self, category: &str) -> Vec<Recommendation> {
        self.recommend(category, DEFAULT_RECOMMENDATIONS)
    }

    pub fn list_categories(&self) -> Vec<String> {
        self.state().categories().to_vec()
    }

    pub fn similar_products(&self, position: usize, limit: usize) -> Result<Vec<ScoredProduct>> {
        self.state().similar_products(position, limit)
    }
}

use catalogrec_core::{Error, ProductRow, Result, Tier};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Source of catalog rows, one table per tier.
///
/// `fetch_all` is a full, unpaginated read in table order. Failures are
/// reported as [`Error::DataUnavailable`]; callers do not retry.
pub trait CatalogStore: Send + Sync {
    fn fetch_all(&self, tier: Tier) -> Result<Vec<ProductRow>>;
}

/// In-memory catalog, mostly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: RwLock<HashMap<Tier, Vec<ProductRow>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole table for `tier`
    pub fn replace_tier(&self, tier: Tier, rows: Vec<ProductRow>) {
        self.tables.write().insert(tier, rows);
    }

    /// Drop the table for `tier`; later reads of it fail
    pub fn remove_tier(&self, tier: Tier) -> bool {
        self.tables.write().remove(&tier).is_some()
    }

    #[must_use]
    pub fn count(&self, tier: Tier) -> usize {
        self.tables.read().get(&tier).map_or(0, Vec::len)
    }
}

impl CatalogStore for MemoryCatalog {
    fn fetch_all(&self, tier: Tier) -> Result<Vec<ProductRow>> {
        self.tables
            .read()
            .get(&tier)
            .cloned()
            .ok_or_else(|| Error::DataUnavailable(format!("table '{}' does not exist", tier)))
    }
}

//! # catalogrec
//!
//! A content-similarity product recommender for tiered catalogs.
//!
//! catalogrec loads the product table of the selected tier, builds a TF-IDF
//! vector space over the category labels together with an all-pairs cosine
//! similarity matrix, and answers category queries with exact-then-substring
//! label matching.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! catalogrec --data-dir ./data --seed catalog.json --http-port 5000
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use catalogrec::prelude::*;
//! use std::sync::Arc;
//!
//! let catalog = MemoryCatalog::new();
//! catalog.replace_tier(Tier::Mainstream, vec![
//!     ProductRow::new("A", "wireless", Some("mouse")),
//!     ProductRow::new("B", "cloth", Some("mouse pad")),
//! ]);
//!
//! let service = RecommenderService::new(Arc::new(catalog), Tier::Mainstream).unwrap();
//! let products = service.recommend_default("mouse");
//! assert_eq!(products.len(), 2);
//! ```
//!
//! ## Crate Structure
//!
//! - `catalogrec-core` - Product model, TF-IDF space, similarity matrix, matching
//! - `catalogrec-storage` - Catalog stores (LMDB, in-memory), seed import, service
//! - `catalogrec-api` - REST API

// Re-export core types
pub use catalogrec_core::{
    IndexState, Recommendation, ScoredProduct, DEFAULT_RECOMMENDATIONS,
    ProductRow, Tier,
    TfIdfModel, SimilarityMatrix, SparseVector,
    Error, Result,
};

// Re-export storage
pub use catalogrec_storage::{CatalogStore, MemoryCatalog, LmdbCatalog, RecommenderService, import_seed_file};

// Re-export API
pub use catalogrec_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        IndexState, Recommendation, DEFAULT_RECOMMENDATIONS,
        ProductRow, Tier,
        Error, Result,
        CatalogStore, MemoryCatalog, LmdbCatalog, RecommenderService,
        RestApi,
    };
}

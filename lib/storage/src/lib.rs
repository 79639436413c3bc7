pub mod catalog;
pub mod lmdb_catalog;
pub mod manager;
pub mod seed;

pub use catalog::{CatalogStore, MemoryCatalog};
pub use lmdb_catalog::LmdbCatalog;
pub use manager::RecommenderService;
pub use seed::{import_seed_file, parse_seed};

//! # catalogrec Core
//!
//! Core library for the catalogrec product recommender.
//!
//! This crate provides the data model and the algorithms:
//!
//! - [`ProductRow`] / [`Tier`] - Catalog rows and the tier that selects their table
//! - [`TfIdfModel`] - TF-IDF vector space over category labels
//! - [`SimilarityMatrix`] - All-pairs cosine similarity between products
//! - [`IndexState`] - A tier snapshot with its derived index, answering category queries
//!
//! ## Example
//!
//! ```rust
//! use catalogrec_core::{IndexState, ProductRow, Tier};
//!
//! let rows = vec![
//!     ProductRow::new("A", "wireless", Some("mouse")),
//!     ProductRow::new("B", "cloth", Some("mouse pad")),
//!     ProductRow::new("C", "mechanical", Some("keyboard")),
//! ];
//! let state = IndexState::build(Tier::Mainstream, rows);
//!
//! let recs = state.recommend("mouse", 8);
//! assert_eq!(recs.len(), 2);
//! assert_eq!(recs[0].name, "A");
//! ```

pub mod error;
pub mod index;
pub mod product;
pub mod similarity;
pub mod tfidf;
pub mod tokenize;
pub mod vector;

pub use error::{Error, Result};
pub use index::{IndexState, Recommendation, ScoredProduct, DEFAULT_RECOMMENDATIONS};
pub use product::{ProductRow, Tier};
pub use similarity::SimilarityMatrix;
pub use tfidf::TfIdfModel;
pub use tokenize::{tokenize, ENGLISH_STOP_WORDS};
pub use vector::SparseVector;

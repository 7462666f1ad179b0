//! # wordsim - Word Similarity Search
//!
//! wordsim finds the words most similar to a query word in a small table of
//! precomputed word embeddings, ranking every other word by cosine similarity.
//! Each score can be explained step by step: per-dimension products, the dot
//! product, both magnitudes and the final ratio.
//!
//! ## Example
//!
//! ```
//! use wordsim::{Dataset, ExplainOutcome, SearchOutcome, SimilarityEngine, VectorStore};
//!
//! let store = VectorStore::load(Dataset::new(
//!     "pets",
//!     vec!["cat".to_string(), "dog".to_string(), "fish".to_string()],
//!     vec![vec![1.0, 0.0], vec![0.9, 0.1], vec![0.0, 1.0]],
//! )).unwrap();
//!
//! let engine = SimilarityEngine::new(&store);
//!
//! if let SearchOutcome::Found(results) = engine.search("cat") {
//!     assert_eq!(results[0].word, "dog"); // Most similar word
//! }
//!
//! if let ExplainOutcome::Found(breakdown) = engine.explain("cat", "dog") {
//!     assert_eq!(format!("{:.6}", breakdown.similarity), "0.993884");
//! }
//! ```

pub mod vector;
pub mod error;
pub mod suggest;
pub mod loader;
pub mod catalog;
pub mod config;
pub mod server;
mod store;
mod engine;
mod breakdown;

// Re-export the engine types as the primary public API
pub use breakdown::{CalculationBreakdown, DimensionProduct, MagnitudeBreakdown};
pub use catalog::{Catalog, DatasetInfo, Session};
pub use config::Settings;
pub use engine::{ExplainOutcome, SearchOutcome, SearchResult, SimilarityEngine, TOP_K};
pub use error::{CatalogError, DatasetError, LoadError};
pub use store::{Dataset, Entry, VectorStore};

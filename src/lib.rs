//! # inverted-index
//!
//! Build, persist, and query an inverted index mapping normalized terms to
//! the documents that contain them.
//!
//! ## Features
//!
//! - Regex tokenization with a lowercase, strip, and stop-word filter chain
//! - Deterministic, sorted posting lists
//! - Validated JSON persistence with atomic saves
//! - Per-word lookups with explicit AND/OR combination
//! - Parallel batch querying over a shared, immutable index
//!
//! ## Example
//!
//! ```
//! use inverted_index::prelude::*;
//!
//! let stop_words = StopWordSet::from_words(["the"]);
//! let index = IndexBuilder::new(stop_words.clone())
//!     .build([(1, "The cat sat."), (2, "The dog sat!")])
//!     .unwrap();
//!
//! let json = IndexStore::new().to_json(&index).unwrap();
//! assert_eq!(json, r#"{"cat":[1],"dog":[2],"sat":[1,2]}"#);
//!
//! let result = QueryEngine::new(index, stop_words)
//!     .query(["sat", "the"])
//!     .unwrap();
//! assert_eq!(result.get("sat").unwrap().as_slice(), &[1, 2]);
//! assert!(result.get("the").unwrap().is_empty());
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod storage;

pub mod prelude {
    pub use crate::analysis::{Normalizer, StopWordSet, normalize};
    pub use crate::document::{Document, DocumentReader};
    pub use crate::error::{IndexError, Result};
    pub use crate::index::{DocId, IndexBuilder, InvertedIndex, PostingList, Term, build};
    pub use crate::query::{QueryEngine, QueryResult, TermResult, query};
    pub use crate::storage::{IndexStore, OnUnsorted, StoreConfig, load, save};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

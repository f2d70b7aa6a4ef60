//! Inverted index data model and construction.
//!
//! - [`PostingList`] - sorted, duplicate-free document ids for one term
//! - [`InvertedIndex`] - term → posting list mapping
//! - [`IndexBuilder`] - builds an index from raw documents

pub mod builder;
pub mod inverted_index;
pub mod posting;

pub use builder::{IndexBuilder, build};
pub use inverted_index::{IndexStats, InvertedIndex};
pub use posting::PostingList;

/// Caller-assigned document identifier.
pub type DocId = u64;

/// A normalized index key.
pub type Term = String;

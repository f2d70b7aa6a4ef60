//! Index construction.
//!
//! [`IndexBuilder`] runs every document through the [`Normalizer`] and
//! accumulates posting lists. A build is all-or-nothing: any error aborts it
//! and no partial index escapes.
//!
//! # Examples
//!
//! ```
//! use inverted_index::analysis::StopWordSet;
//! use inverted_index::index::IndexBuilder;
//!
//! let builder = IndexBuilder::new(StopWordSet::from_words(["the"]));
//! let index = builder.build([(1, "the cat sat"), (2, "the dog sat")]).unwrap();
//!
//! assert_eq!(index.get("sat").unwrap().as_slice(), &[1, 2]);
//! assert!(index.get("the").is_none());
//! ```

use ahash::AHashSet;

use crate::analysis::normalizer::Normalizer;
use crate::analysis::stop_words::StopWordSet;
use crate::document::Document;
use crate::error::{IndexError, Result};
use crate::index::DocId;
use crate::index::inverted_index::InvertedIndex;

/// Builds an [`InvertedIndex`] from (id, text) pairs.
///
/// The builder keeps no state between [`build`](Self::build) calls, so one
/// builder can produce any number of independent indexes.
#[derive(Clone, Debug)]
pub struct IndexBuilder {
    normalizer: Normalizer,
}

impl IndexBuilder {
    /// Create a builder that drops `stop_words`.
    pub fn new(stop_words: StopWordSet) -> Self {
        Self::with_normalizer(Normalizer::new(stop_words))
    }

    /// Create a builder around an existing normalizer.
    pub fn with_normalizer(normalizer: Normalizer) -> Self {
        IndexBuilder { normalizer }
    }

    /// The normalizer applied to every document.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Build an index from (id, text) pairs.
    ///
    /// Fails with [`IndexError::DuplicateDocumentId`] if an id repeats.
    pub fn build<I, S>(&self, documents: I) -> Result<InvertedIndex>
    where
        I: IntoIterator<Item = (DocId, S)>,
        S: AsRef<str>,
    {
        let mut index = InvertedIndex::new();
        let mut seen_ids = AHashSet::new();

        for (doc_id, text) in documents {
            if !seen_ids.insert(doc_id) {
                return Err(IndexError::DuplicateDocumentId(doc_id));
            }

            let terms = self.normalizer.normalize(text.as_ref())?;
            log::debug!("Document {doc_id}: {} terms", terms.len());

            for term in &terms {
                index.add(term, doc_id);
            }
        }

        let stats = index.stats();
        log::info!(
            "Built index over {} documents: {} terms, {} postings",
            seen_ids.len(),
            stats.terms,
            stats.postings
        );

        Ok(index)
    }

    /// Build an index from parsed [`Document`]s.
    pub fn build_documents<I>(&self, documents: I) -> Result<InvertedIndex>
    where
        I: IntoIterator<Item = Document>,
    {
        self.build(documents.into_iter().map(|doc| (doc.id, doc.text)))
    }
}

/// Build an index with a one-off [`IndexBuilder`].
pub fn build<I, S>(documents: I, stop_words: &StopWordSet) -> Result<InvertedIndex>
where
    I: IntoIterator<Item = (DocId, S)>,
    S: AsRef<str>,
{
    IndexBuilder::new(stop_words.clone()).build(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::PostingList;

    fn builder(stop_words: &[&str]) -> IndexBuilder {
        IndexBuilder::new(StopWordSet::from_words(stop_words.iter().copied()))
    }

    #[test]
    fn test_cat_and_dog() {
        let index = builder(&["the"])
            .build([(1, "the cat sat"), (2, "the dog sat")])
            .unwrap();

        let expected: InvertedIndex = [
            ("cat".to_string(), PostingList::from_unsorted([1])),
            ("sat".to_string(), PostingList::from_unsorted([1, 2])),
            ("dog".to_string(), PostingList::from_unsorted([2])),
        ]
        .into_iter()
        .collect();
        assert_eq!(index, expected);
    }

    #[test]
    fn test_duplicate_id_fails() {
        let result = builder(&[]).build([(1, "first"), (2, "second"), (1, "again")]);
        assert!(matches!(result, Err(IndexError::DuplicateDocumentId(1))));
    }

    #[test]
    fn test_empty_collection() {
        let index = builder(&[]).build(Vec::<(DocId, String)>::new()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_repeated_term_counted_once() {
        let index = builder(&[]).build([(7, "echo echo ECHO echo!")]).unwrap();
        assert_eq!(index.get("echo").unwrap().as_slice(), &[7]);
    }

    #[test]
    fn test_document_order_does_not_matter() {
        let b = builder(&[]);
        let forward = b.build([(1, "x y"), (2, "y z"), (3, "x z")]).unwrap();
        let backward = b.build([(3, "x z"), (2, "y z"), (1, "x y")]).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.get("x").unwrap().as_slice(), &[1, 3]);
    }

    #[test]
    fn test_stop_words_never_indexed() {
        let stop_words = ["a", "the", "of"];
        let index = builder(&stop_words)
            .build([(1, "The Lord of the Rings"), (2, "A tale of two cities")])
            .unwrap();

        for word in stop_words {
            assert!(!index.contains_term(word));
        }
        assert!(index.contains_term("lord"));
    }

    #[test]
    fn test_deterministic() {
        let docs = [(10, "alpha beta"), (4, "beta gamma"), (6, "gamma alpha delta")];
        let b = builder(&["delta"]);
        assert_eq!(b.build(docs).unwrap(), b.build(docs).unwrap());
    }

    #[test]
    fn test_build_documents() {
        let docs = vec![Document::new(2, "Rust"), Document::new(1, "rust book")];
        let index = builder(&[]).build_documents(docs).unwrap();
        assert_eq!(index.get("rust").unwrap().as_slice(), &[1, 2]);
    }

    #[test]
    fn test_free_function() {
        let stop_words = StopWordSet::from_words(["is"]);
        let index = build([(1, "this is it")], &stop_words).unwrap();
        assert_eq!(index.terms().collect::<Vec<_>>(), vec!["it", "this"]);
    }
}

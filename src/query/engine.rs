//! Term lookup against a built or loaded index.
//!
//! [`QueryEngine::query`] resolves each raw query word independently, in the
//! caller's order. Combining the per-word results is a separate, explicit
//! step: [`QueryResult::intersection`] for AND and [`QueryResult::union`]
//! for OR.
//!
//! # Examples
//!
//! ```
//! use inverted_index::analysis::StopWordSet;
//! use inverted_index::index::IndexBuilder;
//! use inverted_index::query::QueryEngine;
//!
//! let stop_words = StopWordSet::from_words(["the"]);
//! let index = IndexBuilder::new(stop_words.clone())
//!     .build([(1, "the cat sat"), (2, "the dog sat")])
//!     .unwrap();
//!
//! let engine = QueryEngine::new(index, stop_words);
//! let result = engine.query(["cat", "the"]).unwrap();
//!
//! assert_eq!(result.get("cat").unwrap().as_slice(), &[1]);
//! assert!(result.get("the").unwrap().is_empty());
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::normalizer::Normalizer;
use crate::analysis::stop_words::StopWordSet;
use crate::error::Result;
use crate::index::{InvertedIndex, PostingList, Term};

/// The documents matching one raw query word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TermResult {
    /// The query word exactly as supplied.
    pub query: String,
    /// The terms the word normalized to. Usually one; empty for stop words
    /// and punctuation; several for words like `state-of-the-art`.
    pub terms: Vec<Term>,
    /// Documents containing every term in `terms`.
    pub doc_ids: PostingList,
}

impl TermResult {
    /// Check whether any document matched.
    pub fn is_found(&self) -> bool {
        !self.doc_ids.is_empty()
    }
}

/// Per-word results of a query, in the order the words were given.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryResult {
    results: Vec<TermResult>,
}

impl QueryResult {
    /// The documents for the raw query word `query`.
    ///
    /// If the same word was queried more than once, the first entry wins.
    pub fn get(&self, query: &str) -> Option<&PostingList> {
        self.results
            .iter()
            .find(|r| r.query == query)
            .map(|r| &r.doc_ids)
    }

    /// Iterate over the per-word results in query order.
    pub fn iter(&self) -> std::slice::Iter<'_, TermResult> {
        self.results.iter()
    }

    /// Number of query words.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if the query had no words.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Documents matching every query word (AND).
    ///
    /// Words that normalized to nothing impose no constraint and are
    /// skipped. A query with no constraining word matches nothing.
    pub fn intersection(&self) -> PostingList {
        let mut lists = self
            .results
            .iter()
            .filter(|r| !r.terms.is_empty())
            .map(|r| &r.doc_ids);

        let Some(first) = lists.next() else {
            return PostingList::new();
        };
        lists.fold(first.clone(), |acc, list| acc.intersect(list))
    }

    /// Documents matching any query word (OR).
    pub fn union(&self) -> PostingList {
        self.results
            .iter()
            .fold(PostingList::new(), |acc, r| acc.union(&r.doc_ids))
    }

    /// Consume the result, returning the per-word entries.
    pub fn into_vec(self) -> Vec<TermResult> {
        self.results
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a TermResult;
    type IntoIter = std::slice::Iter<'a, TermResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Read-only query evaluation over a shared index.
///
/// The engine never mutates its index, so it can be shared across threads
/// and queried concurrently without locking.
#[derive(Clone, Debug)]
pub struct QueryEngine {
    index: Arc<InvertedIndex>,
    normalizer: Normalizer,
}

impl QueryEngine {
    /// Create an engine that normalizes query words against `stop_words`.
    ///
    /// Use the same stop words the index was built with.
    pub fn new<I: Into<Arc<InvertedIndex>>>(index: I, stop_words: StopWordSet) -> Self {
        Self::with_normalizer(index, Normalizer::new(stop_words))
    }

    /// Create an engine around an existing normalizer.
    pub fn with_normalizer<I: Into<Arc<InvertedIndex>>>(index: I, normalizer: Normalizer) -> Self {
        QueryEngine {
            index: index.into(),
            normalizer,
        }
    }

    /// The index being queried.
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Resolve each raw word to its documents.
    ///
    /// Words absent from the index, and words that normalize to nothing,
    /// yield an empty entry rather than an error.
    pub fn query<I, S>(&self, words: I) -> Result<QueryResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let results = words
            .into_iter()
            .map(|word| self.lookup(word.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(QueryResult { results })
    }

    /// Resolve a single raw word.
    pub fn lookup(&self, word: &str) -> Result<TermResult> {
        let terms = self.normalizer.normalize(word)?;

        let mut lists = terms
            .iter()
            .map(|term| self.index.get(term).cloned().unwrap_or_default());
        let doc_ids = match lists.next() {
            Some(first) => lists.fold(first, |acc, list| acc.intersect(&list)),
            None => PostingList::new(),
        };

        log::debug!("{word:?} -> {terms:?}: {} documents", doc_ids.len());

        Ok(TermResult {
            query: word.to_string(),
            terms,
            doc_ids,
        })
    }

    /// Evaluate several queries in parallel.
    ///
    /// Results are returned in the same order as `queries`.
    pub fn query_batch<Q, S>(&self, queries: &[Q]) -> Result<Vec<QueryResult>>
    where
        Q: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        queries
            .par_iter()
            .map(|words| self.query(words.as_ref()))
            .collect()
    }
}

/// Query `index` with a one-off [`QueryEngine`].
pub fn query<I, S>(index: &InvertedIndex, words: I, stop_words: &StopWordSet) -> Result<QueryResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    QueryEngine::new(index.clone(), stop_words.clone()).query(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;

    fn engine() -> QueryEngine {
        let stop_words = StopWordSet::from_words(["the", "of"]);
        let index = IndexBuilder::new(stop_words.clone())
            .build([
                (1, "the cat sat"),
                (2, "the dog sat"),
                (3, "state of the art cat"),
            ])
            .unwrap();
        QueryEngine::new(index, stop_words)
    }

    #[test]
    fn test_per_term_results_in_order() {
        let result = engine().query(["sat", "dog", "cat"]).unwrap();

        let queries: Vec<&str> = result.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["sat", "dog", "cat"]);
        assert_eq!(result.get("sat").unwrap().as_slice(), &[1, 2]);
        assert_eq!(result.get("dog").unwrap().as_slice(), &[2]);
        assert_eq!(result.get("cat").unwrap().as_slice(), &[1, 3]);
    }

    #[test]
    fn test_stop_word_query_is_empty_not_error() {
        let result = engine().query(["cat", "the"]).unwrap();

        assert_eq!(result.get("cat").unwrap().as_slice(), &[1, 3]);
        let the = result.iter().find(|r| r.query == "the").unwrap();
        assert!(the.terms.is_empty());
        assert!(!the.is_found());
    }

    #[test]
    fn test_absent_term_is_empty() {
        let result = engine().query(["unicorn", ""]).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.get("unicorn").unwrap().is_empty());
        assert!(result.get("").unwrap().is_empty());
    }

    #[test]
    fn test_query_words_are_normalized() {
        let result = engine().query(["CAT!", "Dog,"]).unwrap();
        assert_eq!(result.get("CAT!").unwrap().as_slice(), &[1, 3]);
        assert_eq!(result.get("Dog,").unwrap().as_slice(), &[2]);
        assert_eq!(result.iter().next().unwrap().terms, vec!["cat"]);
    }

    #[test]
    fn test_multi_term_word_requires_all_terms() {
        let result = engine().query(["state-of-the-art", "cat-dog"]).unwrap();

        let first = result.iter().next().unwrap();
        assert_eq!(first.terms, vec!["state", "art"]);
        assert_eq!(first.doc_ids.as_slice(), &[3]);
        assert!(result.get("cat-dog").unwrap().is_empty());
    }

    #[test]
    fn test_combinations() {
        let result = engine().query(["cat", "sat", "the"]).unwrap();
        assert_eq!(result.intersection().as_slice(), &[1]);
        assert_eq!(result.union().as_slice(), &[1, 2, 3]);

        let only_stop_words = engine().query(["the", "of"]).unwrap();
        assert!(only_stop_words.intersection().is_empty());
        assert!(only_stop_words.union().is_empty());

        assert!(QueryResult::default().intersection().is_empty());
    }

    #[test]
    fn test_query_batch_matches_sequential() {
        let engine = engine();
        let queries = vec![vec!["cat", "dog"], vec!["sat"], vec![], vec!["the", "art"]];

        let batch = engine.query_batch(&queries).unwrap();
        assert_eq!(batch.len(), queries.len());
        for (words, result) in queries.iter().zip(&batch) {
            assert_eq!(&engine.query(words).unwrap(), result);
        }
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QueryEngine>();

        let engine = Arc::new(engine());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.query(["sat"]).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().get("sat").unwrap().as_slice(), &[1, 2]);
        }
    }

    #[test]
    fn test_free_function() {
        let stop_words = StopWordSet::new();
        let index = IndexBuilder::new(stop_words.clone())
            .build([(4, "alpha")])
            .unwrap();
        let result = query(&index, ["alpha", "beta"], &stop_words).unwrap();
        assert_eq!(result.get("alpha").unwrap().as_slice(), &[4]);
        assert!(result.get("beta").unwrap().is_empty());
    }
}

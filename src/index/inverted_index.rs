//! The term → posting list mapping.

use std::collections::BTreeMap;
use std::collections::btree_map;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::index::posting::PostingList;
use crate::index::{DocId, Term};

/// Mapping from normalized terms to the documents containing them.
///
/// Terms are kept in lexicographic order, so iteration and serialization are
/// deterministic. An index is only mutated while it is being built or
/// loaded; the public API is read-only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    terms: BTreeMap<Term, PostingList>,
}

/// Summary counts for an index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of distinct terms.
    pub terms: usize,
    /// Total number of (term, document) pairs.
    pub postings: usize,
    /// Number of distinct documents referenced by any posting list.
    pub documents: usize,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `term` occurs in `doc_id`.
    pub(crate) fn add(&mut self, term: &str, doc_id: DocId) {
        match self.terms.get_mut(term) {
            Some(postings) => {
                postings.insert(doc_id);
            }
            None => {
                let mut postings = PostingList::new();
                postings.insert(doc_id);
                self.terms.insert(term.to_string(), postings);
            }
        }
    }

    /// Set the full posting list for `term`, replacing any previous one.
    pub(crate) fn insert_postings(&mut self, term: Term, postings: PostingList) {
        self.terms.insert(term, postings);
    }

    /// The posting list for `term`, if the term is indexed.
    pub fn get(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// Check whether `term` is a key of the index.
    pub fn contains_term(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the index has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over the terms in lexicographic order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Iterate over (term, posting list) pairs in lexicographic term order.
    pub fn iter(&self) -> btree_map::Iter<'_, Term, PostingList> {
        self.terms.iter()
    }

    /// Compute summary counts.
    pub fn stats(&self) -> IndexStats {
        let mut documents = AHashSet::new();
        let mut postings = 0;

        for list in self.terms.values() {
            postings += list.len();
            documents.extend(list.iter());
        }

        IndexStats {
            terms: self.terms.len(),
            postings,
            documents: documents.len(),
        }
    }
}

impl<'a> IntoIterator for &'a InvertedIndex {
    type Item = (&'a Term, &'a PostingList);
    type IntoIter = btree_map::Iter<'a, Term, PostingList>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl FromIterator<(Term, PostingList)> for InvertedIndex {
    fn from_iter<I: IntoIterator<Item = (Term, PostingList)>>(iter: I) -> Self {
        InvertedIndex {
            terms: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates_sorted_postings() {
        let mut index = InvertedIndex::new();
        index.add("cat", 3);
        index.add("cat", 1);
        index.add("cat", 3);
        index.add("dog", 2);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("cat").unwrap().as_slice(), &[1, 3]);
        assert_eq!(index.get("dog").unwrap().as_slice(), &[2]);
        assert!(index.get("bird").is_none());
    }

    #[test]
    fn test_terms_are_ordered() {
        let mut index = InvertedIndex::new();
        for term in ["zebra", "apple", "mango"] {
            index.add(term, 1);
        }
        let terms: Vec<&str> = index.terms().collect();
        assert_eq!(terms, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_stats() {
        let index: InvertedIndex = [
            ("cat".to_string(), PostingList::from_unsorted([1])),
            ("sat".to_string(), PostingList::from_unsorted([1, 2])),
            ("dog".to_string(), PostingList::from_unsorted([2])),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            index.stats(),
            IndexStats {
                terms: 3,
                postings: 4,
                documents: 2,
            }
        );
        assert_eq!(InvertedIndex::new().stats(), IndexStats::default());
    }

    #[test]
    fn test_serializes_as_object() {
        let mut index = InvertedIndex::new();
        index.add("sat", 2);
        index.add("sat", 1);
        index.add("cat", 1);

        assert_eq!(
            serde_json::to_string(&index).unwrap(),
            r#"{"cat":[1],"sat":[1,2]}"#
        );
        assert_eq!(serde_json::to_string(&InvertedIndex::new()).unwrap(), "{}");
    }
}

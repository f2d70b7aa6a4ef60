//! Posting lists.
//!
//! A [`PostingList`] is the sorted set of documents containing one term. The
//! only way to add an id is [`PostingList::insert`], which keeps the list
//! strictly increasing, so no code path can produce an unsorted or
//! duplicated list.

use std::cmp::Ordering;

use serde::Serialize;

use crate::index::DocId;

/// Strictly increasing, duplicate-free sequence of document ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostingList {
    doc_ids: Vec<DocId>,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from ids in any order, dropping duplicates.
    pub fn from_unsorted<I: IntoIterator<Item = DocId>>(ids: I) -> Self {
        let mut doc_ids: Vec<DocId> = ids.into_iter().collect();
        doc_ids.sort_unstable();
        doc_ids.dedup();
        PostingList { doc_ids }
    }

    /// Adopt `ids` as-is if they are already strictly increasing.
    ///
    /// Returns `None` when some id is not greater than its predecessor.
    pub fn from_strictly_increasing(ids: Vec<DocId>) -> Option<Self> {
        if ids.windows(2).all(|w| w[0] < w[1]) {
            Some(PostingList { doc_ids: ids })
        } else {
            None
        }
    }

    /// Insert a document id, keeping the list sorted.
    ///
    /// Returns `false` if the id was already present; the list is unchanged.
    pub fn insert(&mut self, doc_id: DocId) -> bool {
        // Ids usually arrive in increasing order, so check the tail first.
        match self.doc_ids.last() {
            None => {
                self.doc_ids.push(doc_id);
                true
            }
            Some(&last) if doc_id > last => {
                self.doc_ids.push(doc_id);
                true
            }
            _ => match self.doc_ids.binary_search(&doc_id) {
                Ok(_) => false,
                Err(pos) => {
                    self.doc_ids.insert(pos, doc_id);
                    true
                }
            },
        }
    }

    /// Check whether the list contains `doc_id`.
    pub fn contains(&self, doc_id: DocId) -> bool {
        self.doc_ids.binary_search(&doc_id).is_ok()
    }

    /// Get the length of the posting list.
    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    /// Check if the posting list is empty.
    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    /// The ids in increasing order.
    pub fn as_slice(&self) -> &[DocId] {
        &self.doc_ids
    }

    /// Iterate over the ids in increasing order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, DocId>> {
        self.doc_ids.iter().copied()
    }

    /// Documents present in both lists.
    pub fn intersect(&self, other: &PostingList) -> PostingList {
        let (mut i, mut j) = (0, 0);
        let mut doc_ids = Vec::with_capacity(self.len().min(other.len()));

        while i < self.doc_ids.len() && j < other.doc_ids.len() {
            match self.doc_ids[i].cmp(&other.doc_ids[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    doc_ids.push(self.doc_ids[i]);
                    i += 1;
                    j += 1;
                }
            }
        }

        PostingList { doc_ids }
    }

    /// Documents present in either list.
    pub fn union(&self, other: &PostingList) -> PostingList {
        let (mut i, mut j) = (0, 0);
        let mut doc_ids = Vec::with_capacity(self.len() + other.len());

        while i < self.doc_ids.len() && j < other.doc_ids.len() {
            match self.doc_ids[i].cmp(&other.doc_ids[j]) {
                Ordering::Less => {
                    doc_ids.push(self.doc_ids[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    doc_ids.push(other.doc_ids[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    doc_ids.push(self.doc_ids[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        doc_ids.extend_from_slice(&self.doc_ids[i..]);
        doc_ids.extend_from_slice(&other.doc_ids[j..]);

        PostingList { doc_ids }
    }

    /// Consume the list, returning the ids.
    pub fn into_vec(self) -> Vec<DocId> {
        self.doc_ids
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = DocId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl AsRef<[DocId]> for PostingList {
    fn as_ref(&self) -> &[DocId] {
        &self.doc_ids
    }
}

//! Stop-word sets.
//!
//! A [`StopWordSet`] is loaded once and then shared read-only between the
//! index builder and the query engine, so both sides drop exactly the same
//! words. Entries are normalized on the way in (trimmed and lower-cased),
//! which lets a stop-word file use any casing.
//!
//! # Examples
//!
//! ```
//! use inverted_index::analysis::stop_words::StopWordSet;
//!
//! let stop_words = StopWordSet::from_words(["The", " and "]);
//! assert!(stop_words.contains("the"));
//! assert!(stop_words.contains("and"));
//! assert_eq!(stop_words.len(), 2);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use ahash::AHashSet;

use crate::error::{IndexError, Result};

/// Common English words, used when no stop-word file is supplied.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// An immutable set of normalized stop words.
///
/// Cloning is cheap: clones share the same underlying set.
#[derive(Clone, Debug, Default)]
pub struct StopWordSet {
    words: Arc<AHashSet<String>>,
}

impl StopWordSet {
    /// Create an empty stop-word set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding the built-in English stop words.
    pub fn english() -> Self {
        Self::from_words(DEFAULT_ENGLISH_STOP_WORDS.iter().copied())
    }

    /// Create a set from a list of words. Blank entries are ignored.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|word| normalize_entry(word.as_ref()))
            .collect();

        StopWordSet {
            words: Arc::new(words),
        }
    }

    /// Read one stop word per line.
    ///
    /// Fails with [`IndexError::InvalidInput`] if a line is not valid UTF-8.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut words = AHashSet::new();

        for (line_num, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            let line = std::str::from_utf8(&line).map_err(|e| {
                IndexError::invalid_input(format!(
                    "stop-word line {} is not valid UTF-8: {e}",
                    line_num + 1
                ))
            })?;
            if let Some(word) = normalize_entry(line) {
                words.insert(word);
            }
        }

        Ok(StopWordSet {
            words: Arc::new(words),
        })
    }

    /// Read a stop-word file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IndexError::from_io(e, path))?;
        let stop_words = Self::from_reader(BufReader::new(file))?;

        log::debug!(
            "Loaded {} stop words from {}",
            stop_words.len(),
            path.display()
        );
        Ok(stop_words)
    }

    /// Check if a word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the stop words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl PartialEq for StopWordSet {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl Eq for StopWordSet {}

fn normalize_entry(word: &str) -> Option<String> {
    let word = word.trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase())
    }
}

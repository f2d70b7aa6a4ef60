//! Term normalization shared by indexing and querying.
//!
//! The [`Normalizer`] turns raw text into the terms used as index keys:
//!
//! 1. [`RegexTokenizer`] splits on whitespace and punctuation
//! 2. [`LowercaseFilter`] folds case
//! 3. [`StripFilter`] removes remaining non-alphanumeric characters
//! 4. [`StopFilter`] marks stop words
//! 5. [`RemoveEmptyFilter`] drops stopped and empty tokens
//!
//! Building and querying must use normalizers with the same stop words,
//! otherwise a query word can never match the term it was indexed under.
//!
//! # Examples
//!
//! ```
//! use inverted_index::analysis::normalizer::Normalizer;
//! use inverted_index::analysis::stop_words::StopWordSet;
//!
//! let normalizer = Normalizer::new(StopWordSet::from_words(["the"]));
//! let terms = normalizer.normalize("The cat, the HAT!").unwrap();
//! assert_eq!(terms, vec!["cat", "hat"]);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::stop_words::StopWordSet;
use crate::analysis::token_filter::{LowercaseFilter, RemoveEmptyFilter, StopFilter, StripFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::error::{IndexError, Result};
use crate::index::Term;

/// Settings for building a [`Normalizer`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Regex whose matches become candidate tokens.
    pub token_pattern: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
        }
    }
}

impl NormalizerConfig {
    /// Set the token pattern.
    pub fn token_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.token_pattern = pattern.into();
        self
    }
}

/// Converts raw text into a sequence of normalized terms.
#[derive(Clone, Debug)]
pub struct Normalizer {
    analyzer: PipelineAnalyzer,
    stop_words: StopWordSet,
}

impl Normalizer {
    /// Create a normalizer with the default token pattern.
    pub fn new(stop_words: StopWordSet) -> Self {
        Self::from_tokenizer(RegexTokenizer::default(), stop_words)
    }

    /// Create a normalizer from explicit settings.
    pub fn with_config(stop_words: StopWordSet, config: &NormalizerConfig) -> Result<Self> {
        let tokenizer = RegexTokenizer::with_pattern(&config.token_pattern)?;
        Ok(Self::from_tokenizer(tokenizer, stop_words))
    }

    fn from_tokenizer(tokenizer: RegexTokenizer, stop_words: StopWordSet) -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(tokenizer))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StripFilter::new()))
            .add_filter(Arc::new(StopFilter::new(stop_words.clone())))
            .add_filter(Arc::new(RemoveEmptyFilter::new()));

        Normalizer {
            analyzer,
            stop_words,
        }
    }

    /// Normalize text into terms, preserving left-to-right order.
    ///
    /// Repeated words are kept; deduplication happens in the index.
    pub fn normalize(&self, text: &str) -> Result<Vec<Term>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Normalize a raw byte payload.
    ///
    /// Fails with [`IndexError::InvalidInput`] if the bytes are not UTF-8.
    pub fn normalize_bytes(&self, bytes: &[u8]) -> Result<Vec<Term>> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| IndexError::invalid_input(format!("payload is not valid UTF-8: {e}")))?;
        self.normalize(text)
    }

    /// The stop words this normalizer excludes.
    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }
}

/// Normalize `text` against `stop_words` with a one-off [`Normalizer`].
pub fn normalize(text: &str, stop_words: &StopWordSet) -> Result<Vec<Term>> {
    Normalizer::new(stop_words.clone()).normalize(text)
}

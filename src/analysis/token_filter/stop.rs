//! Stop filter implementation.
//!
//! Marks tokens whose text is in a [`StopWordSet`] as stopped, so that a later
//! [`RemoveEmptyFilter`](super::RemoveEmptyFilter) drops them.
//!
//! # Examples
//!
//! ```
//! use inverted_index::analysis::stop_words::StopWordSet;
//! use inverted_index::analysis::token_filter::Filter;
//! use inverted_index::analysis::token_filter::stop::StopFilter;
//! use inverted_index::analysis::token::Token;
//!
//! let filter = StopFilter::new(StopWordSet::from_words(["the"]));
//! let tokens = vec![Token::new("the", 0), Token::new("quick", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert!(result[0].is_stopped());
//! assert!(!result[1].is_stopped());
//! ```

use crate::analysis::stop_words::StopWordSet;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that marks stop words in the token stream.
///
/// Comparison is exact, so the filter belongs after case folding and
/// stripping in a pipeline.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: StopWordSet,
}

impl StopFilter {
    /// Create a stop filter over the given set.
    pub fn new(stop_words: StopWordSet) -> Self {
        StopFilter { stop_words }
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .map(|token| {
                if !token.is_stopped() && self.is_stop_word(&token.text) {
                    token.stop()
                } else {
                    token
                }
            })
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::new(StopWordSet::from_words(["the", "and", "or"]));
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("the", 1),
            Token::new("world", 2),
            Token::new("and", 3),
            Token::new("test", 4),
        ];
        let token_stream = Box::new(tokens.into_iter());

        let result: Vec<Token> = filter.filter(token_stream).unwrap().collect();

        assert_eq!(result.len(), 5);
        let stopped: Vec<&str> = result
            .iter()
            .filter(|t| t.is_stopped())
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(stopped, vec!["the", "and"]);
    }

    #[test]
    fn test_empty_set_stops_nothing() {
        let filter = StopFilter::new(StopWordSet::new());
        let tokens = vec![Token::new("the", 0)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert!(!result[0].is_stopped());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::new(StopWordSet::new()).name(), "stop");
    }
}

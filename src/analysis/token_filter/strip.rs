//! Strip filter implementation.

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A filter that removes every non-alphanumeric character from tokens.
///
/// The default tokenizer pattern admits underscores, so `foo_bar` reaches this
/// filter intact and leaves it as `foobar`. Tokens with nothing left are
/// marked as stopped.
#[derive(Clone, Debug, Default)]
pub struct StripFilter;

impl StripFilter {
    /// Create a new strip filter.
    pub fn new() -> Self {
        StripFilter
    }
}

impl Filter for StripFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() || token.text.chars().all(char::is_alphanumeric) {
                    token
                } else {
                    let stripped: String =
                        token.text.chars().filter(|c| c.is_alphanumeric()).collect();
                    if stripped.is_empty() {
                        token.stop()
                    } else {
                        token.with_text(stripped)
                    }
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "strip"
    }
}

//! Text analysis for the inverted index.
//!
//! Tokenization, case folding, punctuation stripping and stop-word removal,
//! assembled into the [`Normalizer`] that both indexing and querying use.

pub mod analyzer;
pub mod normalizer;
pub mod stop_words;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer};
pub use normalizer::{Normalizer, NormalizerConfig, normalize};
pub use stop_words::StopWordSet;
pub use token::{Token, TokenStream};
pub use token_filter::Filter;
pub use tokenizer::{RegexTokenizer, Tokenizer};

//! Query evaluation.

pub mod engine;

pub use engine::{QueryEngine, QueryResult, TermResult, query};

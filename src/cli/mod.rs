//! Command line interface for building and querying an index.

pub mod args;
pub mod commands;
pub mod output;

pub use args::{InvertedIndexArgs, OutputFormat};
pub use commands::execute_command;

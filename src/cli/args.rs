//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Default location of the stop-word list.
pub const DEFAULT_STOPWORDS_PATH: &str = "./input_files/stop_words_en.txt";

/// Default location of the persisted index.
pub const DEFAULT_INDEX_PATH: &str = "./output_files/inverted.index";

/// Build and query an inverted index over text documents
#[derive(Parser, Debug, Clone)]
#[command(name = "inverted-index")]
#[command(about = "Build and query an inverted index over text documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct InvertedIndexArgs {
    /// Verbosity level (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl InvertedIndexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n.saturating_add(1),
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an index from a dataset file and save it
    Build(BuildArgs),

    /// Look up words in a saved index
    Query(QueryArgs),
}

/// Stop-word source shared by both commands.
#[derive(clap::Args, Debug, Clone)]
pub struct StopWordArgs {
    /// Stop-word file, one word per line
    #[arg(
        short = 's',
        long = "stopwords",
        env = "INVERTED_INDEX_STOPWORDS",
        default_value = DEFAULT_STOPWORDS_PATH
    )]
    pub stopwords: PathBuf,

    /// Use the built-in English stop words instead of a file
    #[arg(long)]
    pub builtin_stopwords: bool,
}

/// Arguments for building an index
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Dataset file with one `<id>\t<content>` document per line
    #[arg(short = 'd', long = "dataset")]
    pub dataset: PathBuf,

    #[command(flatten)]
    pub stop_words: StopWordArgs,

    /// Where to write the index
    #[arg(
        short = 'o',
        long = "output",
        env = "INVERTED_INDEX_PATH",
        default_value = DEFAULT_INDEX_PATH
    )]
    pub output: PathBuf,
}

/// Arguments for querying an index
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Index file to query
    #[arg(
        short = 'i',
        long = "index",
        env = "INVERTED_INDEX_PATH",
        default_value = DEFAULT_INDEX_PATH
    )]
    pub index: PathBuf,

    #[command(flatten)]
    pub stop_words: StopWordArgs,

    /// A query; its whitespace-separated words are looked up. May be repeated.
    #[arg(short = 'q', long = "query", action = clap::ArgAction::Append)]
    pub queries: Vec<String>,

    /// File with one query per line (`-` reads standard input)
    #[arg(long = "query-file")]
    pub query_file: Option<PathBuf>,

    /// How to combine the words of each query
    #[arg(short = 'c', long = "combine", default_value = "none")]
    pub combine: CombineMode,

    /// Sort and deduplicate malformed posting lists instead of rejecting the index
    #[arg(long)]
    pub allow_unsorted: bool,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// How per-word results of one query are reported.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Report every word separately
    None,
    /// Report documents containing every word
    And,
    /// Report documents containing any word
    Or,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let args = InvertedIndexArgs::try_parse_from([
            "inverted-index",
            "build",
            "--dataset",
            "docs.tsv",
            "--output",
            "out/inverted.index",
        ])
        .unwrap();

        match args.command {
            Command::Build(build) => {
                assert_eq!(build.dataset, PathBuf::from("docs.tsv"));
                assert_eq!(build.output, PathBuf::from("out/inverted.index"));
                assert!(!build.stop_words.builtin_stopwords);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_build_requires_dataset() {
        let result = InvertedIndexArgs::try_parse_from(["inverted-index", "build"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_query() {
        let args = InvertedIndexArgs::try_parse_from([
            "inverted-index",
            "query",
            "-q",
            "cat dog",
            "-q",
            "sat",
            "--combine",
            "and",
            "--builtin-stopwords",
        ])
        .unwrap();

        match args.command {
            Command::Query(query) => {
                assert_eq!(query.queries, vec!["cat dog", "sat"]);
                assert_eq!(query.combine, CombineMode::And);
                assert!(query.stop_words.builtin_stopwords);
                assert!(query.query_file.is_none());
                assert!(!query.allow_unsorted);
            }
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = InvertedIndexArgs::try_parse_from([
            "inverted-index",
            "query",
            "-q",
            "cat",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_verbosity() {
        let mut args =
            InvertedIndexArgs::try_parse_from(["inverted-index", "build", "-d", "x"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        args.verbose = 1;
        assert_eq!(args.verbosity(), 2);

        args.quiet = true;
        assert_eq!(args.verbosity(), 0);
    }
}

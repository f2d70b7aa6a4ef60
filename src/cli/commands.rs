//! Command implementations for the CLI.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::analysis::StopWordSet;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::DocumentReader;
use crate::error::{IndexError, Result};
use crate::index::IndexBuilder;
use crate::query::QueryEngine;
use crate::storage::{IndexStore, OnUnsorted, StoreConfig};

/// Execute a CLI command.
pub fn execute_command(args: InvertedIndexArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => build_index(build_args.clone(), &args),
        Command::Query(query_args) => query_index(query_args.clone(), &args),
    }
}

/// Build an index from a dataset and save it.
fn build_index(args: BuildArgs, cli_args: &InvertedIndexArgs) -> Result<()> {
    let start = Instant::now();

    let stop_words = load_stop_words(&args.stop_words)?;
    let documents = DocumentReader::read_path(&args.dataset)?;

    let index = IndexBuilder::new(stop_words.clone()).build_documents(documents)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let store = IndexStore::with_config(StoreConfig::default().pretty(cli_args.pretty));
    store.save(&index, &args.output)?;

    let summary = BuildSummary::new(
        args.output.display().to_string(),
        &index.stats(),
        stop_words.len(),
        start.elapsed().as_millis() as u64,
    );
    output_result(&summary, cli_args)
}

/// Load an index and answer every query against it.
fn query_index(args: QueryArgs, cli_args: &InvertedIndexArgs) -> Result<()> {
    let mut queries: Vec<Vec<String>> = args.queries.iter().map(|q| split_query(q)).collect();
    if let Some(path) = &args.query_file {
        queries.extend(read_queries(path)?);
    }
    if queries.is_empty() {
        return Err(IndexError::invalid_input(
            "no queries given; use --query or --query-file",
        ));
    }

    let on_unsorted = if args.allow_unsorted {
        OnUnsorted::Normalize
    } else {
        OnUnsorted::Reject
    };
    let store = IndexStore::with_config(StoreConfig::default().on_unsorted(on_unsorted));
    let index = store.load(&args.index)?;
    let stop_words = load_stop_words(&args.stop_words)?;

    let start = Instant::now();
    let engine = QueryEngine::new(index, stop_words);
    let results = engine.query_batch(&queries)?;
    log::info!(
        "Answered {} queries in {:.2}ms",
        results.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    for (words, result) in queries.iter().zip(&results) {
        write_query_result(
            &mut out,
            &mut err,
            words,
            result,
            args.combine,
            cli_args.output_format,
        )?;
    }
    Ok(())
}

/// Resolve the stop-word source selected on the command line.
fn load_stop_words(args: &StopWordArgs) -> Result<StopWordSet> {
    if args.builtin_stopwords {
        log::debug!("Using built-in English stop words");
        return Ok(StopWordSet::english());
    }
    StopWordSet::from_path(&args.stopwords)
}

/// Read one query per non-empty line from `path`, or stdin for `-`.
fn read_queries(path: &Path) -> Result<Vec<Vec<String>>> {
    if path == Path::new("-") {
        return parse_queries(io::stdin().lock());
    }
    let file = File::open(path).map_err(|e| IndexError::from_io(e, path))?;
    parse_queries(BufReader::new(file))
}

fn parse_queries<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut queries = Vec::new();
    for (line_num, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = std::str::from_utf8(&line).map_err(|e| {
            IndexError::invalid_input(format!(
                "query line {} is not valid UTF-8: {e}",
                line_num + 1
            ))
        })?;
        let words = split_query(line);
        if !words.is_empty() {
            queries.push(words);
        }
    }
    Ok(queries)
}

fn split_query(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::args::{CombineMode, InvertedIndexArgs, OutputFormat};
use crate::error::Result;
use crate::index::{DocId, IndexStats};
use crate::query::QueryResult;

/// Result structure for a build.
#[derive(Debug, Serialize)]
pub struct BuildSummary {
    pub output: String,
    pub documents: usize,
    pub terms: usize,
    pub postings: usize,
    pub stop_words: usize,
    pub duration_ms: u64,
}

impl BuildSummary {
    /// Assemble a summary from index statistics.
    pub fn new(output: String, stats: &IndexStats, stop_words: usize, duration_ms: u64) -> Self {
        BuildSummary {
            output,
            documents: stats.documents,
            terms: stats.terms,
            postings: stats.postings,
            stop_words,
            duration_ms,
        }
    }
}

/// One line of query output.
#[derive(Debug, Serialize)]
pub struct QueryLine {
    pub query: String,
    pub doc_ids: Vec<DocId>,
}

impl QueryLine {
    fn is_found(&self) -> bool {
        !self.doc_ids.is_empty()
    }
}

/// Output a command result in the selected format.
pub fn output_result<T: Serialize>(result: &T, args: &InvertedIndexArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.output_format {
        OutputFormat::Human => write_human(&mut out, result)?,
        OutputFormat::Json => write_json(&mut out, result, args.pretty)?,
    }
    Ok(())
}

/// Write the result of one query.
///
/// In human mode every matched word is written to `out` as
/// `word: id id ...`, and every unmatched word to `err` as
/// `word: not found`. In JSON mode each line is a JSON object on `out`.
pub fn write_query_result<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    words: &[String],
    result: &QueryResult,
    combine: CombineMode,
    format: OutputFormat,
) -> Result<()> {
    for line in query_lines(words, result, combine) {
        match format {
            OutputFormat::Human if line.is_found() => {
                let ids: Vec<String> = line.doc_ids.iter().map(|id| id.to_string()).collect();
                writeln!(out, "{}: {}", line.query, ids.join(" "))?;
            }
            OutputFormat::Human => writeln!(err, "{}: not found", line.query)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &line)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn query_lines(words: &[String], result: &QueryResult, combine: CombineMode) -> Vec<QueryLine> {
    match combine {
        CombineMode::None => result
            .iter()
            .map(|r| QueryLine {
                query: r.query.clone(),
                doc_ids: r.doc_ids.as_slice().to_vec(),
            })
            .collect(),
        CombineMode::And => vec![QueryLine {
            query: words.join(" AND "),
            doc_ids: result.intersection().into_vec(),
        }],
        CombineMode::Or => vec![QueryLine {
            query: words.join(" OR "),
            doc_ids: result.union().into_vec(),
        }],
    }
}

fn write_human<W: Write, T: Serialize>(out: &mut W, result: &T) -> Result<()> {
    let value = serde_json::to_value(result)?;
    match value {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                writeln!(out, "{}: {}", key, format_value(&value))?;
            }
        }
        other => writeln!(out, "{}", format_value(&other))?,
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, result: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, result)?;
    } else {
        serde_json::to_writer(&mut *out, result)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(" "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StopWordSet;
    use crate::index::IndexBuilder;
    use crate::query::QueryEngine;

    fn run(words: &[&str], combine: CombineMode, format: OutputFormat) -> (String, String) {
        let stop_words = StopWordSet::from_words(["the"]);
        let index = IndexBuilder::new(stop_words.clone())
            .build([(1, "the cat sat"), (2, "the dog sat")])
            .unwrap();
        let engine = QueryEngine::new(index, stop_words);

        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let result = engine.query(&words).unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        write_query_result(&mut out, &mut err, &words, &result, combine, format).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_human_output_splits_found_and_missing() {
        let (out, err) = run(&["sat", "unicorn", "the"], CombineMode::None, OutputFormat::Human);
        assert_eq!(out, "sat: 1 2\n");
        assert_eq!(err, "unicorn: not found\nthe: not found\n");
    }

    #[test]
    fn test_combined_output() {
        let (out, err) = run(&["cat", "sat"], CombineMode::And, OutputFormat::Human);
        assert_eq!(out, "cat AND sat: 1\n");
        assert!(err.is_empty());

        let (out, _) = run(&["cat", "dog"], CombineMode::Or, OutputFormat::Human);
        assert_eq!(out, "cat OR dog: 1 2\n");

        let (out, err) = run(&["cat", "dog"], CombineMode::And, OutputFormat::Human);
        assert!(out.is_empty());
        assert_eq!(err, "cat AND dog: not found\n");
    }

    #[test]
    fn test_json_output() {
        let (out, err) = run(&["sat", "unicorn"], CombineMode::None, OutputFormat::Json);
        assert!(err.is_empty());
        assert_eq!(
            out,
            "{\"query\":\"sat\",\"doc_ids\":[1,2]}\n{\"query\":\"unicorn\",\"doc_ids\":[]}\n"
        );
    }

    #[test]
    fn test_write_human_summary() {
        let summary = BuildSummary {
            output: "out/inverted.index".to_string(),
            documents: 2,
            terms: 3,
            postings: 4,
            stop_words: 1,
            duration_ms: 0,
        };
        let mut out = Vec::new();
        write_human(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("output: out/inverted.index\n"));
        assert!(text.contains("terms: 3\n"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&serde_json::json!("test")), "test");
        assert_eq!(format_value(&serde_json::json!(42)), "42");
        assert_eq!(format_value(&serde_json::json!([1, 2])), "1 2");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
    }
}

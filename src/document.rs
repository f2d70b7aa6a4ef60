//! Documents and the dataset reader.
//!
//! A dataset file holds one document per line in the form
//! `<id>\t<content>`, where `<id>` is an unsigned integer. Document text is
//! only kept long enough to be normalized by the index builder.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! use inverted_index::document::DocumentReader;
//!
//! let docs = DocumentReader::read(Cursor::new("1\tthe cat sat\n2\tthe dog sat\n")).unwrap();
//! assert_eq!(docs.len(), 2);
//! assert_eq!(docs[1].id, 2);
//! assert_eq!(docs[1].text, "the dog sat");
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};
use crate::index::DocId;

/// A raw document awaiting indexing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Caller-assigned identifier.
    pub id: DocId,
    /// Raw text content.
    pub text: String,
}

impl Document {
    /// Create a new document.
    pub fn new<S: Into<String>>(id: DocId, text: S) -> Self {
        Document {
            id,
            text: text.into(),
        }
    }
}

/// Parser for tab-separated dataset files.
pub struct DocumentReader;

impl DocumentReader {
    /// Parse every document from `reader`.
    ///
    /// Blank lines are skipped. A line without a tab, an id that is not an
    /// unsigned integer, or bytes that are not UTF-8 fail with
    /// [`IndexError::InvalidInput`] naming the 1-based line number.
    /// Duplicate ids are left for the index builder to reject.
    pub fn read<R: BufRead>(reader: R) -> Result<Vec<Document>> {
        let mut documents = Vec::new();

        for (line_num, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            let line_no = line_num + 1;

            let line = std::str::from_utf8(&line).map_err(|e| {
                IndexError::invalid_input(format!("line {line_no} is not valid UTF-8: {e}"))
            })?;
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.trim().is_empty() {
                continue;
            }

            documents.push(Self::parse_line(line, line_no)?);
        }

        Ok(documents)
    }

    /// Parse the dataset file at `path`.
    pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IndexError::from_io(e, path))?;
        let documents = Self::read(BufReader::new(file))?;

        log::info!("Read {} documents from {}", documents.len(), path.display());
        Ok(documents)
    }

    fn parse_line(line: &str, line_no: usize) -> Result<Document> {
        let (id, text) = line.split_once('\t').ok_or_else(|| {
            IndexError::invalid_input(format!(
                "line {line_no}: expected '<id>\\t<content>', found no tab"
            ))
        })?;

        let id = id.trim().parse::<DocId>().map_err(|e| {
            IndexError::invalid_input(format!(
                "line {line_no}: document id {:?} is not an unsigned integer: {e}",
                id.trim()
            ))
        })?;

        Ok(Document::new(id, text))
    }
}

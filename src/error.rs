//! Error types for the inverted index library.
//!
//! Every fallible operation returns [`Result`], whose error side is the
//! [`IndexError`] enum. Each variant is a distinct, identifiable failure so
//! that callers (the CLI in particular) can map them to their own responses.
//!
//! # Examples
//!
//! ```
//! use inverted_index::error::{IndexError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(IndexError::index_format("top-level value must be an object"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::index::DocId;

/// The main error type for inverted index operations.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Input payload cannot be normalized (undecodable bytes, malformed dataset line).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The same document id was supplied twice to a single build.
    #[error("Duplicate document id: {0}")]
    DuplicateDocumentId(DocId),

    /// A persisted index failed structural validation.
    #[error("Index format error: {0}")]
    IndexFormat(String),

    /// A referenced file does not exist.
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O errors not otherwise classified.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[source] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with IndexError.
pub type Result<T> = std::result::Result<T, IndexError>;

impl From<serde_json::Error> for IndexError {
    /// A serde_json error raised by the underlying reader or writer is an
    /// I/O failure, not a JSON one.
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            IndexError::Io(err.into())
        } else {
            IndexError::Json(err)
        }
    }
}

impl IndexError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        IndexError::InvalidInput(msg.into())
    }

    /// Create a new index format error.
    pub fn index_format<S: Into<String>>(msg: S) -> Self {
        IndexError::IndexFormat(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        IndexError::NotFound(path.as_ref().to_path_buf())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        IndexError::Other(msg.into())
    }

    /// Classify an I/O error raised while touching `path`.
    ///
    /// `ErrorKind::NotFound` becomes [`IndexError::NotFound`] carrying the path;
    /// everything else stays an [`IndexError::Io`].
    pub fn from_io<P: AsRef<Path>>(err: io::Error, path: P) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            IndexError::not_found(path)
        } else {
            IndexError::Io(err)
        }
    }

    /// Process exit status the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            IndexError::InvalidInput(_) => 2,
            IndexError::DuplicateDocumentId(_) => 3,
            IndexError::IndexFormat(_) => 4,
            IndexError::NotFound(_) => 5,
            IndexError::Io(_) => 6,
            IndexError::Json(_) | IndexError::Other(_) => 1,
        }
    }
}

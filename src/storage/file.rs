//! File-based index persistence.
//!
//! An index is stored as a single JSON object mapping each term to its
//! posting list:
//!
//! ```text
//! {"cat": [1], "dog": [2], "sat": [1, 2]}
//! ```
//!
//! Nothing else is written; a version key would share the namespace with the
//! terms. Loading validates the decoded value against this shape before any
//! typed index is constructed.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{IndexError, Result};
use crate::index::{DocId, InvertedIndex, PostingList};

/// What [`IndexStore::load`] does with a posting list that is not strictly
/// increasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnUnsorted {
    /// Fail the load with [`IndexError::IndexFormat`].
    #[default]
    Reject,
    /// Sort and deduplicate the list, logging a warning for each term
    /// that needed it.
    Normalize,
}

/// Index store configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Write indented JSON instead of a single line.
    pub pretty: bool,
    /// Handling of unsorted or duplicated posting lists on load.
    pub on_unsorted: OnUnsorted,
}

impl StoreConfig {
    /// Set whether output is pretty-printed.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set the unsorted-list policy.
    pub fn on_unsorted(mut self, policy: OnUnsorted) -> Self {
        self.on_unsorted = policy;
        self
    }
}

/// Saves and loads [`InvertedIndex`]es as JSON.
#[derive(Clone, Debug, Default)]
pub struct IndexStore {
    config: StoreConfig,
}

impl IndexStore {
    /// Create a store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a custom configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        IndexStore { config }
    }

    /// Get the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Write `index` to `path`.
    ///
    /// The JSON is written to a uniquely named temporary file next to `path`
    /// which is then renamed over it, so a failed or concurrent save never
    /// leaves a truncated index behind. The parent directory must exist.
    pub fn save<P: AsRef<Path>>(&self, index: &InvertedIndex, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".inverted-index")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            self.write_to(index, &mut writer)?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| IndexError::Io(e.error))?;

        log::info!("Saved index with {} terms to {}", index.len(), path.display());
        Ok(())
    }

    /// Read an index from `path`.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<InvertedIndex> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IndexError::from_io(e, path))?;
        let index = self.read_from(BufReader::new(file))?;

        log::info!("Loaded index with {} terms from {}", index.len(), path.display());
        Ok(index)
    }

    /// Serialize `index` to a writer.
    pub fn write_to<W: Write>(&self, index: &InvertedIndex, mut writer: W) -> Result<()> {
        if self.config.pretty {
            serde_json::to_writer_pretty(&mut writer, index)?;
        } else {
            serde_json::to_writer(&mut writer, index)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Deserialize and validate an index from a reader.
    pub fn read_from<R: Read>(&self, mut reader: R) -> Result<InvertedIndex> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let UniqueTerms(entries) = serde_json::from_slice(&bytes)
            .map_err(|e| IndexError::index_format(format!("not a valid index: {e}")))?;
        self.parse_entries(entries)
    }

    /// Serialize `index` to a JSON string.
    pub fn to_json(&self, index: &InvertedIndex) -> Result<String> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(index)?
        } else {
            serde_json::to_string(index)?
        };
        Ok(json)
    }

    /// Deserialize and validate an index from a JSON string.
    pub fn parse_json(&self, json: &str) -> Result<InvertedIndex> {
        self.read_from(json.as_bytes())
    }

    /// Validate a decoded JSON value and convert it into an index.
    ///
    /// A [`Value`] cannot hold repeated keys, so duplicate terms are only
    /// detected when reading raw JSON through [`read_from`](Self::read_from).
    pub fn parse_value(&self, value: Value) -> Result<InvertedIndex> {
        match value {
            Value::Object(entries) => self.parse_entries(entries),
            other => Err(IndexError::index_format(format!(
                "top-level value must be an object, found {}",
                kind_of(&other)
            ))),
        }
    }

    fn parse_entries(&self, entries: Map<String, Value>) -> Result<InvertedIndex> {
        let mut index = InvertedIndex::new();
        for (term, postings) in entries {
            if term.is_empty() {
                return Err(IndexError::index_format("empty string used as a term"));
            }
            let postings = self.parse_postings(&term, postings)?;
            index.insert_postings(term, postings);
        }

        Ok(index)
    }

    fn parse_postings(&self, term: &str, value: Value) -> Result<PostingList> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(IndexError::index_format(format!(
                    "posting list for {term:?} must be an array, found {}",
                    kind_of(&other)
                )));
            }
        };

        let ids = items
            .iter()
            .map(|item| {
                item.as_u64().ok_or_else(|| {
                    IndexError::index_format(format!(
                        "posting list for {term:?} contains {item}, expected a non-negative integer"
                    ))
                })
            })
            .collect::<Result<Vec<DocId>>>()?;

        match PostingList::from_strictly_increasing(ids) {
            Some(postings) => Ok(postings),
            None => match self.config.on_unsorted {
                OnUnsorted::Reject => Err(IndexError::index_format(format!(
                    "posting list for {term:?} is not strictly increasing"
                ))),
                OnUnsorted::Normalize => {
                    log::warn!("Posting list for {term:?} was not sorted; normalized on load");
                    Ok(PostingList::from_unsorted(
                        items.iter().filter_map(Value::as_u64),
                    ))
                }
            },
        }
    }
}

/// Save `index` to `path` with the default store configuration.
pub fn save<P: AsRef<Path>>(index: &InvertedIndex, path: P) -> Result<()> {
    IndexStore::new().save(index, path)
}

/// Load an index from `path` with the default store configuration.
pub fn load<P: AsRef<Path>>(path: P) -> Result<InvertedIndex> {
    IndexStore::new().load(path)
}

/// Top-level index object whose keys are checked for uniqueness while
/// decoding.
struct UniqueTerms(Map<String, Value>);

impl<'de> Deserialize<'de> for UniqueTerms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(UniqueTermsVisitor)
    }
}

struct UniqueTermsVisitor;

impl<'de> Visitor<'de> for UniqueTermsVisitor {
    type Value = UniqueTerms;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping terms to posting lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<UniqueTerms, A::Error> {
        let mut entries = Map::new();
        while let Some((term, postings)) = access.next_entry::<String, Value>()? {
            if entries.contains_key(&term) {
                return Err(de::Error::custom(format!("term {term:?} appears more than once")));
            }
            entries.insert(term, postings);
        }
        Ok(UniqueTerms(entries))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

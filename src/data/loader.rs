use std::io;
use std::path::Path;

use log::{debug, info, warn};
use thiserror::Error;

use super::model::{LineCollection, Record};
use super::numeric::ParseError;
use super::source::{FileSource, LineSource};

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Why a load pass stopped early.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The line source itself failed (unreadable file, invalid UTF-8, ...).
    #[error("failed to read input")]
    Io(#[from] io::Error),
    /// Line `line` (0-based, counted from where this pass started) was rejected.
    #[error("failed to parse line {line}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl<T: Record> LineCollection<T> {
    /// Read `source` to exhaustion, appending one record per line.
    ///
    /// Returns the number of records appended by this call. On a parse
    /// failure the load stops at that line: records appended before it are
    /// kept, the failing line is not. Use [`load_atomic`](Self::load_atomic)
    /// when a failure must leave the collection untouched.
    ///
    /// String records never fail to parse, so in string mode only the
    /// source can cause an error.
    pub fn load<S: LineSource + ?Sized>(&mut self, source: &mut S) -> Result<usize, LoadError> {
        let mut line_no = 0;

        while let Some(line) = source.next_line()? {
            let record = T::parse(&line).map_err(|source_err| {
                warn!("{}: line {line_no} rejected: {source_err}", source.name());
                LoadError::Parse {
                    line: line_no,
                    source: source_err,
                }
            })?;
            debug!("{}: line {line_no} has {} item(s)", source.name(), record.len());
            self.push(record);
            line_no += 1;
        }

        info!("loaded {line_no} line(s) from {}", source.name());
        Ok(line_no)
    }

    /// Like [`load`](Self::load), but appends nothing unless every line parses.
    pub fn load_atomic<S: LineSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<usize, LoadError> {
        let mut scratch = Self::new();
        let appended = scratch.load(source)?;
        self.append(&mut scratch);
        Ok(appended)
    }

    /// Build a new collection from everything `source` yields.
    pub fn from_source<S: LineSource + ?Sized>(source: &mut S) -> Result<Self, LoadError> {
        let mut collection = Self::new();
        collection.load(source)?;
        Ok(collection)
    }
}

/// Open `path` and load every line of it into a new collection.
pub fn load_path<T: Record>(path: impl AsRef<Path>) -> Result<LineCollection<T>, LoadError> {
    let mut source = FileSource::open(path)?;
    LineCollection::from_source(&mut source)
}

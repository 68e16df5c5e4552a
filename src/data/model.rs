use std::fmt;
use std::io;

use serde::Serialize;

use super::numeric::{parse_numeric_line, ParseError};
use super::text::parse_string_line;

// ---------------------------------------------------------------------------
// Record – what one parsed line turns into
// ---------------------------------------------------------------------------

/// One line's worth of parsed data.
///
/// Implemented by [`NumericRecord`] and [`StringRecord`]; the collection and
/// loader are generic over it so both modes share one code path.
pub trait Record: Sized {
    /// Parse a single line (terminator already stripped).
    fn parse(line: &str) -> Result<Self, ParseError>;

    /// Number of values / fields.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write each item on its own line, prefixed by `indent`.
    fn fmt_items(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result;
}

// ---------------------------------------------------------------------------
// NumericRecord
// ---------------------------------------------------------------------------

/// Ordered floating-point values read from one line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NumericRecord {
    values: Vec<f64>,
}

impl NumericRecord {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl Record for NumericRecord {
    fn parse(line: &str) -> Result<Self, ParseError> {
        parse_numeric_line(line)
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn fmt_items(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        for v in &self.values {
            writeln!(f, "{indent}{v}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// StringRecord
// ---------------------------------------------------------------------------

/// Trimmed string fields read from one line. Empty fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StringRecord {
    fields: Vec<String>,
}

impl StringRecord {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.fields.iter()
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl Record for StringRecord {
    /// Always succeeds; see [`parse_string_line`].
    fn parse(line: &str) -> Result<Self, ParseError> {
        Ok(parse_string_line(line))
    }

    fn len(&self) -> usize {
        self.fields.len()
    }

    fn fmt_items(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        for field in &self.fields {
            writeln!(f, "{indent}\"{field}\"")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LineCollection – every record from a load, in arrival order
// ---------------------------------------------------------------------------

/// Append-only list of parsed records, indexed by arrival order (0-based).
///
/// Records are only added by [`LineCollection::load`] and friends in the
/// loader module; nothing is removed or changed once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LineCollection<T> {
    records: Vec<T>,
}

impl<T> Default for LineCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LineCollection<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, if that many lines have been loaded.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    pub(crate) fn push(&mut self, record: T) {
        self.records.push(record);
    }

    pub(crate) fn append(&mut self, other: &mut Self) {
        self.records.append(&mut other.records);
    }
}

impl<'a, T> IntoIterator for &'a LineCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<T: Record> LineCollection<T> {
    /// Write the [`Display`](fmt::Display) enumeration to `sink`.
    pub fn display_to<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        write!(sink, "{self}")
    }
}

/// Human-readable dump: record count, then each record's index, item count
/// and items. Not meant to be parsed back.
impl<T: Record> fmt::Display for LineCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File has {} line(s):", self.records.len())?;
        for (i, record) in self.records.iter().enumerate() {
            writeln!(f, "  Line {i} has {} item(s):", record.len())?;
            record.fmt_items(f, "    ")?;
        }
        Ok(())
    }
}

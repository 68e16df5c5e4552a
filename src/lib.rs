pub mod data;

pub use data::loader::{load_path, LoadError};
pub use data::model::{LineCollection, NumericRecord, Record, StringRecord};
pub use data::numeric::{parse_numeric_line, ParseError};
pub use data::source::{FileSource, LineSource, MemorySource, ReaderSource};
pub use data::text::parse_string_line;

/// Data layer: line sources, line parsers, and the collection they fill.
///
/// Architecture:
/// ```text
///  file / stdin / in-memory buffer
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  next line (terminator stripped) or end of input
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ numeric │  text   │  one line → NumericRecord / StringRecord
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  append records in order; abort on numeric failure
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ LineCollection  │  Vec<Record>, display / JSON
///   └────────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod numeric;
pub mod source;
pub mod text;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

// ---------------------------------------------------------------------------
// LineSource – where lines come from
// ---------------------------------------------------------------------------

/// A finite, sequential supply of text lines.
///
/// Lines never include their terminator (`\n`, or `\r\n`). A final line
/// without a terminator is still a line; a trailing terminator does not
/// produce an extra empty line.
pub trait LineSource {
    /// Next line, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;

    /// Restart from the first line. Sources that cannot seek return
    /// [`io::ErrorKind::Unsupported`].
    fn rewind(&mut self) -> io::Result<()>;

    /// Display name used in log messages.
    fn name(&self) -> &str;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        (**self).next_line()
    }

    fn rewind(&mut self) -> io::Result<()> {
        (**self).rewind()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

fn strip_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

fn read_stripped<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    strip_terminator(&mut line);
    Ok(Some(line))
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// Lines from an owned in-memory buffer.
#[derive(Debug, Clone)]
pub struct MemorySource {
    text: String,
    pos: usize,
    name: String,
}

impl MemorySource {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_name(text, "<memory>")
    }

    pub fn with_name(text: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
            name: name.into(),
        }
    }
}

impl LineSource for MemorySource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        if self.pos >= self.text.len() {
            return Ok(None);
        }
        let rest = &self.text[self.pos..];
        let (mut line, consumed) = match rest.find('\n') {
            Some(nl) => (rest[..=nl].to_string(), nl + 1),
            None => (rest.to_string(), rest.len()),
        };
        self.pos += consumed;
        strip_terminator(&mut line);
        Ok(Some(line))
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.pos = 0;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// ReaderSource – any buffered reader (stdin, pipes, sockets)
// ---------------------------------------------------------------------------

/// Lines from a forward-only buffered reader. Cannot be rewound.
pub struct ReaderSource<R> {
    reader: R,
    name: String,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
        }
    }
}

impl ReaderSource<io::StdinLock<'static>> {
    /// Standard input, locked for the lifetime of the source.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), "<stdin>")
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        read_stripped(&mut self.reader)
    }

    fn rewind(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("{} cannot be rewound", self.name),
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// FileSource
// ---------------------------------------------------------------------------

/// Lines from a file on disk; rewinding seeks back to the start.
pub struct FileSource {
    reader: BufReader<File>,
    name: String,
}

impl FileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            name: path.display().to_string(),
        })
    }
}

impl LineSource for FileSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        read_stripped(&mut self.reader)
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain<S: LineSource>(source: &mut S) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_memory_lines() {
        let mut src = MemorySource::new("a\nb\r\nc");
        assert_eq!(drain(&mut src), vec!["a", "b", "c"]);
        assert_eq!(src.next_line().unwrap(), None);
    }

    #[test]
    fn test_trailing_newline_adds_no_line() {
        assert_eq!(drain(&mut MemorySource::new("1\n2\n")), vec!["1", "2"]);
        assert_eq!(drain(&mut MemorySource::new("\n")), vec![""]);
        assert!(drain(&mut MemorySource::new("")).is_empty());
    }

    #[test]
    fn test_blank_lines_are_kept() {
        assert_eq!(drain(&mut MemorySource::new("a\n\n\nb")), vec!["a", "", "", "b"]);
    }

    #[test]
    fn test_memory_rewind() {
        let mut src = MemorySource::with_name("x\ny", "demo");
        assert_eq!(src.name(), "demo");
        assert_eq!(src.next_line().unwrap().as_deref(), Some("x"));
        src.rewind().unwrap();
        assert_eq!(drain(&mut src), vec!["x", "y"]);
    }

    #[test]
    fn test_reader_source_matches_memory() {
        let text = "one, two\r\nthree\n\nfour";
        let mut reader = ReaderSource::new(Cursor::new(text), "cursor");
        assert_eq!(drain(&mut reader), drain(&mut MemorySource::new(text)));
    }

    #[test]
    fn test_reader_source_cannot_rewind() {
        let mut reader = ReaderSource::new(Cursor::new("a"), "cursor");
        let err = reader.rewind().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_reader_source_invalid_utf8() {
        let mut reader = ReaderSource::new(Cursor::new(vec![0xff, 0xfe, b'\n']), "bytes");
        let err = reader.next_line().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_boxed_source() {
        let mut boxed: Box<dyn LineSource> = Box::new(MemorySource::new("1\n2"));
        assert_eq!(boxed.name(), "<memory>");
        assert_eq!(drain(&mut boxed), vec!["1", "2"]);
    }
}

use thiserror::Error;

use super::model::NumericRecord;

// ---------------------------------------------------------------------------
// ParseError – why a numeric line was rejected
// ---------------------------------------------------------------------------

/// Failure to read a line of comma-separated numbers.
///
/// `column` is the 0-based byte offset into the line where scanning stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No floating-point literal could be read where one was required.
    #[error("expected a number at column {column}")]
    MalformedNumber { column: usize },
    /// A number was followed by something other than `,` or end of line.
    #[error("unexpected character {found:?} at column {column}, expected ','")]
    UnexpectedCharacter { found: char, column: usize },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse one line of comma-separated floating-point numbers.
///
/// Grammar of a single literal (leading whitespace is skipped first):
///
/// ```text
/// Literal  ::= Sign? Mantissa Exponent?
/// Sign     ::= '+' | '-'
/// Mantissa ::= Digit+ ('.' Digit*)? | '.' Digit+
/// Exponent ::= ('e' | 'E') Sign? Digit+
/// ```
///
/// After each literal, whitespace is skipped and the next character must be
/// a `,` (another literal follows) or the end of the line (record complete).
/// An empty line, a trailing comma and a leading comma are all errors, since
/// a number is required before and after every comma.
///
/// ```
/// use csvline::parse_numeric_line;
///
/// let rec = parse_numeric_line("10, 20, 30, 4.05e1").unwrap();
/// assert_eq!(rec.values(), &[10.0, 20.0, 30.0, 40.5]);
/// assert!(parse_numeric_line("1,2,").is_err());
/// ```
pub fn parse_numeric_line(line: &str) -> Result<NumericRecord, ParseError> {
    let mut scanner = Scanner::new(line);
    let mut values = Vec::new();

    loop {
        values.push(scanner.literal()?);

        scanner.skip_whitespace();
        match scanner.peek_char() {
            None => return Ok(NumericRecord::new(values)),
            Some(',') => scanner.pos += 1,
            Some(found) => {
                return Err(ParseError::UnexpectedCharacter {
                    found,
                    column: scanner.pos,
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

struct Scanner<'a> {
    line: &'a str,
    /// Always on a char boundary: only ASCII bytes are ever consumed.
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.line.as_bytes().get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    /// Skip the same whitespace set a C-locale stream extraction skips.
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c) = self.peek() {
            self.pos += 1;
        }
    }

    fn eat_sign(&mut self) {
        if let Some(b'+' | b'-') = self.peek() {
            self.pos += 1;
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Consume one literal and convert it.
    fn literal(&mut self) -> Result<f64, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let malformed = ParseError::MalformedNumber { column: start };

        self.eat_sign();
        let mut digits = self.eat_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digits += self.eat_digits();
        }
        if digits == 0 {
            self.pos = start;
            return Err(malformed);
        }

        // An exponent marker without digits is left for the separator check.
        if let Some(b'e' | b'E') = self.peek() {
            let mark = self.pos;
            self.pos += 1;
            self.eat_sign();
            if self.eat_digits() == 0 {
                self.pos = mark;
            }
        }

        match self.line[start..self.pos].parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(malformed),
        }
    }
}

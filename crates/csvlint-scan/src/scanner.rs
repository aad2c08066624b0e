use std::io::{self, BufReader, Read};

use thiserror::Error;

use csvlint_model::ErrorKind;

const QUOTE: char = '"';

/// Scanner failure: a quoting violation at a known position, or a
/// stream-level error.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{kind} on line {line}, column {column}")]
    Parse {
        /// 1-based line of the offending character.
        line: u64,
        /// 0-based character column of the offending character.
        column: u64,
        kind: ErrorKind,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// How a field ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldEnd {
    Delimiter,
    Record,
    Stream,
}

/// Reads records one at a time from a byte stream.
///
/// Bytes are decoded incrementally as UTF-8; invalid bytes surface as an
/// `Io` error with kind `InvalidData`. In strict mode a bare quote in an
/// unquoted field, data after a closing quote, or end of stream inside a
/// quoted field is a `Parse` error; in lenient mode those inputs recover
/// to literal text instead. After the first error or end of stream the
/// scanner yields nothing further.
pub struct RecordScanner<R: Read> {
    input: BufReader<R>,
    delimiter: char,
    lenient: bool,
    peeked: Option<char>,
    // Coordinates of the next unconsumed character.
    line: u64,
    column: u64,
    done: bool,
}

impl<R: Read> RecordScanner<R> {
    /// The delimiter must differ from the quote and newline characters;
    /// any other choice is the caller's.
    pub fn new(input: R, delimiter: char, lenient: bool) -> Self {
        debug_assert!(delimiter != QUOTE && delimiter != '\n' && delimiter != '\r');
        Self {
            input: BufReader::new(input),
            delimiter,
            lenient,
            peeked: None,
            line: 1,
            column: 0,
            done: false,
        }
    }

    /// Read the next record, or `None` at end of stream.
    pub fn read_record(&mut self) -> Result<Option<Vec<String>>, ScanError> {
        if self.done {
            return Ok(None);
        }
        match self.next_record() {
            Ok(record) => Ok(record),
            Err(error) => {
                self.done = true;
                Err(error)
            }
        }
    }

    fn next_record(&mut self) -> Result<Option<Vec<String>>, ScanError> {
        if self.peek()?.is_none() {
            self.done = true;
            return Ok(None);
        }
        let mut fields = Vec::new();
        loop {
            let (field, end) = self.read_field()?;
            fields.push(field);
            match end {
                FieldEnd::Delimiter => {}
                FieldEnd::Record => return Ok(Some(fields)),
                FieldEnd::Stream => {
                    self.done = true;
                    return Ok(Some(fields));
                }
            }
        }
    }

    fn read_field(&mut self) -> Result<(String, FieldEnd), ScanError> {
        if self.peek()? == Some(QUOTE) {
            self.read_quoted_field()
        } else {
            self.read_unquoted_field()
        }
    }

    fn read_unquoted_field(&mut self) -> Result<(String, FieldEnd), ScanError> {
        let mut field = String::new();
        loop {
            match self.peek()? {
                None => return Ok((field, FieldEnd::Stream)),
                Some(c) if c == self.delimiter => {
                    self.advance()?;
                    return Ok((field, FieldEnd::Delimiter));
                }
                Some('\n') => {
                    self.advance()?;
                    return Ok((field, FieldEnd::Record));
                }
                Some('\r') => {
                    self.advance()?;
                    if self.peek()? == Some('\n') {
                        self.advance()?;
                        return Ok((field, FieldEnd::Record));
                    }
                    field.push('\r');
                }
                Some(QUOTE) if !self.lenient => {
                    return Err(self.parse_error_here(ErrorKind::BareQuote));
                }
                Some(c) => {
                    self.advance()?;
                    field.push(c);
                }
            }
        }
    }

    fn read_quoted_field(&mut self) -> Result<(String, FieldEnd), ScanError> {
        let open_line = self.line;
        let open_column = self.column;
        self.advance()?;
        let mut field = String::new();
        loop {
            let Some(c) = self.advance()? else {
                if self.lenient {
                    // End of stream closes the field.
                    return Ok((field, FieldEnd::Stream));
                }
                return Err(ScanError::Parse {
                    line: open_line,
                    column: open_column,
                    kind: ErrorKind::UnterminatedQuote,
                });
            };
            if c != QUOTE {
                field.push(c);
                continue;
            }
            match self.peek()? {
                Some(QUOTE) => {
                    self.advance()?;
                    field.push(QUOTE);
                }
                Some(d) if d == self.delimiter => {
                    self.advance()?;
                    return Ok((field, FieldEnd::Delimiter));
                }
                Some('\n') => {
                    self.advance()?;
                    return Ok((field, FieldEnd::Record));
                }
                Some('\r') => {
                    let line = self.line;
                    let column = self.column;
                    self.advance()?;
                    if self.peek()? == Some('\n') {
                        self.advance()?;
                        return Ok((field, FieldEnd::Record));
                    }
                    if !self.lenient {
                        return Err(ScanError::Parse {
                            line,
                            column,
                            kind: ErrorKind::ExtraneousQuote,
                        });
                    }
                    field.push(QUOTE);
                    field.push('\r');
                }
                None => return Ok((field, FieldEnd::Stream)),
                Some(_) if self.lenient => {
                    // The quote is literal; the field stays quoted.
                    field.push(QUOTE);
                }
                Some(_) => return Err(self.parse_error_here(ErrorKind::ExtraneousQuote)),
            }
        }
    }

    /// A parse error located at the next unconsumed character.
    fn parse_error_here(&self, kind: ErrorKind) -> ScanError {
        ScanError::Parse {
            line: self.line,
            column: self.column,
            kind,
        }
    }

    fn peek(&mut self) -> io::Result<Option<char>> {
        if self.peeked.is_none() {
            self.peeked = self.decode_char()?;
        }
        Ok(self.peeked)
    }

    fn advance(&mut self) -> io::Result<Option<char>> {
        let next = match self.peeked.take() {
            Some(c) => Some(c),
            None => self.decode_char()?,
        };
        if let Some(c) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        Ok(next)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error),
            }
        }
    }

    fn decode_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        let len = match first {
            0x00..=0x7f => return Ok(Some(first as char)),
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return Err(invalid_utf8()),
        };
        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(len).skip(1) {
            let Some(byte) = self.read_byte()? else {
                return Err(invalid_utf8());
            };
            *slot = byte;
        }
        let decoded = std::str::from_utf8(&bytes[..len]).map_err(|_| invalid_utf8())?;
        Ok(decoded.chars().next())
    }
}

impl<R: Read> Iterator for RecordScanner<R> {
    type Item = Result<Vec<String>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "input is not valid UTF-8")
}

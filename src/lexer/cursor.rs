use std::io::{self, BufRead, ErrorKind};

use crate::Position;

/// Anything that can hand out bytes one at a time.
///
/// `Ok(None)` means the input is exhausted. Any `Err` is fatal to the scan.
pub trait ByteSource {
    fn next_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<R: BufRead> ByteSource for R {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if byte.is_some() {
                self.consume(1);
            }

            return Ok(byte);
        }
    }
}

/// Single byte of lookahead over a [`ByteSource`], with line and column
/// bookkeeping.
///
/// The cursor starts unprimed: nothing has been read until [`Cursor::prime`]
/// or [`Cursor::advance`] is called.
#[derive(Debug)]
pub struct Cursor<S> {
    source: S,
    current: Option<u8>,
    primed: bool,
    exhausted: bool,
    line: u32,
    column: u32,
    position: usize,
}

impl<S: ByteSource> Cursor<S> {
    pub fn new(source: S) -> Self {
        Cursor {
            source,
            current: None,
            primed: false,
            exhausted: false,
            line: 1,
            column: 0,
            position: 0,
        }
    }

    /// Reads the first byte if that has not happened yet.
    pub fn prime(&mut self) -> io::Result<()> {
        if !self.primed {
            self.advance()?;
        }

        Ok(())
    }

    pub fn advance(&mut self) -> io::Result<()> {
        self.primed = true;

        if self.exhausted {
            return Ok(());
        }

        self.current = self.source.next_byte()?;
        self.position += 1;
        self.column += 1;

        match self.current {
            Some(b'\n') => {
                self.line += 1;
                self.column = 0;
            }
            None => self.exhausted = true,
            _ => {}
        }

        Ok(())
    }

    /// Byte under the cursor, `None` once the input is exhausted.
    pub fn current(&self) -> Option<u8> {
        self.current
    }

    pub fn is(&self, byte: u8) -> bool {
        self.current == Some(byte)
    }

    pub fn at_eof(&self) -> bool {
        self.primed && self.current.is_none()
    }

    pub fn location(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Number of reads performed against the source.
    pub fn offset(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cursor_starts_unprimed() {
        let cursor = Cursor::new("abc".as_bytes());

        assert_eq!(cursor.current(), None);
        assert!(!cursor.at_eof());
        assert_eq!(cursor.location(), Position { line: 1, column: 0 });
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_cursor_prime_reads_once() {
        let mut cursor = Cursor::new("ab".as_bytes());
        cursor.prime().unwrap();
        cursor.prime().unwrap();

        assert_eq!(cursor.current(), Some(b'a'));
        assert_eq!(cursor.location(), Position { line: 1, column: 1 });
    }

    #[test]
    fn test_cursor_newline_resets_column() {
        let mut cursor = Cursor::new("a\nb".as_bytes());
        cursor.prime().unwrap();
        cursor.advance().unwrap();

        assert_eq!(cursor.current(), Some(b'\n'));
        assert_eq!(cursor.location(), Position { line: 2, column: 0 });

        cursor.advance().unwrap();
        assert_eq!(cursor.current(), Some(b'b'));
        assert_eq!(cursor.location(), Position { line: 2, column: 1 });
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_cursor_stays_at_eof() {
        let mut cursor = Cursor::new("x".as_bytes());
        cursor.prime().unwrap();
        cursor.advance().unwrap();

        assert!(cursor.at_eof());
        let eof = cursor.location();

        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert!(cursor.at_eof());
        assert_eq!(cursor.location(), eof);
        assert_eq!(eof, Position { line: 1, column: 2 });
    }

    #[test]
    fn test_cursor_empty_source() {
        let mut cursor = Cursor::new("".as_bytes());
        cursor.prime().unwrap();

        assert!(cursor.at_eof());
        assert_eq!(cursor.location(), Position { line: 1, column: 1 });
    }
}

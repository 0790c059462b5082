use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::{
    cursor::{ByteSource, Cursor},
    tokens::{keyword_kind, Token, TokenKind, TokenValue, OPERATOR_LOOKUP},
};

type ScanResult = Result<Token, Error>;

/// Pull-based scanner: every call to [`Scanner::next_token`] reads just
/// enough input to produce one token.
#[derive(Debug)]
pub struct Scanner<S> {
    cursor: Cursor<S>,
    finished: bool,
}

impl<'a> Scanner<&'a [u8]> {
    pub fn from_source(source: &'a str) -> Self {
        Scanner::new(source.as_bytes())
    }
}

impl<S: ByteSource> Scanner<S> {
    pub fn new(source: S) -> Self {
        Scanner {
            cursor: Cursor::new(source),
            finished: false,
        }
    }

    /// Current position of the cursor.
    pub fn location(&self) -> Position {
        self.cursor.location()
    }

    /// Produces the next token.
    ///
    /// Lexical errors are returned as `Err` after the offending text has been
    /// skipped, so calling again continues with the following token. Errors
    /// for which [`Error::is_fatal`] holds end the scan.
    pub fn next_token(&mut self) -> ScanResult {
        self.cursor.prime().map_err(|e| self.fatal(e))?;

        loop {
            self.skip_whitespace()?;
            let start = self.cursor.location();

            let result = match self.cursor.current() {
                None => Ok(MK_TOKEN!(TokenKind::EOF, String::new(), TokenValue::None, start)),
                Some(b'0'..=b'9') => self.scan_number(start),
                Some(c) if c.is_ascii_alphabetic() => self.scan_name(start),
                Some(b'\'') => self.scan_char(start),
                Some(b'/') => {
                    self.advance()?;

                    if !self.cursor.is(b'/') {
                        Ok(MK_TOKEN!(TokenKind::Slash, String::from("/"), TokenValue::None, start))
                    } else {
                        self.skip_comment()?;
                        debug!(line = start.line, "skipped line comment");
                        continue;
                    }
                }
                Some(c) => self.scan_operator(c, start),
            };

            match &result {
                Ok(token) => trace!(kind = %token.kind, lexeme = %token.lexeme, at = %token.position, "token"),
                Err(error) if !error.is_fatal() => debug!(error = %error, "lexical error"),
                Err(_) => {}
            }

            return result;
        }
    }

    fn fatal(&self, error: std::io::Error) -> Error {
        Error::new(ErrorImpl::Io(error), self.cursor.location())
    }

    fn advance(&mut self) -> Result<(), Error> {
        self.cursor.advance().map_err(|e| self.fatal(e))
    }

    /// Skips every byte up to and including the space character.
    fn skip_whitespace(&mut self) -> Result<(), Error> {
        while matches!(self.cursor.current(), Some(c) if c <= b' ') {
            self.advance()?;
        }

        Ok(())
    }

    /// Called with the cursor on the second `/`. Stops on the newline, which
    /// is left for the whitespace skip.
    fn skip_comment(&mut self) -> Result<(), Error> {
        while !self.cursor.at_eof() && !self.cursor.is(b'\n') {
            self.advance()?;
        }

        Ok(())
    }

    /// Consumes the current byte into `lexeme`.
    fn take(&mut self, lexeme: &mut String) -> Result<(), Error> {
        if let Some(c) = self.cursor.current() {
            lexeme.push(c as char);
        }

        self.advance()
    }

    fn scan_number(&mut self, start: Position) -> ScanResult {
        let mut lexeme = String::new();

        while matches!(self.cursor.current(), Some(b'0'..=b'9')) {
            self.take(&mut lexeme)?;
        }

        // The run is all digits, so the only possible failure is overflow.
        match lexeme.parse::<i32>() {
            Ok(value) => Ok(MK_TOKEN!(TokenKind::Number, lexeme, TokenValue::Number(value), start)),
            Err(_) => Err(Error::new(ErrorImpl::NumberOverflow { lexeme }, start)),
        }
    }

    fn scan_name(&mut self, start: Position) -> ScanResult {
        let mut lexeme = String::new();

        while matches!(self.cursor.current(), Some(c) if c.is_ascii_alphabetic()) {
            self.take(&mut lexeme)?;
        }

        let kind = keyword_kind(&lexeme);
        if kind.is_keyword() {
            lexeme.clear();
        }

        Ok(MK_TOKEN!(kind, lexeme, TokenValue::None, start))
    }

    fn scan_char(&mut self, start: Position) -> ScanResult {
        let mut lexeme = String::new();
        self.take(&mut lexeme)?;

        let value = match self.cursor.current() {
            Some(b'\'') => {
                self.advance()?;
                return Err(Error::new(ErrorImpl::EmptyCharacter, start));
            }
            Some(b'\\') => {
                self.take(&mut lexeme)?;

                let escaped = match self.cursor.current() {
                    Some(b'n') => b'\n',
                    Some(b't') => b'\t',
                    Some(b'r') => b'\r',
                    _ => {
                        self.take(&mut lexeme)?;
                        self.resynchronize(&mut lexeme)?;
                        return Err(Error::new(ErrorImpl::InvalidEscape { lexeme }, start));
                    }
                };

                self.take(&mut lexeme)?;
                escaped
            }
            Some(c) => {
                self.take(&mut lexeme)?;
                c
            }
            None => {
                return Err(Error::new(ErrorImpl::UnclosedCharacter { lexeme }, start));
            }
        };

        if self.cursor.is(b'\'') {
            self.take(&mut lexeme)?;
            return Ok(MK_TOKEN!(TokenKind::CharConst, lexeme, TokenValue::Char(value), start));
        }

        self.resynchronize(&mut lexeme)?;
        Err(Error::new(ErrorImpl::UnclosedCharacter { lexeme }, start))
    }

    /// Skips to just past the next `'`, or to the end of input.
    fn resynchronize(&mut self, lexeme: &mut String) -> Result<(), Error> {
        while !self.cursor.at_eof() && !self.cursor.is(b'\'') {
            self.take(lexeme)?;
        }

        if self.cursor.is(b'\'') {
            self.take(lexeme)?;
        }

        Ok(())
    }

    fn scan_operator(&mut self, c: u8, start: Position) -> ScanResult {
        let mut lexeme = String::new();
        self.take(&mut lexeme)?;

        let kind = match c {
            b'=' | b'<' | b'>' if self.cursor.is(b'=') => {
                self.take(&mut lexeme)?;
                match c {
                    b'=' => TokenKind::Eql,
                    b'<' => TokenKind::Leq,
                    _ => TokenKind::Geq,
                }
            }
            b'=' => TokenKind::Assign,
            b'<' => TokenKind::Lss,
            b'>' => TokenKind::Gtr,
            b'!' => {
                let equals = self.cursor.is(b'=');
                self.take(&mut lexeme)?;

                if !equals {
                    return Err(Error::new(ErrorImpl::InvalidOperator { lexeme }, start));
                }

                TokenKind::Neq
            }
            _ => match OPERATOR_LOOKUP.get(&c) {
                Some(kind) => *kind,
                None => {
                    let lexeme = if c.is_ascii_graphic() {
                        lexeme
                    } else {
                        format!("\\x{:02x}", c)
                    };
                    return Err(Error::new(ErrorImpl::InvalidSymbol { lexeme }, start));
                }
            },
        };

        Ok(MK_TOKEN!(kind, lexeme, TokenValue::None, start))
    }
}

/// Yields tokens up to and including `EOF`. Stops early after a fatal error.
impl<S: ByteSource> Iterator for Scanner<S> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        self.finished = match &result {
            Ok(token) => token.is_eof(),
            Err(error) => error.is_fatal(),
        };

        Some(result)
    }
}

/// Scans `source` completely, stopping at the first error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut scanner = Scanner::from_source(source);
    let mut tokens = vec![];

    loop {
        let token = scanner.next_token()?;
        let done = token.is_eof();
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}

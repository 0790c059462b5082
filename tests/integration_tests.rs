//! Integration tests for scanning whole programs.
//!
//! These tests drive the scanner through the public API the way a parser
//! would: pulling tokens one at a time until `EOF`.

use std::io::{self, BufReader, Read};

use mjc::{
    lexer::{
        cursor::ByteSource,
        scanner::{tokenize, Scanner},
        tokens::TokenKind,
    },
    Position,
};
use pretty_assertions::assert_eq;

const PROGRAM: &str = "\
program Sample
  final int size = 10;
  class Node { int val; }
  char sep;
{
  void main() int i; {
    // fill the table
    i = 0;
    sep = '\\t';
    while (i <= size) {
      if (i % 2 != 0) print(i, 3);
      i = i + 1;
    }
    read(i);
    return;
  }
}
";

#[test]
fn test_scan_complete_program() {
    let tokens = tokenize(PROGRAM).unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();

    assert_eq!(
        &kinds[..8],
        &[
            TokenKind::Program,
            TokenKind::Ident,
            TokenKind::Final,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Number,
            TokenKind::Semicolon,
        ]
    );
    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));

    for keyword in [
        TokenKind::Class,
        TokenKind::Void,
        TokenKind::While,
        TokenKind::If,
        TokenKind::Print,
        TokenKind::Read,
        TokenKind::Return,
        TokenKind::Leq,
        TokenKind::Neq,
        TokenKind::Rem,
        TokenKind::CharConst,
    ] {
        assert!(kinds.contains(&keyword), "missing {}", keyword);
    }

    let sep = tokens.iter().find(|token| token.kind == TokenKind::CharConst).unwrap();
    assert_eq!(sep.char_value(), Some(b'\t'));
    assert_eq!(sep.position, Position { line: 9, column: 11 });

    let eof = tokens.last().unwrap();
    assert_eq!(eof.position, Position { line: 18, column: 1 });
}

#[test]
fn test_scan_from_buffered_reader() {
    let reader = BufReader::with_capacity(3, PROGRAM.as_bytes());
    let streamed: Vec<_> = Scanner::new(reader).map(|result| result.unwrap()).collect();

    assert_eq!(streamed, tokenize(PROGRAM).unwrap());
}

#[test]
fn test_errors_do_not_stop_the_scan() {
    let source = "x = '';\ny = #;\nz != !w;";
    let results: Vec<_> = Scanner::from_source(source).collect();

    let errors: Vec<(String, Position)> = results
        .iter()
        .filter_map(|result| result.as_ref().err())
        .map(|error| (error.message(), error.get_position()))
        .collect();

    assert_eq!(
        errors,
        vec![
            (String::from("empty character token"), Position { line: 1, column: 5 }),
            (String::from("invalid symbol"), Position { line: 2, column: 5 }),
            (String::from("invalid operator"), Position { line: 3, column: 6 }),
        ]
    );

    let last = results.last().unwrap().as_ref().unwrap();
    assert_eq!(last.kind, TokenKind::EOF);
}

/// Yields a few bytes, then fails.
struct FailingSource {
    bytes: Vec<u8>,
}

impl ByteSource for FailingSource {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if self.bytes.is_empty() {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
        } else {
            Ok(Some(self.bytes.remove(0)))
        }
    }
}

#[test]
fn test_read_failure_is_fatal() {
    let mut scanner = Scanner::new(FailingSource {
        bytes: b"a + bc".to_vec(),
    });

    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Ident);
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Plus);

    let error = scanner.next_token().unwrap_err();
    assert!(error.is_fatal());
    assert_eq!(error.get_error_name(), "Io");
}

#[test]
fn test_iterator_ends_after_fatal_error() {
    let scanner = Scanner::new(FailingSource {
        bytes: b"abc".to_vec(),
    });
    let results: Vec<_> = scanner.collect();

    assert_eq!(results.len(), 1);
    assert!(results[0].as_ref().unwrap_err().is_fatal());
}

/// A reader whose first read is interrupted.
struct Interrupting<'a> {
    interrupted: bool,
    inner: &'a [u8],
}

impl Read for Interrupting<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }

        self.inner.read(buf)
    }
}

#[test]
fn test_interrupted_reads_are_retried() {
    let reader = BufReader::new(Interrupting {
        interrupted: false,
        inner: b"while",
    });
    let tokens: Vec<_> = Scanner::new(reader).map(|result| result.unwrap().kind).collect();

    assert_eq!(tokens, vec![TokenKind::While, TokenKind::EOF]);
}

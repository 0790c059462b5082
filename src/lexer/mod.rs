//! Lexical analysis for MicroJava.
//!
//! This module turns a byte stream into a flat stream of tokens. It handles:
//!
//! - Byte-at-a-time reading with line and column tracking
//! - Recognition of keywords, identifiers, numbers and character constants
//! - One byte of lookahead for the two-character operators
//! - Line comments and whitespace
//! - Recovery after malformed input

pub mod cursor;
pub mod scanner;
pub mod tokens;

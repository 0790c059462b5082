use std::{fmt::Display, io};

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

#[derive(Error, Debug)]
#[error("{position}: {internal_error}")]
pub struct Error {
    #[source]
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Fatal errors end the scan; every other error only skips the
    /// offending text and the next call makes progress.
    pub fn is_fatal(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::Io(_))
    }

    /// Kind reported for the malformed fragment in the token stream.
    pub fn kind(&self) -> TokenKind {
        TokenKind::None
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn lexeme(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidSymbol { lexeme }
            | ErrorImpl::InvalidOperator { lexeme }
            | ErrorImpl::InvalidEscape { lexeme }
            | ErrorImpl::UnclosedCharacter { lexeme }
            | ErrorImpl::NumberOverflow { lexeme } => lexeme,
            ErrorImpl::EmptyCharacter => "''",
            ErrorImpl::Io(_) => "",
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidSymbol { .. } => "InvalidSymbol",
            ErrorImpl::InvalidOperator { .. } => "InvalidOperator",
            ErrorImpl::EmptyCharacter => "EmptyCharacter",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnclosedCharacter { .. } => "UnclosedCharacter",
            ErrorImpl::NumberOverflow { .. } => "NumberOverflow",
            ErrorImpl::Io(_) => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidSymbol { lexeme } => {
                ErrorTip::Suggestion(format!("`{}` is not part of the language", lexeme))
            }
            ErrorImpl::InvalidOperator { lexeme } => ErrorTip::Suggestion(format!(
                "Found `{}`, did you mean `!=`?",
                lexeme
            )),
            ErrorImpl::EmptyCharacter => ErrorTip::Suggestion(String::from(
                "A character constant holds exactly one character",
            )),
            ErrorImpl::InvalidEscape { .. } => ErrorTip::Suggestion(String::from(
                "Supported escapes are `\\n`, `\\t` and `\\r`",
            )),
            ErrorImpl::UnclosedCharacter { .. } => {
                ErrorTip::Suggestion(String::from("Expected a closing `'`"))
            }
            ErrorImpl::NumberOverflow { lexeme } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                lexeme
            )),
            ErrorImpl::Io(_) => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug)]
pub enum ErrorImpl {
    #[error("invalid symbol")]
    InvalidSymbol { lexeme: String },
    #[error("invalid operator")]
    InvalidOperator { lexeme: String },
    #[error("empty character token")]
    EmptyCharacter,
    #[error("invalid character escape sequence")]
    InvalidEscape { lexeme: String },
    #[error("unclosed character constant")]
    UnclosedCharacter { lexeme: String },
    #[error("numeric literal overflow")]
    NumberOverflow { lexeme: String },
    #[error("error reading source: {0}")]
    Io(#[from] io::Error),
}

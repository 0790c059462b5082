use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref KEYWORD_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("class", TokenKind::Class);
        map.insert("else", TokenKind::Else);
        map.insert("final", TokenKind::Final);
        map.insert("if", TokenKind::If);
        map.insert("new", TokenKind::New);
        map.insert("print", TokenKind::Print);
        map.insert("program", TokenKind::Program);
        map.insert("read", TokenKind::Read);
        map.insert("return", TokenKind::Return);
        map.insert("void", TokenKind::Void);
        map.insert("while", TokenKind::While);
        map
    };

    /// Punctuation that never needs lookahead.
    pub static ref OPERATOR_LOOKUP: HashMap<u8, TokenKind> = {
        let mut map = HashMap::new();
        map.insert(b'+', TokenKind::Plus);
        map.insert(b'-', TokenKind::Minus);
        map.insert(b'*', TokenKind::Times);
        map.insert(b'%', TokenKind::Rem);
        map.insert(b';', TokenKind::Semicolon);
        map.insert(b',', TokenKind::Comma);
        map.insert(b'.', TokenKind::Period);
        map.insert(b'(', TokenKind::LPar);
        map.insert(b')', TokenKind::RPar);
        map.insert(b'[', TokenKind::LBrack);
        map.insert(b']', TokenKind::RBrack);
        map.insert(b'{', TokenKind::LBrace);
        map.insert(b'}', TokenKind::RBrace);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    None,
    Ident,
    Number,
    CharConst,

    Plus,
    Minus,
    Times,
    Slash,
    Rem,

    Eql, // ==
    Neq, // !=
    Lss,
    Leq,
    Gtr,
    Geq,
    Assign, // =

    Semicolon,
    Comma,
    Period,
    LPar,
    RPar,
    LBrack,
    RBrack,
    LBrace,
    RBrace,

    // Reserved
    Class,
    Else,
    Final,
    If,
    New,
    Print,
    Program,
    Read,
    Return,
    Void,
    While,

    EOF,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Else
                | TokenKind::Final
                | TokenKind::If
                | TokenKind::New
                | TokenKind::Print
                | TokenKind::Program
                | TokenKind::Read
                | TokenKind::Return
                | TokenKind::Void
                | TokenKind::While
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::None => "None",
            TokenKind::Ident => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::CharConst => "CharacterConstant",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Times => "*",
            TokenKind::Slash => "/",
            TokenKind::Rem => "%",
            TokenKind::Eql => "==",
            TokenKind::Neq => "!=",
            TokenKind::Lss => "<",
            TokenKind::Leq => "<=",
            TokenKind::Gtr => ">",
            TokenKind::Geq => ">=",
            TokenKind::Assign => "=",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Period => ".",
            TokenKind::LPar => "(",
            TokenKind::RPar => ")",
            TokenKind::LBrack => "[",
            TokenKind::RBrack => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Class => "class",
            TokenKind::Else => "else",
            TokenKind::Final => "final",
            TokenKind::If => "if",
            TokenKind::New => "new",
            TokenKind::Print => "print",
            TokenKind::Program => "program",
            TokenKind::Read => "read",
            TokenKind::Return => "return",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::EOF => "EOF",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decoded payload of a literal token.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenValue {
    None,
    Number(i32),
    Char(u8),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
    /// Source text of the token. Empty for keywords and `EOF`.
    pub lexeme: String,
    pub value: TokenValue,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Ident | TokenKind::Number | TokenKind::CharConst => {
                write!(f, "{} {} ({})", self.position, self.kind, self.lexeme)
            }
            _ => write!(f, "{} {}", self.position, self.kind),
        }
    }
}

impl Token {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }

    pub fn number(&self) -> Option<i32> {
        match self.value {
            TokenValue::Number(value) => Some(value),
            _ => None,
        }
    }

    pub fn char_value(&self) -> Option<u8> {
        match self.value {
            TokenValue::Char(value) => Some(value),
            _ => None,
        }
    }
}

/// Keyword kind for `name`, or `Ident` when it is not reserved.
pub fn keyword_kind(name: &str) -> TokenKind {
    KEYWORD_LOOKUP.get(name).copied().unwrap_or(TokenKind::Ident)
}

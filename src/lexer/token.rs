//! Token types produced by the GraphQL lexer.

use crate::ast::Span;
use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token.
///
/// GraphQL has no reserved words: `query`, `fragment`, `on` and friends are
/// ordinary [`TokenKind::Name`] tokens interpreted by the parser in context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Bang,
    Dollar,
    Amp,
    LParen,
    RParen,
    Spread,
    Colon,
    Equals,
    At,
    LBracket,
    RBracket,
    LBrace,
    Pipe,
    RBrace,
    Name(SmolStr),
    /// Integer literal, source text preserved.
    Int(SmolStr),
    /// Float literal, source text preserved.
    Float(SmolStr),
    /// Quoted string with escapes already resolved.
    String(SmolStr),
    /// Block string with common indentation removed.
    BlockString(SmolStr),
    Eof,
}

impl TokenKind {
    /// Returns true for a name token with exactly this text.
    pub fn is_name(&self, text: &str) -> bool {
        matches!(self, TokenKind::Name(name) if name == text)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, TokenKind::String(_) | TokenKind::BlockString(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Dollar => write!(f, "'$'"),
            TokenKind::Amp => write!(f, "'&'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Spread => write!(f, "'...'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Equals => write!(f, "'='"),
            TokenKind::At => write!(f, "'@'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Name(name) => write!(f, "name \"{name}\""),
            TokenKind::Int(text) => write!(f, "integer {text}"),
            TokenKind::Float(text) => write!(f, "float {text}"),
            TokenKind::String(_) => write!(f, "string"),
            TokenKind::BlockString(_) => write!(f, "block string"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

//! Token stream navigation shared by the executable and type-system parsers.

use smol_str::SmolStr;

use crate::ast::{Name, Span, Spanned};
use crate::diag::Diag;
use crate::lexer::token::{Token, TokenKind};

/// Error produced by a failed production. Boxed to keep `Result` small.
pub type ParseError = Box<Diag>;

/// Result type for individual productions.
pub type PResult<T> = Result<T, ParseError>;

/// Cursor over a token slice that always ends in [`TokenKind::Eof`].
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Returns the current token, or the trailing EOF once exhausted.
    pub fn current(&self) -> &'a Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    pub fn kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    /// Kind of the token after the current one.
    pub fn peek_kind(&self) -> &'a TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + 1).min(last)].kind
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len().saturating_sub(1) {
            self.pos += 1;
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind(), TokenKind::Eof)
    }

    pub fn check(&self, kind: &TokenKind) -> bool {
        self.kind() == kind
    }

    /// Returns true when the current token is the name `text`.
    pub fn check_name(&self, text: &str) -> bool {
        self.kind().is_name(text)
    }

    /// Consumes the current token if it matches `kind`.
    pub fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the name `text` if present.
    pub fn consume_name(&mut self, text: &str) -> bool {
        if self.check_name(text) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a punctuator and returns its span.
    pub fn expect(&mut self, kind: TokenKind) -> PResult<Span> {
        if self.check(&kind) {
            let span = self.current().span.clone();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    /// Expects any name token.
    pub fn expect_name(&mut self) -> PResult<Name> {
        match self.kind() {
            TokenKind::Name(name) => {
                let name = Spanned::new(name.clone(), self.current().span.clone());
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    /// Expects the contextual keyword `text`.
    pub fn expect_keyword(&mut self, text: &str) -> PResult<Span> {
        if self.check_name(text) {
            let span = self.current().span.clone();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(&format!("\"{text}\"")))
        }
    }

    /// Consumes a string or block string and returns its value.
    pub fn consume_description(&mut self) -> Option<SmolStr> {
        match self.kind() {
            TokenKind::String(value) | TokenKind::BlockString(value) => {
                let value = value.clone();
                self.advance();
                Some(value)
            }
            _ => None,
        }
    }

    /// Builds an "expected X, found Y" error at the current token.
    pub fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.kind();
        Box::new(
            Diag::error(format!("expected {expected}, found {found}"))
                .with_primary_label(self.current().span.clone(), format!("unexpected {found}"))
                .with_code("syntax::unexpected_token"),
        )
    }

    /// Builds an error at the current token with a custom message and code.
    pub fn error_here(&self, message: impl Into<String>, code: &str) -> ParseError {
        Box::new(
            Diag::error(message)
                .with_primary_label(self.current().span.clone(), "here")
                .with_code(code),
        )
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    /// Start offset of the current token.
    pub fn start(&self) -> usize {
        self.current().span.start
    }

    /// End offset of the most recently consumed token.
    pub fn previous_end(&self) -> usize {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span.end
        } else {
            self.current().span.start
        }
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        start..self.previous_end().max(start)
    }
}

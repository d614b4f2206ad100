//! Lexical analysis for GraphQL documents.
//!
//! Tokenization is driven by a logos automaton. Whitespace, commas and `#`
//! comments are insignificant and skipped. Errors are recorded as
//! diagnostics and scanning resumes after the offending input, so a single
//! pass reports every lexical problem.

pub mod token;

use logos::Logos;
use smol_str::SmolStr;

use crate::diag::Diag;
use token::{Token, TokenKind};

/// Result of lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// Tokens in source order, always terminated by [`TokenKind::Eof`].
    pub tokens: Vec<Token>,
    /// Lexical errors.
    pub diagnostics: Vec<Diag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum LexError {
    #[default]
    UnexpectedInput,
    InvalidEscape,
    UnterminatedBlockString,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n,]+")]
#[logos(skip r"#[^\r\n]*")]
enum RawToken {
    #[token("!")]
    Bang,
    #[token("$")]
    Dollar,
    #[token("&")]
    Amp,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("...")]
    Spread,
    #[token(":")]
    Colon,
    #[token("=")]
    Equals,
    #[token("@")]
    At,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("|")]
    Pipe,
    #[token("}")]
    RBrace,
    #[regex(r"[_A-Za-z][_0-9A-Za-z]*", |lex| SmolStr::new(lex.slice()))]
    Name(SmolStr),
    #[regex(r"-?(0|[1-9][0-9]*)", |lex| SmolStr::new(lex.slice()))]
    Int(SmolStr),
    #[regex(
        r"-?(0|[1-9][0-9]*)(\.[0-9]+([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)",
        |lex| SmolStr::new(lex.slice())
    )]
    Float(SmolStr),
    #[regex(r#""([^"\\\r\n]|\\.)*""#, lex_string)]
    String(SmolStr),
    #[token("\"\"\"", lex_block_string)]
    BlockString(SmolStr),
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Bang => TokenKind::Bang,
            RawToken::Dollar => TokenKind::Dollar,
            RawToken::Amp => TokenKind::Amp,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Spread => TokenKind::Spread,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Equals => TokenKind::Equals,
            RawToken::At => TokenKind::At,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Name(name) => TokenKind::Name(name),
            RawToken::Int(text) => TokenKind::Int(text),
            RawToken::Float(text) => TokenKind::Float(text),
            RawToken::String(value) => TokenKind::String(value),
            RawToken::BlockString(value) => TokenKind::BlockString(value),
        }
    }
}

fn lex_string(lex: &mut logos::Lexer<RawToken>) -> Result<SmolStr, LexError> {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
        .map(SmolStr::from)
        .ok_or(LexError::InvalidEscape)
}

fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            _ => return None,
        }
    }
    Some(out)
}

fn lex_block_string(lex: &mut logos::Lexer<RawToken>) -> Result<SmolStr, LexError> {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx..].starts_with(b"\\\"\"\"") {
            idx += 4;
            continue;
        }
        if bytes[idx..].starts_with(b"\"\"\"") {
            let raw = rest[..idx].replace("\\\"\"\"", "\"\"\"");
            lex.bump(idx + 3);
            return Ok(SmolStr::new(block_string_value(&raw)));
        }
        idx += 1;
    }
    lex.bump(rest.len());
    Err(LexError::UnterminatedBlockString)
}

/// Removes common indentation and surrounding blank lines from a block string.
fn block_string_value(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            (indent < line.len()).then_some(indent)
        })
        .min()
        .unwrap_or(0);

    let mut dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line
            } else {
                line.get(common_indent..).unwrap_or("")
            }
        })
        .collect();

    while dedented.first().is_some_and(|line| line.trim().is_empty()) {
        dedented.remove(0);
    }
    while dedented.last().is_some_and(|line| line.trim().is_empty()) {
        dedented.pop();
    }
    dedented.join("\n")
}

/// A GraphQL lexer over one source text.
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Tokenizes the whole source.
    pub fn tokenize(self) -> LexerResult {
        let mut tokens = Vec::new();
        let mut diagnostics = Vec::new();

        let mut raw = RawToken::lexer(self.source);
        while let Some(result) = raw.next() {
            let span = raw.span();
            match result {
                Ok(token) => tokens.push(Token::new(token.into(), span)),
                Err(error) => diagnostics.push(self.error(error, span)),
            }
        }

        let eof = self.source.len();
        tokens.push(Token::new(TokenKind::Eof, eof..eof));

        LexerResult {
            tokens,
            diagnostics,
        }
    }

    fn error(&self, error: LexError, span: crate::ast::Span) -> Diag {
        let text = self.source.get(span.clone()).unwrap_or("");
        let (message, code) = match error {
            LexError::InvalidEscape => (
                "invalid escape sequence in string".to_string(),
                "syntax::invalid_escape",
            ),
            LexError::UnterminatedBlockString => (
                "unterminated block string".to_string(),
                "syntax::unterminated_string",
            ),
            LexError::UnexpectedInput if text.starts_with('"') => (
                "unterminated string".to_string(),
                "syntax::unterminated_string",
            ),
            LexError::UnexpectedInput => (
                format!("unexpected character {:?}", text.chars().next().unwrap_or(' ')),
                "syntax::unexpected_character",
            ),
        };
        Diag::error(message)
            .with_primary_label(span, "here")
            .with_code(code)
    }
}

/// Tokenizes GraphQL source text.
pub fn tokenize(source: &str) -> LexerResult {
    Lexer::new(source).tokenize()
}

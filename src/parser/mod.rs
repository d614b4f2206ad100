//! Recursive-descent parser for GraphQL documents.
//!
//! The parser consumes the token stream produced by the lexer and builds a
//! [`Document`]. Executable definitions (operations and fragments) and
//! type-system definitions share one entry point, so a schema written in SDL
//! and a query document go through the same code. A failed definition is
//! reported and skipped; parsing resumes at the next definition.

pub mod base;
mod executable;
mod recovery;
mod type_system;

use miette::Report;

use crate::ast::Document;
use crate::diag::{Diag, SourceFile, convert_diagnostics_to_reports};
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::tokenize;
use base::TokenStream;

/// Result of parsing a document.
#[derive(Debug)]
pub struct ParseResult {
    /// The document, or `None` when errors left nothing to recover.
    pub document: Option<Document>,
    /// Lexical and syntax diagnostics.
    pub diagnostics: Vec<Diag>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diag::is_error)
    }

    /// Renders diagnostics as miette reports against `source`.
    pub fn reports(&self, source: &SourceFile) -> Vec<Report> {
        convert_diagnostics_to_reports(&self.diagnostics, source)
    }
}

/// GraphQL parser with definition-level error recovery.
pub struct Parser {
    tokens: Vec<Token>,
    diagnostics: Vec<Diag>,
}

impl Parser {
    /// Creates a parser, appending an EOF token if the stream lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)) {
            let eof = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token::new(TokenKind::Eof, eof..eof));
        }
        Self {
            tokens,
            diagnostics: Vec::new(),
        }
    }

    /// Prepends lexer diagnostics so they are reported before syntax errors.
    pub fn with_lexer_diagnostics(mut self, lex_diags: Vec<Diag>) -> Self {
        let mut all = lex_diags;
        all.append(&mut self.diagnostics);
        self.diagnostics = all;
        self
    }

    pub fn parse(self) -> ParseResult {
        let Parser {
            tokens,
            mut diagnostics,
        } = self;

        let mut stream = TokenStream::new(&tokens);
        let mut definitions = Vec::new();
        let start = stream.start();

        while !stream.is_eof() {
            let definition_start = stream.position();
            match recovery::parse_definition(&mut stream) {
                Ok(definition) => definitions.push(definition),
                Err(error) => {
                    diagnostics.push(*error);
                    recovery::synchronize(&mut stream, definition_start);
                }
            }
        }

        let span = start..stream.current().span.end;
        let has_error = diagnostics.iter().any(Diag::is_error);
        let document = if has_error && definitions.is_empty() {
            None
        } else {
            Some(Document { definitions, span })
        };

        ParseResult {
            document,
            diagnostics,
        }
    }
}

/// Tokenizes and parses GraphQL source text.
pub fn parse(source: &str) -> ParseResult {
    let lexed = tokenize(source);
    Parser::new(lexed.tokens)
        .with_lexer_diagnostics(lexed.diagnostics)
        .parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Definition;

    #[test]
    fn parser_appends_missing_eof() {
        let parser = Parser::new(vec![Token::new(TokenKind::LBrace, 0..1)]);
        assert_eq!(parser.tokens.len(), 2);
        assert_eq!(parser.tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn empty_source_is_an_empty_document() {
        let result = parse("   # nothing here\n");
        assert!(result.diagnostics.is_empty());
        assert!(result.document.expect("document").definitions.is_empty());
    }

    #[test]
    fn garbage_without_definitions_yields_no_document() {
        let result = parse("garbage");
        assert!(result.document.is_none());
        assert!(result.has_errors());
    }

    #[test]
    fn recovery_keeps_later_definitions() {
        let result = parse("query A { a( } query B { b }");
        assert!(result.has_errors());
        let document = result.document.expect("partial document");
        let names: Vec<_> = document
            .operations()
            .map(|op| op.display_name().to_string())
            .collect();
        assert_eq!(names, ["B"]);
    }

    #[test]
    fn lexer_diagnostics_come_first() {
        let result = parse("{ a ? } query {");
        assert!(result.diagnostics.len() >= 2);
        assert!(result.diagnostics[0].has_code("syntax::unexpected_character"));
        assert!(matches!(
            result.document.expect("document").definitions[0],
            Definition::Operation(_)
        ));
    }

    #[test]
    fn reports_render_messages() {
        let source = "{ a(: 1) }";
        let result = parse(source);
        let reports = result.reports(&SourceFile::new(source));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].to_string(), "expected a name, found ':'");
    }
}

//! Definition dispatch and error recovery.

use crate::ast::Definition;
use crate::lexer::token::TokenKind;

use super::base::{PResult, TokenStream};
use super::{executable, type_system};

/// Names that begin an executable definition.
const EXECUTABLE_KEYWORDS: &[&str] = &["query", "mutation", "subscription", "fragment"];

/// Names that begin a type-system definition.
const TYPE_SYSTEM_KEYWORDS: &[&str] = &[
    "schema",
    "scalar",
    "type",
    "interface",
    "union",
    "enum",
    "input",
    "directive",
];

fn at_definition_start(stream: &TokenStream<'_>) -> bool {
    match stream.kind() {
        TokenKind::LBrace | TokenKind::String(_) | TokenKind::BlockString(_) => true,
        TokenKind::Name(name) => {
            EXECUTABLE_KEYWORDS.contains(&name.as_str())
                || TYPE_SYSTEM_KEYWORDS.contains(&name.as_str())
                || name == "extend"
        }
        _ => false,
    }
}

/// Parses one top-level definition.
pub(super) fn parse_definition(stream: &mut TokenStream<'_>) -> PResult<Definition> {
    match stream.kind() {
        TokenKind::LBrace => executable::parse_operation(stream).map(Definition::Operation),
        TokenKind::String(_) | TokenKind::BlockString(_) => {
            type_system::parse_type_system_definition(stream).map(Definition::TypeSystem)
        }
        TokenKind::Name(name) => match name.as_str() {
            "query" | "mutation" | "subscription" => {
                executable::parse_operation(stream).map(Definition::Operation)
            }
            "fragment" => executable::parse_fragment_definition(stream).map(Definition::Fragment),
            "extend" => {
                let error = stream.error_here(
                    "type extensions are not supported",
                    "syntax::unsupported_extension",
                );
                stream.advance();
                type_system::parse_type_system_definition(stream)?;
                Err(error)
            }
            keyword if TYPE_SYSTEM_KEYWORDS.contains(&keyword) => {
                type_system::parse_type_system_definition(stream).map(Definition::TypeSystem)
            }
            _ => Err(stream.unexpected("a definition")),
        },
        _ => Err(stream.unexpected("a definition")),
    }
}

/// Skips to the next token that can start a definition outside any braces.
///
/// Brace depth is measured from `definition_start`, so a failure deep inside
/// a selection set does not resume at a nested field named `type` or `query`.
pub(super) fn synchronize(stream: &mut TokenStream<'_>, definition_start: usize) {
    let mut depth: i64 = stream.tokens()[definition_start..stream.position()]
        .iter()
        .map(|token| match token.kind {
            TokenKind::LBrace => 1,
            TokenKind::RBrace => -1,
            _ => 0,
        })
        .sum();

    if stream.position() == definition_start {
        bump_depth(stream, &mut depth);
    }

    while !stream.is_eof() {
        if depth <= 0 && at_definition_start(stream) {
            return;
        }
        bump_depth(stream, &mut depth);
    }
}

fn bump_depth(stream: &mut TokenStream<'_>, depth: &mut i64) {
    match stream.kind() {
        TokenKind::LBrace => *depth += 1,
        TokenKind::RBrace => *depth -= 1,
        _ => {}
    }
    stream.advance();
}

//! GraphQL `@export` validation with rich diagnostics.
//!
//! A field annotated `@export(as: "x")` binds its value to the variable `$x`
//! for the rest of the operation. This crate parses GraphQL documents and
//! schemas and checks that every export is well formed: each name is
//! exported once, exported variables carry no default value, the field type
//! is at least as strict as every place the variable is used, uses come
//! after the export, and no export goes unused.
//!
//! Diagnostics are reported through miette.
//!
//! # Example
//!
//! ```
//! use gql_export::{Schema, parse_and_validate};
//!
//! let schema = Schema::from_sdl(r#"
//!     directive @export(as: String!) on FIELD
//!     type Query { me: User, posts(author: ID!): [String] }
//!     type User { id: ID! }
//! "#).unwrap();
//!
//! let outcome = parse_and_validate(&schema, r#"
//!     query Posts($author: ID!) {
//!         me { id @export(as: "author") }
//!         posts(author: $author)
//!     }
//! "#);
//! assert!(outcome.is_success());
//! assert!(outcome.links_for(Some("Posts")).unwrap().contains("author"));
//! ```

pub mod ast;
pub mod diag;
pub mod lexer;
pub mod parser;
pub mod schema;
pub mod validation;

pub use ast::{Document, Span, Spanned, Type};
pub use diag::{Diag, DiagLabel, DiagSeverity, LabelRole, SourceFile};
pub use lexer::token::{Token, TokenKind};
pub use lexer::{Lexer, LexerResult, tokenize};
pub use parser::{ParseResult, Parser, parse};
pub use schema::{Schema, SchemaBuilder, SchemaError};
pub use validation::{
    ExportDiagKind, ExportLinks, ExportValidator, ReconcileStrategy, ValidationConfig,
    ValidationOutcome,
};

/// Parses `source` and validates it against `schema` with the default configuration.
///
/// Syntax diagnostics come first. Validation runs on whatever part of the
/// document the parser recovered.
pub fn parse_and_validate(schema: &Schema, source: &str) -> ValidationOutcome {
    let parsed = parse(source);
    let mut outcome = match &parsed.document {
        Some(document) => ExportValidator::new(schema).validate(document),
        None => ValidationOutcome::default(),
    };
    let mut diagnostics = parsed.diagnostics;
    diagnostics.append(&mut outcome.diagnostics);
    outcome.diagnostics = diagnostics;
    outcome
}

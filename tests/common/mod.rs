//! Common test utilities
//!
//! Shared schema fixtures and assertion helpers for the integration tests.
//!
//! # Diagnostic Helpers
//! - [`format_diagnostics`] - Format diagnostics for display in assertions
//! - [`codes`] - Collect diagnostic codes in report order
//! - [`assert_clean`] - Assert that an outcome carries no diagnostics
//!
//! # Validation Helpers
//! - [`export_schema`] - Schema that defines `@export`
//! - [`validate`] / [`validate_with`] - Parse cleanly and run export validation

#![allow(dead_code)]

use gql_export::{
    Diag, Document, ExportValidator, ReconcileStrategy, Schema, ValidationOutcome, parse,
};

/// Schema used by most tests: defines `@export` and a small user/post model.
pub const EXPORT_SDL: &str = r#"
    directive @export(as: String!) on FIELD

    type Query {
        me: User
        viewer: User!
        user(id: ID!): User
        users(ids: [ID!]!): [User]
        search(term: String, limit: Int): [Post!]!
        count: Int
        total: Int!
        matrix: [[Int!]]
        grid(rows: [[Int!]]): Int
    }

    type Mutation {
        rename(id: ID!, name: String!): User
    }

    type User {
        id: ID!
        name: String
        email: String!
        friendIds: [ID!]!
        posts(limit: Int!): [Post!]!
    }

    type Post {
        id: ID!
        title: String
        authorId: ID
    }
"#;

pub fn export_schema() -> Schema {
    Schema::from_sdl(EXPORT_SDL).expect("fixture schema should build")
}

/// Same model without the `@export` directive.
pub fn plain_schema() -> Schema {
    let sdl = EXPORT_SDL.replace("directive @export(as: String!) on FIELD", "");
    Schema::from_sdl(&sdl).expect("fixture schema should build")
}

/// Format diagnostics for display in assertion messages.
pub fn format_diagnostics(diags: &[Diag]) -> String {
    diags
        .iter()
        .map(|diag| format!("[{}] {}", diag.code.as_deref().unwrap_or("-"), diag.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Diagnostic codes in report order.
pub fn codes(outcome: &ValidationOutcome) -> Vec<&str> {
    outcome
        .diagnostics
        .iter()
        .map(|diag| diag.code.as_deref().unwrap_or(""))
        .collect()
}

/// Parses `source`, panicking on any syntax diagnostic.
pub fn parse_cleanly(source: &str) -> Document {
    let result = parse(source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics for `{source}`:\n{}",
        format_diagnostics(&result.diagnostics)
    );
    result.document.expect("document should be present")
}

pub fn validate(schema: &Schema, source: &str) -> ValidationOutcome {
    validate_with(schema, source, ReconcileStrategy::Usages)
}

pub fn validate_with(
    schema: &Schema,
    source: &str,
    strategy: ReconcileStrategy,
) -> ValidationOutcome {
    let document = parse_cleanly(source);
    ExportValidator::new(schema)
        .with_strategy(strategy)
        .validate(&document)
}

/// Assert that a validation outcome contains no diagnostics at all.
pub fn assert_clean(outcome: &ValidationOutcome) {
    assert!(
        outcome.diagnostics.is_empty(),
        "expected no diagnostics, got:\n{}",
        format_diagnostics(&outcome.diagnostics)
    );
}

//! Export validation demonstration
//!
//! Validates a few operations that use `@export` and prints the diagnostics
//! as miette reports. Run with `RUST_LOG=debug` to see the rule's log output.

use gql_export::{ExportValidator, ReconcileStrategy, Schema, SourceFile, parse};

const SDL: &str = r#"
directive @export(as: String!) on FIELD

type Query {
    me: User
    user(id: ID!): User
    count: Int
    posts(limit: Int!): [Post!]!
}

type User { id: ID!, name: String }
type Post { id: ID!, title: String }
"#;

fn main() -> miette::Result<()> {
    env_logger::init();
    println!("=== Export Validation Demo ===\n");

    let schema = Schema::from_sdl(SDL)?;

    demo(
        &schema,
        "Example 1: Valid export",
        r#"query Friend($id: ID!) {
    me { id @export(as: "id") }
    user(id: $id) { name }
}"#,
        ReconcileStrategy::Usages,
    );

    demo(
        &schema,
        "Example 2: Nullable field feeding a required variable",
        r#"query Posts($limit: Int!) {
    count @export(as: "limit")
    posts(limit: $limit) { title }
}"#,
        ReconcileStrategy::Usages,
    );

    demo(
        &schema,
        "Example 3: Use before export, duplicate and unused exports",
        r#"query Broken($id: ID! = "1") {
    user(id: $id) { name }
    me { id @export(as: "id") name @export(as: "unused") }
    again: me { id @export(as: "id") }
}"#,
        ReconcileStrategy::Usages,
    );

    demo(
        &schema,
        "Example 4: Declaration strategy",
        r#"query Declared($id: ID!) {
    me { id @export(as: "id") name @export(as: "missing") }
}"#,
        ReconcileStrategy::Declarations,
    );

    Ok(())
}

fn demo(schema: &Schema, title: &str, source: &str, strategy: ReconcileStrategy) {
    println!("--- {title} ---");
    let parsed = parse(source);
    let file = SourceFile::with_name(source, "operation.graphql");
    for report in parsed.reports(&file) {
        println!("{report:?}");
    }
    let Some(document) = parsed.document else {
        println!();
        return;
    };

    let outcome = ExportValidator::new(schema)
        .with_strategy(strategy)
        .validate(&document);
    if outcome.is_success() {
        println!("✓ Operation is valid");
    } else {
        for report in outcome.reports(&file) {
            println!("{report:?}");
        }
    }
    for links in &outcome.export_links {
        println!(
            "  {} receives {:?} from exports",
            links.operation.as_deref().unwrap_or("<anonymous>"),
            links.variables
        );
    }
    println!();
}

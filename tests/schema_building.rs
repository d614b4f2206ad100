//! Schema construction from SDL.

mod common;

use common::{EXPORT_SDL, export_schema};
use gql_export::ast::{OperationKind, TypeDefinitionKind};
use gql_export::{Schema, SchemaBuilder, SchemaError};

#[test]
fn fixture_schema_resolves_roots_and_fields() {
    let schema = export_schema();

    assert_eq!(schema.root_type_name(OperationKind::Query), Some("Query"));
    assert_eq!(
        schema.root_type_name(OperationKind::Mutation),
        Some("Mutation")
    );
    assert_eq!(schema.root_type_name(OperationKind::Subscription), None);

    let posts = schema
        .field_definition("User", "posts")
        .expect("User.posts");
    assert_eq!(posts.ty.node.to_string(), "[Post!]!");
    assert_eq!(
        posts.argument("limit").map(|arg| arg.ty.node.to_string()),
        Some("Int!".to_string())
    );

    let export = schema.directive("export").expect("@export");
    assert_eq!(export.locations[0].node, "FIELD");
}

#[test]
fn export_directive_is_opt_in() {
    let schema = Schema::from_sdl("type Query { a: Int }").expect("schema");
    assert!(!schema.has_directive("export"));
    assert!(schema.has_directive("include"));
}

#[test]
fn schema_types_keep_their_kind() {
    let schema = Schema::from_sdl(
        r#"
        interface Node { id: ID! }
        type Query implements Node { id: ID!, node: Node, any: Any }
        union Any = Query
        enum Role { ADMIN USER }
        input RoleFilter { roles: [Role!] }
        "#,
    )
    .expect("schema");

    let node = schema.type_definition("Node").expect("Node");
    assert!(matches!(node.kind, TypeDefinitionKind::Interface { .. }));
    assert!(schema.is_composite("Any"));
    assert!(!schema.is_composite("Role"));
    assert!(schema.field_definition("Any", "__typename").is_some());
    assert!(schema.input_field("RoleFilter", "roles").is_some());
    assert!(schema.types().any(|ty| ty.name.node == "Boolean"));
}

#[test]
fn unknown_references_are_named() {
    let cases = [
        ("type Query { a(x: Missing): Int }", "Missing"),
        ("type Query { a: Int } union U = Ghost", "Ghost"),
        ("type Query implements Phantom { a: Int }", "Phantom"),
        ("type Query { a: Int } input I { b: [Nope!] }", "Nope"),
        ("type Query { a: Int } directive @d(x: Unknown) on FIELD", "Unknown"),
        ("schema { query: Root } type Query { a: Int }", "Root"),
    ];

    for (sdl, expected) in cases {
        match Schema::from_sdl(sdl) {
            Err(SchemaError::UnknownType { name, .. }) => assert_eq!(name, expected, "{sdl}"),
            other => panic!("expected unknown type for `{sdl}`, got {other:?}"),
        }
    }
}

#[test]
fn duplicate_definitions_are_rejected() {
    assert_eq!(
        Schema::from_sdl("type Query { a: Int } directive @d on FIELD directive @d on FIELD")
            .unwrap_err(),
        SchemaError::DuplicateDirective { name: "d".into() }
    );
    assert_eq!(
        Schema::from_sdl("schema { query: Query } schema { query: Query } type Query { a: Int }")
            .unwrap_err(),
        SchemaError::DuplicateSchemaDefinition
    );
}

#[test]
fn syntax_errors_carry_diagnostics() {
    let error = Schema::from_sdl("type Query { a: }").unwrap_err();
    let SchemaError::Syntax { diagnostics } = &error else {
        panic!("expected syntax error, got {error:?}");
    };
    assert!(diagnostics[0].has_code("syntax::unexpected_token"));
    assert_eq!(error.to_string(), "schema source has 1 syntax error(s)");
}

#[test]
fn schema_errors_are_miette_diagnostics() {
    use miette::Diagnostic;

    let error = Schema::from_sdl("type User { id: ID }").unwrap_err();
    assert_eq!(
        error.code().map(|code| code.to_string()),
        Some("schema::missing_query_type".to_string())
    );
    assert!(error.help().is_some());
}

#[test]
fn builder_accepts_split_sources() {
    let (types, directive) = EXPORT_SDL
        .split_once("\n\n")
        .map(|(directive, types)| (types, directive))
        .expect("fixture has a blank line");
    let schema = SchemaBuilder::new()
        .add_sdl(types)
        .and_then(|builder| builder.add_sdl(directive))
        .and_then(SchemaBuilder::build)
        .expect("schema");
    assert!(schema.has_directive("export"));
}

#[test]
fn schema_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Schema>();
}

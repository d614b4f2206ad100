//! Schema definition language: schema, type and directive definitions.

use crate::ast::{
    DirectiveDefinition, EnumValueDefinition, FieldDefinition, InputValueDefinition, Name,
    OperationKind, RootOperationTypeDefinition, SchemaDefinition, TypeDefinition,
    TypeDefinitionKind, TypeSystemDefinition,
};
use crate::lexer::token::TokenKind;

use super::base::{PResult, TokenStream};
use super::executable::{parse_directives, parse_type, parse_value};

pub(super) fn parse_type_system_definition(
    stream: &mut TokenStream<'_>,
) -> PResult<TypeSystemDefinition> {
    let start = stream.start();
    let description = stream.consume_description();

    let keyword = match stream.kind() {
        TokenKind::Name(name) => name.clone(),
        _ => return Err(stream.unexpected("a type-system definition")),
    };

    match keyword.as_str() {
        "schema" => parse_schema_definition(stream, start).map(TypeSystemDefinition::Schema),
        "directive" => parse_directive_definition(stream, start, description)
            .map(TypeSystemDefinition::Directive),
        "scalar" | "type" | "interface" | "union" | "enum" | "input" => {
            parse_type_definition(stream, start, description).map(TypeSystemDefinition::Type)
        }
        _ => Err(stream.unexpected("a type-system definition")),
    }
}

fn parse_schema_definition(stream: &mut TokenStream<'_>, start: usize) -> PResult<SchemaDefinition> {
    stream.expect_keyword("schema")?;
    let directives = parse_directives(stream, true)?;
    stream.expect(TokenKind::LBrace)?;

    let mut root_operations = Vec::new();
    while !stream.consume(&TokenKind::RBrace) {
        let op_start = stream.start();
        let keyword = stream.expect_name()?;
        let kind = OperationKind::from_keyword(&keyword.node).ok_or_else(|| {
            Box::new(
                crate::diag::Diag::error(format!(
                    "expected \"query\", \"mutation\" or \"subscription\", found \"{}\"",
                    keyword.node
                ))
                .with_primary_label(keyword.span.clone(), "not an operation type")
                .with_code("syntax::unexpected_token"),
            )
        })?;
        stream.expect(TokenKind::Colon)?;
        let named_type = stream.expect_name()?;
        root_operations.push(RootOperationTypeDefinition {
            kind,
            named_type,
            span: stream.span_from(op_start),
        });
    }

    Ok(SchemaDefinition {
        directives,
        root_operations,
        span: stream.span_from(start),
    })
}

fn parse_type_definition(
    stream: &mut TokenStream<'_>,
    start: usize,
    description: Option<smol_str::SmolStr>,
) -> PResult<TypeDefinition> {
    let keyword = stream.expect_name()?;
    let name = stream.expect_name()?;

    let (directives, kind) = match keyword.node.as_str() {
        "scalar" => (parse_directives(stream, true)?, TypeDefinitionKind::Scalar),
        "type" | "interface" => {
            let interfaces = parse_implements(stream)?;
            let directives = parse_directives(stream, true)?;
            let fields = parse_fields_definition(stream)?;
            let kind = if keyword.node == "type" {
                TypeDefinitionKind::Object { interfaces, fields }
            } else {
                TypeDefinitionKind::Interface { interfaces, fields }
            };
            (directives, kind)
        }
        "union" => {
            let directives = parse_directives(stream, true)?;
            let mut members = Vec::new();
            if stream.consume(&TokenKind::Equals) {
                stream.consume(&TokenKind::Pipe);
                members.push(stream.expect_name()?);
                while stream.consume(&TokenKind::Pipe) {
                    members.push(stream.expect_name()?);
                }
            }
            (directives, TypeDefinitionKind::Union { members })
        }
        "enum" => {
            let directives = parse_directives(stream, true)?;
            let mut values = Vec::new();
            if stream.consume(&TokenKind::LBrace) {
                while !stream.consume(&TokenKind::RBrace) {
                    let value_start = stream.start();
                    let description = stream.consume_description();
                    let name = stream.expect_name()?;
                    let directives = parse_directives(stream, true)?;
                    values.push(EnumValueDefinition {
                        description,
                        name,
                        directives,
                        span: stream.span_from(value_start),
                    });
                }
            }
            (directives, TypeDefinitionKind::Enum { values })
        }
        _ => {
            let directives = parse_directives(stream, true)?;
            let mut fields = Vec::new();
            if stream.consume(&TokenKind::LBrace) {
                while !stream.consume(&TokenKind::RBrace) {
                    fields.push(parse_input_value_definition(stream)?);
                }
            }
            (directives, TypeDefinitionKind::InputObject { fields })
        }
    };

    Ok(TypeDefinition {
        description,
        name,
        directives,
        kind,
        span: stream.span_from(start),
    })
}

/// `implements A & B`, with an optional leading `&`.
fn parse_implements(stream: &mut TokenStream<'_>) -> PResult<Vec<Name>> {
    let mut interfaces = Vec::new();
    if !stream.consume_name("implements") {
        return Ok(interfaces);
    }
    stream.consume(&TokenKind::Amp);
    interfaces.push(stream.expect_name()?);
    while stream.consume(&TokenKind::Amp) {
        interfaces.push(stream.expect_name()?);
    }
    Ok(interfaces)
}

fn parse_fields_definition(stream: &mut TokenStream<'_>) -> PResult<Vec<FieldDefinition>> {
    let mut fields = Vec::new();
    if !stream.consume(&TokenKind::LBrace) {
        return Ok(fields);
    }
    while !stream.consume(&TokenKind::RBrace) {
        let start = stream.start();
        let description = stream.consume_description();
        let name = stream.expect_name()?;
        let arguments = parse_arguments_definition(stream)?;
        stream.expect(TokenKind::Colon)?;
        let ty = parse_type(stream)?;
        let directives = parse_directives(stream, true)?;
        fields.push(FieldDefinition {
            description,
            name,
            arguments,
            ty,
            directives,
            span: stream.span_from(start),
        });
    }
    Ok(fields)
}

fn parse_arguments_definition(
    stream: &mut TokenStream<'_>,
) -> PResult<Vec<InputValueDefinition>> {
    let mut arguments = Vec::new();
    if !stream.consume(&TokenKind::LParen) {
        return Ok(arguments);
    }
    while !stream.consume(&TokenKind::RParen) {
        arguments.push(parse_input_value_definition(stream)?);
    }
    Ok(arguments)
}

fn parse_input_value_definition(stream: &mut TokenStream<'_>) -> PResult<InputValueDefinition> {
    let start = stream.start();
    let description = stream.consume_description();
    let name = stream.expect_name()?;
    stream.expect(TokenKind::Colon)?;
    let ty = parse_type(stream)?;
    let default_value = if stream.consume(&TokenKind::Equals) {
        Some(parse_value(stream, true)?)
    } else {
        None
    };
    let directives = parse_directives(stream, true)?;
    Ok(InputValueDefinition {
        description,
        name,
        ty,
        default_value,
        directives,
        span: stream.span_from(start),
    })
}

fn parse_directive_definition(
    stream: &mut TokenStream<'_>,
    start: usize,
    description: Option<smol_str::SmolStr>,
) -> PResult<DirectiveDefinition> {
    stream.expect_keyword("directive")?;
    stream.expect(TokenKind::At)?;
    let name = stream.expect_name()?;
    let arguments = parse_arguments_definition(stream)?;
    let repeatable = stream.consume_name("repeatable");
    stream.expect_keyword("on")?;
    stream.consume(&TokenKind::Pipe);
    let mut locations = vec![stream.expect_name()?];
    while stream.consume(&TokenKind::Pipe) {
        locations.push(stream.expect_name()?);
    }

    Ok(DirectiveDefinition {
        description,
        name,
        arguments,
        repeatable,
        locations,
        span: stream.span_from(start),
    })
}

#[cfg(test)]
mod tests {
    use crate::ast::{Definition, TypeDefinitionKind, TypeSystemDefinition};
    use crate::parser::parse;

    fn definitions(source: &str) -> Vec<TypeSystemDefinition> {
        let result = parse(source);
        assert!(
            result.diagnostics.is_empty(),
            "unexpected diagnostics: {:?}",
            result.diagnostics
        );
        result
            .document
            .expect("document")
            .definitions
            .into_iter()
            .filter_map(|definition| match definition {
                Definition::TypeSystem(definition) => Some(definition),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn export_directive_definition() {
        let defs = definitions(
            r#""Publishes a field value as a variable."
            directive @export(as: String!) on FIELD"#,
        );
        let TypeSystemDefinition::Directive(directive) = &defs[0] else {
            panic!("expected directive definition");
        };
        assert_eq!(directive.name.node, "export");
        assert_eq!(
            directive.description.as_deref(),
            Some("Publishes a field value as a variable.")
        );
        assert_eq!(
            directive.argument("as").map(|arg| arg.ty.node.to_string()),
            Some("String!".to_string())
        );
        assert!(!directive.repeatable);
        assert_eq!(directive.locations[0].node, "FIELD");
    }

    #[test]
    fn object_type_with_arguments_and_interfaces() {
        let defs = definitions(
            r#"type User implements Node & Entity @key(fields: "id") {
                "The id"
                id: ID!
                friends(first: Int = 10, after: String): [User!]!
            }"#,
        );
        let TypeSystemDefinition::Type(ty) = &defs[0] else {
            panic!("expected type definition");
        };
        let TypeDefinitionKind::Object { interfaces, fields } = &ty.kind else {
            panic!("expected object type");
        };
        assert_eq!(interfaces.len(), 2);
        assert_eq!(ty.directives.len(), 1);
        assert_eq!(fields[0].description.as_deref(), Some("The id"));
        assert_eq!(fields[1].ty.node.to_string(), "[User!]!");
        assert!(fields[1].argument("first").is_some_and(|arg| arg.default_value.is_some()));
    }

    #[test]
    fn schema_union_enum_input_and_scalar() {
        let defs = definitions(
            r#"schema { query: Root mutation: Mut }
            union Result = | A | B
            enum Color { RED GREEN @deprecated }
            input Filter { ids: [ID!] limit: Int = 5 }
            scalar Date
            directive @tag(name: String!) repeatable on | FIELD_DEFINITION | OBJECT"#,
        );
        assert_eq!(defs.len(), 6);
        let TypeSystemDefinition::Schema(schema) = &defs[0] else {
            panic!("expected schema definition");
        };
        assert_eq!(schema.root_operations.len(), 2);
        let TypeSystemDefinition::Type(union) = &defs[1] else {
            panic!("expected union");
        };
        assert!(matches!(&union.kind, TypeDefinitionKind::Union { members } if members.len() == 2));
        let TypeSystemDefinition::Type(input) = &defs[3] else {
            panic!("expected input");
        };
        assert!(input.input_field("limit").is_some());
        assert!(input.is_input_type());
        let TypeSystemDefinition::Directive(tag) = &defs[5] else {
            panic!("expected directive");
        };
        assert!(tag.repeatable);
        assert_eq!(tag.locations.len(), 2);
    }

    #[test]
    fn bad_root_operation_is_reported() {
        let result = parse("schema { fetch: Query }");
        assert!(result.diagnostics[0].message.contains("\"fetch\""));
    }
}

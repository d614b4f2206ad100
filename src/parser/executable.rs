//! Operations, fragments, selections, values and type references.

use crate::ast::{
    Argument, Directive, Field, FragmentDefinition, FragmentSpread, InlineFragment, ObjectField,
    OperationDefinition, OperationKind, Selection, SelectionSet, Spanned, Type, Value,
    VariableDefinition,
};
use crate::lexer::token::TokenKind;

use super::base::{PResult, TokenStream};

pub(super) fn parse_operation(stream: &mut TokenStream<'_>) -> PResult<OperationDefinition> {
    let start = stream.start();

    if stream.check(&TokenKind::LBrace) {
        let selection_set = parse_selection_set(stream)?;
        return Ok(OperationDefinition {
            kind: OperationKind::Query,
            name: None,
            variable_definitions: Vec::new(),
            directives: Vec::new(),
            selection_set,
            span: stream.span_from(start),
        });
    }

    let keyword = stream.expect_name()?;
    let kind = OperationKind::from_keyword(&keyword.node)
        .ok_or_else(|| stream.unexpected("\"query\", \"mutation\" or \"subscription\""))?;
    let name = match stream.kind() {
        TokenKind::Name(_) => Some(stream.expect_name()?),
        _ => None,
    };
    let variable_definitions = parse_variable_definitions(stream)?;
    let directives = parse_directives(stream, false)?;
    let selection_set = parse_selection_set(stream)?;

    Ok(OperationDefinition {
        kind,
        name,
        variable_definitions,
        directives,
        selection_set,
        span: stream.span_from(start),
    })
}

pub(super) fn parse_fragment_definition(
    stream: &mut TokenStream<'_>,
) -> PResult<FragmentDefinition> {
    let start = stream.start();
    stream.expect_keyword("fragment")?;
    if stream.check_name("on") {
        return Err(stream.error_here(
            "fragment cannot be named \"on\"",
            "syntax::invalid_fragment_name",
        ));
    }
    let name = stream.expect_name()?;
    stream.expect_keyword("on")?;
    let type_condition = stream.expect_name()?;
    let directives = parse_directives(stream, false)?;
    let selection_set = parse_selection_set(stream)?;

    Ok(FragmentDefinition {
        name,
        type_condition,
        directives,
        selection_set,
        span: stream.span_from(start),
    })
}

fn parse_variable_definitions(stream: &mut TokenStream<'_>) -> PResult<Vec<VariableDefinition>> {
    let mut definitions = Vec::new();
    if !stream.consume(&TokenKind::LParen) {
        return Ok(definitions);
    }
    loop {
        definitions.push(parse_variable_definition(stream)?);
        if stream.consume(&TokenKind::RParen) {
            return Ok(definitions);
        }
    }
}

fn parse_variable_definition(stream: &mut TokenStream<'_>) -> PResult<VariableDefinition> {
    let start = stream.start();
    stream.expect(TokenKind::Dollar)?;
    let name = stream.expect_name()?;
    let variable = Spanned::new(name.node, start..name.span.end);
    stream.expect(TokenKind::Colon)?;
    let ty = parse_type(stream)?;
    let default_value = if stream.consume(&TokenKind::Equals) {
        Some(parse_value(stream, true)?)
    } else {
        None
    };
    let directives = parse_directives(stream, true)?;

    Ok(VariableDefinition {
        variable,
        ty,
        default_value,
        directives,
        span: stream.span_from(start),
    })
}

/// Parses `Name`, `[Type]` and their `!` forms.
pub(super) fn parse_type(stream: &mut TokenStream<'_>) -> PResult<Spanned<Type>> {
    let start = stream.start();
    let inner = if stream.consume(&TokenKind::LBracket) {
        let item = parse_type(stream)?;
        stream.expect(TokenKind::RBracket)?;
        Type::list(item.node)
    } else {
        Type::Named(stream.expect_name()?.node)
    };
    let ty = if stream.consume(&TokenKind::Bang) {
        Type::non_null(inner)
    } else {
        inner
    };
    Ok(Spanned::new(ty, stream.span_from(start)))
}

pub(super) fn parse_selection_set(stream: &mut TokenStream<'_>) -> PResult<SelectionSet> {
    let start = stream.start();
    stream.expect(TokenKind::LBrace)?;
    let mut selections = Vec::new();
    loop {
        selections.push(parse_selection(stream)?);
        if stream.consume(&TokenKind::RBrace) {
            break;
        }
    }
    Ok(SelectionSet {
        selections,
        span: stream.span_from(start),
    })
}

fn parse_selection(stream: &mut TokenStream<'_>) -> PResult<Selection> {
    if !stream.check(&TokenKind::Spread) {
        return parse_field(stream).map(Selection::Field);
    }

    let start = stream.start();
    stream.advance();

    let is_named_spread = matches!(stream.kind(), TokenKind::Name(name) if name != "on");
    if is_named_spread {
        let name = stream.expect_name()?;
        let directives = parse_directives(stream, false)?;
        return Ok(Selection::FragmentSpread(FragmentSpread {
            name,
            directives,
            span: stream.span_from(start),
        }));
    }

    let type_condition = if stream.consume_name("on") {
        Some(stream.expect_name()?)
    } else {
        None
    };
    let directives = parse_directives(stream, false)?;
    let selection_set = parse_selection_set(stream)?;
    Ok(Selection::InlineFragment(InlineFragment {
        type_condition,
        directives,
        selection_set,
        span: stream.span_from(start),
    }))
}

fn parse_field(stream: &mut TokenStream<'_>) -> PResult<Field> {
    let start = stream.start();
    let first = stream.expect_name()?;
    let (alias, name) = if stream.consume(&TokenKind::Colon) {
        (Some(first), stream.expect_name()?)
    } else {
        (None, first)
    };
    let arguments = parse_arguments(stream, false)?;
    let directives = parse_directives(stream, false)?;
    let selection_set = if stream.check(&TokenKind::LBrace) {
        Some(parse_selection_set(stream)?)
    } else {
        None
    };

    Ok(Field {
        alias,
        name,
        arguments,
        directives,
        selection_set,
        span: stream.span_from(start),
    })
}

pub(super) fn parse_arguments(
    stream: &mut TokenStream<'_>,
    is_const: bool,
) -> PResult<Vec<Argument>> {
    let mut arguments = Vec::new();
    if !stream.consume(&TokenKind::LParen) {
        return Ok(arguments);
    }
    loop {
        let start = stream.start();
        let name = stream.expect_name()?;
        stream.expect(TokenKind::Colon)?;
        let value = parse_value(stream, is_const)?;
        arguments.push(Argument {
            name,
            value,
            span: stream.span_from(start),
        });
        if stream.consume(&TokenKind::RParen) {
            return Ok(arguments);
        }
    }
}

pub(super) fn parse_directives(
    stream: &mut TokenStream<'_>,
    is_const: bool,
) -> PResult<Vec<Directive>> {
    let mut directives = Vec::new();
    while stream.check(&TokenKind::At) {
        let start = stream.start();
        stream.advance();
        let name = stream.expect_name()?;
        let arguments = parse_arguments(stream, is_const)?;
        directives.push(Directive {
            name,
            arguments,
            span: stream.span_from(start),
        });
    }
    Ok(directives)
}

/// Parses an input value. Variables are rejected when `is_const` is set.
pub(super) fn parse_value(stream: &mut TokenStream<'_>, is_const: bool) -> PResult<Spanned<Value>> {
    let start = stream.start();
    let value = match stream.kind() {
        TokenKind::Dollar if is_const => {
            return Err(stream.error_here(
                "variables are not allowed in constant values",
                "syntax::variable_in_const",
            ));
        }
        TokenKind::Dollar => {
            stream.advance();
            Value::Variable(stream.expect_name()?.node)
        }
        TokenKind::Int(text) => {
            stream.advance();
            Value::Int(text.clone())
        }
        TokenKind::Float(text) => {
            stream.advance();
            Value::Float(text.clone())
        }
        TokenKind::String(value) | TokenKind::BlockString(value) => {
            stream.advance();
            Value::String(value.clone())
        }
        TokenKind::Name(name) => {
            stream.advance();
            match name.as_str() {
                "true" => Value::Boolean(true),
                "false" => Value::Boolean(false),
                "null" => Value::Null,
                _ => Value::Enum(name.clone()),
            }
        }
        TokenKind::LBracket => {
            stream.advance();
            let mut items = Vec::new();
            while !stream.consume(&TokenKind::RBracket) {
                items.push(parse_value(stream, is_const)?);
            }
            Value::List(items)
        }
        TokenKind::LBrace => {
            stream.advance();
            let mut fields = Vec::new();
            while !stream.consume(&TokenKind::RBrace) {
                let field_start = stream.start();
                let name = stream.expect_name()?;
                stream.expect(TokenKind::Colon)?;
                let value = parse_value(stream, is_const)?;
                fields.push(ObjectField {
                    name,
                    value,
                    span: stream.span_from(field_start),
                });
            }
            Value::Object(fields)
        }
        _ => return Err(stream.unexpected("a value")),
    };
    Ok(Spanned::new(value, stream.span_from(start)))
}

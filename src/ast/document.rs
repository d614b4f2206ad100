//! Executable document nodes: operations, fragments, selections and values.

use std::fmt;

use smol_str::SmolStr;

use super::span::{Span, Spanned};
use super::type_system::TypeSystemDefinition;
use super::types::Type;

/// A name together with its source span.
pub type Name = Spanned<SmolStr>;

/// A parsed GraphQL document.
///
/// A document may mix executable definitions with type-system definitions;
/// schema SDL is parsed into the same structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
    pub span: Span,
}

impl Document {
    /// Operations in document order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Operation(operation) => Some(operation),
            _ => None,
        })
    }

    /// Fragment definitions in document order.
    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Fragment(fragment) => Some(fragment),
            _ => None,
        })
    }

    /// Looks up a fragment definition by name. The first definition wins.
    pub fn fragment(&self, name: &str) -> Option<&FragmentDefinition> {
        self.fragments().find(|fragment| fragment.name.node == name)
    }

    /// Type-system definitions in document order.
    pub fn type_system_definitions(&self) -> impl Iterator<Item = &TypeSystemDefinition> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::TypeSystem(definition) => Some(definition),
            _ => None,
        })
    }
}

/// A top-level definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    TypeSystem(TypeSystemDefinition),
}

impl Definition {
    pub fn span(&self) -> &Span {
        match self {
            Definition::Operation(operation) => &operation.span,
            Definition::Fragment(fragment) => &fragment.span,
            Definition::TypeSystem(definition) => definition.span(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(OperationKind::Query),
            "mutation" => Some(OperationKind::Mutation),
            "subscription" => Some(OperationKind::Subscription),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
            OperationKind::Subscription => write!(f, "subscription"),
        }
    }
}

/// `query Name($a: Int) @dir { ... }`, or the `{ ... }` shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDefinition {
    pub kind: OperationKind,
    pub name: Option<Name>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub span: Span,
}

impl OperationDefinition {
    /// Operation name, or `<anonymous>` for unnamed operations.
    pub fn display_name(&self) -> &str {
        self.name
            .as_ref()
            .map(|name| name.node.as_str())
            .unwrap_or("<anonymous>")
    }

    pub fn variable_definition(&self, name: &str) -> Option<&VariableDefinition> {
        self.variable_definitions
            .iter()
            .find(|definition| definition.variable.node == name)
    }
}

/// `$name: Type = default @dir`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    /// Variable name without the `$`; the span covers `$name`.
    pub variable: Name,
    pub ty: Spanned<Type>,
    pub default_value: Option<Spanned<Value>>,
    pub directives: Vec<Directive>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    pub fn span(&self) -> &Span {
        match self {
            Selection::Field(field) => &field.span,
            Selection::FragmentSpread(spread) => &spread.span,
            Selection::InlineFragment(fragment) => &fragment.span,
        }
    }
}

/// `alias: name(args) @dirs { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub selection_set: Option<SelectionSet>,
    pub span: Span,
}

impl Field {
    /// The key this field appears under in the response.
    pub fn response_key(&self) -> &str {
        self.alias.as_ref().unwrap_or(&self.name).node.as_str()
    }

    /// Directives with the given name, in source order.
    pub fn directives_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Directive> {
        self.directives
            .iter()
            .filter(move |directive| directive.name.node == name)
    }
}

/// `...Name @dirs`
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSpread {
    pub name: Name,
    pub directives: Vec<Directive>,
    pub span: Span,
}

/// `... on Type @dirs { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<Name>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub span: Span,
}

/// `fragment Name on Type @dirs { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentDefinition {
    pub name: Name,
    pub type_condition: Name,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub span: Span,
}

/// `@name(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub span: Span,
}

impl Directive {
    /// Looks up an argument by its declared parameter name.
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments
            .iter()
            .find(|argument| argument.name.node == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub value: Spanned<Value>,
    pub span: Span,
}

/// An input value. Numbers keep their source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Variable(SmolStr),
    Int(SmolStr),
    Float(SmolStr),
    String(SmolStr),
    Boolean(bool),
    Null,
    Enum(SmolStr),
    List(Vec<Spanned<Value>>),
    Object(Vec<ObjectField>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Value::Variable(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    pub name: Name,
    pub value: Spanned<Value>,
    pub span: Span,
}

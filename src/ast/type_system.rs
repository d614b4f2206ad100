//! Type-system (SDL) definitions used to describe a schema.

use smol_str::SmolStr;

use super::document::{Directive, Name, OperationKind, Value};
use super::span::{Span, Spanned};
use super::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSystemDefinition {
    Schema(SchemaDefinition),
    Type(TypeDefinition),
    Directive(DirectiveDefinition),
}

impl TypeSystemDefinition {
    pub fn span(&self) -> &Span {
        match self {
            TypeSystemDefinition::Schema(schema) => &schema.span,
            TypeSystemDefinition::Type(ty) => &ty.span,
            TypeSystemDefinition::Directive(directive) => &directive.span,
        }
    }
}

/// `schema { query: Query mutation: Mutation }`
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    pub directives: Vec<Directive>,
    pub root_operations: Vec<RootOperationTypeDefinition>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RootOperationTypeDefinition {
    pub kind: OperationKind,
    pub named_type: Name,
    pub span: Span,
}

/// A named type definition: scalar, object, interface, union, enum or input object.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub description: Option<SmolStr>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub kind: TypeDefinitionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinitionKind {
    Scalar,
    Object {
        interfaces: Vec<Name>,
        fields: Vec<FieldDefinition>,
    },
    Interface {
        interfaces: Vec<Name>,
        fields: Vec<FieldDefinition>,
    },
    Union {
        members: Vec<Name>,
    },
    Enum {
        values: Vec<EnumValueDefinition>,
    },
    InputObject {
        fields: Vec<InputValueDefinition>,
    },
}

impl TypeDefinition {
    /// Output fields of object and interface types.
    pub fn fields(&self) -> &[FieldDefinition] {
        match &self.kind {
            TypeDefinitionKind::Object { fields, .. }
            | TypeDefinitionKind::Interface { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().iter().find(|field| field.name.node == name)
    }

    /// Fields of input object types.
    pub fn input_fields(&self) -> &[InputValueDefinition] {
        match &self.kind {
            TypeDefinitionKind::InputObject { fields } => fields,
            _ => &[],
        }
    }

    pub fn input_field(&self, name: &str) -> Option<&InputValueDefinition> {
        self.input_fields()
            .iter()
            .find(|field| field.name.node == name)
    }

    /// Object, interface and union types may carry selection sets.
    pub fn is_composite(&self) -> bool {
        matches!(
            self.kind,
            TypeDefinitionKind::Object { .. }
                | TypeDefinitionKind::Interface { .. }
                | TypeDefinitionKind::Union { .. }
        )
    }

    pub fn is_input_type(&self) -> bool {
        matches!(
            self.kind,
            TypeDefinitionKind::Scalar
                | TypeDefinitionKind::Enum { .. }
                | TypeDefinitionKind::InputObject { .. }
        )
    }

    /// Human-readable kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TypeDefinitionKind::Scalar => "scalar",
            TypeDefinitionKind::Object { .. } => "object",
            TypeDefinitionKind::Interface { .. } => "interface",
            TypeDefinitionKind::Union { .. } => "union",
            TypeDefinitionKind::Enum { .. } => "enum",
            TypeDefinitionKind::InputObject { .. } => "input object",
        }
    }
}

/// `name(args): Type @dirs`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<SmolStr>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: Spanned<Type>,
    pub directives: Vec<Directive>,
    pub span: Span,
}

impl FieldDefinition {
    pub fn argument(&self, name: &str) -> Option<&InputValueDefinition> {
        self.arguments
            .iter()
            .find(|argument| argument.name.node == name)
    }
}

/// An argument or input field: `name: Type = default @dirs`
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub description: Option<SmolStr>,
    pub name: Name,
    pub ty: Spanned<Type>,
    pub default_value: Option<Spanned<Value>>,
    pub directives: Vec<Directive>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<SmolStr>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub span: Span,
}

/// `directive @name(args) repeatable on LOCATION | LOCATION`
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition {
    pub description: Option<SmolStr>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<Name>,
    pub span: Span,
}

impl DirectiveDefinition {
    pub fn argument(&self, name: &str) -> Option<&InputValueDefinition> {
        self.arguments
            .iter()
            .find(|argument| argument.name.node == name)
    }
}

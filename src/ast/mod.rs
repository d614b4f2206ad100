//! GraphQL syntax tree: spans, executable documents, type-system definitions and visitors.

pub mod document;
mod span;
pub mod type_system;
mod types;
pub mod visit;

pub use span::{Span, Spanned};
pub use types::Type;

pub use document::{
    Argument, Definition, Directive, Document, Field, FragmentDefinition, FragmentSpread,
    InlineFragment, Name, ObjectField, OperationDefinition, OperationKind, Selection,
    SelectionSet, Value, VariableDefinition,
};
pub use type_system::{
    DirectiveDefinition, EnumValueDefinition, FieldDefinition, InputValueDefinition,
    RootOperationTypeDefinition, SchemaDefinition, TypeDefinition, TypeDefinitionKind,
    TypeSystemDefinition,
};

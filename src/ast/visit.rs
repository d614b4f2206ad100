//! Immutable visitor over executable documents.
//!
//! Each `visit_*` method defaults to the matching `walk_*` function, so an
//! implementor overrides only the nodes it cares about and calls `walk_*` to
//! keep descending. Returning `ControlFlow::Break` stops the traversal.
//!
//! Fragment spreads are not followed: a walk of an operation visits only the
//! nodes written inside that operation. Type-system definitions are skipped.

use std::ops::ControlFlow;

use super::document::{
    Argument, Definition, Directive, Document, Field, FragmentDefinition, FragmentSpread,
    InlineFragment, ObjectField, OperationDefinition, Selection, SelectionSet, Value,
    VariableDefinition,
};
use super::span::Spanned;

/// Shared type alias for visitor traversal methods.
pub type VisitResult<B> = ControlFlow<B>;

macro_rules! try_visit {
    ($expr:expr) => {
        match $expr {
            ControlFlow::Continue(()) => {}
            ControlFlow::Break(b) => return ControlFlow::Break(b),
        }
    };
}

pub trait Visit {
    /// Early-exit payload produced when traversal stops.
    type Break;

    fn visit_document(&mut self, document: &Document) -> VisitResult<Self::Break> {
        walk_document(self, document)
    }

    fn visit_operation_definition(
        &mut self,
        operation: &OperationDefinition,
    ) -> VisitResult<Self::Break> {
        walk_operation_definition(self, operation)
    }

    fn visit_fragment_definition(
        &mut self,
        fragment: &FragmentDefinition,
    ) -> VisitResult<Self::Break> {
        walk_fragment_definition(self, fragment)
    }

    fn visit_variable_definition(
        &mut self,
        definition: &VariableDefinition,
    ) -> VisitResult<Self::Break> {
        walk_variable_definition(self, definition)
    }

    fn visit_selection_set(&mut self, selection_set: &SelectionSet) -> VisitResult<Self::Break> {
        walk_selection_set(self, selection_set)
    }

    fn visit_field(&mut self, field: &Field) -> VisitResult<Self::Break> {
        walk_field(self, field)
    }

    fn visit_fragment_spread(&mut self, spread: &FragmentSpread) -> VisitResult<Self::Break> {
        walk_fragment_spread(self, spread)
    }

    fn visit_inline_fragment(&mut self, fragment: &InlineFragment) -> VisitResult<Self::Break> {
        walk_inline_fragment(self, fragment)
    }

    fn visit_directive(&mut self, directive: &Directive) -> VisitResult<Self::Break> {
        walk_directive(self, directive)
    }

    fn visit_argument(&mut self, argument: &Argument) -> VisitResult<Self::Break> {
        walk_argument(self, argument)
    }

    fn visit_value(&mut self, value: &Spanned<Value>) -> VisitResult<Self::Break> {
        walk_value(self, value)
    }

    fn visit_object_field(&mut self, field: &ObjectField) -> VisitResult<Self::Break> {
        walk_object_field(self, field)
    }
}

pub fn walk_document<V: Visit + ?Sized>(
    visitor: &mut V,
    document: &Document,
) -> VisitResult<V::Break> {
    for definition in &document.definitions {
        match definition {
            Definition::Operation(operation) => {
                try_visit!(visitor.visit_operation_definition(operation))
            }
            Definition::Fragment(fragment) => {
                try_visit!(visitor.visit_fragment_definition(fragment))
            }
            Definition::TypeSystem(_) => {}
        }
    }
    ControlFlow::Continue(())
}

/// Walks variable definitions, then directives, then the selection set.
pub fn walk_operation_definition<V: Visit + ?Sized>(
    visitor: &mut V,
    operation: &OperationDefinition,
) -> VisitResult<V::Break> {
    for definition in &operation.variable_definitions {
        try_visit!(visitor.visit_variable_definition(definition));
    }
    for directive in &operation.directives {
        try_visit!(visitor.visit_directive(directive));
    }
    visitor.visit_selection_set(&operation.selection_set)
}

pub fn walk_fragment_definition<V: Visit + ?Sized>(
    visitor: &mut V,
    fragment: &FragmentDefinition,
) -> VisitResult<V::Break> {
    for directive in &fragment.directives {
        try_visit!(visitor.visit_directive(directive));
    }
    visitor.visit_selection_set(&fragment.selection_set)
}

pub fn walk_variable_definition<V: Visit + ?Sized>(
    visitor: &mut V,
    definition: &VariableDefinition,
) -> VisitResult<V::Break> {
    if let Some(default_value) = &definition.default_value {
        try_visit!(visitor.visit_value(default_value));
    }
    for directive in &definition.directives {
        try_visit!(visitor.visit_directive(directive));
    }
    ControlFlow::Continue(())
}

pub fn walk_selection_set<V: Visit + ?Sized>(
    visitor: &mut V,
    selection_set: &SelectionSet,
) -> VisitResult<V::Break> {
    for selection in &selection_set.selections {
        match selection {
            Selection::Field(field) => try_visit!(visitor.visit_field(field)),
            Selection::FragmentSpread(spread) => try_visit!(visitor.visit_fragment_spread(spread)),
            Selection::InlineFragment(fragment) => {
                try_visit!(visitor.visit_inline_fragment(fragment))
            }
        }
    }
    ControlFlow::Continue(())
}

/// Walks arguments, then directives, then the nested selection set.
pub fn walk_field<V: Visit + ?Sized>(visitor: &mut V, field: &Field) -> VisitResult<V::Break> {
    for argument in &field.arguments {
        try_visit!(visitor.visit_argument(argument));
    }
    for directive in &field.directives {
        try_visit!(visitor.visit_directive(directive));
    }
    if let Some(selection_set) = &field.selection_set {
        try_visit!(visitor.visit_selection_set(selection_set));
    }
    ControlFlow::Continue(())
}

pub fn walk_fragment_spread<V: Visit + ?Sized>(
    visitor: &mut V,
    spread: &FragmentSpread,
) -> VisitResult<V::Break> {
    for directive in &spread.directives {
        try_visit!(visitor.visit_directive(directive));
    }
    ControlFlow::Continue(())
}

pub fn walk_inline_fragment<V: Visit + ?Sized>(
    visitor: &mut V,
    fragment: &InlineFragment,
) -> VisitResult<V::Break> {
    for directive in &fragment.directives {
        try_visit!(visitor.visit_directive(directive));
    }
    visitor.visit_selection_set(&fragment.selection_set)
}

pub fn walk_directive<V: Visit + ?Sized>(
    visitor: &mut V,
    directive: &Directive,
) -> VisitResult<V::Break> {
    for argument in &directive.arguments {
        try_visit!(visitor.visit_argument(argument));
    }
    ControlFlow::Continue(())
}

pub fn walk_argument<V: Visit + ?Sized>(
    visitor: &mut V,
    argument: &Argument,
) -> VisitResult<V::Break> {
    visitor.visit_value(&argument.value)
}

pub fn walk_value<V: Visit + ?Sized>(
    visitor: &mut V,
    value: &Spanned<Value>,
) -> VisitResult<V::Break> {
    match &value.node {
        Value::List(items) => {
            for item in items {
                try_visit!(visitor.visit_value(item));
            }
        }
        Value::Object(fields) => {
            for field in fields {
                try_visit!(visitor.visit_object_field(field));
            }
        }
        Value::Variable(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::String(_)
        | Value::Boolean(_)
        | Value::Null
        | Value::Enum(_) => {}
    }
    ControlFlow::Continue(())
}

pub fn walk_object_field<V: Visit + ?Sized>(
    visitor: &mut V,
    field: &ObjectField,
) -> VisitResult<V::Break> {
    visitor.visit_value(&field.value)
}

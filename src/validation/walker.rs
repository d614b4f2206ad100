//! Type-aware document traversal.
//!
//! [`TypedWalker`] drives [`TypeInfo`] alongside the plain [`Visit`]
//! traversal and hands the current type context to a [`TypedVisitor`].
//! Variable definitions are never descended into, so every variable the
//! visitor sees is a usage.

use std::convert::Infallible;
use std::ops::ControlFlow;

use smol_str::SmolStr;

use crate::ast::visit::{
    Visit, VisitResult, walk_argument, walk_directive, walk_field, walk_fragment_definition,
    walk_inline_fragment, walk_object_field, walk_operation_definition, walk_selection_set,
    walk_value,
};
use crate::ast::{
    Argument, Directive, Field, FragmentDefinition, InlineFragment, ObjectField,
    OperationDefinition, SelectionSet, Span, Spanned, Value, VariableDefinition,
};
use crate::schema::Schema;

use super::context::ValidationContext;
use super::rules::ValidationRule;
use super::type_info::TypeInfo;

/// Callbacks fired by [`TypedWalker`].
pub(crate) trait TypedVisitor<'s> {
    fn enter_operation(&mut self, _operation: &OperationDefinition, _type_info: &TypeInfo<'s>) {}

    fn leave_operation(&mut self, _operation: &OperationDefinition, _type_info: &TypeInfo<'s>) {}

    fn enter_field(&mut self, _field: &Field, _type_info: &TypeInfo<'s>) {}

    fn variable(&mut self, _name: &SmolStr, _span: &Span, _type_info: &TypeInfo<'s>) {}
}

pub(crate) struct TypedWalker<'s, V> {
    type_info: TypeInfo<'s>,
    visitor: V,
}

impl<'s, V: TypedVisitor<'s>> TypedWalker<'s, V> {
    pub(crate) fn new(schema: &'s Schema, visitor: V) -> Self {
        Self {
            type_info: TypeInfo::new(schema),
            visitor,
        }
    }

    pub(crate) fn into_visitor(self) -> V {
        self.visitor
    }
}

impl<'s, V: TypedVisitor<'s>> Visit for TypedWalker<'s, V> {
    type Break = Infallible;

    fn visit_operation_definition(
        &mut self,
        operation: &OperationDefinition,
    ) -> VisitResult<Self::Break> {
        self.type_info.enter_operation(operation);
        self.visitor.enter_operation(operation, &self.type_info);
        let flow = walk_operation_definition(self, operation);
        self.visitor.leave_operation(operation, &self.type_info);
        self.type_info.leave_operation();
        flow
    }

    fn visit_fragment_definition(
        &mut self,
        fragment: &FragmentDefinition,
    ) -> VisitResult<Self::Break> {
        self.type_info.enter_fragment_definition(fragment);
        let flow = walk_fragment_definition(self, fragment);
        self.type_info.leave_fragment_definition();
        flow
    }

    fn visit_variable_definition(
        &mut self,
        _definition: &VariableDefinition,
    ) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_selection_set(&mut self, selection_set: &SelectionSet) -> VisitResult<Self::Break> {
        self.type_info.enter_selection_set();
        let flow = walk_selection_set(self, selection_set);
        self.type_info.leave_selection_set();
        flow
    }

    fn visit_field(&mut self, field: &Field) -> VisitResult<Self::Break> {
        self.type_info.enter_field(field);
        self.visitor.enter_field(field, &self.type_info);
        let flow = walk_field(self, field);
        self.type_info.leave_field();
        flow
    }

    fn visit_inline_fragment(&mut self, fragment: &InlineFragment) -> VisitResult<Self::Break> {
        self.type_info.enter_inline_fragment(fragment);
        let flow = walk_inline_fragment(self, fragment);
        self.type_info.leave_inline_fragment();
        flow
    }

    fn visit_directive(&mut self, directive: &Directive) -> VisitResult<Self::Break> {
        self.type_info.enter_directive(directive);
        let flow = walk_directive(self, directive);
        self.type_info.leave_directive();
        flow
    }

    fn visit_argument(&mut self, argument: &Argument) -> VisitResult<Self::Break> {
        self.type_info.enter_argument(argument);
        let flow = walk_argument(self, argument);
        self.type_info.leave_argument();
        flow
    }

    fn visit_value(&mut self, value: &Spanned<Value>) -> VisitResult<Self::Break> {
        match &value.node {
            Value::Variable(name) => {
                self.visitor.variable(name, &value.span, &self.type_info);
                ControlFlow::Continue(())
            }
            Value::List(_) => {
                self.type_info.enter_list_value();
                let flow = walk_value(self, value);
                self.type_info.leave_list_value();
                flow
            }
            _ => walk_value(self, value),
        }
    }

    fn visit_object_field(&mut self, field: &ObjectField) -> VisitResult<Self::Break> {
        self.type_info.enter_object_field(field);
        let flow = walk_object_field(self, field);
        self.type_info.leave_object_field();
        flow
    }
}

/// Forwards walker callbacks to every registered rule.
pub(crate) struct RuleVisitor<'a> {
    pub(crate) context: ValidationContext<'a>,
    pub(crate) rules: Vec<Box<dyn ValidationRule>>,
}

impl<'s> TypedVisitor<'s> for RuleVisitor<'_> {
    fn enter_operation(&mut self, operation: &OperationDefinition, _type_info: &TypeInfo<'s>) {
        for rule in &mut self.rules {
            rule.enter_operation(&mut self.context, operation);
        }
    }

    fn leave_operation(&mut self, operation: &OperationDefinition, _type_info: &TypeInfo<'s>) {
        for rule in &mut self.rules {
            rule.leave_operation(&mut self.context, operation);
        }
    }

    fn enter_field(&mut self, field: &Field, type_info: &TypeInfo<'s>) {
        for rule in &mut self.rules {
            rule.enter_field(&mut self.context, field, type_info);
        }
    }
}

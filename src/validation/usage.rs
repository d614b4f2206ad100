//! Variable usage collection.

use smol_str::SmolStr;

use crate::ast::visit::Visit;
use crate::ast::{FragmentDefinition, OperationDefinition, Span, Type};
use crate::schema::Schema;

use super::type_info::TypeInfo;
use super::walker::{TypedVisitor, TypedWalker};

/// A place where a variable is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableUsage {
    pub name: SmolStr,
    /// Input type expected at the usage site, when the schema defines it.
    pub expected_type: Option<Type>,
    /// Span of `$name`.
    pub span: Span,
    /// Start of the operation's fragment spread that leads to this usage,
    /// `None` for usages written in the operation itself.
    pub spread_at: Option<usize>,
}

/// Collects usages in source order.
#[derive(Debug, Default)]
pub struct VariableUsageCollector {
    usages: Vec<VariableUsage>,
}

impl VariableUsageCollector {
    pub fn for_operation(schema: &Schema, operation: &OperationDefinition) -> Vec<VariableUsage> {
        let mut walker = TypedWalker::new(schema, Self::default());
        let _ = walker.visit_operation_definition(operation);
        walker.into_visitor().usages
    }

    pub fn for_fragment(schema: &Schema, fragment: &FragmentDefinition) -> Vec<VariableUsage> {
        let mut walker = TypedWalker::new(schema, Self::default());
        let _ = walker.visit_fragment_definition(fragment);
        walker.into_visitor().usages
    }
}

impl<'s> TypedVisitor<'s> for VariableUsageCollector {
    fn variable(&mut self, name: &SmolStr, span: &Span, type_info: &TypeInfo<'s>) {
        self.usages.push(VariableUsage {
            name: name.clone(),
            expected_type: type_info.input_type().cloned(),
            span: span.clone(),
            spread_at: None,
        });
    }
}

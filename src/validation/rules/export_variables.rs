//! Exported variables.
//!
//! A field annotated `@export(as: "x")` publishes its value as the variable
//! `$x` for the rest of the operation. While an operation is walked the rule
//! collects these exports, then adds those of the fragments the operation
//! spreads. When the operation is left the exports are entered into a table
//! in execution order and reconciled against the operation's variables.

use log::{debug, trace};
use smol_str::SmolStr;

use crate::ast::visit::Visit;
use crate::ast::{Field, OperationDefinition, Span, Type};
use crate::validation::context::ValidationContext;
use crate::validation::diag;
use crate::validation::type_info::TypeInfo;
use crate::validation::walker::{TypedVisitor, TypedWalker};
use crate::validation::{ReconcileStrategy, ValidationConfig};

use super::ValidationRule;
use super::type_compat::check_export_compatibility;

/// One `@export` occurrence.
#[derive(Debug, Clone, PartialEq)]
struct ExportBinding {
    name: SmolStr,
    /// Output type of the exporting field, if the schema knows it.
    exported_type: Option<Type>,
    /// Span of the exporting field.
    declared_at: Span,
    /// Start of the operation's spread leading to the field, if it sits in a fragment.
    spread_at: Option<usize>,
}

impl ExportBinding {
    fn order(&self) -> (usize, usize) {
        execution_order(self.spread_at, &self.declared_at)
    }
}

/// Sort key placing a node by where it runs within the operation.
///
/// Nodes inside fragments take the position of the operation's spread that
/// reaches them; ties within a fragment fall back to source position.
fn execution_order(spread_at: Option<usize>, span: &Span) -> (usize, usize) {
    (spread_at.unwrap_or(span.start), span.start)
}

/// Gathers `@export` bindings from the fields it is shown.
struct ExportCollector {
    directive_name: SmolStr,
    argument_name: SmolStr,
    spread_at: Option<usize>,
    bindings: Vec<ExportBinding>,
}

impl ExportCollector {
    fn collect(&mut self, field: &Field, type_info: &TypeInfo<'_>) {
        for directive in field.directives_named(&self.directive_name) {
            let Some(name) = directive
                .argument(&self.argument_name)
                .and_then(|argument| argument.value.node.as_str())
            else {
                trace!(
                    "@{} on field {} has no string `{}` argument",
                    self.directive_name, field.name.node, self.argument_name
                );
                continue;
            };

            let binding = ExportBinding {
                name: SmolStr::new(name),
                exported_type: type_info.output_type().cloned(),
                declared_at: field.span.clone(),
                spread_at: self.spread_at,
            };
            trace!(
                "field {} exports ${} as {:?}",
                field.response_key(),
                binding.name,
                binding.exported_type.as_ref().map(ToString::to_string)
            );
            self.bindings.push(binding);
        }
    }
}

impl<'s> TypedVisitor<'s> for ExportCollector {
    fn enter_field(&mut self, field: &Field, type_info: &TypeInfo<'s>) {
        self.collect(field, type_info);
    }
}

/// Bindings of one operation, in first-export order.
#[derive(Debug, Default)]
struct ExportTable {
    bindings: Vec<ExportBinding>,
}

impl ExportTable {
    /// Inserts `binding`, returning the binding it replaced.
    ///
    /// A replacement keeps the position of the name's first export.
    fn insert(&mut self, binding: ExportBinding) -> Option<ExportBinding> {
        match self.bindings.iter_mut().find(|b| b.name == binding.name) {
            Some(existing) => Some(std::mem::replace(existing, binding)),
            None => {
                self.bindings.push(binding);
                None
            }
        }
    }

    fn get(&self, name: &str) -> Option<&ExportBinding> {
        self.bindings.iter().find(|binding| binding.name == name)
    }

    fn remove(&mut self, name: &str) -> Option<ExportBinding> {
        let index = self.bindings.iter().position(|binding| binding.name == name)?;
        Some(self.bindings.remove(index))
    }

    fn len(&self) -> usize {
        self.bindings.len()
    }

    fn into_remaining(self) -> impl Iterator<Item = ExportBinding> {
        self.bindings.into_iter()
    }
}

/// Checks `@export` usage within each operation.
pub struct ExportVariablesRule {
    strategy: ReconcileStrategy,
    directive_name: SmolStr,
    argument_name: SmolStr,
    /// Present only while walking an operation whose schema defines the directive.
    exports: Option<ExportCollector>,
}

impl ExportVariablesRule {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            strategy: config.strategy,
            directive_name: config.directive_name.clone(),
            argument_name: config.argument_name.clone(),
            exports: None,
        }
    }

    /// Adds the exports of every fragment `operation` spreads, each fragment once.
    fn collect_fragment_exports(
        context: &ValidationContext<'_>,
        operation: &OperationDefinition,
        mut collector: ExportCollector,
    ) -> ExportCollector {
        for (fragment, entry) in context.fragment_entry_points(operation) {
            collector.spread_at = Some(entry);
            let mut walker = TypedWalker::new(context.schema(), collector);
            let _ = walker.visit_fragment_definition(fragment);
            collector = walker.into_visitor();
        }
        collector
    }

    /// Enters bindings in execution order, reporting repeated names.
    fn build_table(
        context: &mut ValidationContext<'_>,
        mut bindings: Vec<ExportBinding>,
    ) -> ExportTable {
        bindings.sort_by_key(ExportBinding::order);
        let mut table = ExportTable::default();
        for binding in bindings {
            let (name, declared_at) = (binding.name.clone(), binding.declared_at.clone());
            if let Some(previous) = table.insert(binding) {
                context.report(diag::duplicate_export(&name, declared_at, previous.declared_at));
            }
        }
        table
    }

    fn reconcile_usages(
        context: &mut ValidationContext<'_>,
        operation: &OperationDefinition,
        mut table: ExportTable,
    ) {
        for definition in &operation.variable_definitions {
            let name = &definition.variable.node;
            let Some(binding) = table.get(name) else {
                continue;
            };
            if let Some(default_value) = &definition.default_value {
                context.report(diag::exported_variable_has_default(
                    name,
                    default_value.span.clone(),
                    binding.declared_at.clone(),
                ));
            }
            context.link_export(operation, name);
        }

        for usage in context.recursive_variable_usages(operation) {
            let Some(binding) = table.remove(&usage.name) else {
                continue;
            };
            trace!(
                "${} used at {:?}, exported at {:?}",
                usage.name, usage.span, binding.declared_at
            );
            if let (Some(expected), Some(exported)) = (&usage.expected_type, &binding.exported_type) {
                if let Err(mismatch) = check_export_compatibility(expected, exported) {
                    context.report(diag::type_mismatch(
                        &usage.name,
                        &mismatch,
                        usage.span.clone(),
                        binding.declared_at.clone(),
                    ));
                }
            }
            if binding.order() > execution_order(usage.spread_at, &usage.span) {
                context.report(diag::referenced_before_assignment(
                    &usage.name,
                    usage.span.clone(),
                    binding.declared_at.clone(),
                ));
            }
        }

        for binding in table.into_remaining() {
            context.report(diag::unresolved_export(&binding.name, binding.declared_at));
        }
    }

    fn reconcile_declarations(
        context: &mut ValidationContext<'_>,
        operation: &OperationDefinition,
        mut table: ExportTable,
    ) {
        for definition in &operation.variable_definitions {
            let name = &definition.variable.node;
            let Some(binding) = table.remove(name) else {
                continue;
            };
            let checked = binding
                .exported_type
                .as_ref()
                .map(|exported| check_export_compatibility(&definition.ty.node, exported));
            if let Some(Err(mismatch)) = checked {
                context.report(diag::type_mismatch(
                    name,
                    &mismatch,
                    definition.ty.span.clone(),
                    binding.declared_at.clone(),
                ));
            }
            context.link_export(operation, name);
        }

        for binding in table.into_remaining() {
            context.report(diag::undeclared_export(&binding.name, binding.declared_at));
        }
    }
}

impl ValidationRule for ExportVariablesRule {
    fn name(&self) -> &'static str {
        "ExportVariables"
    }

    fn enter_operation(&mut self, context: &mut ValidationContext<'_>, operation: &OperationDefinition) {
        if context.schema().has_directive(&self.directive_name) {
            self.exports = Some(ExportCollector {
                directive_name: self.directive_name.clone(),
                argument_name: self.argument_name.clone(),
                spread_at: None,
                bindings: Vec::new(),
            });
        } else {
            debug!(
                "schema does not define @{}; skipping operation {}",
                self.directive_name,
                operation.display_name()
            );
            self.exports = None;
        }
    }

    fn enter_field(
        &mut self,
        _context: &mut ValidationContext<'_>,
        field: &Field,
        type_info: &TypeInfo<'_>,
    ) {
        if let Some(exports) = self.exports.as_mut() {
            exports.collect(field, type_info);
        }
    }

    fn leave_operation(&mut self, context: &mut ValidationContext<'_>, operation: &OperationDefinition) {
        let Some(exports) = self.exports.take() else {
            return;
        };
        let exports = Self::collect_fragment_exports(context, operation, exports);
        let table = Self::build_table(context, exports.bindings);
        debug!(
            "reconciling {} export(s) in operation {} using {:?}",
            table.len(),
            operation.display_name(),
            self.strategy
        );
        match self.strategy {
            ReconcileStrategy::Usages => Self::reconcile_usages(context, operation, table),
            ReconcileStrategy::Declarations => {
                Self::reconcile_declarations(context, operation, table)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(name: &str, start: usize) -> ExportBinding {
        ExportBinding {
            name: name.into(),
            exported_type: Some(Type::named("Int")),
            declared_at: start..start + 1,
            spread_at: None,
        }
    }

    #[test]
    fn table_overwrites_in_place() {
        let mut table = ExportTable::default();
        assert!(table.insert(binding("a", 1)).is_none());
        assert!(table.insert(binding("b", 2)).is_none());
        let previous = table.insert(binding("a", 3)).expect("replaced");
        assert_eq!(previous.declared_at, 1..2);
        assert_eq!(table.get("a").map(|b| b.declared_at.start), Some(3));

        let remaining: Vec<_> = table
            .into_remaining()
            .map(|binding| (binding.name, binding.declared_at.start))
            .collect();
        assert_eq!(remaining, [("a".into(), 3), ("b".into(), 2)]);
    }

    #[test]
    fn removal_consumes_binding() {
        let mut table = ExportTable::default();
        table.insert(binding("a", 1));
        assert!(table.remove("a").is_some());
        assert!(table.remove("a").is_none());
        assert_eq!(table.len(), 0);
    }
}

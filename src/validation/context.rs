//! Shared state handed to validation rules.

use std::collections::HashSet;

use smol_str::SmolStr;

use crate::ast::{
    Document, FragmentDefinition, FragmentSpread, OperationDefinition, Selection, SelectionSet,
};
use crate::diag::Diag;
use crate::schema::Schema;

use super::ExportLinks;
use super::usage::{VariableUsage, VariableUsageCollector};

/// Document, schema and diagnostic sink for one validation run.
pub struct ValidationContext<'a> {
    schema: &'a Schema,
    document: &'a Document,
    diagnostics: Vec<Diag>,
    export_links: Vec<ExportLinks>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(schema: &'a Schema, document: &'a Document) -> Self {
        Self {
            schema,
            document,
            diagnostics: Vec::new(),
            export_links: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Records a diagnostic. Traversal always continues.
    pub fn report(&mut self, diag: Diag) {
        self.diagnostics.push(diag);
    }

    pub fn diagnostics(&self) -> &[Diag] {
        &self.diagnostics
    }

    /// Fragments reachable from `operation` through spreads, in discovery order.
    ///
    /// Each fragment appears once even if spread repeatedly or cyclically.
    /// Spreads naming undefined fragments are ignored.
    pub fn recursively_referenced_fragments(
        &self,
        operation: &OperationDefinition,
    ) -> Vec<&'a FragmentDefinition> {
        self.fragment_entry_points(operation)
            .into_iter()
            .map(|(fragment, _)| fragment)
            .collect()
    }

    /// Like [`recursively_referenced_fragments`](Self::recursively_referenced_fragments),
    /// pairing each fragment with the start of the spread in `operation`
    /// through which it was discovered.
    pub fn fragment_entry_points(
        &self,
        operation: &OperationDefinition,
    ) -> Vec<(&'a FragmentDefinition, usize)> {
        let mut fragments = Vec::new();
        let mut seen = HashSet::new();
        let mut pending = vec![(&operation.selection_set, None)];

        while let Some((selection_set, entry)) = pending.pop() {
            for spread in fragment_spreads(selection_set) {
                let name = spread.name.node.as_str();
                if !seen.insert(name) {
                    continue;
                }
                if let Some(fragment) = self.document.fragment(name) {
                    let entry = entry.unwrap_or(spread.span.start);
                    fragments.push((fragment, entry));
                    pending.push((&fragment.selection_set, Some(entry)));
                }
            }
        }
        fragments
    }

    /// Variable usages of `operation` followed by those of every fragment it
    /// transitively spreads.
    pub fn recursive_variable_usages(
        &self,
        operation: &OperationDefinition,
    ) -> Vec<VariableUsage> {
        let mut usages = VariableUsageCollector::for_operation(self.schema, operation);
        for (fragment, entry) in self.fragment_entry_points(operation) {
            usages.extend(
                VariableUsageCollector::for_fragment(self.schema, fragment)
                    .into_iter()
                    .map(|usage| VariableUsage {
                        spread_at: Some(entry),
                        ..usage
                    }),
            );
        }
        usages
    }

    /// Marks `variable` of `operation` as supplied by an export.
    pub fn link_export(&mut self, operation: &OperationDefinition, variable: &SmolStr) {
        let position = self
            .export_links
            .iter()
            .position(|links| links.operation_span == operation.span);
        let links = match position {
            Some(index) => &mut self.export_links[index],
            None => {
                self.export_links.push(ExportLinks {
                    operation: operation.name.as_ref().map(|name| name.node.clone()),
                    operation_span: operation.span.clone(),
                    variables: Vec::new(),
                });
                let last = self.export_links.len() - 1;
                &mut self.export_links[last]
            }
        };
        if !links.variables.contains(variable) {
            links.variables.push(variable.clone());
        }
    }

    pub(crate) fn finish(self) -> (Vec<Diag>, Vec<ExportLinks>) {
        (self.diagnostics, self.export_links)
    }
}

/// Spreads directly inside `selection_set`, including under fields and
/// inline fragments, without following them.
fn fragment_spreads(selection_set: &SelectionSet) -> Vec<&FragmentSpread> {
    let mut spreads = Vec::new();
    let mut pending = vec![selection_set];
    while let Some(selection_set) = pending.pop() {
        for selection in &selection_set.selections {
            match selection {
                Selection::Field(field) => pending.extend(field.selection_set.as_ref()),
                Selection::FragmentSpread(spread) => spreads.push(spread),
                Selection::InlineFragment(fragment) => pending.push(&fragment.selection_set),
            }
        }
    }
    spreads
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::from_sdl("type Query { a(x: Int): Query, b(y: String): Int }").expect("schema")
    }

    #[test]
    fn fragments_are_discovered_once_through_cycles() {
        let schema = schema();
        let document = crate::parse(
            r#"
            query Q { ...A a { ... on Query { ...B } } }
            fragment A on Query { b(y: $a) ...C }
            fragment B on Query { ...A b(y: $b) }
            fragment C on Query { ...B ...Missing }
            "#,
        )
        .document
        .expect("document");
        let operation = document.operations().next().expect("operation");
        let context = ValidationContext::new(&schema, &document);

        let names: Vec<_> = context
            .recursively_referenced_fragments(operation)
            .iter()
            .map(|fragment| fragment.name.node.as_str())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);

        let usages: Vec<_> = context
            .recursive_variable_usages(operation)
            .into_iter()
            .map(|usage| usage.name)
            .collect();
        assert_eq!(usages, ["a", "b"]);
    }

    #[test]
    fn nested_fragments_enter_through_the_operation_spread() {
        let schema = schema();
        let source = r#"query Q { b ...A a { ...C } }
            fragment A on Query { ...B }
            fragment B on Query { b(y: $v) }
            fragment C on Query { b }"#;
        let document = crate::parse(source).document.expect("document");
        let operation = document.operations().next().expect("operation");
        let context = ValidationContext::new(&schema, &document);

        let spread_a = source.find("...A").expect("...A");
        let spread_c = source.find("...C").expect("...C");
        let entries: Vec<_> = context
            .fragment_entry_points(operation)
            .into_iter()
            .map(|(fragment, entry)| (fragment.name.node.as_str(), entry))
            .collect();
        assert_eq!(entries, [("A", spread_a), ("C", spread_c), ("B", spread_a)]);

        let usages = context.recursive_variable_usages(operation);
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].spread_at, Some(spread_a));
    }

    #[test]
    fn export_links_group_by_operation() {
        let schema = schema();
        let document = crate::parse("query A { b } query B { b }")
            .document
            .expect("document");
        let mut operations = document.operations();
        let (first, second) = (
            operations.next().expect("A"),
            operations.next().expect("B"),
        );
        let mut context = ValidationContext::new(&schema, &document);
        context.link_export(first, &"x".into());
        context.link_export(first, &"x".into());
        context.link_export(second, &"y".into());
        context.link_export(first, &"z".into());

        let (diagnostics, links) = context.finish();
        assert!(diagnostics.is_empty());
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].operation.as_deref(), Some("A"));
        assert_eq!(links[0].variables, ["x", "z"]);
        assert_eq!(links[1].variables, ["y"]);
    }
}

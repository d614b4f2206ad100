//! Validation of exported variables.
//!
//! [`ExportValidator`] walks a parsed [`Document`] against a [`Schema`] and
//! runs the exported-variables rule over each operation. Problems are
//! collected as [`Diag`]s; the walk never stops early. Alongside the
//! diagnostics, the outcome lists which declared variables are supplied by
//! an `@export`, per operation.

mod context;
pub mod diag;
pub mod rules;
mod type_info;
mod usage;
mod walker;

use miette::Report;
use smol_str::SmolStr;

use crate::ast::visit::Visit;
use crate::ast::{Document, Span};
use crate::diag::{Diag, SourceFile, convert_diagnostics_to_reports};
use crate::schema::Schema;

pub use context::ValidationContext;
pub use diag::ExportDiagKind;
pub use rules::ValidationRule;
pub use rules::export_variables::ExportVariablesRule;
pub use rules::type_compat::{TypeMismatch, check_export_compatibility};
pub use type_info::TypeInfo;
pub use usage::{VariableUsage, VariableUsageCollector};

use walker::{RuleVisitor, TypedWalker};

/// How collected exports are reconciled when an operation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileStrategy {
    /// Match exports against every variable usage, checking order and
    /// rejecting default values and unused exports.
    #[default]
    Usages,
    /// Match exports against variable definitions only.
    Declarations,
}

/// Configuration for export validation.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Reconciliation strategy.
    pub strategy: ReconcileStrategy,

    /// Name of the export directive.
    pub directive_name: SmolStr,

    /// Name of the directive argument holding the variable name.
    pub argument_name: SmolStr,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strategy: ReconcileStrategy::Usages,
            directive_name: SmolStr::new_static("export"),
            argument_name: SmolStr::new_static("as"),
        }
    }
}

/// Variables of one operation that receive their value from an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLinks {
    /// Operation name, `None` for anonymous operations.
    pub operation: Option<SmolStr>,
    pub operation_span: Span,
    /// Linked variable names in declaration order.
    pub variables: Vec<SmolStr>,
}

impl ExportLinks {
    pub fn contains(&self, variable: &str) -> bool {
        self.variables.iter().any(|name| name == variable)
    }
}

/// Result of validating a document.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub diagnostics: Vec<Diag>,
    pub export_links: Vec<ExportLinks>,
}

impl ValidationOutcome {
    /// True when no error-severity diagnostic was reported.
    pub fn is_success(&self) -> bool {
        !self.diagnostics.iter().any(Diag::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diag> {
        self.diagnostics.iter().filter(|diag| diag.is_error())
    }

    /// Export links of the operation named `operation` (`None` for anonymous).
    pub fn links_for(&self, operation: Option<&str>) -> Option<&ExportLinks> {
        self.export_links
            .iter()
            .find(|links| links.operation.as_deref() == operation)
    }

    pub fn reports(&self, source: &SourceFile) -> Vec<Report> {
        convert_diagnostics_to_reports(&self.diagnostics, source)
    }
}

/// Validates `@export` usage in executable documents.
pub struct ExportValidator<'s> {
    schema: &'s Schema,
    config: ValidationConfig,
}

impl<'s> ExportValidator<'s> {
    /// Creates a validator with the default configuration.
    pub fn new(schema: &'s Schema) -> Self {
        Self::with_config(schema, ValidationConfig::default())
    }

    pub fn with_config(schema: &'s Schema, config: ValidationConfig) -> Self {
        Self { schema, config }
    }

    pub fn with_strategy(mut self, strategy: ReconcileStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Uses a differently named directive, e.g. `@bind(to: "x")`.
    pub fn with_directive(
        mut self,
        directive_name: impl Into<SmolStr>,
        argument_name: impl Into<SmolStr>,
    ) -> Self {
        self.config.directive_name = directive_name.into();
        self.config.argument_name = argument_name.into();
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates every operation in `document`.
    ///
    /// Each operation gets a fresh export table; fields in fragment
    /// definitions are reached only through the operations that spread them.
    pub fn validate(&self, document: &Document) -> ValidationOutcome {
        let visitor = RuleVisitor {
            context: ValidationContext::new(self.schema, document),
            rules: vec![Box::new(ExportVariablesRule::new(&self.config))],
        };
        let mut walker = TypedWalker::new(self.schema, visitor);
        let _ = walker.visit_document(document);

        let (diagnostics, export_links) = walker.into_visitor().context.finish();
        log::debug!(
            "export validation finished with {} diagnostic(s)",
            diagnostics.len()
        );
        ValidationOutcome {
            diagnostics,
            export_links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn schema() -> Schema {
        Schema::from_sdl(
            r#"
            directive @export(as: String!) on FIELD
            type Query { me: User, user(id: ID!): User }
            type User { id: ID!, name: String }
            "#,
        )
        .expect("schema")
    }

    #[test]
    fn valid_export_links_variable() {
        let schema = schema();
        let document = parse(
            r#"query Q($id: ID!) { me { id @export(as: "id") } user(id: $id) { name } }"#,
        )
        .document
        .expect("document");
        let outcome = ExportValidator::new(&schema).validate(&document);
        assert!(outcome.is_success(), "{:?}", outcome.diagnostics);
        let links = outcome.links_for(Some("Q")).expect("links");
        assert!(links.contains("id"));
    }

    #[test]
    fn custom_directive_name() {
        let schema = Schema::from_sdl(
            "directive @bind(to: String!) on FIELD type Query { a: Int, b(x: Int): Int }",
        )
        .expect("schema");
        let document = parse(r#"{ a @bind(to: "x") }"#)
            .document
            .expect("document");

        let outcome = ExportValidator::new(&schema)
            .with_directive("bind", "to")
            .validate(&document);
        assert_eq!(outcome.errors().count(), 1);
        assert!(outcome.diagnostics[0].has_code("export::unresolved_export"));

        let default = ExportValidator::new(&schema).validate(&document);
        assert!(default.diagnostics.is_empty());
    }

    #[test]
    fn config_defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.strategy, ReconcileStrategy::Usages);
        assert_eq!(config.directive_name, "export");
        assert_eq!(config.argument_name, "as");
    }
}

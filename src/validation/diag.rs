//! Diagnostics reported by the exported-variables rule.

use crate::ast::{Span, Type};
use crate::diag::Diag;

use super::rules::type_compat::TypeMismatch;

/// Categories of exported-variable errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDiagKind {
    /// The same name is exported twice within one operation.
    DuplicateExport,

    /// A variable fed by an export also declares a default value.
    ExportedVariableHasDefault,

    /// A non-null variable is fed from a nullable field.
    NullabilityMismatch,

    /// List shape or named type differs between variable and field.
    NamedTypeMismatch,

    /// A variable is used before the field that exports it.
    ReferencedBeforeAssignment,

    /// An export is never consumed by a variable usage.
    UnresolvedExport,

    /// An export has no matching variable definition.
    UndeclaredExport,
}

impl ExportDiagKind {
    /// Returns a human-readable name for this diagnostic kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::DuplicateExport => "DuplicateExport",
            Self::ExportedVariableHasDefault => "ExportedVariableHasDefault",
            Self::NullabilityMismatch => "NullabilityMismatch",
            Self::NamedTypeMismatch => "NamedTypeMismatch",
            Self::ReferencedBeforeAssignment => "ReferencedBeforeAssignment",
            Self::UnresolvedExport => "UnresolvedExport",
            Self::UndeclaredExport => "UndeclaredExport",
        }
    }

    /// Stable code attached to the diagnostic, e.g. `export::duplicate_export`.
    pub fn code(self) -> &'static str {
        match self {
            Self::DuplicateExport => "export::duplicate_export",
            Self::ExportedVariableHasDefault => "export::exported_variable_has_default",
            Self::NullabilityMismatch => "export::nullability_mismatch",
            Self::NamedTypeMismatch => "export::named_type_mismatch",
            Self::ReferencedBeforeAssignment => "export::referenced_before_assignment",
            Self::UnresolvedExport => "export::unresolved_export",
            Self::UndeclaredExport => "export::undeclared_export",
        }
    }

    fn error(self, message: String) -> Diag {
        Diag::error(message).with_code(self.code())
    }
}

pub(crate) fn duplicate_export(name: &str, field: Span, first: Span) -> Diag {
    ExportDiagKind::DuplicateExport
        .error(format!("Variable \"${name}\" has already been exported"))
        .with_primary_label(field, format!("`${name}` exported again here"))
        .with_secondary_label(first, "first exported here")
        .with_note("the later export replaces the earlier one")
}

pub(crate) fn exported_variable_has_default(
    name: &str,
    default_value: Span,
    export: Span,
) -> Diag {
    ExportDiagKind::ExportedVariableHasDefault
        .error(format!(
            "Exported variable \"${name}\" cannot have a default value"
        ))
        .with_primary_label(default_value, "default value declared here")
        .with_secondary_label(export, "value supplied by this export")
        .with_help("remove the default value")
}

pub(crate) fn type_mismatch(name: &str, mismatch: &TypeMismatch, usage: Span, export: Span) -> Diag {
    match mismatch {
        TypeMismatch::Nullability { variable, exported } => {
            nullability_mismatch(name, variable, exported, usage, export)
        }
        TypeMismatch::NamedType { variable, exported } => {
            named_type_mismatch(name, variable, exported, usage, export)
        }
    }
}

fn nullability_mismatch(
    name: &str,
    variable: &Type,
    exported: &Type,
    usage: Span,
    export: Span,
) -> Diag {
    ExportDiagKind::NullabilityMismatch
        .error(format!(
            "Variable \"${name}\" of required type \"{variable}\" exported from field of type \"{exported}\""
        ))
        .with_primary_label(usage, format!("requires `{variable}`"))
        .with_secondary_label(export, format!("may produce null (`{exported}`)"))
        .with_help("export a non-null field or make the variable nullable")
}

fn named_type_mismatch(
    name: &str,
    variable: &Type,
    exported: &Type,
    usage: Span,
    export: Span,
) -> Diag {
    ExportDiagKind::NamedTypeMismatch
        .error(format!(
            "Variable \"${name}\" of type \"{variable}\" exported from field of type \"{exported}\""
        ))
        .with_primary_label(usage, format!("expects `{variable}`"))
        .with_secondary_label(export, format!("exports `{exported}`"))
}

pub(crate) fn referenced_before_assignment(name: &str, usage: Span, export: Span) -> Diag {
    ExportDiagKind::ReferencedBeforeAssignment
        .error(format!(
            "Exported variable ${name} referenced before assignment"
        ))
        .with_primary_label(usage, "used here")
        .with_secondary_label(export, "exported later here")
        .with_help("move the exporting field before the first use of the variable")
}

pub(crate) fn unresolved_export(name: &str, export: Span) -> Diag {
    ExportDiagKind::UnresolvedExport
        .error(format!(
            "Exported variable \"${name}\" is referenced but never declared"
        ))
        .with_primary_label(export, format!("`${name}` is never used"))
}

pub(crate) fn undeclared_export(name: &str, export: Span) -> Diag {
    ExportDiagKind::UndeclaredExport
        .error(format!(
            "Exported variable \"${name}\" referenced but not declared"
        ))
        .with_primary_label(export, "exported here")
        .with_help(format!("declare `${name}` in the operation's variables"))
}

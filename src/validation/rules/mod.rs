//! Validation rules and the callback contract they implement.

pub mod export_variables;
pub mod type_compat;

use crate::ast::{Field, OperationDefinition};

use super::context::ValidationContext;
use super::type_info::TypeInfo;

/// A rule driven by the validation walker.
///
/// Every callback defaults to a no-op. `leave_operation` fires after all of
/// the operation's descendants have been visited.
pub trait ValidationRule {
    fn name(&self) -> &'static str;

    fn enter_operation(&mut self, _context: &mut ValidationContext<'_>, _operation: &OperationDefinition) {}

    fn leave_operation(&mut self, _context: &mut ValidationContext<'_>, _operation: &OperationDefinition) {}

    fn enter_field(
        &mut self,
        _context: &mut ValidationContext<'_>,
        _field: &Field,
        _type_info: &TypeInfo<'_>,
    ) {
    }
}

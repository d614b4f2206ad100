//! Structural compatibility between an exported field type and a variable type.

use crate::ast::Type;

/// Why an exported field cannot feed a variable.
///
/// Each variant carries the two types at the nesting level where the
/// comparison failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMismatch {
    /// The variable is non-null but the field may produce null.
    Nullability { variable: Type, exported: Type },
    /// With nullability stripped, the shapes or named types differ.
    NamedType { variable: Type, exported: Type },
}

/// Checks that a field of type `exported` may supply a variable of type `variable`.
///
/// The check is directional: the exported type must be at least as strict as
/// the variable. `Int!` may feed `Int`, but `Int` may not feed `Int!`. Lists
/// are compared element by element, so `[Int!]!` feeds `[Int]` while `[Int]`
/// does not feed `[[Int]]`.
pub fn check_export_compatibility(variable: &Type, exported: &Type) -> Result<(), TypeMismatch> {
    if variable.is_non_null() && exported.is_nullable() {
        return Err(TypeMismatch::Nullability {
            variable: variable.clone(),
            exported: exported.clone(),
        });
    }

    let (variable, exported) = (variable.nullable(), exported.nullable());
    match (variable, exported) {
        (Type::List(variable_item), Type::List(exported_item)) => {
            check_export_compatibility(variable_item, exported_item)
        }
        (Type::Named(a), Type::Named(b)) if a == b => Ok(()),
        _ => Err(TypeMismatch::NamedType {
            variable: variable.clone(),
            exported: exported.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> Type {
        Type::named("Int")
    }

    #[test]
    fn non_null_export_may_feed_nullable_variable() {
        assert_eq!(
            check_export_compatibility(&int(), &Type::non_null(int())),
            Ok(())
        );
    }

    #[test]
    fn nullable_export_may_not_feed_required_variable() {
        assert_eq!(
            check_export_compatibility(&Type::non_null(int()), &int()),
            Err(TypeMismatch::Nullability {
                variable: Type::non_null(int()),
                exported: int(),
            })
        );
    }

    #[test]
    fn nested_lists_recurse() {
        let nested = Type::list(Type::list(int()));
        assert_eq!(check_export_compatibility(&nested, &nested), Ok(()));
        assert_eq!(
            check_export_compatibility(&Type::list(int()), &nested),
            Err(TypeMismatch::NamedType {
                variable: int(),
                exported: Type::list(int()),
            })
        );
    }

    #[test]
    fn nullability_is_checked_at_every_level() {
        let variable = Type::list(Type::non_null(int()));
        let exported = Type::non_null(Type::list(int()));
        assert_eq!(
            check_export_compatibility(&variable, &exported),
            Err(TypeMismatch::Nullability {
                variable: Type::non_null(int()),
                exported: int(),
            })
        );
    }

    #[test]
    fn named_types_must_match_exactly() {
        assert_eq!(
            check_export_compatibility(&Type::non_null(int()), &Type::non_null(Type::named("ID"))),
            Err(TypeMismatch::NamedType {
                variable: int(),
                exported: Type::named("ID"),
            })
        );
    }
}

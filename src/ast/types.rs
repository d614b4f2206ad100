//! GraphQL type references.

use std::fmt;

use smol_str::SmolStr;

/// A type reference such as `Int`, `[String!]` or `[[ID]!]!`.
///
/// A type without an outer [`Type::NonNull`] wrapper is nullable. The parser
/// never produces `NonNull(NonNull(_))`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A scalar, enum, object, interface, union or input object by name.
    Named(SmolStr),
    /// A list of the inner type.
    List(Box<Type>),
    /// The non-null form of the inner type.
    NonNull(Box<Type>),
}

impl Type {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Type::Named(name.into())
    }

    pub fn list(inner: Type) -> Self {
        Type::List(Box::new(inner))
    }

    /// Wraps the type as non-null. Already non-null types are returned unchanged.
    pub fn non_null(inner: Type) -> Self {
        match inner {
            Type::NonNull(_) => inner,
            other => Type::NonNull(Box::new(other)),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Type::NonNull(_))
    }

    pub fn is_nullable(&self) -> bool {
        !self.is_non_null()
    }

    /// Returns the type with its outer non-null layer removed, if present.
    pub fn nullable(&self) -> &Type {
        match self {
            Type::NonNull(inner) => inner,
            other => other,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.nullable(), Type::List(_))
    }

    /// Element type of a (possibly non-null) list.
    pub fn list_item(&self) -> Option<&Type> {
        match self.nullable() {
            Type::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// Name of the leaf type under all list and non-null wrappers.
    pub fn base_name(&self) -> &SmolStr {
        match self {
            Type::Named(name) => name,
            Type::List(inner) | Type::NonNull(inner) => inner.base_name(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(name) => write!(f, "{name}"),
            Type::List(inner) => write!(f, "[{inner}]"),
            Type::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_graphql_notation() {
        let ty = Type::non_null(Type::list(Type::non_null(Type::named("Int"))));
        assert_eq!(ty.to_string(), "[Int!]!");
        assert_eq!(Type::list(Type::list(Type::named("ID"))).to_string(), "[[ID]]");
    }

    #[test]
    fn nullable_strips_one_layer() {
        let ty = Type::non_null(Type::list(Type::non_null(Type::named("Int"))));
        assert!(ty.is_non_null());
        assert_eq!(ty.nullable().to_string(), "[Int!]");
        assert_eq!(ty.nullable().nullable().to_string(), "[Int!]");
    }

    #[test]
    fn non_null_is_idempotent() {
        let once = Type::non_null(Type::named("String"));
        let twice = Type::non_null(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn list_helpers() {
        let ty = Type::non_null(Type::list(Type::named("Float")));
        assert!(ty.is_list());
        assert_eq!(ty.list_item(), Some(&Type::named("Float")));
        assert_eq!(ty.base_name(), "Float");
        assert!(!Type::named("Float").is_list());
        assert!(Type::named("Float").is_nullable());
    }
}

//! Property tests for export type compatibility.

use gql_export::Type;
use gql_export::validation::{TypeMismatch, check_export_compatibility};
use proptest::prelude::*;

fn named() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::named("Int")),
        Just(Type::named("String")),
        Just(Type::named("ID")),
        Just(Type::named("User")),
    ]
}

/// Arbitrary well-formed types: no directly nested non-null wrappers.
fn any_type() -> impl Strategy<Value = Type> {
    let leaf = (named(), any::<bool>())
        .prop_map(|(ty, required)| if required { Type::non_null(ty) } else { ty });
    leaf.prop_recursive(4, 16, 1, |inner| {
        (inner, any::<bool>()).prop_map(|(item, required)| {
            let list = Type::list(item);
            if required { Type::non_null(list) } else { list }
        })
    })
}

fn list_depth(ty: &Type) -> usize {
    match ty.list_item() {
        Some(item) => 1 + list_depth(item),
        None => 0,
    }
}

proptest! {
    #[test]
    fn every_type_feeds_itself(ty in any_type()) {
        prop_assert_eq!(check_export_compatibility(&ty, &ty), Ok(()));
    }

    #[test]
    fn non_null_export_feeds_nullable_variable(ty in any_type()) {
        let variable = ty.nullable().clone();
        let exported = Type::non_null(variable.clone());
        prop_assert_eq!(check_export_compatibility(&variable, &exported), Ok(()));
    }

    #[test]
    fn nullable_export_never_feeds_required_variable(ty in any_type()) {
        let exported = ty.nullable().clone();
        let variable = Type::non_null(exported.clone());
        let result = check_export_compatibility(&variable, &exported);
        let is_nullability_error = matches!(result, Err(TypeMismatch::Nullability { .. }));
        prop_assert!(is_nullability_error);
    }

    #[test]
    fn differing_list_depth_is_rejected(a in any_type(), b in any_type()) {
        prop_assume!(list_depth(&a) != list_depth(&b));
        prop_assert!(check_export_compatibility(&a, &b).is_err());
    }

    #[test]
    fn differing_base_names_are_rejected(a in any_type(), b in any_type()) {
        prop_assume!(a.base_name() != b.base_name());
        prop_assert!(check_export_compatibility(&a, &b).is_err());
    }
}

#[test]
fn list_depth_examples() {
    let int = Type::named("Int");
    let nested = Type::list(Type::list(int.clone()));
    assert_eq!(check_export_compatibility(&nested, &nested), Ok(()));
    assert!(check_export_compatibility(&Type::list(int.clone()), &nested).is_err());
    assert!(check_export_compatibility(&Type::non_null(int.clone()), &int).is_err());
    assert_eq!(check_export_compatibility(&int, &Type::non_null(int.clone())), Ok(()));
}

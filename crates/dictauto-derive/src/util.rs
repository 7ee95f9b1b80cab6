use syn::{GenericArgument, Generics, PathArguments, Type, WherePredicate};

/// Copy of `generics` whose where clause also carries `bounds`.
pub fn with_bounds(generics: &Generics, bounds: Vec<WherePredicate>) -> Generics {
    let mut generics = generics.clone();
    if !bounds.is_empty() {
        generics.make_where_clause().predicates.extend(bounds);
    }

    generics
}

pub fn is_path_ident(ty: &Type, ident: &str) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == ident)
}

/// `Option<DictItem>` under any path prefix.
pub fn is_item_slot(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(segment) = path.path.segments.last() else {
        return false;
    };
    if segment.ident != "Option" {
        return false;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };

    matches!(
        args.args.first(),
        Some(GenericArgument::Type(inner)) if is_path_ident(inner, "DictItem")
    )
}

///
/// TESTS
///

//! Method override detection.
//!
//! A method overrides another when it is declared on a strict subtype of the other's
//! declaring type, has the same name, and has identical parameter types position by
//! position. Private and static methods are never overridden, and a package-visible
//! method is only overridden from its own namespace. Return types are not compared.

use crate::{
    introspection::hierarchy::is_assignable_from,
    metadata::method::{Method, MethodRc},
};

/// Returns `true` if `candidate` overrides `base`.
///
/// Methods declared on the same type never override each other. Parameter types are compared
/// by identity, so a parameter of a subtype does not match.
///
/// # Examples
///
/// ```rust
/// use hierscope::introspection::overrides;
/// use hierscope::metadata::method::MethodBuilder;
/// use hierscope::metadata::typesystem::{TypeBuilder, TypeRegistry};
/// use std::sync::Arc;
///
/// let registry = Arc::new(TypeRegistry::new()?);
/// let shape = TypeBuilder::new(registry.clone())
///     .class("app", "Shape")?
///     .method(MethodBuilder::new("draw"))?
///     .build()?;
/// let circle = TypeBuilder::new(registry.clone())
///     .class("app", "Circle")?
///     .extends(&shape)?
///     .method(MethodBuilder::new("draw"))?
///     .build()?;
///
/// let base = &shape.declared_methods()?[0];
/// let derived = &circle.declared_methods()?[0];
/// assert!(overrides(base, derived));
/// assert!(!overrides(derived, base));
/// # Ok::<(), hierscope::Error>(())
/// ```
pub fn overrides(base: &Method, candidate: &Method) -> bool {
    if base.declaring_type.ptr_eq(&candidate.declaring_type) {
        return false;
    }

    let (Some(base_owner), Some(candidate_owner)) =
        (base.declaring_type(), candidate.declaring_type())
    else {
        return false;
    };
    if !is_assignable_from(&base_owner, &candidate_owner) {
        return false;
    }

    if !base.access.is_overridable() || base.is_static() || candidate.is_static() {
        return false;
    }
    if base.access.is_package() && base_owner.namespace != candidate_owner.namespace {
        return false;
    }

    if base.name != candidate.name || base.arity() != candidate.arity() {
        return false;
    }

    base.params
        .iter()
        .zip(&candidate.params)
        .all(|(expected, actual)| expected.ptr_eq(actual))
}

/// Returns `true` if any method in `methods` overrides `candidate`
pub fn contains_overriding_method(methods: &[MethodRc], candidate: &Method) -> bool {
    methods.iter().any(|method| overrides(candidate, method))
}

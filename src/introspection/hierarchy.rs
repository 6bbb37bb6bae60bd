//! Superclass and interface closure of a type.
//!
//! [`class_and_super_classes`] produces the type itself followed by every transitive
//! superclass and superinterface, each exactly once. It is the uncached computation behind
//! [`crate::introspection::ClassHierarchy::class_and_super_classes`].
//!
//! # Walk Order
//!
//! 1. The start type
//! 2. Its direct interfaces, each followed depth-first by its superinterfaces
//! 3. For each superclass up to the root: the class, then its interfaces as in step 2
//!
//! An interface start type has no superclass chain, only superinterfaces.

use std::collections::HashSet;

use crate::metadata::typesystem::{ClassTypeRc, TypeIdentity};

struct Closure {
    seen: HashSet<TypeIdentity>,
    ordered: Vec<ClassTypeRc>,
}

impl Closure {
    fn new() -> Self {
        Closure {
            seen: HashSet::new(),
            ordered: Vec::new(),
        }
    }

    /// Returns `false` if `ty` was already collected
    fn push(&mut self, ty: &ClassTypeRc) -> bool {
        if self.seen.insert(TypeIdentity::new(ty)) {
            self.ordered.push(ty.clone());
            true
        } else {
            false
        }
    }

    fn push_interfaces(&mut self, ty: &ClassTypeRc) {
        for iface in ty.interfaces() {
            if self.push(&iface) {
                self.push_interfaces(&iface);
            }
        }
    }
}

/// The type followed by all of its distinct transitive ancestors.
///
/// Never empty, the first element is always `ty`.
///
/// Array types are walked like any other class, so `String[]` yields
/// `[String[], Cloneable, Serializable, Object]`. This differs from
/// [`crate::introspection::ClassHierarchy::class_and_super_classes`], which maps the
/// component's ancestors to their array types (`[String[], Serializable[], ..., Object[]]`).
/// Use the cache when covariant array ancestors are wanted.
pub fn class_and_super_classes(ty: &ClassTypeRc) -> Vec<ClassTypeRc> {
    let mut closure = Closure::new();
    closure.push(ty);
    closure.push_interfaces(ty);

    if !ty.is_interface() {
        let mut current = ty.base();
        while let Some(class) = current {
            closure.push(&class);
            closure.push_interfaces(&class);
            if class.is_root() {
                break;
            }
            current = class.base();
        }
    }

    closure.ordered
}

/// Returns `true` if `ancestor` is `descendant` or one of its transitive ancestors
pub fn is_assignable_from(ancestor: &ClassTypeRc, descendant: &ClassTypeRc) -> bool {
    let target = TypeIdentity::new(ancestor);
    class_and_super_classes(descendant)
        .iter()
        .any(|ty| TypeIdentity::new(ty) == target)
}

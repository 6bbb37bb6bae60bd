//! Identity keys for type handles.
//!
//! Caches and visited-sets over the type model compare types by reference, never by name or
//! structure. [`TypeIdentity`] wraps a [`ClassTypeRc`] and implements `Hash` and `Eq` over the
//! address of the shared allocation. Holding the strong reference inside the key keeps the
//! allocation alive, so an address can not be reused by another type while the key exists.

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::metadata::typesystem::ClassTypeRc;

/// A hashable, identity-compared key for a type handle
#[derive(Clone)]
pub struct TypeIdentity(ClassTypeRc);

impl TypeIdentity {
    /// Create a key for `ty`
    #[must_use]
    pub fn new(ty: &ClassTypeRc) -> Self {
        TypeIdentity(ty.clone())
    }

    /// The type this key refers to
    #[must_use]
    pub fn get(&self) -> &ClassTypeRc {
        &self.0
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeIdentity({} @ {:p})", self.0.fullname(), Arc::as_ptr(&self.0))
    }
}

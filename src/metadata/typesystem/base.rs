use std::sync::{Arc, Weak};

use bitflags::bitflags;

use crate::metadata::typesystem::{ClassType, ClassTypeRc};

/// A vector that holds `ClassTypeRef` instances (weak references)
pub type ClassTypeRefList = Arc<boxcar::Vec<ClassTypeRef>>;

/// A smart reference to a `ClassType` that automatically handles weak references
/// to prevent circular reference memory leaks while providing a clean API
#[derive(Clone, Debug)]
pub struct ClassTypeRef {
    weak_ref: Weak<ClassType>,
}

impl ClassTypeRef {
    /// Create a new `ClassTypeRef` from a strong reference
    pub fn new(strong_ref: &ClassTypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the type, returning None if the type has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<ClassTypeRc> {
        self.weak_ref.upgrade()
    }

    /// Returns `true` if this reference points at exactly `other`.
    ///
    /// Comparison is by identity, two distinct handles describing a type with the same name
    /// never compare equal.
    #[must_use]
    pub fn refers_to(&self, other: &ClassTypeRc) -> bool {
        std::ptr::eq(self.weak_ref.as_ptr(), Arc::as_ptr(other))
    }

    /// Returns `true` if both references point at the same type.
    #[must_use]
    pub fn ptr_eq(&self, other: &ClassTypeRef) -> bool {
        self.weak_ref.ptr_eq(&other.weak_ref)
    }

    /// Get the full name of the referenced type (if still alive)
    #[must_use]
    pub fn fullname(&self) -> Option<String> {
        self.upgrade().map(|t| t.fullname())
    }
}

impl From<ClassTypeRc> for ClassTypeRef {
    fn from(strong_ref: ClassTypeRc) -> Self {
        Self::new(&strong_ref)
    }
}

impl From<&ClassTypeRc> for ClassTypeRef {
    fn from(strong_ref: &ClassTypeRc) -> Self {
        Self::new(strong_ref)
    }
}

/// The kind of a loaded type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassFlavor {
    /// A regular class, has exactly one superclass unless it is the root type
    Class,
    /// An interface, has superinterfaces but never a superclass
    Interface,
    /// An annotation type, an interface that can be applied to other elements
    Annotation,
    /// A built-in primitive such as `int`, has neither superclass nor interfaces
    Primitive,
    /// An array type constructed at runtime from a component type
    Array,
}

impl ClassFlavor {
    /// Returns `true` for flavors that only have superinterfaces
    #[must_use]
    pub fn is_interface(&self) -> bool {
        matches!(self, ClassFlavor::Interface | ClassFlavor::Annotation)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Access and modifier flags of a loaded type
    pub struct ClassFlags: u32 {
        /// Type is visible outside of its namespace
        const PUBLIC = 0x0001;
        /// Type can not be extended
        const FINAL = 0x0010;
        /// Type can not be instantiated
        const ABSTRACT = 0x0400;
        /// Type was generated by a compiler, not declared in source
        const SYNTHETIC = 0x1000;
        /// Type is the universal root of the class hierarchy
        const ROOT = 0x8000_0000;
    }
}

//! Method flags for declared methods of the reflective type model.
//!
//! # Key Types
//! - [`MethodAccessFlags`]: Visibility of a method
//! - [`MethodModifiers`]: Modifier flags (static, final, abstract, ...)

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method access flags
    pub struct MethodAccessFlags: u32 {
        /// Visible to the declaring type only
        const PRIVATE = 0x0001;
        /// Visible to the declaring namespace
        const PACKAGE = 0x0002;
        /// Visible to subclasses and the declaring namespace
        const PROTECTED = 0x0004;
        /// Visible everywhere
        const PUBLIC = 0x0007;
    }
}

impl MethodAccessFlags {
    /// Returns `true` if a subclass may override a method with this visibility.
    ///
    /// Package-visible methods are only overridable from the same namespace, which the
    /// caller has to check.
    #[must_use]
    pub fn is_overridable(self) -> bool {
        self != Self::PRIVATE
    }

    /// Returns `true` for package (namespace) visibility
    #[must_use]
    pub fn is_package(self) -> bool {
        self == Self::PACKAGE
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is synchronized on its receiver
        const SYNCHRONIZED = 0x0040;
        /// Method is a compiler generated bridge
        const BRIDGE = 0x0080;
        /// Method accepts a variable number of arguments
        const VARARGS = 0x0100;
        /// Method is implemented natively by the host
        const NATIVE = 0x0200;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method was generated by a compiler, not declared in source
        const SYNTHETIC = 0x1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overridable_access() {
        assert!(MethodAccessFlags::PUBLIC.is_overridable());
        assert!(MethodAccessFlags::PROTECTED.is_overridable());
        assert!(MethodAccessFlags::PACKAGE.is_overridable());
        assert!(!MethodAccessFlags::PRIVATE.is_overridable());

        assert!(MethodAccessFlags::PACKAGE.is_package());
        assert!(!MethodAccessFlags::PUBLIC.is_package());
    }
}

//! Reflective type model for a single-inheritance, multiple-interface runtime.
//!
//! This module provides the in-memory representation of loaded types that the
//! [`crate::introspection`] helpers walk. A host (an interpreter, a class-file loader, a VM)
//! populates a [`TypeRegistry`] through [`TypeBuilder`]; from then on the hierarchy of every
//! linked type is immutable.
//!
//! # Key Components
//!
//! - [`ClassType`]: A loaded class, interface, annotation, primitive or array type
//! - [`TypeRegistry`]: Central owner of all types, constructs array types on demand
//! - [`TypeBuilder`]: Fluent API for defining and linking types
//! - [`TypeIdentity`]: Identity key used by caches and visited-sets
//! - [`GenericType`]: Generic superclass and interface declarations
//!
//! # Examples
//!
//! ```rust
//! use hierscope::metadata::typesystem::{TypeBuilder, TypeRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let runnable = TypeBuilder::new(registry.clone())
//!     .interface("lang", "Runnable")?
//!     .build()?;
//! let worker = TypeBuilder::new(registry.clone())
//!     .class("app", "Worker")?
//!     .implements(&runnable)?
//!     .build()?;
//!
//! assert!(worker.base().is_some());
//! assert_eq!(worker.interfaces()[0].fullname(), "lang.Runnable");
//! # Ok::<(), hierscope::Error>(())
//! ```

mod base;
mod builder;
mod generics;
mod identity;
mod primitives;
mod registry;

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

pub use base::{ClassFlags, ClassFlavor, ClassTypeRef, ClassTypeRefList};
pub use builder::TypeBuilder;
pub use generics::{GenericType, GenericTypeKind};
pub use identity::TypeIdentity;
pub use primitives::PrimitiveKind;
pub use registry::{TypeRegistry, CORE_NAMESPACE, ROOT_NAME};

use crate::{
    metadata::{
        annotations::{AnnotatedElement, AnnotationList, AnnotationRc},
        method::{MethodList, MethodRc},
        token::Token,
    },
    Error::MembersUnavailable,
    Result,
};

/// A vector that holds a list of `ClassType`
pub type ClassTypeList = Arc<boxcar::Vec<ClassTypeRc>>;
/// Reference to a `ClassType`
pub type ClassTypeRc = Arc<ClassType>;

/// Represents a loaded type of the host runtime.
///
/// Cross-type links (superclass, interfaces, generic declarations) are weak, the
/// [`TypeRegistry`] owns every type. An array type is the one exception: it holds a strong
/// reference to its component, which never points back.
pub struct ClassType {
    /// Token
    pub token: Token,
    /// Namespace (empty for primitives)
    pub namespace: String,
    /// Simple name
    pub name: String,
    /// The kind of this type
    pub flavor: ClassFlavor,
    /// Access and modifier flags
    pub flags: ClassFlags,
    /// Type is imported, only its hierarchy is known, not its members
    pub external: bool,
    /// Component type, present for array types only
    component: Option<ClassTypeRc>,
    /// This types superclass aka 'extends'
    base: OnceLock<ClassTypeRef>,
    /// All interfaces this type directly implements (or extends, for interfaces)
    pub interfaces: ClassTypeRefList,
    /// All methods this type declares, in declaration order
    pub methods: MethodList,
    /// All annotations applied to this type
    pub annotations: AnnotationList,
    /// Names of the generic parameters this type declares
    pub generic_params: Arc<boxcar::Vec<String>>,
    /// The generic form of the superclass declaration
    generic_superclass: OnceLock<GenericType>,
    /// The generic forms of the interface declarations
    pub generic_interfaces: Arc<boxcar::Vec<GenericType>>,
}

impl ClassType {
    /// Create a new instance of a `ClassType`
    pub fn new(
        token: Token,
        flavor: ClassFlavor,
        namespace: String,
        name: String,
        flags: ClassFlags,
        external: bool,
    ) -> Self {
        ClassType {
            token,
            namespace,
            name,
            flavor,
            flags,
            external,
            component: None,
            base: OnceLock::new(),
            interfaces: Arc::new(boxcar::Vec::new()),
            methods: Arc::new(boxcar::Vec::new()),
            annotations: Arc::new(boxcar::Vec::new()),
            generic_params: Arc::new(boxcar::Vec::new()),
            generic_superclass: OnceLock::new(),
            generic_interfaces: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Create an array type over `component`
    pub(crate) fn new_array(token: Token, component: &ClassTypeRc) -> Self {
        let mut array = ClassType::new(
            token,
            ClassFlavor::Array,
            component.namespace.clone(),
            format!("{}[]", component.name),
            ClassFlags::PUBLIC | ClassFlags::FINAL | ClassFlags::ABSTRACT,
            false,
        );
        array.component = Some(component.clone());
        array
    }

    /// Access the superclass of this type, if it exists
    pub fn base(&self) -> Option<ClassTypeRc> {
        self.base.get().and_then(ClassTypeRef::upgrade)
    }

    /// Link the superclass of this type
    ///
    /// # Errors
    /// Returns an error if the superclass was already set, or if this type has a flavor that
    /// can not have a superclass.
    pub fn set_base(&self, base: &ClassTypeRc) -> Result<()> {
        if self.flavor.is_interface() || self.flavor == ClassFlavor::Primitive {
            return Err(malformed_error!(
                "{} can not have a superclass",
                self.fullname()
            ));
        }

        self.base
            .set(base.into())
            .map_err(|_| malformed_error!("Superclass of {} already set", self.fullname()))
    }

    /// The component type, if this is an array type
    pub fn component(&self) -> Option<ClassTypeRc> {
        self.component.clone()
    }

    /// All interfaces this type directly implements, in declaration order
    pub fn interfaces(&self) -> Vec<ClassTypeRc> {
        self.interfaces
            .iter()
            .filter_map(|(_, iface)| iface.upgrade())
            .collect()
    }

    /// All methods this type declares, in declaration order
    ///
    /// # Errors
    /// Returns [`crate::Error::MembersUnavailable`] for external types whose member metadata
    /// was never loaded.
    pub fn declared_methods(&self) -> Result<Vec<MethodRc>> {
        if self.external {
            return Err(MembersUnavailable(self.token));
        }

        Ok(self
            .methods
            .iter()
            .map(|(_, method)| method.clone())
            .collect())
    }

    /// The generic form of the superclass declaration, if one was recorded
    pub fn generic_superclass(&self) -> Option<&GenericType> {
        self.generic_superclass.get()
    }

    /// Record the generic form of the superclass declaration
    ///
    /// # Errors
    /// Returns an error if a generic superclass was already recorded.
    pub fn set_generic_superclass(&self, generic: GenericType) -> Result<()> {
        self.generic_superclass.set(generic).map_err(|_| {
            malformed_error!("Generic superclass of {} already set", self.fullname())
        })
    }

    /// Returns `true` for interfaces and annotation types
    pub fn is_interface(&self) -> bool {
        self.flavor.is_interface()
    }

    /// Returns `true` for array types
    pub fn is_array(&self) -> bool {
        self.flavor == ClassFlavor::Array
    }

    /// Returns `true` for the universal root type
    pub fn is_root(&self) -> bool {
        self.flags.contains(ClassFlags::ROOT)
    }

    /// Returns the full name (Namespace.Name) of the entity
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{0}.{1}", self.namespace, self.name)
        }
    }
}

impl AnnotatedElement for ClassType {
    fn annotations(&self) -> Vec<AnnotationRc> {
        self.annotations
            .iter()
            .map(|(_, annotation)| annotation.clone())
            .collect()
    }
}

impl fmt::Debug for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassType")
            .field("token", &self.token)
            .field("name", &self.fullname())
            .field("flavor", &self.flavor)
            .finish_non_exhaustive()
    }
}

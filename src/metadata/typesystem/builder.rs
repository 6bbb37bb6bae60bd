//! Builder for loaded types.
//!
//! This module provides the [`TypeBuilder`] struct, which offers a fluent API for defining
//! classes, interfaces and annotation types, linking their superclass and interfaces
//! (raw and generic forms), and attaching annotations and methods. Hosts use it while
//! loading, tests use it to assemble hierarchies.
//!
//! # Example
//!
//! ```rust
//! use hierscope::metadata::typesystem::{GenericType, TypeBuilder, TypeRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let string = registry.create_class("lang", "String")?;
//! let handler = TypeBuilder::new(registry.clone())
//!     .interface("app", "Handler")?
//!     .generic_param("T")
//!     .build()?;
//! let string_handler = TypeBuilder::new(registry.clone())
//!     .class("app", "StringHandler")?
//!     .implements_generic(GenericType::parameterized(
//!         &handler,
//!         vec![GenericType::class(&string)],
//!     ))?
//!     .build()?;
//!
//! assert!(Arc::ptr_eq(&string_handler.interfaces()[0], &handler));
//! # Ok::<(), hierscope::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    metadata::{
        annotations::AnnotationRc,
        method::MethodBuilder,
        typesystem::{
            ClassFlags, ClassFlavor, ClassTypeRc, ClassTypeRef, GenericType, TypeRegistry,
        },
    },
    Result,
};

/// Provides a fluent API for defining types
pub struct TypeBuilder {
    /// Type registry for storing the types
    registry: Arc<TypeRegistry>,
    /// Flags for the next type that is started
    flags: ClassFlags,
    /// Whether the next type that is started is external
    external: bool,
    /// Current type being built
    current_type: Option<ClassTypeRc>,
}

impl TypeBuilder {
    /// Create a new builder with the given registry
    ///
    /// ## Arguments
    /// * 'registry' - The type registry to use
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        TypeBuilder {
            registry,
            flags: ClassFlags::PUBLIC,
            external: false,
            current_type: None,
        }
    }

    /// Set the flags of the type started next
    ///
    /// ## Arguments
    /// * 'flags' - Flags to use
    #[must_use]
    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the type started next as external, its members will be unavailable
    #[must_use]
    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }

    fn start(mut self, flavor: ClassFlavor, namespace: &str, name: &str) -> Result<Self> {
        let new_type = if self.external {
            self.registry
                .create_external(flavor, namespace, name, self.flags)?
        } else {
            self.registry
                .create_type(flavor, namespace, name, self.flags)?
        };
        self.current_type = Some(new_type);
        Ok(self)
    }

    fn current(&self) -> Result<&ClassTypeRc> {
        self.current_type
            .as_ref()
            .ok_or_else(|| malformed_error!("No type under construction"))
    }

    /// Start building a class with the given name
    ///
    /// ## Arguments
    /// * 'namespace' - Namespace for a class type
    /// * 'name'      - Name for a class type
    ///
    /// # Errors
    /// Returns an error if the class type cannot be created.
    pub fn class(self, namespace: &str, name: &str) -> Result<Self> {
        self.start(ClassFlavor::Class, namespace, name)
    }

    /// Start building an interface with the given name
    ///
    /// ## Arguments
    /// * 'namespace' - Namespace for an interface type
    /// * 'name'      - Name for an interface type
    ///
    /// # Errors
    /// Returns an error if the interface type cannot be created.
    pub fn interface(self, namespace: &str, name: &str) -> Result<Self> {
        self.start(ClassFlavor::Interface, namespace, name)
    }

    /// Start building an annotation type with the given name
    ///
    /// ## Arguments
    /// * 'namespace' - Namespace for an annotation type
    /// * 'name'      - Name for an annotation type
    ///
    /// # Errors
    /// Returns an error if the annotation type cannot be created.
    pub fn annotation_type(self, namespace: &str, name: &str) -> Result<Self> {
        self.start(ClassFlavor::Annotation, namespace, name)
    }

    /// Link the superclass of the current type
    ///
    /// # Errors
    /// Returns an error if no type is under construction, the type is an interface, or its
    /// superclass was already linked.
    pub fn extends(self, base: &ClassTypeRc) -> Result<Self> {
        self.current()?.set_base(base)?;
        Ok(self)
    }

    /// Link the superclass of the current type from its generic declaration
    ///
    /// Records the generic form and links the raw superclass it names.
    ///
    /// # Errors
    /// Returns an error if the declaration is not a class or parameterized type, or if
    /// [`TypeBuilder::extends`] would fail.
    pub fn extends_generic(self, generic: GenericType) -> Result<Self> {
        let raw = Self::declared_raw(&generic)?;
        let current = self.current()?;
        current.set_base(&raw)?;
        current.set_generic_superclass(generic)?;
        Ok(self)
    }

    /// Add a directly implemented interface (or superinterface, for interfaces)
    ///
    /// # Errors
    /// Returns an error if no type is under construction or `iface` is not an interface.
    pub fn implements(self, iface: &ClassTypeRc) -> Result<Self> {
        if !iface.is_interface() {
            return Err(malformed_error!(
                "{} is not an interface",
                iface.fullname()
            ));
        }

        self.current()?.interfaces.push(ClassTypeRef::new(iface));
        Ok(self)
    }

    /// Add a directly implemented interface from its generic declaration
    ///
    /// # Errors
    /// Returns an error if the declaration is not a class or parameterized type, or if
    /// [`TypeBuilder::implements`] would fail.
    pub fn implements_generic(self, generic: GenericType) -> Result<Self> {
        let raw = Self::declared_raw(&generic)?;
        let builder = self.implements(&raw)?;
        builder.current()?.generic_interfaces.push(generic);
        Ok(builder)
    }

    /// Declare a generic parameter on the current type
    #[must_use]
    pub fn generic_param(self, name: &str) -> Self {
        if let Some(current) = &self.current_type {
            current.generic_params.push(name.to_string());
        }
        self
    }

    /// Apply an annotation to the current type
    #[must_use]
    pub fn annotated(self, annotation: AnnotationRc) -> Self {
        if let Some(current) = &self.current_type {
            current.annotations.push(annotation);
        }
        self
    }

    /// Declare a method on the current type
    ///
    /// # Errors
    /// Returns an error if no type is under construction or method tokens are exhausted.
    pub fn method(self, method: MethodBuilder) -> Result<Self> {
        let token = self.registry.next_method_token()?;
        let current = self.current()?;
        current.methods.push(method.build(token, current));
        Ok(self)
    }

    /// Finish the current type
    ///
    /// Classes without an explicit superclass are linked to the root type.
    ///
    /// # Errors
    /// Returns an error if no type is under construction.
    pub fn build(self) -> Result<ClassTypeRc> {
        let current = self.current()?.clone();
        if current.flavor == ClassFlavor::Class && !current.is_root() && current.base().is_none()
        {
            current.set_base(&self.registry.root())?;
        }
        Ok(current)
    }

    fn declared_raw(generic: &GenericType) -> Result<ClassTypeRc> {
        let raw = match generic {
            GenericType::Class(raw) | GenericType::Parameterized { raw, .. } => raw,
            other => {
                return Err(malformed_error!(
                    "A {} can not be declared as supertype",
                    other.kind()
                ))
            }
        };
        raw.upgrade().ok_or(crate::Error::TypeMissingParent)
    }
}

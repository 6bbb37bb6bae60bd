//! Resolution of generic type arguments bound by subclasses.
//!
//! Given a generic definition such as `Handler<T>` and a concrete type somewhere below it,
//! [`GenericResolver::resolve_generic_parameter`] finds the raw type bound to one of the
//! definition's parameter slots, by looking at the generic superclass and interface
//! declarations recorded on the concrete type and its superclasses.
//!
//! # Lookup Order
//!
//! 1. The concrete type's own generic superclass and generic interfaces
//! 2. The generic superclass declaration of each superclass, walking up to the root
//! 3. The generic interface declarations of each superclass, walking up to the root
//!
//! The first declaration that binds the slot to a concrete type wins. A slot bound to a type
//! variable of the declaring class (`AbstractHandler<T> implements Handler<T>`) is
//! substituted with the argument the subclass below passes for that variable
//! (`ConcreteHandler extends AbstractHandler<Integer>`), repeating down to `concrete`. A
//! variable that no subclass binds leaves the slot unresolved at that level.
//!
//! # Examples
//!
//! ```rust
//! use hierscope::introspection::GenericResolver;
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
//!     .implements_generic(GenericType::parameterized(&handler, vec![GenericType::class(&string)]))?
//!     .build()?;
//!
//! let resolver = GenericResolver::new(registry);
//! let bound = resolver.resolve_generic_parameter(&handler, &string_handler, 0)?;
//! assert!(Arc::ptr_eq(&bound.unwrap(), &string));
//! # Ok::<(), hierscope::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    metadata::typesystem::{ClassTypeRc, GenericType, TypeRegistry},
    Error::{GenericIndexOutOfRange, TypeMissingParent, UnsupportedTypeKind},
    Result,
};

/// Resolves generic parameter bindings against the types of one registry
pub struct GenericResolver {
    /// Registry used to construct array types for generic array arguments
    registry: Arc<TypeRegistry>,
}

impl GenericResolver {
    /// Create a resolver over `registry`
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        GenericResolver { registry }
    }

    /// Resolve the raw type bound to slot `index` of `generic` by `concrete`
    ///
    /// Returns `Ok(None)` if no declaration along the chain binds the slot to a concrete
    /// type.
    ///
    /// ## Arguments
    /// * 'generic'  - The generic definition whose parameter is resolved
    /// * 'concrete' - The type that (transitively) extends or implements `generic`
    /// * 'index'    - Zero-based parameter slot
    ///
    /// # Errors
    /// Returns [`crate::Error::GenericIndexOutOfRange`] if `index` is not a slot of
    /// `generic`, and [`crate::Error::UnsupportedTypeKind`] if the binding found is a
    /// wildcard.
    pub fn resolve_generic_parameter(
        &self,
        generic: &ClassTypeRc,
        concrete: &ClassTypeRc,
        index: usize,
    ) -> Result<Option<ClassTypeRc>> {
        let arity = generic.generic_params.count();
        if arity > 0 && index >= arity {
            return Err(GenericIndexOutOfRange { index, arity });
        }

        let chain = Self::class_chain(concrete);

        let own = concrete
            .generic_superclass()
            .into_iter()
            .chain(concrete.generic_interfaces.iter().map(|(_, decl)| decl));
        if let Some(found) = self.bound_in(own, generic, index, &chain, 0)? {
            return Ok(Some(found));
        }

        for (level, class) in chain.iter().enumerate().skip(1) {
            let declared = class.generic_superclass();
            if let Some(found) = self.bound_in(declared, generic, index, &chain, level)? {
                return Ok(Some(found));
            }
        }

        for (level, class) in chain.iter().enumerate().skip(1) {
            let declared = class.generic_interfaces.iter().map(|(_, decl)| decl);
            if let Some(found) = self.bound_in(declared, generic, index, &chain, level)? {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    /// The raw type a generic type stands for
    ///
    /// Class references map to themselves, parameterized types to their raw definition and
    /// generic arrays to the array type of their raw component. Type variables have no raw
    /// type and yield `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedTypeKind`] for wildcards and
    /// [`crate::Error::TypeMissingParent`] if the referenced type was dropped.
    pub fn raw_type(&self, generic_type: &GenericType) -> Result<Option<ClassTypeRc>> {
        match generic_type {
            GenericType::Class(raw) | GenericType::Parameterized { raw, .. } => {
                raw.upgrade().map(Some).ok_or(TypeMissingParent)
            }
            GenericType::Array(component) => Ok(self
                .raw_type(component)?
                .map(|component| self.registry.array_of(&component))),
            GenericType::Variable { .. } => Ok(None),
            GenericType::Wildcard { .. } => Err(UnsupportedTypeKind(generic_type.kind())),
        }
    }

    fn bound_in<'a>(
        &self,
        declarations: impl IntoIterator<Item = &'a GenericType>,
        generic: &ClassTypeRc,
        index: usize,
        chain: &[ClassTypeRc],
        level: usize,
    ) -> Result<Option<ClassTypeRc>> {
        for declaration in declarations {
            let Some(args) = declaration.arguments_for(generic) else {
                continue;
            };
            let arg = args.get(index).ok_or(GenericIndexOutOfRange {
                index,
                arity: args.len(),
            })?;
            if let Some(bound) = self.substitute(arg, chain, level)? {
                return Ok(Some(bound));
            }
        }

        Ok(None)
    }

    /// Raw type of `arg` as written on `chain[level]`, with that class's type variables
    /// replaced by the arguments of the subclasses below it.
    fn substitute(
        &self,
        arg: &GenericType,
        chain: &[ClassTypeRc],
        level: usize,
    ) -> Result<Option<ClassTypeRc>> {
        match arg {
            GenericType::Variable { name } => {
                let Some(child_level) = level.checked_sub(1) else {
                    return Ok(None);
                };
                let declaring = &chain[level];
                let Some(position) = declaring
                    .generic_params
                    .iter()
                    .find(|(_, param)| *param == name)
                    .map(|(position, _)| position)
                else {
                    return Ok(None);
                };

                let passed = chain[child_level]
                    .generic_superclass()
                    .and_then(|decl| decl.arguments_for(declaring))
                    .and_then(|args| args.get(position));
                match passed {
                    Some(passed) => self.substitute(passed, chain, child_level),
                    None => Ok(None),
                }
            }
            GenericType::Array(component) => Ok(self
                .substitute(component, chain, level)?
                .map(|component| self.registry.array_of(&component))),
            _ => self.raw_type(arg),
        }
    }

    /// `concrete` followed by its superclasses up to the root
    fn class_chain(concrete: &ClassTypeRc) -> Vec<ClassTypeRc> {
        let mut chain = vec![concrete.clone()];
        let mut current = concrete.base();
        while let Some(class) = current {
            current = class.base();
            chain.push(class);
        }
        chain
    }
}

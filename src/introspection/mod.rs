//! Class-hierarchy introspection over the reflective type model.
//!
//! This module holds the helpers that answer questions about loaded types: what a type's
//! full set of ancestors is, which array type belongs to a component, whether a method
//! overrides another, which annotations are present through meta-annotations, what a
//! subclass binds a generic parameter to, and which type called the current code.
//!
//! # Key Components
//!
//! - [`ClassHierarchy`] - Lock-free memoizing cache for ancestor lists and array types
//! - [`hierarchy`] - The uncached superclass and interface walk
//! - [`find_annotation`] / [`find_annotated_methods`] - Annotation lookup and method scanning
//! - [`overrides`] / [`contains_overriding_method`] - Override detection
//! - [`GenericResolver`] - Generic parameter bindings along the superclass chain
//! - [`CallerResolver`] - Calling type lookup through a host [`StackIntrospector`]
//!
//! Apart from [`ClassHierarchy`], everything here is stateless and computes its answer from
//! the type model on every call.
//!
//! # Examples
//!
//! ```rust
//! use hierscope::introspection::ClassHierarchy;
//! use hierscope::metadata::typesystem::{TypeBuilder, TypeRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let shape = TypeBuilder::new(registry.clone()).class("app", "Shape")?.build()?;
//! let circle = TypeBuilder::new(registry.clone())
//!     .class("app", "Circle")?
//!     .extends(&shape)?
//!     .build()?;
//!
//! let hierarchy = ClassHierarchy::new(registry);
//! let ancestors = hierarchy.class_and_super_classes(&circle);
//! for ty in ancestors.iter() {
//!     println!("{}", ty.fullname());
//! }
//! assert_eq!(ancestors.len(), 3);
//! # Ok::<(), hierscope::Error>(())
//! ```

mod annotations;
mod cache;
mod caller;
mod generics;
mod overrides;

/// Superclass and interface closure of a type
pub mod hierarchy;

pub use annotations::{find_annotated_methods, find_annotation};
pub use cache::{ClassHierarchy, ClassList, HierarchyConfig};
pub use caller::{CallerResolver, FrameGuard, ShadowStack, StackIntrospector, StackPolicy};
pub use generics::GenericResolver;
pub use hierarchy::is_assignable_from;
pub use overrides::{contains_overriding_method, overrides};

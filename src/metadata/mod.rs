//! Reflective metadata of the host runtime.
//!
//! This module contains the type model the introspection helpers operate on. It stands in
//! for the reflection facility of the host runtime: type identity, superclass and interface
//! enumeration, declared methods, annotations, generic declarations and dynamic array-type
//! construction.
//!
//! # Key Components
//!
//! - [`typesystem`] - Loaded types, the registry that owns them and the builder that links them
//! - [`method`] - Declared methods and their flags
//! - [`annotations`] - Annotation instances and the [`annotations::AnnotatedElement`] trait
//! - [`token`] - Identifiers of entries in the model
//!
//! # Examples
//!
//! ```rust
//! use hierscope::metadata::typesystem::{TypeBuilder, TypeRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let widget = TypeBuilder::new(registry.clone()).class("app", "Widget")?.build()?;
//!
//! println!("Types: {}", registry.len());
//! println!("Widget extends {}", widget.base().unwrap().fullname());
//! # Ok::<(), hierscope::Error>(())
//! ```

/// Annotation instances and annotated elements
pub mod annotations;
/// Declared methods of loaded types
pub mod method;
/// Identifiers of entries in the type model
pub mod token;
/// Loaded types, registry and builder
pub mod typesystem;

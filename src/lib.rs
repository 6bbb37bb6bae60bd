// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # hierscope
//!
//! Reflective class-hierarchy introspection for object-oriented runtimes with single
//! inheritance and multiple interfaces.
//!
//! A host runtime describes its loaded types in a [`metadata::typesystem::TypeRegistry`].
//! On top of that model, `hierscope` answers the questions frameworks keep asking about
//! types: the full superclass and interface closure, the array type of a component, which
//! methods carry an annotation (including meta-annotations), whether a method overrides
//! another, what a subclass binds a generic parameter to, and which type is calling.
//!
//! ## Features
//!
//! - **Lock-free memoization** - Ancestor lists and array types are cached in snapshots
//!   published with compare-and-swap, reads never block
//! - **Identity semantics** - Types are compared and cached by identity, never by name
//! - **Meta-annotations** - Annotation lookup follows annotation types, cycles included
//! - **Generic resolution** - Bindings are found along superclass and interface declarations
//! - **Parallel warm-up** - Caches can be filled for many types at once with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use hierscope::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let comparable = TypeBuilder::new(registry.clone())
//!     .interface("lang", "Comparable")?
//!     .build()?;
//! let version = TypeBuilder::new(registry.clone())
//!     .class("app", "Version")?
//!     .implements(&comparable)?
//!     .build()?;
//!
//! let hierarchy = ClassHierarchy::new(registry.clone());
//! let names: Vec<String> = hierarchy
//!     .class_and_super_classes(&version)
//!     .iter()
//!     .map(|ty| ty.fullname())
//!     .collect();
//! assert_eq!(names, ["app.Version", "lang.Comparable", "lang.Object"]);
//!
//! let versions = hierarchy.array_class(&version);
//! assert_eq!(versions.fullname(), "app.Version[]");
//! # Ok::<(), hierscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - The reflective type model: types, methods, annotations, generic shapes
//! - [`introspection`] - The helpers and the [`introspection::ClassHierarchy`] cache
//! - [`prelude`] - Glob import of the commonly used items
//!
//! ## Logging
//!
//! Cache misses and publications are reported at `trace` level, warm-up and shutdown at
//! `debug` level, through the [`log`](https://docs.rs/log) facade. No logger is installed by
//! this crate.
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use hierscope::{Error, introspection::GenericResolver};
//! use hierscope::metadata::typesystem::{GenericType, TypeRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let resolver = GenericResolver::new(registry);
//! match resolver.raw_type(&GenericType::wildcard()) {
//!     Err(Error::UnsupportedTypeKind(kind)) => println!("no raw type for a {kind}"),
//!     Err(e) => println!("Other error: {e}"),
//!     Ok(raw) => println!("raw type: {raw:?}"),
//! }
//! # Ok::<(), hierscope::Error>(())
//! ```
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```
#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use hierscope::prelude::*;
/// use std::sync::Arc;
///
/// let registry = Arc::new(TypeRegistry::new()?);
/// let hierarchy = ClassHierarchy::new(registry.clone());
/// assert_eq!(hierarchy.class_and_super_classes(&registry.root()).len(), 1);
/// # Ok::<(), hierscope::Error>(())
/// ```
pub mod prelude;

/// The reflective type model of the host runtime
///
/// Types are owned by a [`metadata::typesystem::TypeRegistry`] and link to each other
/// through weak references. Hosts populate the registry with a
/// [`metadata::typesystem::TypeBuilder`] while loading.
///
/// # Key Components
///
/// - [`metadata::typesystem`] - Loaded types, registry, builder, generic shapes
/// - [`metadata::method`] - Declared methods
/// - [`metadata::annotations`] - Annotation instances and annotated elements
/// - [`metadata::token`] - Identifiers of model entries
pub mod metadata;

/// Class-hierarchy introspection helpers
///
/// # Key Components
///
/// - [`introspection::ClassHierarchy`] - Memoized ancestor lists and array types
/// - [`introspection::find_annotation`] - Annotation lookup through meta-annotations
/// - [`introspection::find_annotated_methods`] - Annotated methods along the superclass chain
/// - [`introspection::overrides`] - Override detection
/// - [`introspection::GenericResolver`] - Generic parameter resolution
/// - [`introspection::CallerResolver`] - Calling type lookup
pub mod introspection;

/// `hierscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `hierscope` Error type
///
/// The main error type for all operations in this crate. Provides detailed error information
/// for type model construction, generic resolution and host capability checks.
pub use error::Error;

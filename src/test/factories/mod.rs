//! Factory methods that assemble type graphs for tests.
//!
//! - [`hierarchy`] - A `java.lang`/`java.util`-like class and interface hierarchy
//! - [`generics`] - Handler hierarchies with generic superclass and interface declarations
//! - [`annotations`] - Annotation types, meta-annotations and annotation cycles

pub mod annotations;
pub mod generics;
pub mod hierarchy;

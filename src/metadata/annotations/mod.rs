//! Annotations applied to types and methods.
//!
//! An [`Annotation`] is an instance of an annotation type (a
//! [`crate::metadata::typesystem::ClassType`] with
//! [`crate::metadata::typesystem::ClassFlavor::Annotation`]) together with its element
//! values. Annotation types are annotated elements themselves, which is how meta-annotations
//! are expressed: annotating the type `Get` with `Route` makes every `@Get` a `@Route` as
//! far as [`crate::introspection::find_annotation`] is concerned.
//!
//! # Examples
//!
//! ```rust
//! use hierscope::metadata::annotations::{AnnotatedElement, Annotation, AnnotationValue};
//! use hierscope::metadata::typesystem::{TypeBuilder, TypeRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(TypeRegistry::new()?);
//! let route = TypeBuilder::new(registry.clone())
//!     .annotation_type("web", "Route")?
//!     .build()?;
//! let handler = TypeBuilder::new(registry.clone())
//!     .class("app", "Handler")?
//!     .annotated(Arc::new(
//!         Annotation::new(&route).with_value("path", AnnotationValue::String("/".into())),
//!     ))
//!     .build()?;
//!
//! let annotations = handler.annotations();
//! assert!(annotations[0].is_instance_of(&route));
//! # Ok::<(), hierscope::Error>(())
//! ```

mod types;

use std::sync::Arc;

pub use types::*;

/// A vector that holds a list of `Annotation` references
pub type AnnotationList = Arc<boxcar::Vec<AnnotationRc>>;
/// A reference-counted pointer to an `Annotation`
pub type AnnotationRc = Arc<Annotation>;

/// An element of the type model that can carry annotations
pub trait AnnotatedElement {
    /// The annotations directly present on this element, in declaration order
    fn annotations(&self) -> Vec<AnnotationRc>;

    /// The directly present annotation of type `annotation_type`, if any
    fn declared_annotation(
        &self,
        annotation_type: &crate::metadata::typesystem::ClassTypeRc,
    ) -> Option<AnnotationRc> {
        self.annotations()
            .into_iter()
            .find(|annotation| annotation.is_instance_of(annotation_type))
    }
}

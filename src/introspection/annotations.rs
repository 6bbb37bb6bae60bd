//! Annotation lookup through meta-annotations, and annotated-method scanning.
//!
//! An annotation type can itself be annotated. [`find_annotation`] treats such
//! meta-annotations as inherited: an element annotated with `@Get`, where the type `Get` is
//! annotated with `@Route`, resolves `Route` to that `@Route` instance. Meta-annotation
//! graphs may contain cycles, a visited-set scoped to a single lookup stops the walk.

use std::collections::HashSet;

use crate::metadata::{
    annotations::{AnnotatedElement, AnnotationRc},
    method::MethodRc,
    typesystem::{ClassTypeRc, TypeIdentity},
};

/// Find an annotation of type `annotation_type` on `element`, directly or as meta-annotation.
///
/// The element's own annotations are checked first. After that, each annotation's type is
/// searched the same way, depth-first in declaration order. Returns `None` if no match is
/// reachable.
///
/// # Examples
///
/// ```rust
/// use hierscope::introspection::find_annotation;
/// use hierscope::metadata::annotations::Annotation;
/// use hierscope::metadata::typesystem::{TypeBuilder, TypeRegistry};
/// use std::sync::Arc;
///
/// let registry = Arc::new(TypeRegistry::new()?);
/// let route = TypeBuilder::new(registry.clone()).annotation_type("web", "Route")?.build()?;
/// let get = TypeBuilder::new(registry.clone())
///     .annotation_type("web", "Get")?
///     .annotated(Arc::new(Annotation::new(&route)))
///     .build()?;
/// let handler = TypeBuilder::new(registry.clone())
///     .class("app", "Handler")?
///     .annotated(Arc::new(Annotation::new(&get)))
///     .build()?;
///
/// assert!(find_annotation(handler.as_ref(), &route).is_some());
/// # Ok::<(), hierscope::Error>(())
/// ```
pub fn find_annotation<E>(element: &E, annotation_type: &ClassTypeRc) -> Option<AnnotationRc>
where
    E: AnnotatedElement + ?Sized,
{
    let mut visited = HashSet::new();
    find_in(&element.annotations(), annotation_type, &mut visited)
}

fn find_in(
    annotations: &[AnnotationRc],
    annotation_type: &ClassTypeRc,
    visited: &mut HashSet<TypeIdentity>,
) -> Option<AnnotationRc> {
    if let Some(direct) = annotations
        .iter()
        .find(|annotation| annotation.is_instance_of(annotation_type))
    {
        return Some(direct.clone());
    }

    for annotation in annotations {
        let Some(meta_type) = annotation.annotation_type() else {
            continue;
        };
        if !visited.insert(TypeIdentity::new(&meta_type)) {
            continue;
        }
        if let Some(found) = find_in(&meta_type.annotations(), annotation_type, visited) {
            return Some(found);
        }
    }

    None
}

/// Collect the methods of `ty` and its superclasses that carry `annotation_type`.
///
/// Walks from `ty` through every superclass up to the root; interfaces are not visited.
/// Meta-annotations count, see [`find_annotation`]. Methods are in declaration order per
/// class, most-derived class first. A class whose members are unavailable contributes no
/// methods.
pub fn find_annotated_methods(ty: &ClassTypeRc, annotation_type: &ClassTypeRc) -> Box<[MethodRc]> {
    let mut found = Vec::new();
    let mut current = Some(ty.clone());

    while let Some(class) = current {
        if let Ok(methods) = class.declared_methods() {
            found.extend(
                methods
                    .into_iter()
                    .filter(|method| find_annotation(method.as_ref(), annotation_type).is_some()),
            );
        }
        current = class.base();
    }

    found.into_boxed_slice()
}

//! # hierscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the hierscope library. Import this module to get quick access to the type model
//! and the introspection helpers.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all hierscope operations
pub use crate::Error;

/// The result type used throughout hierscope
pub use crate::Result;

// ================================================================================================
// Type Model
// ================================================================================================

/// Identifier of an entry in the type model
pub use crate::metadata::token::Token;

/// Core type system components
pub use crate::metadata::typesystem::{
    ClassFlags, ClassFlavor, ClassType, ClassTypeRc, ClassTypeRef, GenericType, GenericTypeKind,
    PrimitiveKind, TypeBuilder, TypeIdentity, TypeRegistry,
};

/// Methods and their flags
pub use crate::metadata::method::{
    Method, MethodAccessFlags, MethodBuilder, MethodModifiers, MethodRc,
};

/// Annotations
pub use crate::metadata::annotations::{
    AnnotatedElement, Annotation, AnnotationRc, AnnotationValue,
};

// ================================================================================================
// Introspection
// ================================================================================================

/// Memoizing hierarchy cache and its configuration
pub use crate::introspection::{ClassHierarchy, ClassList, HierarchyConfig};

/// Stateless helpers
pub use crate::introspection::{
    contains_overriding_method, find_annotated_methods, find_annotation, is_assignable_from,
    overrides, GenericResolver,
};

/// Caller resolution
pub use crate::introspection::{
    CallerResolver, FrameGuard, ShadowStack, StackIntrospector, StackPolicy,
};

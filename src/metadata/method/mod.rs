//! Declared methods of the reflective type model.
//!
//! A [`Method`] is owned by its declaring [`crate::metadata::typesystem::ClassType`] and
//! refers back to it, and to its parameter and return types, through weak references.
//! Methods are defined with a [`MethodBuilder`] and attached through
//! [`crate::metadata::typesystem::TypeBuilder::method`], which assigns token and declaring
//! type.

mod types;

use std::{fmt, sync::Arc};

pub use types::*;

use crate::metadata::{
    annotations::{AnnotatedElement, AnnotationRc},
    token::Token,
    typesystem::{ClassTypeRc, ClassTypeRef},
};

/// A vector that holds a list of `Method` references
pub type MethodList = Arc<boxcar::Vec<MethodRc>>;
/// A reference-counted pointer to a `Method`
pub type MethodRc = Arc<Method>;

/// A method declared on a type
pub struct Method {
    /// Token
    pub token: Token,
    /// Name of the method
    pub name: String,
    /// The type declaring this method
    pub declaring_type: ClassTypeRef,
    /// Parameter types, in positional order
    pub params: Vec<ClassTypeRef>,
    /// Return type, `None` for `void`
    pub return_type: Option<ClassTypeRef>,
    /// Visibility
    pub access: MethodAccessFlags,
    /// Modifier flags
    pub modifiers: MethodModifiers,
    /// Annotations applied to this method
    pub annotations: Vec<AnnotationRc>,
}

impl Method {
    /// The type declaring this method, if it is still alive
    pub fn declaring_type(&self) -> Option<ClassTypeRc> {
        self.declaring_type.upgrade()
    }

    /// Parameter types of this method, skipping types that were dropped
    pub fn param_types(&self) -> Vec<ClassTypeRc> {
        self.params.iter().filter_map(ClassTypeRef::upgrade).collect()
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` for static methods
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MethodModifiers::STATIC)
    }
}

impl AnnotatedElement for Method {
    fn annotations(&self) -> Vec<AnnotationRc> {
        self.annotations.clone()
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = self
            .declaring_type
            .fullname()
            .unwrap_or_else(|| "<dropped>".to_string());
        let params: Vec<String> = self
            .params
            .iter()
            .map(|param| param.fullname().unwrap_or_else(|| "<dropped>".to_string()))
            .collect();

        write!(f, "Method({}::{}({}))", owner, self.name, params.join(", "))
    }
}

/// Describes a method before it is attached to its declaring type
pub struct MethodBuilder {
    name: String,
    params: Vec<ClassTypeRef>,
    return_type: Option<ClassTypeRef>,
    access: MethodAccessFlags,
    modifiers: MethodModifiers,
    annotations: Vec<AnnotationRc>,
}

impl MethodBuilder {
    /// Start describing a public instance method returning `void`
    pub fn new(name: &str) -> Self {
        MethodBuilder {
            name: name.to_string(),
            params: Vec::new(),
            return_type: None,
            access: MethodAccessFlags::PUBLIC,
            modifiers: MethodModifiers::empty(),
            annotations: Vec::new(),
        }
    }

    /// Append a parameter of type `ty`
    #[must_use]
    pub fn param(mut self, ty: &ClassTypeRc) -> Self {
        self.params.push(ty.into());
        self
    }

    /// Set the return type
    #[must_use]
    pub fn returns(mut self, ty: &ClassTypeRc) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Set the visibility
    #[must_use]
    pub fn access(mut self, access: MethodAccessFlags) -> Self {
        self.access = access;
        self
    }

    /// Set the modifier flags
    #[must_use]
    pub fn modifiers(mut self, modifiers: MethodModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Apply an annotation
    #[must_use]
    pub fn annotated(mut self, annotation: AnnotationRc) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Finish the method for `declaring_type`
    pub(crate) fn build(self, token: Token, declaring_type: &ClassTypeRc) -> MethodRc {
        Arc::new(Method {
            token,
            name: self.name,
            declaring_type: declaring_type.into(),
            params: self.params,
            return_type: self.return_type,
            access: self.access,
            modifiers: self.modifiers,
            annotations: self.annotations,
        })
    }
}

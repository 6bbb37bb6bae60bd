//! Generic type shapes as declared in the reflective type model.
//!
//! A type declaration such as `class StringHandler implements Handler<String>` records the
//! generic form of its superclass and interfaces next to their raw links. [`GenericType`]
//! captures those forms: plain class references, parameterized types, type variables,
//! generic arrays and wildcards.

use strum::{Display, EnumIter};

use crate::metadata::typesystem::{ClassTypeRc, ClassTypeRef};

/// The shape of a [`GenericType`], used to name unsupported shapes in errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum GenericTypeKind {
    /// A plain, non-generic type reference
    #[strum(to_string = "class")]
    Class,
    /// A generic type applied to type arguments
    #[strum(to_string = "parameterized type")]
    Parameterized,
    /// A type variable such as `T`
    #[strum(to_string = "type variable")]
    Variable,
    /// An array whose component is generic
    #[strum(to_string = "generic array")]
    Array,
    /// A wildcard such as `? extends Number`
    #[strum(to_string = "wildcard")]
    Wildcard,
}

/// A generic type as it appears in a superclass or interface declaration
#[derive(Debug, Clone)]
pub enum GenericType {
    /// A plain type reference
    Class(ClassTypeRef),
    /// `raw<args...>`
    Parameterized {
        /// The generic type definition being applied
        raw: ClassTypeRef,
        /// The type arguments, one per generic parameter slot
        args: Vec<GenericType>,
    },
    /// An unbound type variable
    Variable {
        /// Declared name of the variable
        name: String,
    },
    /// `component[]` where the component is itself generic
    Array(Box<GenericType>),
    /// `?`, `? extends upper` or `? super lower`
    Wildcard {
        /// Upper bounds
        upper: Vec<GenericType>,
        /// Lower bounds
        lower: Vec<GenericType>,
    },
}

impl GenericType {
    /// A plain reference to `ty`
    #[must_use]
    pub fn class(ty: &ClassTypeRc) -> Self {
        GenericType::Class(ty.into())
    }

    /// `raw<args...>`
    #[must_use]
    pub fn parameterized(raw: &ClassTypeRc, args: Vec<GenericType>) -> Self {
        GenericType::Parameterized {
            raw: raw.into(),
            args,
        }
    }

    /// A type variable named `name`
    #[must_use]
    pub fn variable(name: &str) -> Self {
        GenericType::Variable {
            name: name.to_string(),
        }
    }

    /// An unbounded wildcard `?`
    #[must_use]
    pub fn wildcard() -> Self {
        GenericType::Wildcard {
            upper: Vec::new(),
            lower: Vec::new(),
        }
    }

    /// Returns the shape of this type
    #[must_use]
    pub fn kind(&self) -> GenericTypeKind {
        match self {
            GenericType::Class(_) => GenericTypeKind::Class,
            GenericType::Parameterized { .. } => GenericTypeKind::Parameterized,
            GenericType::Variable { .. } => GenericTypeKind::Variable,
            GenericType::Array(_) => GenericTypeKind::Array,
            GenericType::Wildcard { .. } => GenericTypeKind::Wildcard,
        }
    }

    /// Returns the generic definition if this is a parameterized type over `raw`
    #[must_use]
    pub fn arguments_for(&self, raw: &ClassTypeRc) -> Option<&[GenericType]> {
        match self {
            GenericType::Parameterized { raw: declared, args } if declared.refers_to(raw) => {
                Some(args)
            }
            _ => None,
        }
    }
}

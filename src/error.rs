use thiserror::Error;

use crate::metadata::{token::Token, typesystem::GenericTypeKind};

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Most of the introspection helpers are total over their input domain and never fail. Errors
/// are produced while a host populates the reflective type model, when a type's member
/// metadata is not available, when a generic type shape cannot be reduced to a raw type, and
/// when the host refuses call-stack introspection.
///
/// # Error Categories
///
/// ## Type Model Errors
/// - [`Error::Malformed`] - Inconsistent linking of the reflective type model
/// - [`Error::TypeNotFound`] - Requested type not found in the registry
/// - [`Error::TypeMissingParent`] - Type inheritance chain broken
/// - [`Error::MembersUnavailable`] - Member metadata of a type was never loaded
///
/// ## Generic Resolution Errors
/// - [`Error::UnsupportedTypeKind`] - A generic type shape has no raw type
/// - [`Error::GenericIndexOutOfRange`] - Parameter slot beyond the declaration's arity
///
/// ## Host Capability and Configuration Errors
/// - [`Error::StackAccessDenied`] - The host forbids call-stack introspection
/// - [`Error::InvalidConfig`] - A cache configuration value is out of range
///
/// # Examples
///
/// ```rust
/// use hierscope::{Error, introspection::{CallerResolver, ShadowStack, StackPolicy}};
/// use std::sync::Arc;
///
/// let host = Arc::new(ShadowStack::with_policy(StackPolicy::Deny));
/// match CallerResolver::new(host) {
///     Err(Error::StackAccessDenied) => println!("stack introspection disabled by the host"),
///     Err(e) => println!("other error: {e}"),
///     Ok(_) => println!("resolver ready"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The reflective type model was linked inconsistently.
    ///
    /// This error indicates that a host tried to link a type in a way the model does not
    /// allow, such as setting a superclass twice or giving an interface a superclass. The
    /// error includes the source location where the problem was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Failed to find type in the `TypeRegistry`.
    ///
    /// The associated [`Token`] identifies which type was not found.
    #[error("Failed to find type in TypeRegistry - {0}")]
    TypeNotFound(Token),

    /// The parent of the current type is missing.
    ///
    /// This error occurs when a weak link to a superclass, interface or declaring type can no
    /// longer be upgraded because the registry owning it has been dropped.
    #[error("The parent of the current type is missing")]
    TypeMissingParent,

    /// The member metadata of a type has not been loaded.
    ///
    /// Types imported from outside the loaded unit only carry their hierarchy, not their
    /// methods. Enumerating their declared members fails with this error.
    #[error("Member metadata is not available for type - {0}")]
    MembersUnavailable(Token),

    /// A generic type shape can not be reduced to a raw type.
    ///
    /// The associated [`GenericTypeKind`] names the unsupported shape.
    #[error("Unsupported generic type kind - {0}")]
    UnsupportedTypeKind(GenericTypeKind),

    /// A generic parameter slot beyond the declaration's arity was requested.
    #[error("Generic parameter index {index} out of range for arity {arity}")]
    GenericIndexOutOfRange {
        /// The requested zero-based slot
        index: usize,
        /// Number of type arguments the declaration carries
        arity: usize,
    },

    /// The host runtime forbids call-stack introspection.
    ///
    /// Raised once, when a [`crate::introspection::CallerResolver`] is constructed. This is
    /// a configuration failure and is not retried.
    #[error("Call-stack introspection is denied by the host")]
    StackAccessDenied,

    /// A configuration value is outside of its valid range.
    #[error("Invalid configuration - {0}")]
    InvalidConfig(String),
}

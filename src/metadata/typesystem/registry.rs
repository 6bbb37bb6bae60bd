//! Central type registry of the reflective type model.
//!
//! This module provides the `TypeRegistry`, a thread-safe registry owning every type a host
//! has loaded. It serves as the host's reflection facility for the introspection helpers:
//! type lookup, the universal root type, primitive types and, most importantly, dynamic
//! array-type construction with stable identity.
//!
//! # Registry Architecture
//!
//! - **Token-based lookup**: Primary index using a lock-free skip list (`SkipMap`)
//! - **Name-based lookup**: Secondary index on full names (`DashMap`)
//! - **Array types**: Component identity to array type (`DashMap`), created on first request
//!
//! # Thread Safety
//!
//! - Lock-free data structures for primary storage
//! - Concurrent hash maps for indices
//! - Atomic operations for token generation
//!
//! # Examples
//!
//! ```rust
//! use hierscope::metadata::typesystem::{PrimitiveKind, TypeRegistry};
//! use std::sync::Arc;
//!
//! let registry = TypeRegistry::new()?;
//!
//! let int = registry.primitive(PrimitiveKind::Int)?;
//! let first = registry.array_of(&int);
//! let second = registry.array_of(&int);
//!
//! assert_eq!(first.fullname(), "int[]");
//! assert!(Arc::ptr_eq(&first, &second));
//! # Ok::<(), hierscope::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use log::warn;
use strum::IntoEnumIterator;

use crate::{
    metadata::{
        token::{Token, TABLE_ARRAY, TABLE_BUILTIN, TABLE_METHOD, TABLE_TYPE},
        typesystem::{
            ClassFlags, ClassFlavor, ClassType, ClassTypeRc, ClassTypeRef, PrimitiveKind,
            TypeIdentity,
        },
    },
    Error::TypeNotFound,
    Result,
};

/// Namespace of the runtime's core types
pub const CORE_NAMESPACE: &str = "lang";
/// Name of the universal root type
pub const ROOT_NAME: &str = "Object";

const MAX_ROW: u32 = 0x00FF_FFFF;
/// Token row shared by array types created after the array rows ran out
const OVERFLOW_ARRAY_ROW: u32 = MAX_ROW;

/// Central registry for all types loaded by a host.
///
/// `TypeRegistry` owns every [`ClassType`]; all links between types are weak, so dropping
/// the registry releases the whole model. It is the only place array types are
/// constructed, which guarantees one array handle per component type.
///
/// # Built-in Types
///
/// The following types are registered by [`TypeRegistry::new`]:
/// - `lang.Object` - the universal root, superclass of every class and array
/// - `lang.Cloneable`, `io.Serializable` - the interfaces every array type implements
/// - The primitives listed in [`PrimitiveKind`]
///
/// # Performance Characteristics
///
/// - **Token lookup**: O(log n) using skip list
/// - **Name lookup**: O(1) average using hash index
/// - **Array lookup**: O(1) average, first request for a component allocates the array type
pub struct TypeRegistry {
    /// Primary type storage indexed by tokens
    types: SkipMap<Token, ClassTypeRc>,
    /// Row counter for loaded types
    next_type_row: AtomicU32,
    /// Row counter for array types
    next_array_row: AtomicU32,
    /// Row counter for methods
    next_method_row: AtomicU32,
    /// Secondary index: types indexed by full name (namespace.name)
    types_by_fullname: DashMap<String, Vec<Token>>,
    /// Array types indexed by the identity of their component
    arrays: DashMap<TypeIdentity, ClassTypeRc>,
    /// The universal root type
    root: ClassTypeRc,
    /// Interfaces implemented by every array type
    array_interfaces: Vec<ClassTypeRc>,
}

impl TypeRegistry {
    /// Create a new type registry with the built-in types registered.
    ///
    /// # Errors
    /// Returns an error if linking the built-in types fails, which indicates an internal
    /// inconsistency.
    pub fn new() -> Result<Self> {
        let root = Arc::new(ClassType::new(
            Token::from_parts(TABLE_BUILTIN, 1),
            ClassFlavor::Class,
            CORE_NAMESPACE.to_string(),
            ROOT_NAME.to_string(),
            ClassFlags::PUBLIC | ClassFlags::ROOT,
            false,
        ));
        let cloneable = Arc::new(ClassType::new(
            Token::from_parts(TABLE_BUILTIN, 2),
            ClassFlavor::Interface,
            CORE_NAMESPACE.to_string(),
            "Cloneable".to_string(),
            ClassFlags::PUBLIC | ClassFlags::ABSTRACT,
            false,
        ));
        let serializable = Arc::new(ClassType::new(
            Token::from_parts(TABLE_BUILTIN, 3),
            ClassFlavor::Interface,
            "io".to_string(),
            "Serializable".to_string(),
            ClassFlags::PUBLIC | ClassFlags::ABSTRACT,
            false,
        ));

        let registry = TypeRegistry {
            types: SkipMap::new(),
            next_type_row: AtomicU32::new(1),
            next_array_row: AtomicU32::new(1),
            next_method_row: AtomicU32::new(1),
            types_by_fullname: DashMap::new(),
            arrays: DashMap::new(),
            root: root.clone(),
            array_interfaces: vec![cloneable.clone(), serializable.clone()],
        };

        registry.insert(&root);
        registry.insert(&cloneable);
        registry.insert(&serializable);
        registry.initialize_primitives();
        Ok(registry)
    }

    /// Initialize primitive types in the registry
    fn initialize_primitives(&self) {
        for kind in PrimitiveKind::iter() {
            let primitive = Arc::new(ClassType::new(
                Token::from_parts(TABLE_BUILTIN, kind.row()),
                ClassFlavor::Primitive,
                String::new(),
                kind.to_string(),
                ClassFlags::PUBLIC | ClassFlags::FINAL | ClassFlags::ABSTRACT,
                false,
            ));
            self.insert(&primitive);
        }
    }

    fn next_row(counter: &AtomicU32) -> Result<u32> {
        let row = counter.fetch_add(1, Ordering::Relaxed);
        if row > MAX_ROW {
            return Err(malformed_error!("Token rows exhausted"));
        }
        Ok(row)
    }

    /// Get the next available method token
    ///
    /// # Errors
    /// Returns an error once all 2^24 method rows are used.
    pub fn next_method_token(&self) -> Result<Token> {
        Ok(Token::from_parts(
            TABLE_METHOD,
            Self::next_row(&self.next_method_row)?,
        ))
    }

    /// Register a type that was constructed outside of the registry
    pub fn insert(&self, new_type: &ClassTypeRc) {
        self.types.insert(new_type.token, new_type.clone());
        self.types_by_fullname
            .entry(new_type.fullname())
            .or_default()
            .push(new_type.token);
    }

    /// Create and register a new type whose members are known.
    ///
    /// Names are not unique: two calls with the same name create two distinct types, exactly
    /// as two loaders of a runtime can each load a type of the same name.
    ///
    /// # Errors
    /// Returns an error once all 2^24 type rows are used.
    pub fn create_type(
        &self,
        flavor: ClassFlavor,
        namespace: &str,
        name: &str,
        flags: ClassFlags,
    ) -> Result<ClassTypeRc> {
        self.create_type_internal(flavor, namespace, name, flags, false)
    }

    /// Create and register a type imported from outside the loaded unit.
    ///
    /// External types carry their hierarchy but not their members, see
    /// [`ClassType::declared_methods`].
    ///
    /// # Errors
    /// Returns an error once all 2^24 type rows are used.
    pub fn create_external(
        &self,
        flavor: ClassFlavor,
        namespace: &str,
        name: &str,
        flags: ClassFlags,
    ) -> Result<ClassTypeRc> {
        self.create_type_internal(flavor, namespace, name, flags, true)
    }

    /// Create and register a public class
    ///
    /// # Errors
    /// Returns an error once all 2^24 type rows are used.
    pub fn create_class(&self, namespace: &str, name: &str) -> Result<ClassTypeRc> {
        self.create_type(ClassFlavor::Class, namespace, name, ClassFlags::PUBLIC)
    }

    fn create_type_internal(
        &self,
        flavor: ClassFlavor,
        namespace: &str,
        name: &str,
        flags: ClassFlags,
        external: bool,
    ) -> Result<ClassTypeRc> {
        if flavor == ClassFlavor::Array {
            return Err(malformed_error!(
                "Array types are constructed through TypeRegistry::array_of"
            ));
        }

        let token = Token::from_parts(TABLE_TYPE, Self::next_row(&self.next_type_row)?);
        let new_type = Arc::new(ClassType::new(
            token,
            flavor,
            namespace.to_string(),
            name.to_string(),
            flags,
            external,
        ));

        self.insert(&new_type);
        Ok(new_type)
    }

    /// Return the array type whose component is `component`.
    ///
    /// The first request for a component constructs the array type: its superclass is the
    /// root type and it implements the array marker interfaces. Every later request returns
    /// the identical handle.
    ///
    /// Once all array rows are used, new array types still keep their identity but share the
    /// last row as token and are not registered for token or name lookup. A warning is
    /// logged for each of them.
    pub fn array_of(&self, component: &ClassTypeRc) -> ClassTypeRc {
        self.arrays
            .entry(TypeIdentity::new(component))
            .or_insert_with(|| {
                let row = self.next_array_row.fetch_add(1, Ordering::Relaxed);
                let registered = row < OVERFLOW_ARRAY_ROW;
                if !registered {
                    warn!(
                        "array token rows exhausted, {}[] is not registered",
                        component.fullname()
                    );
                }

                let array = Arc::new(ClassType::new_array(
                    Token::from_parts(TABLE_ARRAY, row.min(OVERFLOW_ARRAY_ROW)),
                    component,
                ));
                array.base.set(ClassTypeRef::new(&self.root)).ok();
                for iface in &self.array_interfaces {
                    array.interfaces.push(ClassTypeRef::new(iface));
                }

                if registered {
                    self.insert(&array);
                }
                array
            })
            .value()
            .clone()
    }

    /// The universal root type
    pub fn root(&self) -> ClassTypeRc {
        self.root.clone()
    }

    /// The interfaces implemented by every array type
    pub fn array_interfaces(&self) -> &[ClassTypeRc] {
        &self.array_interfaces
    }

    /// Get a primitive type
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the primitive is missing, which can not
    /// happen for a registry created through [`TypeRegistry::new`].
    pub fn primitive(&self, kind: PrimitiveKind) -> Result<ClassTypeRc> {
        let token = Token::from_parts(TABLE_BUILTIN, kind.row());
        self.get(&token).ok_or(TypeNotFound(token))
    }

    /// Get a type by its token
    pub fn get(&self, token: &Token) -> Option<ClassTypeRc> {
        self.types.get(token).map(|entry| entry.value().clone())
    }

    /// Get the first type registered under a full name
    pub fn get_by_fullname(&self, fullname: &str) -> Option<ClassTypeRc> {
        self.get_by_fullname_list(fullname).into_iter().next()
    }

    /// Get all types registered under a full name, in registration order
    pub fn get_by_fullname_list(&self, fullname: &str) -> Vec<ClassTypeRc> {
        match self.types_by_fullname.get(fullname) {
            Some(tokens) => tokens.iter().filter_map(|token| self.get(token)).collect(),
            None => Vec::new(),
        }
    }

    /// All registered types, ordered by token
    pub fn all_types(&self) -> Vec<ClassTypeRc> {
        self.types.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of registered types, including built-ins and constructed arrays
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

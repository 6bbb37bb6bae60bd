//! Factory for a `java.lang`/`java.util`-like hierarchy.
//!
//! ```text
//! lang.Object
//! ├── lang.String : io.Serializable, lang.Comparable<String>, lang.CharSequence
//! └── util.AbstractCollection : util.Collection
//!     └── util.AbstractList : util.List
//!         └── util.ArrayList : util.List, util.RandomAccess
//!
//! util.List : util.Collection : lang.Iterable
//! ```

use std::sync::Arc;

use crate::metadata::typesystem::{
    ClassFlags, ClassTypeRc, GenericType, PrimitiveKind, TypeBuilder, TypeRegistry,
};

/// A registry populated with familiar library types
pub struct JavaLikeWorld {
    pub registry: Arc<TypeRegistry>,
    pub serializable: ClassTypeRc,
    pub comparable: ClassTypeRc,
    pub char_sequence: ClassTypeRc,
    pub string: ClassTypeRc,
    pub iterable: ClassTypeRc,
    pub collection: ClassTypeRc,
    pub list: ClassTypeRc,
    pub random_access: ClassTypeRc,
    pub abstract_collection: ClassTypeRc,
    pub abstract_list: ClassTypeRc,
    pub array_list: ClassTypeRc,
    pub int: ClassTypeRc,
}

impl JavaLikeWorld {
    pub fn new() -> Self {
        let registry = Arc::new(TypeRegistry::new().unwrap());
        let builder = || TypeBuilder::new(registry.clone());

        let serializable = registry.get_by_fullname("io.Serializable").unwrap();
        let comparable = builder()
            .interface("lang", "Comparable")
            .unwrap()
            .generic_param("T")
            .build()
            .unwrap();
        let char_sequence = builder()
            .interface("lang", "CharSequence")
            .unwrap()
            .build()
            .unwrap();
        let string = builder()
            .with_flags(ClassFlags::PUBLIC | ClassFlags::FINAL)
            .class("lang", "String")
            .unwrap()
            .implements(&serializable)
            .unwrap()
            .implements(&comparable)
            .unwrap()
            .implements(&char_sequence)
            .unwrap()
            .build()
            .unwrap();
        // Comparable<String> can only be expressed once String exists
        string.generic_interfaces.push(GenericType::parameterized(
            &comparable,
            vec![GenericType::class(&string)],
        ));

        let iterable = builder()
            .interface("lang", "Iterable")
            .unwrap()
            .generic_param("T")
            .build()
            .unwrap();
        let collection = builder()
            .interface("util", "Collection")
            .unwrap()
            .generic_param("E")
            .implements_generic(GenericType::parameterized(
                &iterable,
                vec![GenericType::variable("E")],
            ))
            .unwrap()
            .build()
            .unwrap();
        let list = builder()
            .interface("util", "List")
            .unwrap()
            .generic_param("E")
            .implements_generic(GenericType::parameterized(
                &collection,
                vec![GenericType::variable("E")],
            ))
            .unwrap()
            .build()
            .unwrap();
        let random_access = builder()
            .interface("util", "RandomAccess")
            .unwrap()
            .build()
            .unwrap();

        let abstract_collection = builder()
            .with_flags(ClassFlags::PUBLIC | ClassFlags::ABSTRACT)
            .class("util", "AbstractCollection")
            .unwrap()
            .implements(&collection)
            .unwrap()
            .build()
            .unwrap();
        let abstract_list = builder()
            .with_flags(ClassFlags::PUBLIC | ClassFlags::ABSTRACT)
            .class("util", "AbstractList")
            .unwrap()
            .extends(&abstract_collection)
            .unwrap()
            .implements(&list)
            .unwrap()
            .build()
            .unwrap();
        let array_list = builder()
            .class("util", "ArrayList")
            .unwrap()
            .extends(&abstract_list)
            .unwrap()
            .implements(&list)
            .unwrap()
            .implements(&random_access)
            .unwrap()
            .build()
            .unwrap();

        let int = registry.primitive(PrimitiveKind::Int).unwrap();

        JavaLikeWorld {
            registry,
            serializable,
            comparable,
            char_sequence,
            string,
            iterable,
            collection,
            list,
            random_access,
            abstract_collection,
            abstract_list,
            array_list,
            int,
        }
    }
}

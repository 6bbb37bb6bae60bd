//! Factory for handler hierarchies with generic declarations.
//!
//! ```text
//! interface Handler<T>
//! interface Converter<S, T>
//!
//! class StringHandler implements Handler<String>
//! abstract class AbstractHandler<T> implements Handler<T>
//! class ConcreteHandler extends AbstractHandler<Integer>
//! class Top implements Handler<String>
//! class Middle<T> extends Top implements Handler<T>
//! class Leaf extends Middle<Long>
//! class StringToLong implements Converter<String, Long>
//! class BytesHandler implements Handler<byte[]>
//! class WildHandler implements Handler<?>
//! ```

use std::sync::Arc;

use crate::metadata::typesystem::{
    ClassFlags, ClassTypeRc, GenericType, PrimitiveKind, TypeBuilder, TypeRegistry,
};

/// A registry populated with generic handler types
pub struct HandlerWorld {
    pub registry: Arc<TypeRegistry>,
    pub string: ClassTypeRc,
    pub integer: ClassTypeRc,
    pub long: ClassTypeRc,
    pub handler: ClassTypeRc,
    pub converter: ClassTypeRc,
    pub string_handler: ClassTypeRc,
    pub abstract_handler: ClassTypeRc,
    pub concrete_handler: ClassTypeRc,
    pub top: ClassTypeRc,
    pub middle: ClassTypeRc,
    pub leaf: ClassTypeRc,
    pub string_to_long: ClassTypeRc,
    pub bytes_handler: ClassTypeRc,
    pub wild_handler: ClassTypeRc,
}

impl HandlerWorld {
    pub fn new() -> Self {
        let registry = Arc::new(TypeRegistry::new().unwrap());
        let builder = || TypeBuilder::new(registry.clone());

        let string = registry.create_class("lang", "String").unwrap();
        let integer = registry.create_class("lang", "Integer").unwrap();
        let long = registry.create_class("lang", "Long").unwrap();
        let byte = registry.primitive(PrimitiveKind::Byte).unwrap();

        let handler = builder()
            .interface("app", "Handler")
            .unwrap()
            .generic_param("T")
            .build()
            .unwrap();
        let converter = builder()
            .interface("app", "Converter")
            .unwrap()
            .generic_param("S")
            .generic_param("T")
            .build()
            .unwrap();
        let handler_of =
            |arg: GenericType| GenericType::parameterized(&handler, vec![arg]);

        let string_handler = builder()
            .class("app", "StringHandler")
            .unwrap()
            .implements_generic(handler_of(GenericType::class(&string)))
            .unwrap()
            .build()
            .unwrap();

        let abstract_handler = builder()
            .with_flags(ClassFlags::PUBLIC | ClassFlags::ABSTRACT)
            .class("app", "AbstractHandler")
            .unwrap()
            .generic_param("T")
            .implements_generic(handler_of(GenericType::variable("T")))
            .unwrap()
            .build()
            .unwrap();
        let concrete_handler = builder()
            .class("app", "ConcreteHandler")
            .unwrap()
            .extends_generic(GenericType::parameterized(
                &abstract_handler,
                vec![GenericType::class(&integer)],
            ))
            .unwrap()
            .build()
            .unwrap();

        let top = builder()
            .class("app", "Top")
            .unwrap()
            .implements_generic(handler_of(GenericType::class(&string)))
            .unwrap()
            .build()
            .unwrap();
        let middle = builder()
            .class("app", "Middle")
            .unwrap()
            .generic_param("T")
            .extends(&top)
            .unwrap()
            .implements_generic(handler_of(GenericType::variable("T")))
            .unwrap()
            .build()
            .unwrap();
        let leaf = builder()
            .class("app", "Leaf")
            .unwrap()
            .extends_generic(GenericType::parameterized(
                &middle,
                vec![GenericType::class(&long)],
            ))
            .unwrap()
            .build()
            .unwrap();

        let string_to_long = builder()
            .class("app", "StringToLong")
            .unwrap()
            .implements_generic(GenericType::parameterized(
                &converter,
                vec![GenericType::class(&string), GenericType::class(&long)],
            ))
            .unwrap()
            .build()
            .unwrap();
        let bytes_handler = builder()
            .class("app", "BytesHandler")
            .unwrap()
            .implements_generic(handler_of(GenericType::Array(Box::new(
                GenericType::class(&byte),
            ))))
            .unwrap()
            .build()
            .unwrap();
        let wild_handler = builder()
            .class("app", "WildHandler")
            .unwrap()
            .implements_generic(handler_of(GenericType::wildcard()))
            .unwrap()
            .build()
            .unwrap();

        HandlerWorld {
            registry,
            string,
            integer,
            long,
            handler,
            converter,
            string_handler,
            abstract_handler,
            concrete_handler,
            top,
            middle,
            leaf,
            string_to_long,
            bytes_handler,
            wild_handler,
        }
    }
}

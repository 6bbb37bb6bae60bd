//! Factory for annotation types, meta-annotations and annotation cycles.
//!
//! ```text
//! @interface X
//! @X       @interface MetaX
//! @MetaX   @interface DeepX
//! @B       @interface A
//! @A       @interface B
//! @Documented @interface Documented
//!
//! @X      class DirectTarget
//! @MetaX  class MetaTarget
//! @DeepX  class DeepTarget
//! @A      class CyclicTarget
//!
//! class BaseService                  { @X open(); helper(); }
//! class ServiceImpl extends BaseService { @X handle(); @MetaX close(); internal(); }
//! external class PluginBase          { @X init(); }
//! class Plugin extends PluginBase    { @X load(); }
//! ```

use std::sync::Arc;

use crate::metadata::{
    annotations::Annotation,
    method::MethodBuilder,
    typesystem::{ClassTypeRc, TypeBuilder, TypeRegistry},
};

/// A registry populated with annotation fixtures
pub struct AnnotationWorld {
    pub registry: Arc<TypeRegistry>,
    pub x: ClassTypeRc,
    pub meta_x: ClassTypeRc,
    pub deep_x: ClassTypeRc,
    pub documented: ClassTypeRc,
    pub direct_target: ClassTypeRc,
    pub meta_target: ClassTypeRc,
    pub deep_target: ClassTypeRc,
    pub cyclic_target: ClassTypeRc,
    pub base_service: ClassTypeRc,
    pub service_impl: ClassTypeRc,
    pub plugin_base: ClassTypeRc,
    pub plugin: ClassTypeRc,
}

fn annotation(ty: &ClassTypeRc) -> Arc<Annotation> {
    Arc::new(Annotation::new(ty))
}

impl AnnotationWorld {
    pub fn new() -> Self {
        let registry = Arc::new(TypeRegistry::new().unwrap());
        let builder = || TypeBuilder::new(registry.clone());

        let x = builder()
            .annotation_type("app", "X")
            .unwrap()
            .build()
            .unwrap();
        let meta_x = builder()
            .annotation_type("app", "MetaX")
            .unwrap()
            .annotated(annotation(&x))
            .build()
            .unwrap();
        let deep_x = builder()
            .annotation_type("app", "DeepX")
            .unwrap()
            .annotated(annotation(&meta_x))
            .build()
            .unwrap();

        let cycle_a = builder()
            .annotation_type("app", "A")
            .unwrap()
            .build()
            .unwrap();
        let cycle_b = builder()
            .annotation_type("app", "B")
            .unwrap()
            .annotated(annotation(&cycle_a))
            .build()
            .unwrap();
        cycle_a.annotations.push(annotation(&cycle_b));

        let documented = builder()
            .annotation_type("app", "Documented")
            .unwrap()
            .build()
            .unwrap();
        documented.annotations.push(annotation(&documented));

        let target = |name: &str, on: &ClassTypeRc| {
            builder()
                .class("app", name)
                .unwrap()
                .annotated(annotation(on))
                .build()
                .unwrap()
        };
        let direct_target = target("DirectTarget", &x);
        let meta_target = target("MetaTarget", &meta_x);
        let deep_target = target("DeepTarget", &deep_x);
        let cyclic_target = target("CyclicTarget", &cycle_a);

        let base_service = builder()
            .class("app", "BaseService")
            .unwrap()
            .method(MethodBuilder::new("open").annotated(annotation(&x)))
            .unwrap()
            .method(MethodBuilder::new("helper"))
            .unwrap()
            .build()
            .unwrap();
        let service_impl = builder()
            .class("app", "ServiceImpl")
            .unwrap()
            .extends(&base_service)
            .unwrap()
            .method(MethodBuilder::new("handle").annotated(annotation(&x)))
            .unwrap()
            .method(MethodBuilder::new("close").annotated(annotation(&meta_x)))
            .unwrap()
            .method(MethodBuilder::new("internal"))
            .unwrap()
            .build()
            .unwrap();

        let plugin_base = builder()
            .external()
            .class("ext", "PluginBase")
            .unwrap()
            .method(MethodBuilder::new("init").annotated(annotation(&x)))
            .unwrap()
            .build()
            .unwrap();
        let plugin = builder()
            .class("app", "Plugin")
            .unwrap()
            .extends(&plugin_base)
            .unwrap()
            .method(MethodBuilder::new("load").annotated(annotation(&x)))
            .unwrap()
            .build()
            .unwrap();

        AnnotationWorld {
            registry,
            x,
            meta_x,
            deep_x,
            documented,
            direct_target,
            meta_target,
            deep_target,
            cyclic_target,
            base_service,
            service_impl,
            plugin_base,
            plugin,
        }
    }
}

//! Lock-free memoization of hierarchy and array-type lookups.
//!
//! [`ClassHierarchy`] caches two facts that never change once a type is loaded: the ordered
//! ancestor list of a type, and the array type of a component type. Both caches are read far
//! more often than written.
//!
//! # Snapshot Publication
//!
//! Each cache is an immutable `HashMap` behind an [`arc_swap::ArcSwap`]:
//!
//! 1. Read path: load the current snapshot and look the key up. Wait-free, no locks.
//! 2. Miss path: compute the value without holding anything.
//! 3. Publish path: copy the snapshot, insert the value, swap it in with compare-and-swap.
//!    A failed swap retries from the newer snapshot, so no entry is lost.
//!
//! Two threads missing on the same key both compute it; the values are equivalent because
//! they derive from the same immutable type metadata, whichever lands last stays. Readers
//! only ever see a complete snapshot, never a partially updated map.
//!
//! # Lifecycle
//!
//! Caches start empty, grow on every miss and are cleared only by
//! [`ClassHierarchy::shutdown`], which must not race with lookups.

use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;
use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    introspection::hierarchy,
    metadata::typesystem::{ClassTypeRc, TypeIdentity, TypeRegistry},
    Error::InvalidConfig,
    Result,
};

/// Ordered list of a type and its ancestors, shared between cache and callers
pub type ClassList = Arc<[ClassTypeRc]>;

type Snapshot<V> = HashMap<TypeIdentity, V>;

/// Sizing of the cache snapshots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HierarchyConfig {
    /// Fraction of a snapshot's capacity that may be occupied, in `(0, 1]`.
    /// Lower values make a republished snapshot reserve more head-room.
    pub load_factor: f32,

    /// Minimum capacity reserved by every snapshot (default: 16)
    pub initial_capacity: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            load_factor: 0.75,
            initial_capacity: 16,
        }
    }
}

impl HierarchyConfig {
    /// Check that all values are within range
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfig`] if the load factor is not within `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(InvalidConfig(format!(
                "load factor must be within (0, 1], got {}",
                self.load_factor
            )));
        }
        Ok(())
    }

    /// Capacity to reserve for a snapshot holding `entries` entries
    #[must_use]
    pub fn capacity_for(&self, entries: usize) -> usize {
        let scaled = (entries as f64 / f64::from(self.load_factor)).ceil() as usize;
        scaled.max(self.initial_capacity)
    }
}

/// Concurrent cache of type hierarchies and array types.
///
/// # Thread Safety
///
/// Lookups may run concurrently from any number of threads. Only
/// [`ClassHierarchy::shutdown`] must be called when no lookup is in flight.
///
/// # Examples
///
/// ```rust
/// use hierscope::introspection::ClassHierarchy;
/// use hierscope::metadata::typesystem::{TypeBuilder, TypeRegistry};
/// use std::sync::Arc;
///
/// let registry = Arc::new(TypeRegistry::new()?);
/// let widget = TypeBuilder::new(registry.clone()).class("app", "Widget")?.build()?;
///
/// let hierarchy = ClassHierarchy::new(registry.clone());
/// let ancestors = hierarchy.class_and_super_classes(&widget);
/// assert!(Arc::ptr_eq(&ancestors[0], &widget));
/// assert_eq!(ancestors[1].fullname(), "lang.Object");
///
/// let widgets = hierarchy.class_and_super_classes(&hierarchy.array_class(&widget));
/// assert_eq!(widgets[1].fullname(), "lang.Object[]");
/// # Ok::<(), hierscope::Error>(())
/// ```
pub struct ClassHierarchy {
    /// Reflection facility used to construct array types
    registry: Arc<TypeRegistry>,
    /// Snapshot sizing
    config: HierarchyConfig,
    /// Type to ordered ancestor list
    hierarchies: ArcSwap<Snapshot<ClassList>>,
    /// Component type to array type
    arrays: ArcSwap<Snapshot<ClassTypeRc>>,
}

impl ClassHierarchy {
    /// Create empty caches with the default configuration
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        let config = HierarchyConfig::default();
        ClassHierarchy {
            registry,
            config,
            hierarchies: ArcSwap::from_pointee(HashMap::with_capacity(config.initial_capacity)),
            arrays: ArcSwap::from_pointee(HashMap::with_capacity(config.initial_capacity)),
        }
    }

    /// Create empty caches with a custom configuration
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfig`] if `config` does not validate.
    pub fn with_config(registry: Arc<TypeRegistry>, config: HierarchyConfig) -> Result<Self> {
        config.validate()?;
        Ok(ClassHierarchy {
            registry,
            config,
            hierarchies: ArcSwap::from_pointee(HashMap::with_capacity(config.initial_capacity)),
            arrays: ArcSwap::from_pointee(HashMap::with_capacity(config.initial_capacity)),
        })
    }

    /// The configuration these caches were created with
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// The type followed by all of its distinct transitive ancestors.
    ///
    /// For an array type `T[]` the result is `T[]` followed by `S[]` for every ancestor `S`
    /// of `T`, following covariant array typing. The result is never empty and the first
    /// element is always `ty`.
    pub fn class_and_super_classes(&self, ty: &ClassTypeRc) -> ClassList {
        let key = TypeIdentity::new(ty);
        if let Some(found) = self.hierarchies.load().get(&key) {
            return found.clone();
        }

        let computed: ClassList = match ty.component() {
            Some(component) => std::iter::once(ty.clone())
                .chain(
                    self.class_and_super_classes(&component)
                        .iter()
                        .skip(1)
                        .map(|ancestor| self.array_class(ancestor)),
                )
                .collect(),
            None => hierarchy::class_and_super_classes(ty).into(),
        };

        trace!(
            "hierarchy cache miss for {} - {} types",
            ty.fullname(),
            computed.len()
        );
        Self::publish(&self.config, &self.hierarchies, key, computed.clone());
        computed
    }

    /// The array type whose component is `component`
    pub fn array_class(&self, component: &ClassTypeRc) -> ClassTypeRc {
        let key = TypeIdentity::new(component);
        if let Some(found) = self.arrays.load().get(&key) {
            return found.clone();
        }

        let array = self.registry.array_of(component);
        trace!("array cache miss for {}", component.fullname());
        Self::publish(&self.config, &self.arrays, key, array.clone());
        array
    }

    /// Populate the hierarchy cache for `types` in parallel
    pub fn warm(&self, types: &[ClassTypeRc]) {
        debug!("warming hierarchy cache with {} types", types.len());
        types.par_iter().for_each(|ty| {
            self.class_and_super_classes(ty);
        });
    }

    /// Number of cached hierarchies
    pub fn hierarchy_len(&self) -> usize {
        self.hierarchies.load().len()
    }

    /// Number of cached array types
    pub fn array_len(&self) -> usize {
        self.arrays.load().len()
    }

    /// Clear both caches.
    ///
    /// Meant to run once at teardown. Lookups racing with this call may republish entries
    /// computed before the clear; the caller must ensure none are in flight.
    pub fn shutdown(&self) {
        debug!(
            "clearing hierarchy caches - {} hierarchies, {} arrays",
            self.hierarchy_len(),
            self.array_len()
        );
        self.hierarchies
            .store(Arc::new(HashMap::with_capacity(self.config.initial_capacity)));
        self.arrays
            .store(Arc::new(HashMap::with_capacity(self.config.initial_capacity)));
    }

    fn publish<V: Clone>(
        config: &HierarchyConfig,
        cache: &ArcSwap<Snapshot<V>>,
        key: TypeIdentity,
        value: V,
    ) {
        cache.rcu(|current| {
            let mut next = HashMap::with_capacity(config.capacity_for(current.len() + 1));
            next.extend(current.iter().map(|(k, v)| (k.clone(), v.clone())));
            next.insert(key.clone(), value.clone());
            next
        });
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, thread};

    use super::*;
    use crate::test::factories::hierarchy::JavaLikeWorld;

    fn names(types: &[ClassTypeRc]) -> Vec<String> {
        types.iter().map(|ty| ty.fullname()).collect()
    }

    #[test]
    fn test_config_validation() {
        assert!(HierarchyConfig::default().validate().is_ok());

        for load_factor in [0.0, -0.5, 1.5, f32::NAN] {
            let config = HierarchyConfig {
                load_factor,
                ..HierarchyConfig::default()
            };
            assert!(config.validate().is_err(), "accepted {load_factor}");
        }
    }

    #[test]
    fn test_capacity_for() {
        let config = HierarchyConfig {
            load_factor: 0.5,
            initial_capacity: 4,
        };
        assert_eq!(config.capacity_for(1), 4);
        assert_eq!(config.capacity_for(10), 20);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let world = JavaLikeWorld::new();
        let config = HierarchyConfig {
            load_factor: 2.0,
            initial_capacity: 8,
        };
        assert!(ClassHierarchy::with_config(world.registry.clone(), config).is_err());
    }

    #[test]
    fn test_first_element_is_input() {
        let world = JavaLikeWorld::new();
        let hierarchy = ClassHierarchy::new(world.registry.clone());

        for ty in [&world.string, &world.list, &world.array_list, &world.int] {
            let result = hierarchy.class_and_super_classes(ty);
            assert!(Arc::ptr_eq(&result[0], ty));
            let unique: HashSet<TypeIdentity> = result.iter().map(TypeIdentity::new).collect();
            assert_eq!(unique.len(), result.len());
        }
    }

    #[test]
    fn test_cached_result_shared() {
        let world = JavaLikeWorld::new();
        let hierarchy = ClassHierarchy::new(world.registry.clone());

        let first = hierarchy.class_and_super_classes(&world.string);
        assert_eq!(hierarchy.hierarchy_len(), 1);
        let second = hierarchy.class_and_super_classes(&world.string);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(hierarchy.hierarchy_len(), 1);
    }

    #[test]
    fn test_array_hierarchy() {
        let world = JavaLikeWorld::new();
        let hierarchy = ClassHierarchy::new(world.registry.clone());

        let strings = hierarchy.array_class(&world.string);
        let result = hierarchy.class_and_super_classes(&strings);

        assert_eq!(
            names(&result),
            vec![
                "lang.String[]",
                "io.Serializable[]",
                "lang.Comparable[]",
                "lang.CharSequence[]",
                "lang.Object[]",
            ]
        );
        assert!(Arc::ptr_eq(&result[0], &strings));
        for (array, component) in result
            .iter()
            .zip(hierarchy.class_and_super_classes(&world.string).iter())
        {
            assert!(Arc::ptr_eq(&array.component().unwrap(), component));
        }
    }

    #[test]
    fn test_nested_array_hierarchy() {
        let world = JavaLikeWorld::new();
        let hierarchy = ClassHierarchy::new(world.registry.clone());

        let strings = hierarchy.array_class(&world.string);
        let string_matrix = hierarchy.array_class(&strings);
        let result = hierarchy.class_and_super_classes(&string_matrix);

        assert_eq!(
            names(&result),
            vec![
                "lang.String[][]",
                "io.Serializable[][]",
                "lang.Comparable[][]",
                "lang.CharSequence[][]",
                "lang.Object[][]",
            ]
        );

        // primitives have no ancestors, neither do their arrays
        let ints = hierarchy.array_class(&world.int);
        assert_eq!(names(&hierarchy.class_and_super_classes(&ints)), vec!["int[]"]);
    }

    #[test]
    fn test_array_class_idempotent() {
        let world = JavaLikeWorld::new();
        let hierarchy = ClassHierarchy::new(world.registry.clone());

        let first = hierarchy.array_class(&world.string);
        let second = hierarchy.array_class(&world.string);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &world.registry.array_of(&world.string)));
        assert_eq!(hierarchy.array_len(), 1);
    }

    #[test]
    fn test_shutdown_repopulates() {
        let world = JavaLikeWorld::new();
        let hierarchy = ClassHierarchy::new(world.registry.clone());

        let before = hierarchy.class_and_super_classes(&world.array_list);
        let array = hierarchy.array_class(&world.string);
        hierarchy.shutdown();
        assert_eq!(hierarchy.hierarchy_len(), 0);
        assert_eq!(hierarchy.array_len(), 0);

        let after = hierarchy.class_and_super_classes(&world.array_list);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(names(&before), names(&after));
        assert!(Arc::ptr_eq(&array, &hierarchy.array_class(&world.string)));
    }

    #[test]
    fn test_concurrent_first_access() {
        let world = JavaLikeWorld::new();
        let hierarchy = Arc::new(ClassHierarchy::new(world.registry.clone()));
        let expected = names(&crate::introspection::hierarchy::class_and_super_classes(
            &world.array_list,
        ));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let hierarchy = hierarchy.clone();
                let target = world.array_list.clone();
                thread::spawn(move || hierarchy.class_and_super_classes(&target))
            })
            .collect();

        for handle in handles {
            let result = handle.join().unwrap();
            assert_eq!(names(&result), expected);
        }
        assert_eq!(hierarchy.hierarchy_len(), 1);
    }

    #[test]
    fn test_concurrent_distinct_keys_not_lost() {
        let world = JavaLikeWorld::new();
        let hierarchy = Arc::new(ClassHierarchy::new(world.registry.clone()));
        let types = world.registry.all_types();

        let handles: Vec<_> = types
            .chunks(2)
            .map(|chunk| {
                let hierarchy = hierarchy.clone();
                let chunk = chunk.to_vec();
                thread::spawn(move || {
                    for ty in &chunk {
                        hierarchy.class_and_super_classes(ty);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(hierarchy.hierarchy_len(), types.len());
    }

    #[test]
    fn test_warm() {
        let world = JavaLikeWorld::new();
        let hierarchy = ClassHierarchy::new(world.registry.clone());

        let types = vec![world.string.clone(), world.array_list.clone(), world.list.clone()];
        hierarchy.warm(&types);
        assert_eq!(hierarchy.hierarchy_len(), 3);
    }
}

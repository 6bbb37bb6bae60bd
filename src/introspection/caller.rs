//! Resolution of the calling type from the host's call stack.
//!
//! Hosts expose their call stack through the [`StackIntrospector`] capability. A host that
//! interprets code on behalf of loaded types can use the provided [`ShadowStack`], a
//! per-thread stack of types pushed and popped with [`FrameGuard`]s as frames are entered
//! and left.
//!
//! [`CallerResolver`] asks the host for permission once, at construction, and then answers
//! "which type is `depth` frames above me" queries.
//!
//! # Examples
//!
//! ```rust
//! use hierscope::introspection::{CallerResolver, ShadowStack};
//! use hierscope::metadata::typesystem::TypeRegistry;
//! use std::sync::Arc;
//!
//! let registry = TypeRegistry::new()?;
//! let service = registry.create_class("app", "Service")?;
//! let client = registry.create_class("app", "Client")?;
//!
//! let stack = Arc::new(ShadowStack::new());
//! let resolver = CallerResolver::new(stack.clone())?;
//!
//! let _outer = stack.enter(&client);
//! let _inner = stack.enter(&service);
//! assert_eq!(resolver.caller_class(1).unwrap().fullname(), "app.Client");
//! # Ok::<(), hierscope::Error>(())
//! ```

use std::{cell::RefCell, marker::PhantomData, sync::Arc};

use log::debug;

use crate::{metadata::typesystem::ClassTypeRc, Error::StackAccessDenied, Result};

/// Host capability to inspect the types on the current call stack
pub trait StackIntrospector: Send + Sync {
    /// Check whether stack introspection is permitted
    ///
    /// # Errors
    /// Returns [`crate::Error::StackAccessDenied`] if the host refuses introspection.
    fn check_access(&self) -> Result<()>;

    /// The types of the frames on the current thread's stack, innermost first
    fn class_context(&self) -> Vec<ClassTypeRc>;
}

/// Whether a [`ShadowStack`] permits introspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackPolicy {
    /// Introspection is permitted
    #[default]
    Allow,
    /// Introspection is refused
    Deny,
}

thread_local! {
    static FRAMES: RefCell<Vec<ClassTypeRc>> = const { RefCell::new(Vec::new()) };
}

/// A per-thread explicit call stack maintained by the host
///
/// Frames are shared by all `ShadowStack` values on a thread; each thread sees only the
/// frames it entered itself.
#[derive(Debug, Default)]
pub struct ShadowStack {
    policy: StackPolicy,
}

impl ShadowStack {
    /// Create a stack that permits introspection
    pub fn new() -> Self {
        Self::with_policy(StackPolicy::Allow)
    }

    /// Create a stack with the given introspection policy
    pub fn with_policy(policy: StackPolicy) -> Self {
        ShadowStack { policy }
    }

    /// Push a frame of `ty` on the current thread's stack
    ///
    /// The frame is popped when the returned guard is dropped.
    #[must_use = "the frame is popped as soon as the guard is dropped"]
    pub fn enter(&self, ty: &ClassTypeRc) -> FrameGuard {
        FRAMES.with(|frames| frames.borrow_mut().push(ty.clone()));
        FrameGuard {
            _not_send: PhantomData,
        }
    }

    /// Number of frames on the current thread's stack
    pub fn depth(&self) -> usize {
        FRAMES.with(|frames| frames.borrow().len())
    }
}

impl StackIntrospector for ShadowStack {
    fn check_access(&self) -> Result<()> {
        match self.policy {
            StackPolicy::Allow => Ok(()),
            StackPolicy::Deny => Err(StackAccessDenied),
        }
    }

    fn class_context(&self) -> Vec<ClassTypeRc> {
        FRAMES.with(|frames| frames.borrow().iter().rev().cloned().collect())
    }
}

/// Pops the frame pushed by [`ShadowStack::enter`] when dropped
///
/// Bound to the thread that entered the frame.
pub struct FrameGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        FRAMES.with(|frames| {
            frames.borrow_mut().pop();
        });
    }
}

/// Answers which type is a given number of frames up the call stack
pub struct CallerResolver {
    host: Arc<dyn StackIntrospector>,
    offset: usize,
}

impl CallerResolver {
    /// Create a resolver over `host`
    ///
    /// # Errors
    /// Returns [`crate::Error::StackAccessDenied`] if the host refuses introspection. The
    /// check is made once and not retried.
    pub fn new(host: Arc<dyn StackIntrospector>) -> Result<Self> {
        host.check_access().inspect_err(|_| {
            debug!("Stack introspection denied by host");
        })?;

        Ok(CallerResolver { host, offset: 0 })
    }

    /// Skip `offset` additional innermost frames on every query
    ///
    /// Used when the resolver is wrapped by helpers whose own frames are on the stack.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// The configured frame offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The type `depth` frames up the stack, past the configured offset
    ///
    /// Depth 0 is the innermost frame. Returns `None` if the stack is not that deep.
    pub fn caller_class(&self, depth: usize) -> Option<ClassTypeRc> {
        let index = depth.checked_add(self.offset)?;
        self.host.class_context().into_iter().nth(index)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{metadata::typesystem::TypeRegistry, Error};

    struct FixedStack(Vec<ClassTypeRc>);

    impl StackIntrospector for FixedStack {
        fn check_access(&self) -> Result<()> {
            Ok(())
        }

        fn class_context(&self) -> Vec<ClassTypeRc> {
            self.0.clone()
        }
    }

    #[test]
    fn test_denied() {
        let result = CallerResolver::new(Arc::new(ShadowStack::with_policy(StackPolicy::Deny)));
        assert!(matches!(result, Err(Error::StackAccessDenied)));
    }

    #[test]
    fn test_caller_depths() {
        let registry = TypeRegistry::new().unwrap();
        let main = registry.create_class("app", "Main").unwrap();
        let service = registry.create_class("app", "Service").unwrap();
        let helper = registry.create_class("app", "Helper").unwrap();

        let stack = Arc::new(ShadowStack::new());
        let resolver = CallerResolver::new(stack.clone()).unwrap();

        let _main = stack.enter(&main);
        let _service = stack.enter(&service);
        let _helper = stack.enter(&helper);

        assert!(Arc::ptr_eq(&resolver.caller_class(0).unwrap(), &helper));
        assert!(Arc::ptr_eq(&resolver.caller_class(1).unwrap(), &service));
        assert!(Arc::ptr_eq(&resolver.caller_class(2).unwrap(), &main));
        assert!(resolver.caller_class(3).is_none());
        assert!(resolver.caller_class(usize::MAX).is_none());
    }

    #[test]
    fn test_offset() {
        let registry = TypeRegistry::new().unwrap();
        let outer = registry.create_class("app", "Outer").unwrap();
        let inner = registry.create_class("app", "Inner").unwrap();

        let host = Arc::new(FixedStack(vec![inner.clone(), outer.clone()]));
        let resolver = CallerResolver::new(host).unwrap().with_offset(1);

        assert_eq!(resolver.offset(), 1);
        assert!(Arc::ptr_eq(&resolver.caller_class(0).unwrap(), &outer));
        assert!(resolver.caller_class(1).is_none());
    }

    #[test]
    fn test_guard_pops_frame() {
        let registry = TypeRegistry::new().unwrap();
        let worker = registry.create_class("app", "Worker").unwrap();
        let stack = ShadowStack::new();

        assert_eq!(stack.depth(), 0);
        {
            let _frame = stack.enter(&worker);
            assert_eq!(stack.depth(), 1);
        }
        assert_eq!(stack.depth(), 0);
        assert!(stack.class_context().is_empty());
    }

    #[test]
    fn test_frames_are_per_thread() {
        let registry = TypeRegistry::new().unwrap();
        let worker = registry.create_class("app", "Worker").unwrap();
        let stack = Arc::new(ShadowStack::new());

        let _frame = stack.enter(&worker);
        let remote = stack.clone();
        let remote_depth = thread::spawn(move || remote.depth()).join().unwrap();

        assert_eq!(remote_depth, 0);
        assert_eq!(stack.depth(), 1);
    }
}

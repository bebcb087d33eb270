//! Immutable, parent-linked propagation handle for request-scoped data.
//!
//! A [`Context`] is a cheap-to-clone handle that carries typed values down a
//! call chain. "Adding" a value never mutates anything: [`Context::with_value`]
//! returns a new child handle whose parent link points at the original, so
//! sibling and ancestor handles are unaffected. Lookup walks from the handle
//! to the root and returns the nearest association of the requested type.
//!
//! One slot per type: the association key is the value's [`TypeId`], so a
//! private wrapper type gives a component a collision-free slot no other
//! component can read or shadow.
//!
//! # Design Rules
//!
//! 1. Handles are immutable once created; clones share structure via `Arc`.
//! 2. A child sees everything its ancestors stored; ancestors never see
//!    descendants' values.
//! 3. The nearest association wins when a type is stored more than once on
//!    a path.
//! 4. All operations are lock-free and safe for unsynchronized concurrent
//!    use.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// One link in the chain: a typed value plus the parent it shadows.
struct Node {
    parent: Option<Arc<Node>>,
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
}

/// An immutable, parent-linked carrier of request-scoped typed values.
///
/// `Clone` is an `Arc` bump; the clone is the same handle, not a child.
///
/// # Examples
///
/// ```
/// use scopelog_context::Context;
///
/// struct Deadline(u64);
///
/// let root = Context::root();
/// let ctx = root.with_value(Deadline(1000));
/// assert_eq!(ctx.value::<Deadline>().unwrap().0, 1000);
/// assert!(root.value::<Deadline>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty root handle: no values, no parent.
    pub fn root() -> Self {
        Self { head: None }
    }

    /// Create a child handle with `value` associated under its type.
    ///
    /// The receiver is unchanged; the child shadows any ancestor
    /// association of the same type.
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        Self {
            head: Some(Arc::new(Node {
                parent: self.head.clone(),
                key: TypeId::of::<T>(),
                value: Arc::new(value),
            })),
        }
    }

    /// The nearest association of type `T`, walking parent links to the
    /// root. Returns `None` if no ancestor stored a `T`.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            if n.key == TypeId::of::<T>() {
                return n.value.downcast_ref::<T>();
            }
            node = n.parent.as_deref();
        }
        None
    }

    /// Returns `true` if `self` and `other` are the same underlying handle
    /// (clones of one another, or both the root).
    ///
    /// Distinguishes "same handle" from "handles with equal contents":
    /// a child derived with `with_value` is never `ptr_eq` to its parent.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns `true` if this is the empty root handle.
    pub fn is_root(&self) -> bool {
        self.head.is_none()
    }

    /// Number of links between this handle and the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            depth += 1;
            node = n.parent.as_deref();
        }
        depth
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("depth", &self.depth()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RequestId(&'static str);
    struct TraceId(&'static str);

    #[test]
    fn root_has_no_values() {
        let root = Context::root();
        assert!(root.value::<RequestId>().is_none());
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn child_sees_value_parent_does_not() {
        let root = Context::root();
        let ctx = root.with_value(RequestId("abc"));
        assert_eq!(ctx.value::<RequestId>().unwrap().0, "abc");
        assert!(root.value::<RequestId>().is_none());
    }

    #[test]
    fn lookup_walks_to_root() {
        let ctx = Context::root()
            .with_value(RequestId("abc"))
            .with_value(TraceId("t-1"));
        assert_eq!(ctx.value::<RequestId>().unwrap().0, "abc");
        assert_eq!(ctx.value::<TraceId>().unwrap().0, "t-1");
    }

    #[test]
    fn nearest_association_wins() {
        let ctx = Context::root()
            .with_value(RequestId("outer"))
            .with_value(RequestId("inner"));
        assert_eq!(ctx.value::<RequestId>().unwrap().0, "inner");
    }

    #[test]
    fn siblings_are_independent() {
        let root = Context::root();
        let a = root.with_value(RequestId("a"));
        let b = root.with_value(TraceId("b"));
        assert!(a.value::<TraceId>().is_none());
        assert!(b.value::<RequestId>().is_none());
    }

    #[test]
    fn clone_is_same_handle() {
        let ctx = Context::root().with_value(RequestId("abc"));
        let cloned = ctx.clone();
        assert!(ctx.ptr_eq(&cloned));
    }

    #[test]
    fn child_is_a_different_handle() {
        let parent = Context::root().with_value(RequestId("abc"));
        let child = parent.with_value(TraceId("t-1"));
        assert!(!parent.ptr_eq(&child));
    }

    #[test]
    fn roots_are_ptr_eq() {
        assert!(Context::root().ptr_eq(&Context::root()));
    }

    #[test]
    fn private_wrapper_types_do_not_collide() {
        struct SlotA(u32);
        struct SlotB(u32);
        let ctx = Context::root().with_value(SlotA(1)).with_value(SlotB(2));
        assert_eq!(ctx.value::<SlotA>().unwrap().0, 1);
        assert_eq!(ctx.value::<SlotB>().unwrap().0, 2);
    }

    #[test]
    fn context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Context>();
    }
}

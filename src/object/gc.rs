//! Collector integration hooks.
//!
//! A managed host cannot assume the objects it hands out are acyclic, so every
//! object declares the references it owns ([Trace::traverse]) and can drop
//! them on demand ([Trace::clear]). With `Arc` ownership the increments and
//! decrements happen in `Clone`/`Drop`; the hooks only have to expose and
//! release the slots.

use core::ops::ControlFlow;
use std::sync::Arc;

/// A reference reported by [Trace::traverse].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OwnedRef {
    /// Name of the slot holding the reference
    pub slot: &'static str,
    /// Address of the referent, identifies the same object across traversals
    pub addr: usize,
    /// Strong count of the referent at the time of the visit, including this reference
    pub strong_count: usize,
}

impl OwnedRef {
    pub fn new<T: ?Sized>(slot: &'static str, target: &Arc<T>) -> Self {
        OwnedRef {
            slot,
            addr: Arc::as_ptr(target) as *const () as usize,
            strong_count: Arc::strong_count(target),
        }
    }
}

/// Visitor invoked once per owned reference.
pub trait Visit {
    fn visit(&mut self, owned: OwnedRef) -> ControlFlow<()>;
}

impl<F: FnMut(OwnedRef) -> ControlFlow<()>> Visit for F {
    #[inline]
    fn visit(&mut self, owned: OwnedRef) -> ControlFlow<()> {
        self(owned)
    }
}

/// Traversal and clear hooks for objects living in a managed host.
pub trait Trace {
    /// Report every owned reference to `visit`, stopping early if it breaks.
    ///
    /// Never fails. Slots already released by [clear](Trace::clear) are skipped.
    fn traverse(&self, visit: &mut dyn Visit) -> ControlFlow<()>;

    /// Drop every owned reference. Calling it again is a no-op.
    fn clear(&mut self);
}

/// Visit an optional slot, returning from the enclosing traverse on break
macro_rules! visit_slot {
    ($visit:expr, $name:literal, $slot:expr) => {
        if let Some(target) = $slot.as_ref() {
            let owned = $crate::object::gc::OwnedRef::new($name, target);
            if let ::core::ops::ControlFlow::Break(()) =
                $crate::object::gc::Visit::visit(&mut *$visit, owned)
            {
                return ::core::ops::ControlFlow::Break(());
            }
        }
    };
}
pub(crate) use visit_slot;

/// Collect every reference `obj` currently owns.
pub fn owned_refs<T: Trace + ?Sized>(obj: &T) -> Vec<OwnedRef> {
    let mut refs = Vec::new();
    let _ = obj.traverse(&mut |owned: OwnedRef| {
        refs.push(owned);
        ControlFlow::Continue(())
    });
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        left: Option<Arc<u32>>,
        right: Option<Arc<u32>>,
    }

    impl Trace for Pair {
        fn traverse(&self, visit: &mut dyn Visit) -> ControlFlow<()> {
            visit_slot!(visit, "left", self.left);
            visit_slot!(visit, "right", self.right);
            ControlFlow::Continue(())
        }

        fn clear(&mut self) {
            self.left.take();
            self.right.take();
        }
    }

    #[test]
    fn traverse_test() {
        let shared = Arc::new(7u32);
        let mut pair = Pair {
            left: Some(Arc::clone(&shared)),
            right: Some(Arc::new(8)),
        };

        let refs = owned_refs(&pair);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].slot, "left");
        assert_eq!(refs[0].strong_count, 2);
        assert_eq!(refs[0].addr, Arc::as_ptr(&shared) as usize);
        assert_eq!(refs[1].strong_count, 1);

        // stop after the first slot
        let mut seen = 0;
        let flow = pair.traverse(&mut |_: OwnedRef| {
            seen += 1;
            ControlFlow::Break(())
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(seen, 1);

        pair.clear();
        assert_eq!(Arc::strong_count(&shared), 1);
        assert!(owned_refs(&pair).is_empty());
        pair.clear();
        assert_eq!(Arc::strong_count(&shared), 1);
    }
}

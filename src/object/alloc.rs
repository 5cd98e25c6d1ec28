//! Envelope allocation accounting, the host's `tp_alloc` / `tp_free` pair.

use core::alloc::Layout;
use core::sync::atomic::{AtomicUsize, Ordering};
use log::{trace, warn};
use std::fmt;

use crate::error::{Error, Result};

/// Reserves and releases space for object envelopes.
///
/// `deallocate` runs inside `Drop` and may be called from any thread, so it
/// must not fail.
pub trait Allocator: Send + Sync + fmt::Debug {
    fn allocate(&self, type_name: &'static str, layout: Layout) -> Result<()>;
    fn deallocate(&self, type_name: &'static str, layout: Layout);
}

/// Allocator backed by the global heap, never refuses.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    #[inline]
    fn allocate(&self, _type_name: &'static str, _layout: Layout) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn deallocate(&self, _type_name: &'static str, _layout: Layout) {}
}

/// Allocator that refuses to hold more than `limit` live envelopes.
#[derive(Debug)]
pub struct LimitedAllocator {
    limit: usize,
    live: AtomicUsize,
}

impl LimitedAllocator {
    pub fn new(limit: usize) -> Self {
        LimitedAllocator {
            limit,
            live: AtomicUsize::new(0),
        }
    }

    /// Number of envelopes allocated and not yet freed
    #[inline]
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Allocator for LimitedAllocator {
    fn allocate(&self, type_name: &'static str, layout: Layout) -> Result<()> {
        let reserved = self
            .live
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                if n < self.limit {
                    Some(n + 1)
                } else {
                    None
                }
            });
        match reserved {
            Ok(n) => {
                trace!("allocated {} ({} live)", type_name, n + 1);
                Ok(())
            }
            Err(n) => {
                warn!("refusing to allocate {}: {} of {} envelopes live", type_name, n, self.limit);
                Err(Error::Allocation {
                    type_name,
                    size: layout.size(),
                })
            }
        }
    }

    fn deallocate(&self, type_name: &'static str, _layout: Layout) {
        let prev = self.live.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(prev > 0, "freed more {} envelopes than allocated", type_name);
        trace!("freed {} ({} live)", type_name, prev.wrapping_sub(1));
    }
}

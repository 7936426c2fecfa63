//! Inline bump-pointer arena.

use std::cell::{Cell, UnsafeCell};
use std::ptr::NonNull;

use crate::Allocator;

/// A fixed-capacity arena carved out of the allocator's own storage.
///
/// Allocations are bumped from the high address downward; there is no
/// individual reclamation: [`deallocate`](Allocator::deallocate) is a no-op
/// and the arena lives and dies as a unit. `owns` is a pure address-range
/// containment test. Intended for stack-scoped, alloca-style allocation
/// bursts with zero dynamic allocation.
///
/// The bump pointer is unsynchronized (`Cell`), so the type is not `Sync`.
#[repr(align(16))]
pub struct StackAllocator<const N: usize> {
    buffer: UnsafeCell<[u8; N]>,
    // Offset of the most recent allocation; everything below it is free.
    next: Cell<usize>,
}

impl<const N: usize> StackAllocator<N> {
    pub fn new() -> StackAllocator<N> {
        StackAllocator {
            buffer: UnsafeCell::new([0; N]),
            next: Cell::new(N),
        }
    }

    /// Remaining capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.next.get()
    }

    fn base(&self) -> *mut u8 {
        self.buffer.get() as *mut u8
    }
}

impl<const N: usize> Default for StackAllocator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Allocator for StackAllocator<N> {
    fn allocate(&self, bytes: usize) -> Option<NonNull<u8>> {
        if bytes == 0 {
            return None;
        }
        let remaining = self.next.get();
        if bytes > remaining {
            log::debug!("arena exhausted: requested {bytes}, remaining {remaining}");
            return None;
        }
        let next = remaining - bytes;
        self.next.set(next);
        NonNull::new(unsafe { self.base().add(next) })
    }

    fn deallocate(&self, _ptr: NonNull<u8>, _bytes: usize) {}

    fn owns(&self, ptr: NonNull<u8>, bytes: usize) -> bool {
        let base = self.base() as usize;
        let p = ptr.as_ptr() as usize;
        p >= base && p + bytes <= base + N
    }
}

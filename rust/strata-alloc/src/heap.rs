//! Process-heap allocation strategies.

use std::alloc::Layout;
use std::ptr::NonNull;

use crate::{Allocator, MIN_ALIGN};

/// Strategy backed by the global Rust allocator.
///
/// Used when no specific arena is required but allocation must still be
/// tracked through the [`Allocator`] interface. `owns` is unconditionally
/// true: the heap has no meaningful containment test.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl HeapAllocator {
    pub const fn new() -> HeapAllocator {
        HeapAllocator
    }

    fn layout(bytes: usize) -> Layout {
        Layout::from_size_align(bytes, MIN_ALIGN).expect("layout")
    }
}

impl Allocator for HeapAllocator {
    fn allocate(&self, bytes: usize) -> Option<NonNull<u8>> {
        if bytes == 0 {
            return None;
        }
        NonNull::new(unsafe { std::alloc::alloc(Self::layout(bytes)) })
    }

    fn deallocate(&self, ptr: NonNull<u8>, bytes: usize) {
        if bytes == 0 {
            return;
        }
        unsafe { std::alloc::dealloc(ptr.as_ptr(), Self::layout(bytes)) };
    }

    fn owns(&self, _ptr: NonNull<u8>, _bytes: usize) -> bool {
        true
    }
}

/// Strategy backed by the C allocation primitives.
///
/// Useful inside hooked or instrumented processes where memory must come from
/// `malloc` rather than the Rust global allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct CAllocator;

impl CAllocator {
    pub const fn new() -> CAllocator {
        CAllocator
    }
}

impl Allocator for CAllocator {
    fn allocate(&self, bytes: usize) -> Option<NonNull<u8>> {
        if bytes == 0 {
            return None;
        }
        NonNull::new(unsafe { libc::malloc(bytes) } as *mut u8)
    }

    fn deallocate(&self, ptr: NonNull<u8>, _bytes: usize) {
        unsafe { libc::free(ptr.as_ptr() as *mut libc::c_void) };
    }

    fn owns(&self, _ptr: NonNull<u8>, _bytes: usize) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_allocate_roundtrip() {
        let alloc = HeapAllocator::new();
        let p = alloc.allocate(64).unwrap();
        assert!(alloc.owns(p, 64));
        unsafe { p.as_ptr().write_bytes(0xAB, 64) };
        alloc.deallocate(p, 64);
    }

    #[test]
    fn test_heap_zero_bytes() {
        let alloc = HeapAllocator::new();
        assert!(alloc.allocate(0).is_none());
    }

    #[test]
    fn test_heap_alignment() {
        let alloc = HeapAllocator::new();
        let p = alloc.allocate(10).unwrap();
        assert_eq!(p.as_ptr() as usize % MIN_ALIGN, 0);
        alloc.deallocate(p, 10);
    }

    #[test]
    fn test_c_allocate_roundtrip() {
        let alloc = CAllocator::new();
        let p = alloc.allocate(32).unwrap();
        assert!(alloc.owns(p, 32));
        unsafe { p.as_ptr().write_bytes(0, 32) };
        alloc.deallocate(p, 32);
    }

    #[test]
    fn test_c_zero_bytes() {
        let alloc = CAllocator::new();
        assert!(alloc.allocate(0).is_none());
    }
}

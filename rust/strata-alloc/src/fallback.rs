//! Primary/secondary allocator composition.

use std::ptr::NonNull;

use crate::Allocator;

/// Tries a primary allocator and falls back to a secondary one on
/// exhaustion.
///
/// `deallocate` and `owns` dispatch by asking the primary for ownership
/// first, so each pointer is routed back to its true source. Composition is
/// by reference: chains of fallbacks can be built without any of the
/// strategies knowing about each other.
pub struct FallbackAllocator<'a> {
    primary: &'a dyn Allocator,
    secondary: &'a dyn Allocator,
}

impl<'a> FallbackAllocator<'a> {
    pub fn new(primary: &'a dyn Allocator, secondary: &'a dyn Allocator) -> FallbackAllocator<'a> {
        FallbackAllocator { primary, secondary }
    }
}

impl Allocator for FallbackAllocator<'_> {
    fn allocate(&self, bytes: usize) -> Option<NonNull<u8>> {
        match self.primary.allocate(bytes) {
            Some(p) => Some(p),
            None => {
                log::debug!("primary allocator refused {bytes} bytes, trying secondary");
                self.secondary.allocate(bytes)
            }
        }
    }

    fn deallocate(&self, ptr: NonNull<u8>, bytes: usize) {
        if self.primary.owns(ptr, bytes) {
            self.primary.deallocate(ptr, bytes);
        } else {
            self.secondary.deallocate(ptr, bytes);
        }
    }

    fn owns(&self, ptr: NonNull<u8>, bytes: usize) -> bool {
        self.primary.owns(ptr, bytes) || self.secondary.owns(ptr, bytes)
    }
}

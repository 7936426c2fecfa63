//! Pluggable allocation strategies for the strata containers.
//!
//! An [`Allocator`] is an explicit capability object: a container holds a
//! reference to the allocator its backing memory came from and returns the
//! memory through that same instance. Strategies compose: an inline
//! [`StackAllocator`] arena can be chained with a heap strategy through
//! [`FallbackAllocator`] to get "prefer the stack, spill to the heap"
//! allocation with zero dynamic allocation on the fast path.
//!
//! None of the stateful strategies perform internal synchronization; they are
//! intentionally not `Sync` and must stay confined to a single thread (or be
//! wrapped externally).

use std::ptr::NonNull;

pub mod fallback;
pub mod heap;
pub mod stack;

pub use fallback::FallbackAllocator;
pub use heap::{CAllocator, HeapAllocator};
pub use stack::StackAllocator;

/// Minimum alignment guaranteed by the built-in strategies.
///
/// Callers that store multi-byte elements must keep allocation sizes a
/// multiple of the element alignment so that successive arena allocations
/// stay suitably aligned.
pub const MIN_ALIGN: usize = 16;

/// A source of raw memory.
///
/// Ownership of returned memory is not retained by the allocator: the caller
/// becomes sole owner until it passes the same `(pointer, bytes)` pair back
/// to [`deallocate`](Allocator::deallocate) on the same instance. The `bytes`
/// argument of `deallocate` and `owns` must equal the size requested from the
/// corresponding `allocate` call.
pub trait Allocator {
    /// Requests `bytes` of memory. Returns `None` when the request cannot be
    /// satisfied (exhaustion is an expected outcome, never a panic). Zero-byte
    /// requests yield `None`: no allocation is ever zero-sized.
    fn allocate(&self, bytes: usize) -> Option<NonNull<u8>>;

    /// Returns memory previously obtained from this instance. Must be called
    /// at most once per allocation.
    fn deallocate(&self, ptr: NonNull<u8>, bytes: usize);

    /// Tests whether `(ptr, bytes)` was allocated by this instance.
    fn owns(&self, ptr: NonNull<u8>, bytes: usize) -> bool;
}

use std::ptr::NonNull;

use bytemuck::Pod;
use strata_alloc::{Allocator, HeapAllocator};

/// Default strategy for buffers constructed without an explicit allocator.
static GLOBAL_HEAP: HeapAllocator = HeapAllocator::new();

/// A growable, allocator-aware container of trivial elements.
///
/// The buffer is always in one of two states: **Empty** (`size == 0`, no
/// allocation) or **Allocated** (`size > 0`, a single contiguous allocation
/// owned by this value). Every operation is a total transition between these
/// two states; there is no partially-constructed state observable from
/// outside.
///
/// Sizes are tracked in bytes, mirroring the allocator interface; use
/// [`len`](Buffer::len) for the element count. Elements are manipulated
/// exclusively through zero-fill and byte copies, so `T` must be
/// [`Pod`].
///
/// Allocation exhaustion is not an error: a buffer whose allocation request
/// was refused simply ends up Empty, and callers observe that through
/// [`size`](Buffer::size). Memory is returned to the allocator instance it
/// came from when the buffer is dropped, freed, or reallocated.
pub struct Buffer<'a, T: Pod> {
    allocator: Option<&'a dyn Allocator>,
    ptr: *mut T,
    size: usize,
}

impl<'a, T: Pod> Buffer<'a, T> {
    /// Creates an empty buffer backed by the process heap.
    pub fn new() -> Buffer<'a, T> {
        Self::with_allocator(None)
    }

    /// Creates an empty buffer that will draw memory from `allocator`
    /// (or from the process heap when `None`).
    pub fn with_allocator(allocator: Option<&'a dyn Allocator>) -> Buffer<'a, T> {
        Buffer {
            allocator,
            ptr: std::ptr::null_mut(),
            size: 0,
        }
    }

    /// Creates a zero-filled buffer of `size` bytes. A zero size yields the
    /// Empty state without touching the allocator.
    pub fn zeroed(size: usize) -> Buffer<'a, T> {
        Self::zeroed_in(size, None)
    }

    /// Creates a zero-filled buffer of `size` bytes drawn from `allocator`.
    pub fn zeroed_in(size: usize, allocator: Option<&'a dyn Allocator>) -> Buffer<'a, T> {
        let mut buffer = Self::with_allocator(allocator);
        if size > 0 {
            buffer.do_allocate(size);
        }
        if !buffer.ptr.is_null() {
            unsafe { (buffer.ptr as *mut u8).write_bytes(0, buffer.size) };
        }
        buffer
    }

    /// Creates a buffer holding a copy of `source`.
    pub fn from_slice(source: &[T]) -> Buffer<'a, T> {
        Self::from_slice_in(source, None)
    }

    /// Creates a buffer holding a copy of `source`, drawn from `allocator`.
    pub fn from_slice_in(source: &[T], allocator: Option<&'a dyn Allocator>) -> Buffer<'a, T> {
        let mut buffer = Self::with_allocator(allocator);
        let size = std::mem::size_of_val(source);
        if size > 0 {
            buffer.do_allocate(size);
        }
        if !buffer.ptr.is_null() {
            unsafe {
                std::ptr::copy_nonoverlapping(
                    source.as_ptr() as *const u8,
                    buffer.ptr as *mut u8,
                    buffer.size,
                )
            };
        }
        buffer
    }

    /// Size of the buffer in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of whole elements the buffer holds.
    #[inline]
    pub fn len(&self) -> usize {
        self.size / std::mem::size_of::<T>()
    }

    /// Returns `true` when the buffer is in the Empty state.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The allocator this buffer was constructed with, if any.
    #[inline]
    pub fn allocator(&self) -> Option<&'a dyn Allocator> {
        self.allocator
    }

    /// Raw pointer to the contents; null in the Empty state.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Mutable raw pointer to the contents; null in the Empty state.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    /// Element view of the contents.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        if self.ptr.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.ptr, self.len()) }
    }

    /// Mutable element view of the contents.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.ptr.is_null() {
            return &mut [];
        }
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.len()) }
    }

    /// Byte view of the contents, consumed by hex conversion and raw I/O.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        if self.ptr.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.ptr as *const u8, self.size) }
    }

    /// Mutable byte view of the contents.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        if self.ptr.is_null() {
            return &mut [];
        }
        unsafe { std::slice::from_raw_parts_mut(self.ptr as *mut u8, self.size) }
    }

    /// Discards the current contents and allocates a fresh, zero-filled
    /// buffer of `size` bytes. Destructive by design: use
    /// [`append`](Buffer::append) to grow while preserving contents.
    pub fn allocate(&mut self, size: usize) {
        self.free();
        if size > 0 {
            self.do_allocate(size);
        }
        if !self.ptr.is_null() {
            unsafe { (self.ptr as *mut u8).write_bytes(0, self.size) };
        }
    }

    /// Returns the allocation to its allocator and resets to the Empty state.
    /// Idempotent: calling it twice, or on an Empty buffer, is a no-op.
    pub fn free(&mut self) {
        if self.size > 0 {
            let ptr = unsafe { NonNull::new_unchecked(self.ptr as *mut u8) };
            self.backing().deallocate(ptr, self.size);
            self.ptr = std::ptr::null_mut();
            self.size = 0;
        }
    }

    /// Appends a copy of `source` after the current contents.
    ///
    /// A replacement buffer of `size() + size_of_val(source)` bytes is
    /// populated and swapped in atomically; the old allocation is freed as
    /// part of the swap. If the replacement allocation fails, the buffer is
    /// left unchanged (callers observe the outcome through the size).
    pub fn append(&mut self, source: &[T]) -> &mut Self {
        let add = std::mem::size_of_val(source);
        if add == 0 {
            return self;
        }
        let total = self.size + add;
        let mut other = Self::with_allocator(self.allocator);
        other.do_allocate(total);
        if other.ptr.is_null() {
            return self;
        }
        unsafe {
            let dst = other.ptr as *mut u8;
            if self.size > 0 {
                std::ptr::copy_nonoverlapping(self.ptr as *const u8, dst, self.size);
            }
            std::ptr::copy_nonoverlapping(source.as_ptr() as *const u8, dst.add(self.size), add);
        }
        std::mem::swap(self, &mut other);
        self
    }

    /// Moves the contents out, leaving this buffer Empty (and detached from
    /// its allocator), so that its eventual drop is a no-op.
    pub fn take(&mut self) -> Buffer<'a, T> {
        std::mem::replace(self, Buffer::new())
    }

    /// Compares contents with a raw element slice. An empty slice is equal
    /// only to an Empty buffer.
    pub fn eq_units(&self, other: &[T]) -> bool {
        if std::mem::size_of_val(other) != self.size {
            return false;
        }
        self.as_bytes() == bytemuck::cast_slice::<T, u8>(other)
    }

    fn backing(&self) -> &dyn Allocator {
        self.allocator.unwrap_or(&GLOBAL_HEAP)
    }

    /// Acquires `size` bytes from the backing allocator. On refusal the
    /// buffer stays Empty.
    fn do_allocate(&mut self, size: usize) {
        debug_assert_eq!(self.size, 0);
        match self.backing().allocate(size) {
            Some(p) => {
                debug_assert_eq!(p.as_ptr() as usize % std::mem::align_of::<T>(), 0);
                self.ptr = p.as_ptr() as *mut T;
                self.size = size;
            }
            None => {
                self.ptr = std::ptr::null_mut();
                self.size = 0;
            }
        }
    }
}

impl<T: Pod> Drop for Buffer<'_, T> {
    fn drop(&mut self) {
        self.free();
    }
}

impl<'a, T: Pod> Default for Buffer<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Pod> Clone for Buffer<'a, T> {
    /// Deep copy. The copy draws from the process heap regardless of the
    /// source's allocator: a copy is a new value with its own provenance.
    fn clone(&self) -> Buffer<'a, T> {
        Self::from_slice(self.as_slice())
    }

    /// Deep copy into an existing buffer, keeping the destination's
    /// allocator. An equal-size destination is overwritten in place without
    /// reallocating.
    fn clone_from(&mut self, other: &Self) {
        if self.size == other.size {
            if self.size > 0 {
                unsafe {
                    std::ptr::copy_nonoverlapping(
                        other.ptr as *const u8,
                        self.ptr as *mut u8,
                        self.size,
                    )
                };
            }
        } else {
            self.free();
            if other.size > 0 {
                self.do_allocate(other.size);
                if !self.ptr.is_null() {
                    unsafe {
                        std::ptr::copy_nonoverlapping(
                            other.ptr as *const u8,
                            self.ptr as *mut u8,
                            self.size,
                        )
                    };
                }
            }
        }
    }
}

impl<T: Pod> PartialEq for Buffer<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.as_bytes() == other.as_bytes()
    }
}

impl<T: Pod> Eq for Buffer<'_, T> {}

impl<T: Pod> PartialEq<[T]> for Buffer<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.eq_units(other)
    }
}

impl<T: Pod> PartialEq<&[T]> for Buffer<'_, T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.eq_units(other)
    }
}

impl<T: Pod> std::ops::Deref for Buffer<'_, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T: Pod> std::ops::DerefMut for Buffer<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: Pod + std::fmt::Debug> std::fmt::Debug for Buffer<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("values", &self.as_slice())
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

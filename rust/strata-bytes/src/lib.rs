//! Allocator-aware buffers of trivial elements for the strata infrastructure.
//!
//! [`Buffer`] owns a single contiguous allocation obtained from an explicit
//! [`Allocator`](strata_alloc::Allocator) (or from the process heap when none
//! is supplied) and never runs element constructors or destructors: all
//! initialization is zero-fill or byte copy, which is why element types are
//! constrained to [`bytemuck::Pod`]. Richer element types belong in `Vec`.

pub mod buffer;

pub use buffer::Buffer;

/// Buffer of raw bytes, the most common instantiation.
pub type Bytes<'a> = Buffer<'a, u8>;

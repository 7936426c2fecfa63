//! Random (version 4) UUIDs and hex rendering over strata buffers.

pub mod hex;
pub mod uuid;

pub use uuid::Uuid;

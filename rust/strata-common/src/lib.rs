//! Core definitions (errors and result plumbing) shared by the strata crates.

pub mod error;
pub mod macros;
pub mod result;

pub use result::Result;

//! Transformation module.
//!
//! This module holds the two grid transforms and their orchestration:
//! - Concat: N grids into one under the first grid's prefix
//! - Split: one grid into row-bounded parts, each re-prefixed
//! - Pipeline: file-level merge and split operations

pub mod concat;
pub mod pipeline;
pub mod split;

pub use concat::concatenate;
pub use pipeline::*;
pub use split::split;

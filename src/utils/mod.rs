//! Utility modules: build info and JSON persistence.

pub mod build_info;
pub mod persistence;

pub use build_info::*;
pub use persistence::*;

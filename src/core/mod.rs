//! Balance constants and the progression model.

pub mod constants;
pub mod progression;

pub use constants::*;
pub use progression::*;

//! Item system: catalog, inventory actions, and victory drops.

pub mod drops;
pub mod inventory;
pub mod types;

pub use drops::*;
pub use inventory::*;
pub use types::*;

//! Player record, its persistence, and account credentials.

pub mod accounts;
pub mod player;
pub mod save;

pub use accounts::*;
pub use player::*;
pub use save::*;

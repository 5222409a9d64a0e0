//! Question validation, per-tier pools, battle decks and answer checking.

pub mod answer;
pub mod bank;
pub mod deck;
pub mod types;

pub use answer::*;
pub use bank::*;
pub use deck::*;
pub use types::*;

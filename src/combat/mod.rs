//! Enemy creation, the battle state machine, and battle rewards.

pub mod enemy;
pub mod logic;
pub mod rewards;
pub mod types;

pub use enemy::*;
pub use logic::*;
pub use rewards::*;
pub use types::*;

//! Quiz Battle - terminal quiz RPG library
//!
//! Game rules, persistence and the interactive session, exposed for the
//! binaries, the balance simulator and tests.

pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod error;
pub mod items;
pub mod leaderboard;
pub mod questions;
pub mod session;
pub mod simulator;
pub mod utils;

pub use error::{GameError, Result};

//! Terminal session: the explicit game context and the menus that drive it.

pub mod battle;
pub mod context;
pub mod menus;
pub mod prompt;
pub mod render;
pub mod shop;

pub use battle::{ask_question, run_battle, PromptChooser};
pub use context::SessionContext;
pub use menus::run;
pub use prompt::{Prompt, ScriptedPrompt, TerminalPrompt, Tone};

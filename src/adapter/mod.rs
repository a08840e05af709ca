// src/adapter/mod.rs
pub mod terminal;

pub use terminal::{parse_command, render_dashboard, SessionCommand, TerminalPrompt, HELP};

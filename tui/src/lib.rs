//! Askline TUI: terminal front end for the askline prompt.
//!
//! Turns the editor state from `askline-core` into styled ratatui lines and
//! drives the crossterm event loop.
//!
//! # Modules
//!
//! - [`error`]: Errors raised while running a prompt
//! - [`keymap`]: Key bindings from crossterm events to editor keys
//! - [`prompt`]: The interactive loop and the piped-input fallback
//! - [`template`]: Layout of a snapshot into lines and a cursor position
//! - [`theme`]: Color theme configuration

pub mod error;
pub mod keymap;
pub mod prompt;
pub mod template;
pub mod theme;

pub use error::PromptError;
pub use keymap::KeyMap;
pub use prompt::{Prompt, Step};
pub use template::{Look, PromptView};
pub use theme::Theme;


/// Ask a single question with `config` and return the answer.
pub fn ask(config: askline_core::PromptConfig) -> Result<String, PromptError> {
    Prompt::new(config)?.run()
}

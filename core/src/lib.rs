//! askline core: the line-editing and autocomplete state machine behind
//! an interactive terminal question prompt.
//!
//! Nothing in this crate touches the terminal. Key decoding and drawing
//! live in `askline-tui`; this crate turns decoded keys into an edited
//! answer and a [`RenderSnapshot`] describing what to draw.
//!
//! # Modules
//!
//! - [`buffer`]: rune-addressed text buffer with a cursor
//! - [`suggest`]: suggestion overlay state (enter, cycle, commit, abort)
//! - [`editor`]: the key-driven state machine
//! - [`snapshot`]: render-state projection and pagination
//! - [`config`]: per-prompt configuration and the settings file
//! - [`sources`]: ready-made suggestion lookups

pub mod buffer;
pub mod config;
pub mod editor;
pub mod error;
pub mod snapshot;
pub mod sources;
pub mod suggest;

pub use buffer::TextBuffer;
pub use config::{PromptConfig, PromptSettings};
pub use editor::{EditorController, EditorState, Key};
pub use error::ConfigError;
pub use snapshot::RenderSnapshot;
pub use suggest::{SuggestFn, SuggestionState};

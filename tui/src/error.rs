//! Prompt driver errors.

use askline_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    /// The user pressed Ctrl-C.
    #[error("interrupted")]
    Interrupted,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

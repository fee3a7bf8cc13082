//! Prompt configuration and the settings file.
//!
//! [`PromptConfig`] is the immutable per-prompt configuration handed to the
//! editor: the question, an optional default, optional help text and an
//! optional suggestion lookup. [`PromptSettings`] holds the user-level
//! preferences (page size, keys, icons, colours) loaded from a YAML file.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::suggest::SuggestFn;


// ---------------------------------------------------------------------------
// PromptSettings
// ---------------------------------------------------------------------------

/// User preferences shared by every prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    /// Maximum number of suggestion rows shown at once.
    pub page_size: usize,
    /// Key that toggles the help text when the answer is empty.
    pub help_input: char,
    /// Key combination that requests suggestions, e.g. "ctrl+space". Also
    /// shown in the hint.
    pub suggest_input: String,
    pub icons: Icons,
    /// Whether output is coloured at all.
    pub color: bool,
    /// Colour theme name ("dark" or "light").
    pub theme: String,
    /// Extra key bindings, applied after the built-in ones.
    pub bindings: Vec<BindingSpec>,
}


impl Default for PromptSettings {
    fn default() -> Self {
        PromptSettings {
            page_size: 7,
            help_input: '?',
            suggest_input: "tab".into(),
            icons: Icons::default(),
            color: true,
            theme: "dark".into(),
            bindings: Vec::new(),
        }
    }
}


impl PromptSettings {
    /// Reject values no prompt can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.help_input.is_control() {
            return Err(ConfigError::Invalid(format!(
                "help_input must be printable, got {:?}",
                self.help_input
            )));
        }
        for binding in &self.bindings {
            if binding.key.trim().is_empty() || binding.action.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "bindings need both a key and an action".into(),
                ));
            }
        }
        Ok(())
    }
}


/// Glyphs drawn in front of the question, the help line, and the focused
/// suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icons {
    pub question: String,
    pub help: String,
    pub select_focus: String,
}


impl Default for Icons {
    fn default() -> Self {
        Icons {
            question: "?".into(),
            help: "?".into(),
            select_focus: ">".into(),
        }
    }
}


/// A user key binding as written in the settings file, e.g.
/// `{ key: "ctrl+b", action: "left" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSpec {
    pub key: String,
    pub action: String,
}


/// Load settings from a YAML file. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<PromptSettings, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no settings at {}, using defaults", path.display());
            return Ok(PromptSettings::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse(&content).map_err(|e| match e {
        ConfigError::Invalid(message) => ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}


/// Parse settings from a YAML string.
pub fn parse(content: &str) -> Result<PromptSettings, ConfigError> {
    if content.trim().is_empty() {
        return Ok(PromptSettings::default());
    }
    let settings: PromptSettings =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))?;
    settings.validate()?;
    Ok(settings)
}


// ---------------------------------------------------------------------------
// PromptConfig
// ---------------------------------------------------------------------------

/// Everything one prompt needs to know up front. Built once, never mutated
/// by the editor.
pub struct PromptConfig {
    message: String,
    default: Option<String>,
    help: Option<String>,
    suggest: Option<Box<SuggestFn<'static>>>,
    settings: PromptSettings,
}


impl PromptConfig {
    /// A prompt asking `message`, with no default, help, or suggestions.
    pub fn new(message: impl Into<String>) -> Self {
        PromptConfig {
            message: message.into(),
            default: None,
            help: None,
            suggest: None,
            settings: PromptSettings::default(),
        }
    }

    /// Answer used when the user submits an empty line. Empty means none.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = non_empty(default.into());
        self
    }

    /// Help text revealed by the help key. Empty means none.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = non_empty(help.into());
        self
    }

    /// Synchronous suggestion lookup, called with the current answer text.
    pub fn with_suggest<F>(mut self, suggest: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + 'static,
    {
        self.suggest = Some(Box::new(suggest));
        self
    }

    pub fn with_settings(mut self, settings: PromptSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn suggest(&self) -> Option<&SuggestFn<'static>> {
        self.suggest.as_deref()
    }

    pub fn settings(&self) -> &PromptSettings {
        &self.settings
    }
}


impl fmt::Debug for PromptConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptConfig")
            .field("message", &self.message)
            .field("default", &self.default)
            .field("help", &self.help)
            .field("suggest", &self.suggest.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}


fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

//! Key binding configuration and decoding.
//!
//! Provides `KeyMap`, the registry that turns crossterm key presses into the
//! editor's [`Key`] events. Multiple bindings can target the same key;
//! later bindings override earlier ones for the same key + modifier
//! combination, so user bindings from the settings file win over the
//! built-in ones.

use askline_core::config::PromptSettings;
use askline_core::{ConfigError, Key};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};


// ---------------------------------------------------------------------------
// KeyBinding
// ---------------------------------------------------------------------------

/// A single key binding: a key + modifier combination that produces an
/// editor key.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    /// The editor key produced when the binding fires.
    pub key: Key,
    pub description: String,
    /// Whether this is a user-defined override (true) or a built-in default.
    pub is_custom: bool,
}

impl KeyBinding {
    /// Create a new built-in binding.
    pub fn new(code: KeyCode, modifiers: KeyModifiers, key: Key, description: &str) -> Self {
        KeyBinding {
            code,
            modifiers,
            key,
            description: description.to_string(),
            is_custom: false,
        }
    }

    /// Create a new custom (user-defined) binding.
    pub fn custom(code: KeyCode, modifiers: KeyModifiers, key: Key) -> Self {
        KeyBinding {
            code,
            modifiers,
            key,
            description: key.action_name(),
            is_custom: true,
        }
    }

    /// Return a short display string for the key combination, e.g. "Ctrl+B".
    pub fn key_display(&self) -> String {
        let key_str = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_uppercase().to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Del".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            other => format!("{:?}", other),
        };

        let mut parts = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }
        parts.push(&key_str);
        parts.join("+")
    }

    /// Check if this binding matches the given key press.
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.code == code && self.modifiers == modifiers
    }
}


// ---------------------------------------------------------------------------
// KeyMap
// ---------------------------------------------------------------------------

/// Registry of all active key bindings.
///
/// Printable characters without a binding are decoded as text; the
/// configured help character is decoded as [`Key::Help`].
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<KeyBinding>,
    help_input: char,
}

impl KeyMap {
    /// Create a keymap with no bindings.
    pub fn new(help_input: char) -> Self {
        KeyMap {
            bindings: Vec::new(),
            help_input,
        }
    }

    /// Create a keymap with default bindings.
    pub fn with_defaults(help_input: char) -> Self {
        let mut km = KeyMap::new(help_input);
        km.load_defaults();
        km
    }

    /// Default bindings, then the configured suggest key, then the user's
    /// bindings from `settings`.
    pub fn from_settings(settings: &PromptSettings) -> Result<Self, ConfigError> {
        let mut km = KeyMap::with_defaults(settings.help_input);

        let (code, modifiers) =
            parse_key_combo(&settings.suggest_input).map_err(ConfigError::Invalid)?;
        if km.lookup(code, modifiers) != Some(Key::Suggest) {
            km.add(KeyBinding::new(code, modifiers, Key::Suggest, "Suggest / next suggestion"));
        }

        for binding in &settings.bindings {
            let (code, modifiers) = parse_key_combo(&binding.key).map_err(ConfigError::Invalid)?;
            let key = Key::from_action(&binding.action).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "unknown action '{}' for key '{}'",
                    binding.action, binding.key
                ))
            })?;
            km.add(KeyBinding::custom(code, modifiers, key));
        }
        Ok(km)
    }

    /// Add a binding to the keymap.
    pub fn add(&mut self, binding: KeyBinding) {
        self.bindings.push(binding);
    }

    /// Look up the bound key for a key + modifier combination. The
    /// last-added matching binding wins.
    pub fn lookup(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.matches(code, modifiers))
            .map(|b| b.key)
    }

    /// Decode a crossterm key event into an editor key.
    ///
    /// Key releases and unbound non-printable keys decode to `None`.
    pub fn decode(&self, event: &KeyEvent) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        if let Some(key) = self.lookup(event.code, event.modifiers) {
            return Some(key);
        }
        match event.code {
            KeyCode::Char(c) if (event.modifiers - KeyModifiers::SHIFT).is_empty() => {
                if c == self.help_input {
                    Some(Key::Help)
                } else {
                    Some(Key::Char(c))
                }
            }
            _ => None,
        }
    }

    /// Return all bindings.
    pub fn all_bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// One line per binding, newest last.
    pub fn help_text(&self) -> String {
        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|b| {
                let marker = if b.is_custom { " (custom)" } else { "" };
                format!("  {:12} {}{}", b.key_display(), b.description, marker)
            })
            .collect();
        lines.push(format!("  {:12} {}", self.help_input, "toggle help"));
        lines.join("\n")
    }

    // -------------------------------------------------------------------
    // Default bindings
    // -------------------------------------------------------------------

    fn load_defaults(&mut self) {
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let defaults = [
            (KeyCode::Left, none, Key::Left, "Move cursor left"),
            (KeyCode::Right, none, Key::Right, "Move cursor right"),
            (KeyCode::Up, none, Key::Up, "Previous suggestion"),
            (KeyCode::Down, none, Key::Down, "Next suggestion"),
            (KeyCode::Tab, none, Key::Suggest, "Suggest / next suggestion"),
            (KeyCode::BackTab, KeyModifiers::SHIFT, Key::Up, "Previous suggestion"),
            (KeyCode::Esc, none, Key::Escape, "Close suggestions"),
            (KeyCode::Enter, none, Key::Enter, "Submit"),
            (KeyCode::Backspace, none, Key::Backspace, "Delete previous character"),
            (KeyCode::Delete, none, Key::Delete, "Delete character under cursor"),
            (KeyCode::Char('b'), ctrl, Key::Left, "Move cursor left"),
            (KeyCode::Char('f'), ctrl, Key::Right, "Move cursor right"),
            (KeyCode::Char('h'), ctrl, Key::Backspace, "Delete previous character"),
            (KeyCode::Char('d'), ctrl, Key::Delete, "Delete character under cursor"),
            (KeyCode::Char('p'), ctrl, Key::Up, "Previous suggestion"),
            (KeyCode::Char('n'), ctrl, Key::Down, "Next suggestion"),
        ];
        for (code, modifiers, key, description) in defaults {
            self.add(KeyBinding::new(code, modifiers, key, description));
        }
    }
}


/// Parse a key combination such as `"ctrl+b"`, `"alt+left"`, or `"tab"`.
pub fn parse_key_combo(text: &str) -> Result<(KeyCode, KeyModifiers), String> {
    let parts: Vec<&str> = text.split('+').map(str::trim).collect();
    let Some((name, mods)) = parts.split_last() else {
        return Err(format!("empty key combination '{}'", text));
    };

    let mut modifiers = KeyModifiers::NONE;
    for m in mods {
        modifiers |= match m.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "meta" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            other => return Err(format!("unknown modifier '{}' in '{}'", other, text)),
        };
    }

    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') && f[1..].parse::<u8>().is_ok() => {
            KeyCode::F(f[1..].parse::<u8>().map_err(|e| e.to_string())?)
        }
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if modifiers.is_empty() => KeyCode::Char(c),
                (Some(c), None) => KeyCode::Char(c.to_ascii_lowercase()),
                _ => return Err(format!("unknown key '{}' in '{}'", name, text)),
            }
        }
    };
    Ok((code, modifiers))
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Line-editing and autocomplete state machine.
//!
//! The [`EditorController`] consumes decoded [`Key`]s one at a time, edits
//! its [`TextBuffer`], drives the [`SuggestionState`] overlay, and reports
//! the answer once the user submits. It performs no I/O; the suggestion
//! lookup it calls is a plain synchronous function.

use crate::buffer::TextBuffer;
use crate::config::PromptConfig;
use crate::snapshot::RenderSnapshot;
use crate::suggest::SuggestionState;


// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A decoded key event. Mapping physical keys onto these is the key
/// decoder's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    /// Ask for suggestions (Tab by default).
    Suggest,
    /// Ask for help ('?' by default).
    Help,
    Escape,
    Enter,
}


impl Key {
    /// Parse an action name as used in key binding settings.
    pub fn from_action(name: &str) -> Option<Key> {
        let key = match name.trim().to_lowercase().as_str() {
            "backspace" => Key::Backspace,
            "delete" => Key::Delete,
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "suggest" => Key::Suggest,
            "help" => Key::Help,
            "escape" | "abort" => Key::Escape,
            "enter" | "submit" => Key::Enter,
            _ => return None,
        };
        Some(key)
    }

    /// Short name of the action this key performs.
    pub fn action_name(&self) -> String {
        match self {
            Key::Char(c) => format!("insert {:?}", c),
            Key::Backspace => "backspace".into(),
            Key::Delete => "delete".into(),
            Key::Left => "left".into(),
            Key::Right => "right".into(),
            Key::Up => "up".into(),
            Key::Down => "down".into(),
            Key::Suggest => "suggest".into(),
            Key::Help => "help".into(),
            Key::Escape => "escape".into(),
            Key::Enter => "enter".into(),
        }
    }
}


// ---------------------------------------------------------------------------
// EditorState
// ---------------------------------------------------------------------------

/// Which keys mean what right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Plain line editing.
    Editing,
    /// The suggestion overlay is open.
    SuggestOpen,
    /// The answer has been produced; further keys are ignored.
    Submitted,
}


// ---------------------------------------------------------------------------
// EditorController
// ---------------------------------------------------------------------------

/// State machine for one prompt.
///
/// Owns the answer buffer, the suggestion overlay, and the help flag for
/// the lifetime of the prompt.
#[derive(Debug)]
pub struct EditorController {
    config: PromptConfig,
    state: EditorState,
    buffer: TextBuffer,
    suggestions: SuggestionState,
    help_visible: bool,
    answer: Option<String>,
}


impl EditorController {
    /// Create a controller in the `Editing` state with an empty buffer.
    pub fn new(config: PromptConfig) -> Self {
        EditorController {
            config,
            state: EditorState::Editing,
            buffer: TextBuffer::new(),
            suggestions: SuggestionState::new(),
            help_visible: false,
            answer: None,
        }
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// The submitted answer, once there is one.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    // -------------------------------------------------------------------
    // Input processing
    // -------------------------------------------------------------------

    /// Process one key and return the answer if this key submitted it.
    ///
    /// The answer is returned exactly once; keys after submission are
    /// ignored.
    pub fn handle(&mut self, key: Key) -> Option<String> {
        tracing::trace!(?key, state = ?self.state, "key");
        match self.state {
            EditorState::Editing => self.handle_editing_key(key),
            EditorState::SuggestOpen => self.handle_suggest_key(key),
            EditorState::Submitted => None,
        }
    }

    /// Feed keys until one of them submits, returning the answer.
    pub fn feed<I>(&mut self, keys: I) -> Option<String>
    where
        I: IntoIterator<Item = Key>,
    {
        keys.into_iter().find_map(|key| self.handle(key))
    }

    fn handle_editing_key(&mut self, key: Key) -> Option<String> {
        match key {
            Key::Suggest => {
                self.open_suggestions();
                None
            }
            Key::Enter => Some(self.submit()),
            Key::Up | Key::Down | Key::Escape => None,
            other => {
                self.edit(other);
                None
            }
        }
    }

    fn handle_suggest_key(&mut self, key: Key) -> Option<String> {
        match key {
            Key::Suggest => {
                let text = self.buffer.text();
                if text != self.suggestions.query_text() || self.suggestions.items().is_empty() {
                    if let Some(suggest) = self.config.suggest() {
                        self.suggestions.requery(suggest, &text);
                        tracing::debug!(
                            query = %text,
                            count = self.suggestions.items().len(),
                            "suggestions re-queried"
                        );
                    }
                } else {
                    self.suggestions.cycle_next();
                }
                None
            }
            Key::Down => {
                self.suggestions.cycle_next();
                None
            }
            Key::Up => {
                self.suggestions.cycle_prev();
                None
            }
            Key::Escape => {
                self.suggestions.abort(&mut self.buffer);
                self.state = EditorState::Editing;
                tracing::debug!("suggestions aborted");
                None
            }
            Key::Enter => {
                if self.suggestions.commit(&mut self.buffer) {
                    tracing::debug!(answer = %self.buffer, "suggestion committed");
                }
                Some(self.submit())
            }
            other => {
                self.edit(other);
                None
            }
        }
    }

    /// Keys that edit the live buffer the same way in every open state.
    fn edit(&mut self, key: Key) {
        match key {
            Key::Char(ch) => self.buffer.insert(ch),
            Key::Backspace => self.buffer.delete_back(),
            Key::Delete => self.buffer.delete_forward(),
            Key::Left => self.buffer.move_left(),
            Key::Right => self.buffer.move_right(),
            Key::Help => self.toggle_help_or_insert(),
            _ => {}
        }
    }

    /// The help key shows or hides help while the answer is empty; once
    /// there is text (or no help at all) it is just another character.
    fn toggle_help_or_insert(&mut self) {
        if self.buffer.is_empty() && self.config.help().is_some() {
            self.help_visible = !self.help_visible;
        } else {
            self.buffer.insert(self.config.settings().help_input);
        }
    }

    fn open_suggestions(&mut self) {
        let Some(suggest) = self.config.suggest() else {
            return;
        };
        self.suggestions.enter(suggest, &self.buffer);
        self.state = EditorState::SuggestOpen;
        tracing::debug!(
            query = %self.suggestions.query_text(),
            count = self.suggestions.items().len(),
            "suggestions opened"
        );
    }

    fn submit(&mut self) -> String {
        let mut text = self.buffer.text();
        if text.is_empty() {
            if let Some(default) = self.config.default_value() {
                text = default.to_string();
            }
        }
        self.suggestions.reset();
        self.state = EditorState::Submitted;
        self.answer = Some(text.clone());
        tracing::debug!(answer = %text, "submitted");
        text
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    /// Project the current state for a renderer. Calling this twice with no
    /// key in between gives equal snapshots.
    pub fn snapshot(&self) -> RenderSnapshot {
        let suggest_open = self.state == EditorState::SuggestOpen;
        let default = self.config.default_value().map(str::to_string);
        RenderSnapshot {
            question: self.config.message().to_string(),
            help_visible: self.help_visible,
            help: self.config.help().map(str::to_string),
            showing_default: self.buffer.is_empty() && default.is_some() && !suggest_open,
            default,
            buffer: self.buffer.text(),
            cursor: self.buffer.cursor_pos(),
            suggest_open,
            suggestions: self.suggestions.items().to_vec(),
            selected: self.suggestions.selected(),
            has_suggest: self.config.suggest().is_some(),
            answer: self.answer.clone(),
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn chars(text: &str) -> Vec<Key> {
        text.chars().map(Key::Char).collect()
    }

    fn repeat(key: Key, n: usize) -> Vec<Key> {
        vec![key; n]
    }

    fn months() -> PromptConfig {
        PromptConfig::new("What is your favorite month?").with_suggest(|_: &str| {
            vec!["January".into(), "February".into(), "March".into()]
        })
    }

    #[test]
    fn starts_editing_and_empty() {
        let editor = EditorController::new(PromptConfig::new("What is your name?"));
        assert_eq!(editor.state(), EditorState::Editing);
        assert!(editor.buffer().is_empty());
        assert_eq!(editor.answer(), None);
    }

    #[test]
    fn typed_answer_is_submitted() {
        let mut editor = EditorController::new(PromptConfig::new("What is your name?"));
        let mut keys = chars("Larry Bird");
        keys.push(Key::Enter);
        assert_eq!(editor.feed(keys), Some("Larry Bird".to_string()));
        assert_eq!(editor.state(), EditorState::Submitted);
    }

    #[test]
    fn empty_enter_uses_default() {
        let cfg = PromptConfig::new("What is your name?").with_default("Johnny Appleseed");
        let mut editor = EditorController::new(cfg);
        assert_eq!(editor.handle(Key::Enter), Some("Johnny Appleseed".to_string()));
    }

    #[test]
    fn typed_answer_overrides_default() {
        let cfg = PromptConfig::new("What is your name?").with_default("Johnny Appleseed");
        let mut editor = EditorController::new(cfg);
        let mut keys = chars("Larry Bird");
        keys.push(Key::Enter);
        assert_eq!(editor.feed(keys), Some("Larry Bird".to_string()));
    }

    #[test]
    fn answer_is_produced_once() {
        let mut editor = EditorController::new(PromptConfig::new("Name?"));
        editor.handle(Key::Char('x'));
        assert_eq!(editor.handle(Key::Enter), Some("x".to_string()));
        assert_eq!(editor.handle(Key::Enter), None);
        assert_eq!(editor.handle(Key::Char('y')), None);
        assert_eq!(editor.answer(), Some("x"));
        assert_eq!(editor.buffer().text(), "x");
    }

    #[test]
    fn delete_at_end_is_noop() {
        let mut editor = EditorController::new(PromptConfig::new("What is your name?"));
        let mut keys = chars("Johnny ");
        keys.push(Key::Delete);
        keys.push(Key::Enter);
        assert_eq!(editor.feed(keys), Some("Johnny ".to_string()));
    }

    #[test]
    fn backspace_removes_one_rune() {
        let mut editor = EditorController::new(PromptConfig::new("What is your name?"));
        let mut keys = chars("小明");
        keys.push(Key::Backspace);
        keys.push(Key::Enter);
        assert_eq!(editor.feed(keys), Some("小".to_string()));
    }

    #[test]
    fn cursor_editing_scenario() {
        let mut editor = EditorController::new(PromptConfig::new("Filename to save:"));
        let mut keys = chars("essay.txt");
        keys.extend(repeat(Key::Left, 4));
        keys.extend(chars("_final"));
        keys.extend(repeat(Key::Right, 4));
        keys.extend(repeat(Key::Backspace, 3));
        keys.extend(chars("md"));
        keys.extend(repeat(Key::Left, 3));
        keys.extend(chars("2"));
        keys.push(Key::Enter);
        assert_eq!(editor.feed(keys), Some("essay_final2.md".to_string()));
    }

    #[test]
    fn help_toggles_only_when_empty() {
        let cfg = PromptConfig::new("What is your name?").with_help("It might be Satoshi Nakamoto");
        let mut editor = EditorController::new(cfg);

        editor.handle(Key::Help);
        assert!(editor.help_visible());
        editor.handle(Key::Help);
        assert!(!editor.help_visible());
        editor.handle(Key::Help);
        assert!(editor.snapshot().help_visible);

        let mut keys = chars("Satoshi");
        keys.push(Key::Help);
        assert_eq!(editor.feed(keys), None);
        assert!(editor.help_visible());
        assert_eq!(editor.buffer().text(), "Satoshi?");
    }

    #[test]
    fn help_key_without_help_is_literal() {
        let mut editor = EditorController::new(PromptConfig::new("Really"));
        assert_eq!(editor.feed(vec![Key::Help, Key::Enter]), Some("?".to_string()));
        assert!(!editor.help_visible());
    }

    #[test]
    fn suggest_without_function_is_ignored() {
        let mut editor = EditorController::new(PromptConfig::new("Name?"));
        editor.handle(Key::Suggest);
        assert_eq!(editor.state(), EditorState::Editing);
        assert!(!editor.snapshot().suggest_open);
    }

    #[test]
    fn unused_keys_are_ignored_while_editing() {
        let mut editor = EditorController::new(PromptConfig::new("Name?"));
        editor.feed(chars("ab"));
        let before = editor.snapshot();
        editor.handle(Key::Up);
        editor.handle(Key::Down);
        editor.handle(Key::Escape);
        assert_eq!(editor.snapshot(), before);
    }

    #[test]
    fn tab_then_enter_keeps_typed_text() {
        let mut editor = EditorController::new(months());
        editor.handle(Key::Suggest);
        assert_eq!(editor.state(), EditorState::SuggestOpen);
        assert_eq!(editor.suggestions().selected(), None);
        assert_eq!(editor.handle(Key::Enter), Some(String::new()));
    }

    #[test]
    fn months_scenario_selects_february() {
        let mut editor = EditorController::new(months());
        let keys = vec![Key::Suggest, Key::Down, Key::Down, Key::Down, Key::Up, Key::Enter];
        assert_eq!(editor.feed(keys), Some("February".to_string()));
    }

    #[test]
    fn repeated_suggest_cycles() {
        let cfg = PromptConfig::new("Choose the special one:").with_suggest(|_: &str| {
            vec!["suggest1".into(), "suggest2".into(), "special answer".into()]
        });
        let mut editor = EditorController::new(cfg);
        let mut keys = chars("s");
        keys.extend(repeat(Key::Suggest, 4));
        keys.push(Key::Enter);
        assert_eq!(editor.feed(keys), Some("special answer".to_string()));
    }

    #[test]
    fn cycling_wraps_through_controller() {
        let mut editor = EditorController::new(months());
        editor.handle(Key::Suggest);
        for _ in 0..4 {
            editor.handle(Key::Down);
        }
        assert_eq!(editor.suggestions().selected(), Some(0));
        editor.handle(Key::Up);
        assert_eq!(editor.suggestions().selected(), Some(2));
    }

    #[test]
    fn escape_restores_typed_answer() {
        let cfg = PromptConfig::new("Wanna a suggestion?")
            .with_suggest(|_: &str| vec!["suggest1".into(), "suggest2".into()]);
        let mut editor = EditorController::new(cfg);
        let mut keys = chars("typed answer");
        keys.extend(vec![Key::Left, Key::Left, Key::Suggest, Key::Down, Key::Down, Key::Up]);
        keys.extend(chars("zz"));
        keys.push(Key::Escape);
        editor.feed(keys);

        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(editor.buffer().text(), "typed answer");
        assert_eq!(editor.buffer().cursor_pos(), 10);
        assert!(!editor.snapshot().suggest_open);
        assert_eq!(editor.handle(Key::Enter), Some("typed answer".to_string()));
    }

    #[test]
    fn typing_while_open_edits_live_buffer() {
        let mut editor = EditorController::new(months());
        editor.handle(Key::Suggest);
        editor.handle(Key::Down);
        editor.feed(chars("ma"));
        editor.handle(Key::Left);
        editor.handle(Key::Backspace);

        assert_eq!(editor.state(), EditorState::SuggestOpen);
        assert_eq!(editor.buffer().text(), "a");
        let snap = editor.snapshot();
        assert!(snap.suggest_open);
        assert_eq!(snap.suggestions.len(), 3);
        assert_eq!(snap.selected, Some(0));
    }

    #[test]
    fn enter_commits_focused_item_over_later_typing() {
        let cfg = PromptConfig::new("Filename?")
            .with_suggest(|_: &str| vec!["table.csv".into(), ".csv".into()]);
        let mut editor = EditorController::new(cfg);
        let mut keys = repeat(Key::Suggest, 3);
        keys.extend(repeat(Key::Left, 5));
        keys.extend(chars("newtable"));
        editor.feed(keys);

        assert_eq!(editor.buffer().text(), "newtable");
        assert_eq!(editor.suggestions().focused(), Some(".csv"));
        assert_eq!(editor.handle(Key::Enter), Some(".csv".to_string()));
    }

    #[test]
    fn escape_then_retyping_submits_typed_text() {
        let cfg = PromptConfig::new("Filename?")
            .with_suggest(|_: &str| vec!["table.csv".into(), ".csv".into()]);
        let mut editor = EditorController::new(cfg);
        let mut keys = repeat(Key::Suggest, 2);
        keys.extend(chars("newtable"));
        keys.push(Key::Escape);
        keys.extend(chars("newtable.csv"));
        keys.push(Key::Enter);
        assert_eq!(editor.feed(keys), Some("newtable.csv".to_string()));
    }

    #[test]
    fn suggest_after_edit_requeries_with_new_text() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        let cfg = PromptConfig::new("Where to save it?").with_suggest(move |prefix: &str| {
            seen.borrow_mut().push(prefix.to_string());
            if prefix.is_empty() {
                vec!["folder1/".into(), "folder2/".into(), "folder3/".into()]
            } else {
                vec!["folder3/file1.txt".into(), "folder3/file2.txt".into()]
            }
        });
        let mut editor = EditorController::new(cfg);
        let keys = vec![
            Key::Suggest,
            Key::Down,
            Key::Down,
            Key::Char('f'),
            Key::Suggest,
            Key::Down,
            Key::Down,
            Key::Enter,
        ];
        assert_eq!(editor.feed(keys), Some("folder3/file2.txt".to_string()));
        assert_eq!(*calls.borrow(), vec!["".to_string(), "f".to_string()]);
    }

    #[test]
    fn empty_result_requeries_on_next_request() {
        let calls = Rc::new(RefCell::new(0));
        let count = Rc::clone(&calls);
        let cfg = PromptConfig::new("Anything?").with_suggest(move |_: &str| {
            *count.borrow_mut() += 1;
            Vec::new()
        });
        let mut editor = EditorController::new(cfg);
        editor.handle(Key::Suggest);
        assert_eq!(editor.state(), EditorState::SuggestOpen);
        editor.handle(Key::Suggest);
        editor.handle(Key::Suggest);
        assert_eq!(*calls.borrow(), 3);
        assert_eq!(editor.state(), EditorState::SuggestOpen);
    }

    #[test]
    fn enter_in_overlay_without_focus_uses_default() {
        let cfg = months().with_default("April");
        let mut editor = EditorController::new(cfg);
        assert_eq!(editor.feed(vec![Key::Suggest, Key::Enter]), Some("April".to_string()));
    }

    #[test]
    fn help_toggles_while_overlay_open() {
        let cfg = months().with_help("Pick a month");
        let mut editor = EditorController::new(cfg);
        editor.handle(Key::Suggest);
        editor.handle(Key::Help);
        assert!(editor.help_visible());
        assert_eq!(editor.state(), EditorState::SuggestOpen);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let cfg = months().with_default("April").with_help("Pick a month");
        let mut editor = EditorController::new(cfg);
        editor.feed(vec![Key::Char('m'), Key::Suggest, Key::Down]);
        assert_eq!(editor.snapshot(), editor.snapshot());
    }

    #[test]
    fn snapshot_shows_default_only_when_empty_and_closed() {
        let cfg = months().with_default("April");
        let mut editor = EditorController::new(cfg);
        let snap = editor.snapshot();
        assert!(snap.showing_default);
        assert_eq!(snap.default.as_deref(), Some("April"));

        editor.handle(Key::Suggest);
        assert!(!editor.snapshot().showing_default);

        editor.handle(Key::Escape);
        assert!(editor.snapshot().showing_default);

        editor.handle(Key::Char('x'));
        assert!(!editor.snapshot().showing_default);
    }

    #[test]
    fn snapshot_after_submit_carries_answer() {
        let mut editor = EditorController::new(months());
        editor.feed(vec![Key::Suggest, Key::Down, Key::Enter]);
        let snap = editor.snapshot();
        assert_eq!(snap.answer.as_deref(), Some("January"));
        assert!(!snap.suggest_open);
        assert!(snap.suggestions.is_empty());
        assert_eq!(snap.buffer, "January");
        assert_eq!(snap.cursor, 7);
    }

    #[test]
    fn action_names_round_trip() {
        let keys = [Key::Left, Key::Right, Key::Up, Key::Down, Key::Suggest, Key::Help, Key::Enter];
        for key in keys {
            assert_eq!(Key::from_action(&key.action_name()), Some(key));
        }
        assert_eq!(Key::from_action("submit"), Some(Key::Enter));
        assert_eq!(Key::from_action("fly"), None);
    }
}

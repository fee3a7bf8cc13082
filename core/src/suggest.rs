//! Suggestion overlay state.
//!
//! A [`SuggestionState`] remembers the candidates returned by the last
//! lookup, which of them (if any) is focused, and the buffer as it was when
//! the overlay opened so that aborting can put it back exactly.

use crate::buffer::TextBuffer;


/// A synchronous suggestion lookup: current text in, ordered candidates out.
/// The lifetime lets callers pass closures that borrow local state.
pub type SuggestFn<'a> = dyn Fn(&str) -> Vec<String> + 'a;


/// State of the suggestion overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    active: bool,
    items: Vec<String>,
    selected: Option<usize>,
    saved_buffer: Option<TextBuffer>,
    query_text: String,
}


impl SuggestionState {
    /// Create an inert (closed) overlay.
    pub fn new() -> Self {
        SuggestionState::default()
    }

    /// Open the overlay for `buffer`, asking `query` for candidates.
    ///
    /// The overlay is marked active even when the lookup returns nothing.
    pub fn enter(&mut self, query: &SuggestFn<'_>, buffer: &TextBuffer) {
        let text = buffer.text();
        self.saved_buffer = Some(buffer.clone());
        self.items = query(&text);
        self.selected = None;
        self.active = true;
        self.query_text = text;
    }

    /// Replace the candidates with a fresh lookup for `text`.
    pub fn requery(&mut self, query: &SuggestFn<'_>, text: &str) {
        self.items = query(text);
        self.selected = None;
        self.query_text = text.to_string();
    }

    /// Focus the next candidate, wrapping from last to first.
    pub fn cycle_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i + 1) % self.items.len(),
        });
    }

    /// Focus the previous candidate, wrapping from first to last.
    pub fn cycle_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        self.selected = Some(match self.selected {
            None | Some(0) => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Write the focused candidate into `buffer` and close the overlay.
    ///
    /// Returns whether a candidate was focused. With nothing focused the
    /// buffer is left as typed.
    pub fn commit(&mut self, buffer: &mut TextBuffer) -> bool {
        let committed = match self.focused() {
            Some(item) => {
                buffer.set_text(item);
                true
            }
            None => false,
        };
        self.reset();
        committed
    }

    /// Put `buffer` back to how it was when the overlay opened and close it.
    pub fn abort(&mut self, buffer: &mut TextBuffer) {
        if let Some(saved) = self.saved_buffer.take() {
            *buffer = saved;
        }
        self.reset();
    }

    /// Close the overlay and forget everything it held.
    pub fn reset(&mut self) {
        self.active = false;
        self.items.clear();
        self.selected = None;
        self.saved_buffer = None;
        self.query_text.clear();
    }

    /// Whether the overlay is currently open.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The focused candidate, if any.
    pub fn focused(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.items.get(i))
            .map(|s| s.as_str())
    }

    /// Text used for the most recent lookup.
    pub fn query_text(&self) -> &str {
        &self.query_text
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

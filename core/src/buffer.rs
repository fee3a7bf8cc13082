//! Rune-addressed text buffer.
//!
//! Provides a `TextBuffer` that holds the in-progress answer and a cursor
//! measured in characters. Every editing primitive is total: edits at a
//! boundary do nothing instead of failing.

/// An editable line of text with a character-indexed cursor.
///
/// The buffer is maintained as a `Vec<char>` so that cursor-based
/// operations never split a multi-byte character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    runes: Vec<char>,
    cursor: usize,
}


impl TextBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        TextBuffer {
            runes: Vec::new(),
            cursor: 0,
        }
    }

    /// Create a buffer holding `text` with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = TextBuffer::new();
        buffer.set_text(text);
        buffer
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        self.runes.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.runes.remove(self.cursor);
        }
    }

    /// Delete the character at the cursor position (forward delete).
    pub fn delete_forward(&mut self) {
        if self.cursor < self.runes.len() {
            self.runes.remove(self.cursor);
        }
    }

    /// Move the cursor one position to the left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move the cursor one position to the right.
    pub fn move_right(&mut self) {
        if self.cursor < self.runes.len() {
            self.cursor += 1;
        }
    }

    /// Replace the whole buffer and put the cursor after the last character.
    pub fn set_text(&mut self, text: &str) {
        self.runes = text.chars().collect();
        self.cursor = self.runes.len();
    }

    /// Return the current buffer contents as a String.
    pub fn text(&self) -> String {
        self.runes.iter().collect()
    }

    /// Return the current cursor position (character index).
    pub fn cursor_pos(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.runes.len()
    }

    /// Return whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }
}


impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in &self.runes {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

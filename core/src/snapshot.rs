//! Render-state projection.
//!
//! A [`RenderSnapshot`] is everything a renderer needs to draw the prompt
//! after one key event. It is rebuilt from scratch each time; two equal
//! snapshots always draw the same screen.

use serde::Serialize;


/// Read-only view of the prompt for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSnapshot {
    pub question: String,
    pub help_visible: bool,
    pub help: Option<String>,
    /// True when the default should be displayed as a hint: the answer is
    /// empty, a default exists, and the suggestion overlay is closed.
    pub showing_default: bool,
    pub default: Option<String>,
    pub buffer: String,
    /// Cursor as a character index into `buffer`.
    pub cursor: usize,
    pub suggest_open: bool,
    pub suggestions: Vec<String>,
    pub selected: Option<usize>,
    /// Whether a suggestion lookup is configured at all.
    pub has_suggest: bool,
    /// Final answer, present once the prompt has been submitted.
    pub answer: Option<String>,
}


/// The slice of suggestions visible on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    pub entries: &'a [String],
    /// Index of the focused entry within `entries`.
    pub selected: Option<usize>,
    /// Index of `entries[0]` within the full list.
    pub offset: usize,
}


impl RenderSnapshot {
    /// Whether the suggestion list should be drawn.
    pub fn shows_suggestions(&self) -> bool {
        self.suggest_open && !self.suggestions.is_empty() && self.answer.is_none()
    }

    /// Whether the `[... for help, ... for suggestions]` hint applies.
    pub fn shows_hint(&self) -> bool {
        (self.help.is_some() && !self.help_visible) || self.has_suggest
    }

    /// The window of at most `page_size` suggestions around the selection.
    pub fn page(&self, page_size: usize) -> Page<'_> {
        paginate(&self.suggestions, page_size, self.selected)
    }
}


/// Cut a window of `page_size` entries out of `items` so that `selected`
/// stays visible, centred where the list allows it. With nothing selected
/// the window starts at the top.
pub fn paginate(items: &[String], page_size: usize, selected: Option<usize>) -> Page<'_> {
    let page_size = page_size.max(1);
    let len = items.len();
    let sel = selected.unwrap_or(0).min(len.saturating_sub(1));

    let start = if len <= page_size || sel < page_size / 2 {
        0
    } else if len - sel - 1 < page_size / 2 {
        len - page_size
    } else {
        sel - page_size / 2
    };
    let end = (start + page_size).min(len);

    Page {
        entries: &items[start..end],
        selected: selected.map(|s| s - start),
        offset: start,
    }
}

//! Prompt template: turns a [`RenderSnapshot`] into styled lines.
//!
//! Nothing here touches the terminal. [`render`] produces a [`PromptView`]
//! (ratatui lines plus a cursor position) that the driver draws; tests
//! inspect the same view through [`PromptView::plain_text`].
//!
//! Layout, top to bottom:
//!
//! ```text
//! ? It might be Satoshi Nakamoto            (help, when visible)
//! ? What is your name? [? for help] (Larry) (question line)
//! > January                                 (suggestions, when open)
//!   February
//! ```

use askline_core::config::{Icons, PromptSettings};
use askline_core::snapshot::RenderSnapshot;
use askline_core::ConfigError;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::Theme;


const SUGGEST_HINT: &str = "[Use arrows to move, enter to select, type to continue]";


// ---------------------------------------------------------------------------
// Look
// ---------------------------------------------------------------------------

/// Everything about appearance that does not change between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Look {
    pub theme: Theme,
    pub icons: Icons,
    pub page_size: usize,
    pub help_input: char,
    pub suggest_input: String,
}


impl Look {
    /// Build the look described by `settings`. Disabling colour overrides the
    /// theme.
    pub fn from_settings(settings: &PromptSettings) -> Result<Self, ConfigError> {
        let theme = if settings.color {
            Theme::by_name(&settings.theme).ok_or_else(|| {
                ConfigError::Invalid(format!("unknown theme '{}'", settings.theme))
            })?
        } else {
            Theme::plain()
        };
        Ok(Look {
            theme,
            icons: settings.icons.clone(),
            page_size: settings.page_size.max(1),
            help_input: settings.help_input,
            suggest_input: settings.suggest_input.clone(),
        })
    }

    /// Rows the prompt can occupy: help, question, and one page of
    /// suggestions.
    pub fn max_height(&self) -> u16 {
        u16::try_from(self.page_size + 2).unwrap_or(u16::MAX)
    }
}


impl Default for Look {
    fn default() -> Self {
        Look {
            theme: Theme::default(),
            icons: Icons::default(),
            page_size: 7,
            help_input: '?',
            suggest_input: "tab".into(),
        }
    }
}


// ---------------------------------------------------------------------------
// PromptView
// ---------------------------------------------------------------------------

/// One rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptView {
    pub lines: Vec<Line<'static>>,
    /// Cursor as (column, row) in terminal cells, relative to the first
    /// line. `None` once the answer is final.
    pub cursor: Option<(u16, u16)>,
}


impl PromptView {
    /// The frame's text without styling, one line per row.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }
}


// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `snapshot`. Suggestion rows wider than `width` cells are cut with
/// an ellipsis.
pub fn render(snapshot: &RenderSnapshot, look: &Look, width: u16) -> PromptView {
    let theme = &look.theme;
    let mut lines = Vec::new();

    if snapshot.help_visible && snapshot.answer.is_none() {
        if let Some(help) = &snapshot.help {
            lines.push(Line::from(Span::styled(
                format!("{} {}", look.icons.help, help),
                theme.style(theme.help),
            )));
        }
    }

    let row = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let mut spans = vec![
        Span::styled(format!("{} ", look.icons.question), theme.strong(theme.question_icon)),
        Span::styled(format!("{} ", snapshot.question), theme.strong(theme.message)),
    ];

    if let Some(answer) = &snapshot.answer {
        spans.push(Span::styled(answer.clone(), theme.style(theme.answer)));
        lines.push(Line::from(spans));
        return PromptView { lines, cursor: None };
    }

    let mut rows = Vec::new();
    let cursor_col;
    if snapshot.shows_suggestions() {
        cursor_col = spans_width(&spans) + cursor_offset(&snapshot.buffer, snapshot.cursor);
        spans.push(Span::raw(snapshot.buffer.clone()));
        spans.push(Span::styled(format!(" {}", SUGGEST_HINT), theme.style(theme.hint)));
        rows = suggestion_rows(snapshot, look, width);
    } else {
        if snapshot.shows_hint() {
            spans.push(Span::styled(hint_text(snapshot, look), theme.style(theme.hint)));
        }
        if snapshot.showing_default {
            if let Some(default) = &snapshot.default {
                let style = theme.style(theme.default_value);
                spans.push(Span::styled(format!("({}) ", default), style));
            }
        }
        cursor_col = spans_width(&spans) + cursor_offset(&snapshot.buffer, snapshot.cursor);
        spans.push(Span::raw(snapshot.buffer.clone()));
    }

    lines.push(Line::from(spans));
    lines.extend(rows);

    let col = u16::try_from(cursor_col).unwrap_or(u16::MAX);
    PromptView {
        lines,
        cursor: Some((col, row)),
    }
}


/// `[? for help, tab for suggestions] `
fn hint_text(snapshot: &RenderSnapshot, look: &Look) -> String {
    let mut parts = Vec::new();
    if snapshot.help.is_some() && !snapshot.help_visible {
        parts.push(format!("{} for help", look.help_input));
    }
    if snapshot.has_suggest {
        parts.push(format!("{} for suggestions", look.suggest_input));
    }
    format!("[{}] ", parts.join(", "))
}


fn suggestion_rows(snapshot: &RenderSnapshot, look: &Look, width: u16) -> Vec<Line<'static>> {
    let theme = &look.theme;
    let page = snapshot.page(look.page_size);
    let icon_width = look.icons.select_focus.width();
    let text_width = usize::from(width).saturating_sub(icon_width + 1);

    page.entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let entry = truncate_width(entry, text_width);
            if page.selected == Some(i) {
                Line::from(Span::styled(
                    format!("{} {}", look.icons.select_focus, entry),
                    theme.strong(theme.select_focus),
                ))
            } else {
                Line::from(Span::styled(
                    format!("{} {}", " ".repeat(icon_width), entry),
                    theme.style(theme.option),
                ))
            }
        })
        .collect()
}


// ---------------------------------------------------------------------------
// Width helpers
// ---------------------------------------------------------------------------

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

/// Terminal cells occupied by the first `cursor` characters of `text`.
fn cursor_offset(text: &str, cursor: usize) -> usize {
    text.chars()
        .take(cursor)
        .map(|c| c.width().unwrap_or(0))
        .sum()
}

/// Cut `s` to at most `max_width` cells, ending in an ellipsis when cut.
pub fn truncate_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut result = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        used += w;
        result.push(ch);
    }
    result.push('\u{2026}');
    result
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use askline_core::{EditorController, Key, PromptConfig};

    fn plain() -> Look {
        Look {
            theme: Theme::plain(),
            ..Look::default()
        }
    }

    fn view(editor: &EditorController) -> PromptView {
        render(&editor.snapshot(), &plain(), 80)
    }

    fn months(_: &str) -> Vec<String> {
        vec!["Janeiro".into(), "Fevereiro".into(), "Março".into(), "etc...".into()]
    }

    #[test]
    fn question_without_default() {
        let editor = EditorController::new(PromptConfig::new("Qual é o seu mês favorito:"));
        let v = view(&editor);
        assert_eq!(v.plain_text(), "? Qual é o seu mês favorito: ");
        assert_eq!(v.cursor, Some((29, 0)));
    }

    #[test]
    fn question_with_default() {
        let cfg = PromptConfig::new("Qual é o seu mês favorito:").with_default("Abril");
        let v = view(&EditorController::new(cfg));
        assert_eq!(v.plain_text(), "? Qual é o seu mês favorito: (Abril) ");
    }

    #[test]
    fn default_hint_disappears_once_typing() {
        let cfg = PromptConfig::new("Month:").with_default("Abril");
        let mut editor = EditorController::new(cfg);
        editor.handle(Key::Char('M'));
        assert_eq!(view(&editor).plain_text(), "? Month: M");
    }

    #[test]
    fn hidden_help_hint() {
        let cfg = PromptConfig::new("Qual é o seu mês favorito:").with_help("Isso é útil");
        let v = view(&EditorController::new(cfg));
        assert_eq!(v.plain_text(), "? Qual é o seu mês favorito: [? for help] ");
    }

    #[test]
    fn hidden_help_with_default() {
        let cfg = PromptConfig::new("Month:").with_help("Isso é útil").with_default("Abril");
        let v = view(&EditorController::new(cfg));
        assert_eq!(v.plain_text(), "? Month: [? for help] (Abril) ");
    }

    #[test]
    fn shown_help_goes_above_question() {
        let cfg = PromptConfig::new("Month:").with_help("Isso é útil").with_default("Abril");
        let mut editor = EditorController::new(cfg);
        editor.handle(Key::Help);
        let v = view(&editor);
        assert_eq!(v.plain_text(), "? Isso é útil\n? Month: (Abril) ");
        assert_eq!(v.cursor, Some((17, 1)));
    }

    #[test]
    fn suggest_hint() {
        let cfg = PromptConfig::new("Month:").with_suggest(months);
        let v = view(&EditorController::new(cfg));
        assert_eq!(v.plain_text(), "? Month: [tab for suggestions] ");
    }

    #[test]
    fn help_and_suggest_hint_with_default() {
        let cfg = PromptConfig::new("Month:")
            .with_suggest(months)
            .with_help("Isso é útil")
            .with_default("Abril");
        let v = view(&EditorController::new(cfg));
        assert_eq!(v.plain_text(), "? Month: [? for help, tab for suggestions] (Abril) ");
    }

    #[test]
    fn open_suggestions_are_listed() {
        let cfg = PromptConfig::new("Month:").with_suggest(months);
        let mut editor = EditorController::new(cfg);
        editor.feed(vec![Key::Suggest, Key::Down, Key::Down]);
        let v = view(&editor);
        assert_eq!(
            v.plain_text(),
            format!(
                "? Month:  {}\n  Janeiro\n> Fevereiro\n  Março\n  etc...",
                SUGGEST_HINT
            )
        );
        assert_eq!(v.cursor, Some((9, 0)));
    }

    #[test]
    fn empty_suggestions_render_as_plain_line() {
        let cfg = PromptConfig::new("Month:").with_suggest(|_: &str| Vec::new());
        let mut editor = EditorController::new(cfg);
        editor.feed(vec![Key::Char('x'), Key::Suggest]);
        assert_eq!(view(&editor).plain_text(), "? Month: [tab for suggestions] x");
    }

    #[test]
    fn suggestions_are_paged() {
        let cfg = PromptConfig::new("N:")
            .with_suggest(|_: &str| (0..10).map(|i| i.to_string()).collect());
        let mut editor = EditorController::new(cfg);
        editor.handle(Key::Suggest);
        for _ in 0..6 {
            editor.handle(Key::Down);
        }
        let look = Look { page_size: 3, ..plain() };
        let v = render(&editor.snapshot(), &look, 80);
        assert_eq!(v.lines.len(), 4);
        assert!(v.plain_text().ends_with("  4\n> 5\n  6"));
    }

    #[test]
    fn submitted_answer_line() {
        let mut editor = EditorController::new(PromptConfig::new("Qual é o seu mês favorito:"));
        editor.feed("Outubro".chars().map(Key::Char).chain([Key::Enter]));
        let v = view(&editor);
        assert_eq!(v.plain_text(), "? Qual é o seu mês favorito: Outubro");
        assert_eq!(v.cursor, None);
    }

    #[test]
    fn cursor_uses_cell_width() {
        let mut editor = EditorController::new(PromptConfig::new("Name:"));
        editor.feed("小明a".chars().map(Key::Char));
        assert_eq!(view(&editor).cursor, Some((13, 0)));
        editor.handle(Key::Left);
        editor.handle(Key::Left);
        assert_eq!(view(&editor).cursor, Some((10, 0)));
    }

    #[test]
    fn look_from_settings() {
        let mut settings = PromptSettings::default();
        settings.theme = "light".into();
        assert_eq!(Look::from_settings(&settings).unwrap().theme.name, "light");
        settings.color = false;
        assert_eq!(Look::from_settings(&settings).unwrap().theme.name, "plain");
        settings.color = true;
        settings.theme = "neon".into();
        assert!(Look::from_settings(&settings).is_err());
        assert_eq!(Look::default().max_height(), 9);
    }

    #[test]
    fn truncate_width_respects_cells() {
        assert_eq!(truncate_width("short", 10), "short");
        assert_eq!(truncate_width("abcdefgh", 5), "abcd\u{2026}");
        assert_eq!(truncate_width("小明小明", 5), "小明\u{2026}");
        assert_eq!(truncate_width("abc", 0), "");
    }

    #[test]
    fn long_suggestions_are_cut() {
        let cfg = PromptConfig::new("F:")
            .with_suggest(|_: &str| vec!["a-very-long-file-name.txt".into()]);
        let mut editor = EditorController::new(cfg);
        editor.handle(Key::Suggest);
        let v = render(&editor.snapshot(), &plain(), 12);
        assert_eq!(v.plain_text().lines().nth(1), Some("  a-very-lo\u{2026}"));
    }
}

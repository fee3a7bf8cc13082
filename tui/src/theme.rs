//! Colour themes for the prompt.
//!
//! Defines which colour each part of the prompt is drawn in: the question
//! icon, the message, help text, hints, the default value, the submitted
//! answer, and suggestion rows. Themes are serializable so they can be
//! stored alongside other settings.

use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};


/// A named color that can be converted to a ratatui colour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Default,
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    Magenta,
    White,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    Rgb(u8, u8, u8),
}


impl From<Color> for ratatui::style::Color {
    fn from(color: Color) -> Self {
        use ratatui::style::Color as Rc;
        match color {
            Color::Default => Rc::Reset,
            Color::Red => Rc::Red,
            Color::Green => Rc::Green,
            Color::Yellow => Rc::Yellow,
            Color::Blue => Rc::Blue,
            Color::Cyan => Rc::Cyan,
            Color::Magenta => Rc::Magenta,
            Color::White => Rc::Gray,
            Color::BrightRed => Rc::LightRed,
            Color::BrightGreen => Rc::LightGreen,
            Color::BrightYellow => Rc::LightYellow,
            Color::BrightBlue => Rc::LightBlue,
            Color::Rgb(r, g, b) => Rc::Rgb(r, g, b),
        }
    }
}


/// A complete colour theme for the prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    pub name: String,
    pub question_icon: Color,
    pub message: Color,
    pub help: Color,
    pub hint: Color,
    pub default_value: Color,
    pub answer: Color,
    pub select_focus: Color,
    pub option: Color,
    /// Whether the icon, message, and focused row are drawn bold.
    pub bold: bool,
}


impl Theme {
    /// Dark terminal theme, used by default.
    pub fn default_dark() -> Self {
        Theme {
            name: "dark".to_string(),
            question_icon: Color::Green,
            message: Color::Default,
            help: Color::Cyan,
            hint: Color::Cyan,
            default_value: Color::White,
            answer: Color::Cyan,
            select_focus: Color::Cyan,
            option: Color::Default,
            bold: true,
        }
    }

    /// Light terminal theme.
    pub fn default_light() -> Self {
        Theme {
            name: "light".to_string(),
            question_icon: Color::Green,
            message: Color::Default,
            help: Color::Blue,
            hint: Color::Blue,
            default_value: Color::Magenta,
            answer: Color::Blue,
            select_focus: Color::Blue,
            option: Color::Default,
            bold: true,
        }
    }

    /// No colour and no emphasis at all.
    pub fn plain() -> Self {
        Theme {
            name: "plain".to_string(),
            question_icon: Color::Default,
            message: Color::Default,
            help: Color::Default,
            hint: Color::Default,
            default_value: Color::Default,
            answer: Color::Default,
            select_focus: Color::Default,
            option: Color::Default,
            bold: false,
        }
    }

    /// Look up a preset by name.
    pub fn by_name(name: &str) -> Option<Theme> {
        match name.trim().to_lowercase().as_str() {
            "dark" => Some(Theme::default_dark()),
            "light" => Some(Theme::default_light()),
            "plain" | "none" => Some(Theme::plain()),
            _ => None,
        }
    }

    /// Style with only a foreground colour.
    pub fn style(&self, color: Color) -> Style {
        Style::default().fg(color.into())
    }

    /// Style with a foreground colour, bold when the theme uses emphasis.
    pub fn strong(&self, color: Color) -> Style {
        let style = self.style(color);
        if self.bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}


impl Default for Theme {
    fn default() -> Self {
        Theme::default_dark()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

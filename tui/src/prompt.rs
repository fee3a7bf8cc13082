//! Prompt runner: an inline ratatui viewport with terminal setup and cleanup.
//!
//! The [`Prompt`] owns the [`EditorController`], the [`KeyMap`] that decodes
//! crossterm key presses, and the [`Look`] used to draw frames. It runs the
//! loop: draw the current snapshot, block for a key, feed the controller,
//! and stop once an answer is submitted. When stdin is not a terminal it
//! reads a single line instead.

use std::io::{self, BufRead, IsTerminal, Stderr};

use askline_core::{EditorController, Key, PromptConfig};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::{Paragraph, Widget};
use ratatui::{Frame, Terminal, TerminalOptions, Viewport};

use crate::error::PromptError;
use crate::keymap::KeyMap;
use crate::template::{self, Look, PromptView};


/// What a single terminal event did to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Keep reading keys.
    Continue,
    /// The user submitted this answer.
    Submitted(String),
    /// The user pressed Ctrl-C.
    Interrupted,
}


/// One interactive question.
#[derive(Debug)]
pub struct Prompt {
    editor: EditorController,
    keymap: KeyMap,
    look: Look,
}


impl Prompt {
    /// Build a prompt from `config`, resolving its key bindings and theme.
    pub fn new(config: PromptConfig) -> Result<Self, PromptError> {
        let keymap = KeyMap::from_settings(config.settings())?;
        let look = Look::from_settings(config.settings())?;
        Ok(Prompt {
            editor: EditorController::new(config),
            keymap,
            look,
        })
    }

    pub fn editor(&self) -> &EditorController {
        &self.editor
    }

    /// Ask the question and return the answer.
    ///
    /// Draws an inline prompt on stderr when stdin is a terminal, so the
    /// answer can be captured from stdout. Otherwise reads one line.
    pub fn run(self) -> Result<String, PromptError> {
        if io::stdin().is_terminal() {
            self.run_interactive()
        } else {
            let stdin = io::stdin();
            self.run_piped(stdin.lock())
        }
    }

    /// Take the answer from the first line of `reader`, as if it had been
    /// typed and submitted. End of input counts as an empty line.
    pub fn run_piped<R: BufRead>(mut self, mut reader: R) -> Result<String, PromptError> {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let text = line.trim_end_matches(['\n', '\r']);
        tracing::debug!("reading answer from non-terminal input");

        let keys = text.chars().map(Key::Char).chain([Key::Enter]);
        Ok(self.editor.feed(keys).unwrap_or_default())
    }

    /// Apply one terminal event.
    pub fn step(&mut self, event: &Event) -> Step {
        let Event::Key(key_event) = event else {
            return Step::Continue;
        };
        if key_event.kind != KeyEventKind::Release
            && key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Step::Interrupted;
        }
        match self.keymap.decode(key_event) {
            Some(key) => match self.editor.handle(key) {
                Some(answer) => Step::Submitted(answer),
                None => Step::Continue,
            },
            None => Step::Continue,
        }
    }

    /// The frame for the current state at the given terminal width.
    pub fn view(&self, width: u16) -> PromptView {
        template::render(&self.editor.snapshot(), &self.look, width)
    }

    fn run_interactive(mut self) -> Result<String, PromptError> {
        let mut session = Session::start(self.look.max_height())?;

        loop {
            let width = session.terminal.size()?.width;
            let view = self.view(width);
            session.terminal.draw(|frame| draw_view(frame, &view))?;

            let event = event::read()?;
            match self.step(&event) {
                Step::Continue => {}
                Step::Submitted(answer) => {
                    let view = self.view(width);
                    session.finish(&view)?;
                    return Ok(answer);
                }
                Step::Interrupted => {
                    tracing::debug!("prompt interrupted");
                    session.terminal.clear()?;
                    return Err(PromptError::Interrupted);
                }
            }
        }
    }
}


fn draw_view(frame: &mut Frame, view: &PromptView) {
    let area = frame.area();
    frame.render_widget(Paragraph::new(view.lines.clone()), area);
    if let Some((x, y)) = view.cursor {
        let x = area.x + x.min(area.width.saturating_sub(1));
        let y = area.y + y.min(area.height.saturating_sub(1));
        frame.set_cursor_position((x, y));
    }
}


// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Raw mode plus an inline viewport below the shell prompt. Restores the
/// terminal when dropped.
struct Session {
    terminal: Terminal<CrosstermBackend<Stderr>>,
}


impl Session {
    fn start(height: u16) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        let backend = CrosstermBackend::new(io::stderr());
        let terminal = match Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        ) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = terminal::disable_raw_mode();
                return Err(e);
            }
        };
        Ok(Session { terminal })
    }

    /// Leave the final question + answer line in the scrollback and blank
    /// the viewport.
    fn finish(&mut self, view: &PromptView) -> Result<(), io::Error> {
        let lines = view.lines.clone();
        self.terminal.insert_before(view.height(), |buf| {
            Paragraph::new(lines).render(buf.area, buf);
        })?;
        self.terminal.clear()
    }
}


impl Drop for Session {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = self.terminal.show_cursor();
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

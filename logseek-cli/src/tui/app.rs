//! Input state and key handling for the search page.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop must do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Query text changed
    SetQuery(String),
    /// Submit the current query
    Submit,
    Quit,
}

/// Local editing state of the page.
///
/// The session owns the query; this mirror only tracks the cursor and
/// scrolling so editing stays responsive between snapshots.
#[derive(Debug, Default)]
pub struct App {
    pub input: String,
    /// Byte offset of the cursor in `input`
    pub cursor: usize,
    /// First visible line of the result block
    pub scroll: u16,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a key press to an action, editing the local input as needed.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Enter => {
                self.scroll = 0;
                Some(Action::Submit)
            }
            KeyCode::Char(c) => {
                self.input.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                self.query_changed()
            }
            KeyCode::Backspace => {
                let prev = self.prev_boundary()?;
                self.input.remove(prev);
                self.cursor = prev;
                self.query_changed()
            }
            KeyCode::Delete => {
                if self.cursor >= self.input.len() {
                    return None;
                }
                self.input.remove(self.cursor);
                self.query_changed()
            }
            KeyCode::Left => {
                self.cursor = self.prev_boundary()?;
                None
            }
            KeyCode::Right => {
                if let Some(c) = self.input[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = self.input.len();
                None
            }
            KeyCode::Up | KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(scroll_step(key.code));
                None
            }
            KeyCode::Down | KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(scroll_step(key.code));
                None
            }
            _ => None,
        }
    }

    fn query_changed(&self) -> Option<Action> {
        Some(Action::SetQuery(self.input.clone()))
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.input[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}

fn scroll_step(code: KeyCode) -> u16 {
    match code {
        KeyCode::PageUp | KeyCode::PageDown => 10,
        _ => 1,
    }
}

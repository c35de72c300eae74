//! Keyboard shortcuts and their bottom bar labels.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Global shortcuts, checked before regular input handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Quit,
    /// Cancel the in-flight request.
    Cancel,
    /// Same as `/clear`.
    NewSession,
    /// Clear the input line.
    ClearInput,
}

impl Shortcut {
    /// Match a key event to a shortcut. Only key presses are considered.
    pub fn match_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Self::Quit),
            (KeyCode::Char('n'), KeyModifiers::CONTROL) => Some(Self::NewSession),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(Self::ClearInput),
            (KeyCode::Esc, _) => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Labels for the bottom bar.
pub mod labels {
    use ratatui::style::Color;
    use ratatui::text::{Line, Span};

    const DIM: Color = Color::DarkGray;

    pub fn bottom_bar(is_streaming: bool) -> Line<'static> {
        if is_streaming {
            Line::from(vec![
                Span::styled("Esc ", Color::Yellow),
                Span::raw("cancel"),
                Span::styled("  ↑↓ ", DIM),
                Span::raw("scroll"),
                Span::styled("  Ctrl+C ", DIM),
                Span::raw("quit"),
            ])
        } else {
            Line::from(vec![
                Span::styled("Enter ", DIM),
                Span::raw("send"),
                Span::styled("  /image <path> ", DIM),
                Span::raw("photo"),
                Span::styled("  /clear ", DIM),
                Span::raw("new session"),
                Span::styled("  ↑↓ ", DIM),
                Span::raw("scroll"),
                Span::styled("  Ctrl+C ", DIM),
                Span::raw("quit"),
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Shortcut;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn match_quit_ctrl_c() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Shortcut::Quit)
        );
    }

    #[test]
    fn match_cancel_esc() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Esc, KeyModifiers::empty())),
            Some(Shortcut::Cancel)
        );
    }

    #[test]
    fn match_new_session_ctrl_n() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(Shortcut::NewSession)
        );
    }

    #[test]
    fn plain_char_is_not_a_shortcut() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('c'), KeyModifiers::empty())),
            None
        );
    }

    #[test]
    fn key_release_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Release,
            state: KeyEventState::empty(),
        };
        assert_eq!(Shortcut::match_key(&release), None);
    }
}

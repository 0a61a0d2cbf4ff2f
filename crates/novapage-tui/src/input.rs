use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use novapage_core::form::Submission;

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextLink,
    PrevLink,
    /// Follow the focused link
    Activate,
    ToggleMenu,
    EnterForm,
    ToggleHelp,
    ExitMode,
    NextField,
    PrevField,
    Submit,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match app.mode {
        Mode::Help => return Action::ExitMode,
        Mode::Form { .. } => return handle_form_mode(key),
        Mode::Browse => {}
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, KeyModifiers::NONE) => {
            Action::ScrollDown
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, KeyModifiers::NONE) => {
            Action::ScrollUp
        }

        // Page scrolling
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Action::ScrollPageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,

        // Links
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextLink,
        (KeyCode::BackTab, _) => Action::PrevLink,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::Activate,

        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::ToggleMenu,
        (KeyCode::Char('i'), KeyModifiers::NONE) => Action::EnterForm,
        (KeyCode::Char('?'), _) => Action::ToggleHelp,
        (KeyCode::Esc, _) => Action::ExitMode,

        _ => Action::None,
    }
}

/// Keys while a contact form field has focus
fn handle_form_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::ExitMode,
        KeyCode::Tab => Action::NextField,
        KeyCode::BackTab => Action::PrevField,
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Rows moved per wheel notch
const WHEEL_ROWS: i32 = 3;

/// Route a pointer event to the app. A click on the submit button may
/// start a submission for the caller to send.
pub fn handle_mouse_event(mouse: MouseEvent, app: &mut App) -> Option<Submission> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.mouse_move(mouse.column, mouse.row);
            None
        }
        MouseEventKind::Down(MouseButton::Left) => app.click_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => {
            app.wheel(WHEEL_ROWS);
            None
        }
        MouseEventKind::ScrollUp => {
            app.wheel(-WHEEL_ROWS);
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_browse_keys() {
        let app = sample_app(100, 30);
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Tab), &app), Action::NextLink);
        assert_eq!(handle_key_event(key(KeyCode::Char('m')), &app), Action::ToggleMenu);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL), &app),
            Action::ScrollHalfPageDown
        );
    }

    #[test]
    fn test_gg_needs_pending_key() {
        let mut app = sample_app(100, 30);
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::JumpToTop);
    }

    #[test]
    fn test_form_mode_captures_text() {
        let mut app = sample_app(100, 30);
        app.mode = Mode::Form { field: 0 };
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::InputChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::Submit);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::ExitMode);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Action::Quit
        );
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_wheel_scrolls_once_loaded() {
        let mut app = sample_app(100, 30);
        app.tick(500);
        assert!(handle_mouse_event(mouse(MouseEventKind::ScrollDown, 10, 10), &mut app).is_none());
        assert!(app.scroll.needs_update());
        app.tick(600);
        app.tick(800);
        assert_eq!(app.scroll.current(), (WHEEL_ROWS as u16).min(app.max_scroll()));
    }

    #[test]
    fn test_wheel_ignored_while_locked() {
        let mut app = sample_app(100, 30);
        handle_mouse_event(mouse(MouseEventKind::ScrollDown, 10, 10), &mut app);
        assert!(!app.scroll.needs_update());
    }

    #[test]
    fn test_any_key_leaves_help() {
        let mut app = sample_app(100, 30);
        app.mode = Mode::Help;
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::ExitMode);
    }
}

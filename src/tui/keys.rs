/// Keyboard event to action mapping
///
/// Converts crossterm KeyEvents into host Actions. While a text field is being
/// edited, printable keys go to the edit buffer instead of navigation.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use super::action::Action;
use super::state::ViewState;

/// Keys while a text field is being edited
fn handle_edit_keys(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::CommitEdit),
        KeyCode::Esc => Some(Action::CancelEdit),
        KeyCode::Backspace => Some(Action::EditBackspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::EditInput(c))
        }
        _ => None,
    }
}

/// Keys while browsing a page
fn handle_browse_keys(key_code: KeyCode) -> Option<Action> {
    match key_code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Decrease),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Increase),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::NavigateBack),
        _ => None,
    }
}

/// Convert a key event into an action
pub fn key_to_action(key: KeyEvent, view: &ViewState) -> Option<Action> {
    trace!("KEY: {:?} (editing={})", key.code, view.is_editing());

    // Ctrl-C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let action = if view.is_editing() {
        handle_edit_keys(key)
    } else {
        handle_browse_keys(key.code)
    };
    if let Some(action) = &action {
        debug!("KEY: {:?} -> {:?}", key.code, action);
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::IndexPath;
    use crate::tui::state::EditState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn editing() -> ViewState {
        ViewState {
            editing: Some(EditState {
                path: IndexPath::new(0, 0),
                buffer: String::new(),
            }),
            ..ViewState::default()
        }
    }

    #[test]
    fn test_browse_navigation_keys() {
        let view = ViewState::default();

        assert!(matches!(key_to_action(key(KeyCode::Up), &view), Some(Action::MoveUp)));
        assert!(matches!(key_to_action(key(KeyCode::Char('j')), &view), Some(Action::MoveDown)));
        assert!(matches!(key_to_action(key(KeyCode::Char(' ')), &view), Some(Action::Activate)));
        assert!(matches!(key_to_action(key(KeyCode::Right), &view), Some(Action::Increase)));
        assert!(matches!(key_to_action(key(KeyCode::Char('h')), &view), Some(Action::Decrease)));
        assert!(matches!(key_to_action(key(KeyCode::Esc), &view), Some(Action::NavigateBack)));
        assert!(matches!(key_to_action(key(KeyCode::Char('q')), &view), Some(Action::Quit)));
        assert!(key_to_action(key(KeyCode::Char('x')), &view).is_none());
    }

    #[test]
    fn test_editing_captures_characters() {
        let view = editing();

        assert!(matches!(
            key_to_action(key(KeyCode::Char('q')), &view),
            Some(Action::EditInput('q'))
        ));
        assert!(matches!(key_to_action(key(KeyCode::Backspace), &view), Some(Action::EditBackspace)));
        assert!(matches!(key_to_action(key(KeyCode::Enter), &view), Some(Action::CommitEdit)));
        assert!(matches!(key_to_action(key(KeyCode::Esc), &view), Some(Action::CancelEdit)));
        assert!(key_to_action(key(KeyCode::Up), &view).is_none());
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert!(matches!(key_to_action(ctrl_c, &editing()), Some(Action::Quit)));
    }
}

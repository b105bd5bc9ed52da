use std::fmt;

use crate::node::ClickedCallback;

/// Host actions
///
/// All view and tree changes happen through actions. Actions are dispatched
/// from:
/// - User input (key events)
/// - Controller effects (deferred callbacks, reloads)
/// - Node hooks (messages from clickable rows)
pub enum Action {
    // Cursor movement
    MoveUp,
    MoveDown,

    /// Enter/Space on the row under the cursor
    Activate,
    /// Step a slider up
    Increase,
    /// Step a slider down
    Decrease,
    /// Pop the current page (Esc)
    NavigateBack,

    // Text field editing
    EditInput(char),
    EditBackspace,
    CommitEdit,
    CancelEdit,

    /// Run a click callback after the current dispatch has finished
    RunCallback(ClickedCallback),
    /// Re-project the current page after a reload effect
    Reload,
    ShowMessage(String),
    Quit,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::MoveUp => write!(f, "MoveUp"),
            Action::MoveDown => write!(f, "MoveDown"),
            Action::Activate => write!(f, "Activate"),
            Action::Increase => write!(f, "Increase"),
            Action::Decrease => write!(f, "Decrease"),
            Action::NavigateBack => write!(f, "NavigateBack"),
            Action::EditInput(c) => f.debug_tuple("EditInput").field(c).finish(),
            Action::EditBackspace => write!(f, "EditBackspace"),
            Action::CommitEdit => write!(f, "CommitEdit"),
            Action::CancelEdit => write!(f, "CancelEdit"),
            Action::RunCallback(_) => write!(f, "RunCallback(..)"),
            Action::Reload => write!(f, "Reload"),
            Action::ShowMessage(msg) => f.debug_tuple("ShowMessage").field(msg).finish(),
            Action::Quit => write!(f, "Quit"),
        }
    }
}

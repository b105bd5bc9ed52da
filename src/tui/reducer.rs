use tracing::{debug, warn};

use super::action::Action;
use super::state::{visible_paths, EditState, ViewState};
use crate::error::SettingsResult;
use crate::node::Node;
use crate::presentation::{Effect, IndexPath, RowDetail, SettingsController, ValueChange};

/// Apply an action to the controller and view state
///
/// Controller effects are returned for the runtime to execute; cursor and edit
/// bookkeeping happens here. Errors from the controller are logged and shown
/// in the status bar.
pub fn reduce(controller: &mut SettingsController, view: &mut ViewState, action: Action) -> Effect {
    if is_user_input(&action) {
        view.status = None;
    }

    let depth_before = controller.depth();
    let result = match action {
        Action::MoveUp => {
            move_cursor(controller, view, -1);
            Ok(Effect::None)
        }
        Action::MoveDown => {
            move_cursor(controller, view, 1);
            Ok(Effect::None)
        }
        Action::Activate => activate(controller, view),
        Action::Increase => step(controller, view, 1.0),
        Action::Decrease => step(controller, view, -1.0),
        Action::NavigateBack => Ok(controller.back()),
        Action::EditInput(c) => {
            if let Some(edit) = view.editing.as_mut() {
                edit.buffer.push(c);
            }
            Ok(Effect::None)
        }
        Action::EditBackspace => {
            if let Some(edit) = view.editing.as_mut() {
                edit.buffer.pop();
            }
            Ok(Effect::None)
        }
        Action::CommitEdit => match view.editing.take() {
            Some(edit) => {
                debug!("SETTINGS: Committing edit at {:?}", edit.path);
                controller.change_value(edit.path, ValueChange::Text(edit.buffer))
            }
            None => Ok(Effect::None),
        },
        Action::CancelEdit => {
            view.editing = None;
            Ok(Effect::None)
        }
        Action::RunCallback(callback) => {
            debug!("CLICK: Running deferred callback");
            callback();
            Ok(Effect::None)
        }
        Action::Reload => {
            clamp_cursor(controller, view);
            Ok(Effect::None)
        }
        Action::ShowMessage(message) => {
            view.status = Some(message);
            Ok(Effect::None)
        }
        Action::Quit => Ok(Effect::None),
    };

    match result {
        Ok(effect) => {
            follow_transition(controller, view, depth_before, &effect);
            effect
        }
        Err(e) => {
            warn!("SETTINGS: {}", e);
            view.status = Some(format!("Error: {}", e));
            Effect::None
        }
    }
}

fn is_user_input(action: &Action) -> bool {
    !matches!(
        action,
        Action::RunCallback(_) | Action::Reload | Action::ShowMessage(_)
    )
}

/// Move the cursor after a push or pop
///
/// A pushed page starts on its first row; a pop returns to the row that
/// opened the page.
fn follow_transition(
    controller: &SettingsController,
    view: &mut ViewState,
    depth_before: usize,
    effect: &Effect,
) {
    let depth = controller.depth();
    if depth > depth_before {
        view.editing = None;
        view.cursor = visible_paths(controller).first().copied();
    } else if depth < depth_before {
        view.editing = None;
        let origin = effect.clone().flatten().into_iter().rev().find_map(|e| match e {
            Effect::ReloadRow(path) => Some(path),
            _ => None,
        });
        view.cursor = origin;
        clamp_cursor(controller, view);
    }
}

/// Keep the cursor on a focusable row of the current page
pub fn clamp_cursor(controller: &SettingsController, view: &mut ViewState) {
    let paths = visible_paths(controller);
    view.cursor = match view.cursor {
        Some(cursor) if paths.contains(&cursor) => Some(cursor),
        Some(cursor) => paths
            .iter()
            .find(|p| **p >= cursor)
            .or(paths.last())
            .copied(),
        None => paths.first().copied(),
    };
    if let Some(edit) = &view.editing {
        if view.cursor != Some(edit.path) {
            view.editing = None;
        }
    }
}

fn move_cursor(controller: &SettingsController, view: &mut ViewState, delta: isize) {
    let paths = visible_paths(controller);
    if paths.is_empty() {
        view.cursor = None;
        return;
    }
    let next = match view.cursor.and_then(|c| paths.iter().position(|p| *p == c)) {
        Some(idx) => idx.saturating_add_signed(delta).min(paths.len() - 1),
        None => 0,
    };
    view.cursor = Some(paths[next]);
}

fn activate(controller: &mut SettingsController, view: &mut ViewState) -> SettingsResult<Effect> {
    let Some(path) = view.cursor else {
        return Ok(Effect::None);
    };
    let row = controller.row(path)?;
    if row.disabled {
        return Ok(Effect::None);
    }

    match row.detail {
        RowDetail::Switch { on } => controller.change_value(path, ValueChange::Bool(!on)),
        RowDetail::TextField { secure, .. } => {
            start_editing(controller, view, path, secure)?;
            Ok(Effect::None)
        }
        RowDetail::Slider { .. } => Ok(Effect::None),
        _ => controller.select(path),
    }
}

fn start_editing(
    controller: &SettingsController,
    view: &mut ViewState,
    path: IndexPath,
    secure: bool,
) -> SettingsResult<()> {
    // Secure fields start empty so the stored value is never shown
    let buffer = match controller.node_at(path)? {
        Node::TextField(field) if !secure => field.value(),
        _ => String::new(),
    };
    debug!("SETTINGS: Editing row {:?}", path);
    view.editing = Some(EditState { path, buffer });
    Ok(())
}

/// Step the inline control under the cursor
///
/// Sliders move one unit when they snap to integers and one percent of their
/// range otherwise. Switches turn on with a positive step and off with a
/// negative one.
fn step(controller: &mut SettingsController, view: &ViewState, direction: f32) -> SettingsResult<Effect> {
    let Some(path) = view.cursor else {
        return Ok(Effect::None);
    };
    match controller.row(path)?.detail {
        RowDetail::Slider {
            value,
            minimum,
            maximum,
            snap_to_ints,
            ..
        } => {
            let unit = if snap_to_ints {
                1.0
            } else {
                (maximum - minimum) / 100.0
            };
            // Bounds may be inverted on hand-built sliders
            let target = (value + direction * unit).max(minimum).min(maximum);
            controller.slide(path, target)
        }
        RowDetail::Switch { on } if on != (direction > 0.0) => {
            controller.change_value(path, ValueChange::Bool(direction > 0.0))
        }
        _ => Ok(Effect::None),
    }
}

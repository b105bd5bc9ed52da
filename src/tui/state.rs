use crate::presentation::{IndexPath, Row, RowDetail, SettingsController};

/// In-progress edit of a text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub path: IndexPath,
    pub buffer: String,
}

/// Host-side view state; everything else lives in the controller
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Row under the cursor on the current page
    pub cursor: Option<IndexPath>,
    pub editing: Option<EditState>,
    /// Message shown in the status bar until the next key press
    pub status: Option<String>,
}

impl ViewState {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

/// Whether the cursor can rest on `row`
///
/// Rows with an inline control are focusable even though selecting them does
/// nothing.
pub fn is_focusable(row: &Row) -> bool {
    if row.disabled {
        return false;
    }
    row.selectable
        || matches!(
            row.detail,
            RowDetail::Switch { .. } | RowDetail::Slider { .. } | RowDetail::TextField { .. }
        )
}

/// Focusable rows of the current page, in display order
pub fn visible_paths(controller: &SettingsController) -> Vec<IndexPath> {
    let mut paths = Vec::new();
    let Ok(sections) = controller.section_count() else {
        return paths;
    };
    for section in 0..sections {
        let rows = controller.row_count(section).unwrap_or(0);
        for row in 0..rows {
            let path = IndexPath::new(section, row);
            if controller.row(path).is_ok_and(|r| is_focusable(&r)) {
                paths.push(path);
            }
        }
    }
    paths
}

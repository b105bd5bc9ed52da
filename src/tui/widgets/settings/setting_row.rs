/// Setting row renderer - one projected row on one line
///
/// Composes: margin + selection indicator + padded label + value widget,
/// with the subtitle trailing in the muted color.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use super::{
    render_bool_value, render_disclosure, render_list_value, render_option_marker,
    render_slider_value, render_string_value,
};
use crate::config::DisplayConfig;
use crate::presentation::{Row, RowDetail};

/// Label shown in the title column, icon first when present
pub fn row_label(row: &Row) -> String {
    match &row.icon {
        Some(icon) => format!("{} {}", icon, row.title),
        None => row.title.clone(),
    }
}

fn label_style(row: &Row, config: &DisplayConfig) -> Style {
    if row.disabled {
        return Style::default().fg(config.muted_fg);
    }
    let mut style = Style::default();
    if let Some(text_style) = row.style {
        if let Some(fg) = text_style.fg {
            style = style.fg(fg);
        }
        if text_style.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
    }
    style
}

/// Renders a single row
///
/// `edit_buffer` is shown in place of the value when the row is being
/// edited. Returns the height consumed (1, or 0 when `y` is outside `area`).
#[allow(clippy::too_many_arguments)]
pub fn render_setting_row(
    row: &Row,
    is_selected: bool,
    edit_buffer: Option<&str>,
    title_width: usize,
    margin: u16,
    area: Rect,
    y: u16,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> u16 {
    if y >= area.bottom() {
        return 0;
    }

    let mut x = area.x + margin;

    if is_selected {
        buf.set_string(x, y, "► ", Style::default().fg(config.selection_fg));
    }
    x += 2;

    let label = row_label(row);
    let padding = title_width.saturating_sub(label.width());
    buf.set_string(x, y, &label, label_style(row, config));
    x += (label.width() + padding + 1) as u16;

    let muted = Style::default().fg(config.muted_fg);
    let width = match &row.detail {
        RowDetail::Switch { on } => render_bool_value(*on, row.disabled, x, y, buf, config),
        RowDetail::Slider {
            value,
            minimum,
            maximum,
            snap_to_ints,
            minimum_icon,
            maximum_icon,
        } => render_slider_value(
            *value,
            *minimum,
            *maximum,
            *snap_to_ints,
            (minimum_icon.as_deref(), maximum_icon.as_deref()),
            row.disabled,
            x,
            y,
            buf,
            config,
        ),
        RowDetail::TextField {
            text, placeholder, ..
        } => render_string_value(text, placeholder.as_deref(), edit_buffer, x, y, buf, config),
        RowDetail::Option { selected } => render_option_marker(*selected, x, y, buf, config),
        RowDetail::OptionsButton { selected } => render_list_value(selected, x, y, buf, config),
        RowDetail::Disclosure => render_disclosure(x, y, buf, config),
        RowDetail::Text(text) => {
            buf.set_string(x, y, text, Style::default());
            text.width() as u16
        }
        RowDetail::Group { len } => {
            let text = format!("({} items)", len);
            buf.set_string(x, y, &text, muted);
            text.width() as u16
        }
    };

    if let Some(subtitle) = &row.subtitle {
        buf.set_string(x + width + 2, y, subtitle, muted);
    }

    1
}

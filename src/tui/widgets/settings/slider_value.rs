/// Slider renderer - a fixed-width bar followed by the numeric value
///
/// Displays "[██████░░░░] 6" using the row's clamped value, or
/// "dim [██████░░░░] bright 6" when the slider has value icons.

use ratatui::{buffer::Buffer, style::Style};
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;

/// Cells in the bar
pub const BAR_WIDTH: usize = 10;

/// Format a slider value; integers when snapping, one decimal otherwise
pub fn format_slider_value(value: f32, snap_to_ints: bool) -> String {
    if snap_to_ints {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Number of filled cells for `value` within the bounds
fn filled_cells(value: f32, minimum: f32, maximum: f32) -> usize {
    let range = maximum - minimum;
    if range <= 0.0 {
        return BAR_WIDTH;
    }
    let fraction = ((value - minimum) / range).clamp(0.0, 1.0);
    (fraction * BAR_WIDTH as f32).round() as usize
}

/// Renders a slider bar and value, with the value icons at either end of the bar
///
/// Returns the width consumed
#[allow(clippy::too_many_arguments)]
pub fn render_slider_value(
    value: f32,
    minimum: f32,
    maximum: f32,
    snap_to_ints: bool,
    icons: (Option<&str>, Option<&str>),
    disabled: bool,
    x: u16,
    y: u16,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> u16 {
    let (full, empty) = if config.use_unicode {
        ("█", "░")
    } else {
        ("#", "-")
    };
    let filled = filled_cells(value, minimum, maximum);
    let bar = format!(
        "[{}{}]",
        full.repeat(filled),
        empty.repeat(BAR_WIDTH - filled)
    );

    let muted = Style::default().fg(config.muted_fg);
    let style = if disabled {
        muted
    } else {
        Style::default().fg(config.selection_fg)
    };

    let (minimum_icon, maximum_icon) = icons;
    let mut cursor = x;
    if let Some(icon) = minimum_icon {
        buf.set_string(cursor, y, icon, muted);
        cursor += icon.width() as u16 + 1;
    }
    buf.set_string(cursor, y, &bar, style);
    cursor += bar.width() as u16 + 1;
    if let Some(icon) = maximum_icon {
        buf.set_string(cursor, y, icon, muted);
        cursor += icon.width() as u16 + 1;
    }
    let number = format_slider_value(value, snap_to_ints);
    buf.set_string(cursor, y, &number, style);
    cursor + number.width() as u16 - x
}

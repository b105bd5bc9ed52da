/// Choice renderers
///
/// An options button shows "▼ Night"; an option row shows a radio marker;
/// a nested screen shows a disclosure arrow.

use ratatui::{buffer::Buffer, style::Style};
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;

/// Renders the selected option title of an options button
///
/// Returns the width consumed
pub fn render_list_value(selected: &str, x: u16, y: u16, buf: &mut Buffer, config: &DisplayConfig) -> u16 {
    let arrow = if config.use_unicode { "▼" } else { "v" };
    let text = format!("{} {}", arrow, selected);

    buf.set_string(x, y, &text, Style::default());
    text.width() as u16
}

/// Renders a radio marker for an option row
pub fn render_option_marker(selected: bool, x: u16, y: u16, buf: &mut Buffer, config: &DisplayConfig) -> u16 {
    let dot = if config.use_unicode { "•" } else { "*" };
    if selected {
        buf.set_string(x, y, "(", Style::default());
        buf.set_string(x + 1, y, dot, Style::default().fg(config.selection_fg));
        buf.set_string(x + 2, y, ")", Style::default());
    } else {
        buf.set_string(x, y, "( )", Style::default());
    }
    3
}

/// Renders the arrow of a row that opens another page
pub fn render_disclosure(x: u16, y: u16, buf: &mut Buffer, config: &DisplayConfig) -> u16 {
    let arrow = if config.use_unicode { "›" } else { ">" };
    buf.set_string(x, y, arrow, Style::default().fg(config.muted_fg));
    1
}

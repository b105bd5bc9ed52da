/// Text field renderer - the value, the edit buffer with a cursor, or the
/// placeholder when there is nothing to show

use ratatui::{buffer::Buffer, style::Style};
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;

/// Renders a text value, optionally showing the edit buffer with a cursor
///
/// `value` is expected to be masked already for secure fields. Returns the
/// width consumed.
pub fn render_string_value(
    value: &str,
    placeholder: Option<&str>,
    edit_buffer: Option<&str>,
    x: u16,
    y: u16,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> u16 {
    let (text, style) = match edit_buffer {
        Some(buffer) => (format!("{}█", buffer), Style::default()),
        None if value.is_empty() => (
            placeholder.unwrap_or_default().to_string(),
            Style::default().fg(config.muted_fg),
        ),
        None => (value.to_string(), Style::default()),
    };

    buf.set_string(x, y, &text, style);
    text.width() as u16
}

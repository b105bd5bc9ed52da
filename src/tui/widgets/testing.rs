/// Testing utilities for widget rendering

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use super::RenderableWidget;
use crate::config::DisplayConfig;

/// DisplayConfig with unicode glyphs
pub fn test_config() -> DisplayConfig {
    DisplayConfig {
        use_unicode: true,
        selection_fg: Color::Rgb(255, 200, 0), // Gold
        header_fg: Color::Rgb(159, 226, 191),  // Seafoam
        muted_fg: Color::DarkGray,
    }
}

/// DisplayConfig with ASCII glyphs, for predictable output
pub fn test_config_ascii() -> DisplayConfig {
    DisplayConfig {
        use_unicode: false,
        ..test_config()
    }
}

/// Render a widget to a fresh buffer and return it
pub fn render_widget(widget: &impl RenderableWidget, width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    let config = test_config();
    widget.render(buf.area, &mut buf, &config);
    buf
}

/// Row `y` of a buffer with trailing spaces trimmed
pub fn buffer_to_string(buf: &Buffer, y: u16) -> String {
    let mut result = String::new();
    for x in 0..buf.area.width {
        if let Some(cell) = buf.cell((x, y)) {
            result.push_str(cell.symbol());
        }
    }
    result.trim_end().to_string()
}

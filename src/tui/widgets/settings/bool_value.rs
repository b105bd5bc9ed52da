/// Switch renderer - a checkbox, "[✔]" when on and "[ ]" when off

use ratatui::{buffer::Buffer, style::Style};

use crate::config::DisplayConfig;

/// Renders a switch state as a checkbox
///
/// Returns the width consumed (always 3)
pub fn render_bool_value(
    value: bool,
    disabled: bool,
    x: u16,
    y: u16,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> u16 {
    let frame = if disabled {
        Style::default().fg(config.muted_fg)
    } else {
        Style::default()
    };

    if value {
        let check = if config.use_unicode { "✔" } else { "x" };
        let mark = if disabled {
            frame
        } else {
            Style::default().fg(config.selection_fg)
        };
        buf.set_string(x, y, "[", frame);
        buf.set_string(x + 1, y, check, mark);
        buf.set_string(x + 2, y, "]", frame);
    } else {
        buf.set_string(x, y, "[ ]", frame);
    }
    3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::testing::{buffer_to_string, test_config, test_config_ascii};
    use ratatui::layout::Rect;

    #[test]
    fn test_bool_value_on_unicode() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));

        let width = render_bool_value(true, false, 0, 0, &mut buf, &test_config());

        assert_eq!(width, 3);
        assert_eq!(buffer_to_string(&buf, 0), "[✔]");
        assert_eq!(buf[(1, 0)].fg, test_config().selection_fg);
    }

    #[test]
    fn test_bool_value_on_ascii() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));

        render_bool_value(true, false, 0, 0, &mut buf, &test_config_ascii());

        assert_eq!(buffer_to_string(&buf, 0), "[x]");
    }

    #[test]
    fn test_bool_value_off() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));

        render_bool_value(false, false, 0, 0, &mut buf, &test_config());

        assert_eq!(buffer_to_string(&buf, 0), "[ ]");
    }

    #[test]
    fn test_bool_value_disabled_is_muted() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        let config = test_config();

        render_bool_value(true, true, 2, 0, &mut buf, &config);

        assert_eq!(buffer_to_string(&buf, 0), "  [✔]");
        assert_eq!(buf[(3, 0)].fg, config.muted_fg);
    }
}

/// StatusBar widget - displays a status message or keyboard hints at the bottom of the screen
///
/// Renders two lines:
/// - Top line: horizontal separator
/// - Bottom line: the status message when present, otherwise the key hints

use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;
use crate::tui::widgets::RenderableWidget;

/// Represents the style of a key hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHintStyle {
    Normal,
    /// Highlighted in the selection color
    Important,
    /// Dimmed
    Subtle,
}

/// A keyboard hint displayed in the status bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The keyboard key (e.g., "Enter", "Esc")
    pub key: String,
    /// The action description (e.g., "Select", "Back")
    pub action: String,
    pub style: KeyHintStyle,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self::with_style(key, action, KeyHintStyle::Normal)
    }

    pub fn with_style(key: impl Into<String>, action: impl Into<String>, style: KeyHintStyle) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
            style,
        }
    }
}

#[derive(Debug)]
pub struct StatusBar {
    /// Message shown instead of the hints
    pub status: Option<String>,
    pub hints: Vec<KeyHint>,
}

impl StatusBar {
    /// Status bar with the browsing hints
    pub fn new() -> Self {
        Self {
            status: None,
            hints: vec![
                KeyHint::with_style("Enter", "Select", KeyHintStyle::Important),
                KeyHint::new("←/→", "Adjust"),
                KeyHint::new("Esc", "Back"),
                KeyHint::with_style("q", "Quit", KeyHintStyle::Subtle),
            ],
        }
    }

    /// Status bar with the text editing hints
    pub fn editing() -> Self {
        Self {
            status: None,
            hints: vec![
                KeyHint::with_style("Enter", "Save", KeyHintStyle::Important),
                KeyHint::new("Esc", "Cancel"),
            ],
        }
    }

    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.status = status;
        self
    }

    pub fn with_hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    fn hint_style(style: KeyHintStyle, config: &DisplayConfig) -> Style {
        match style {
            KeyHintStyle::Normal => Style::default(),
            KeyHintStyle::Important => Style::default().fg(config.selection_fg),
            KeyHintStyle::Subtle => Style::default().fg(config.muted_fg),
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderableWidget for StatusBar {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width == 0 || area.height < 2 {
            return;
        }

        let horizontal = if config.use_unicode { "─" } else { "-" };
        buf.set_string(
            area.x,
            area.y,
            horizontal.repeat(area.width as usize),
            Style::default(),
        );

        let y = area.y + 1;
        let right = area.x + area.width;
        if let Some(status) = &self.status {
            buf.set_string(area.x + 1, y, status, Style::default());
            return;
        }

        let mut x = area.x + 1;
        for (idx, hint) in self.hints.iter().enumerate() {
            let text = if idx == 0 {
                format!("{} {}", hint.key, hint.action)
            } else {
                format!("  {} {}", hint.key, hint.action)
            };
            let width = text.width() as u16;
            if x + width > right {
                break;
            }
            buf.set_string(x, y, &text, Self::hint_style(hint.style, config));
            x += width;
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::{assert_buffer, RENDER_WIDTH};
    use crate::tui::widgets::testing::*;

    #[test]
    fn test_status_bar_hints() {
        let widget = StatusBar::new();
        let buf = render_widget(&widget, 50, 2);

        assert_buffer(
            &buf,
            &[
                "──────────────────────────────────────────────────",
                " Enter Select  ←/→ Adjust  Esc Back  q Quit",
            ],
        );
    }

    #[test]
    fn test_status_bar_status_replaces_hints() {
        let widget = StatusBar::new().with_status(Some("Saved".to_string()));
        let buf = render_widget(&widget, RENDER_WIDTH, 2);

        assert_eq!(buffer_to_string(&buf, 1), " Saved");
    }

    #[test]
    fn test_status_bar_editing_hints() {
        let buf = render_widget(&StatusBar::editing(), RENDER_WIDTH, 2);

        assert_eq!(buffer_to_string(&buf, 1), " Enter Save  Esc Cancel");
    }

    #[test]
    fn test_status_bar_drops_hints_that_do_not_fit() {
        let buf = render_widget(&StatusBar::new(), 20, 2);

        assert_eq!(buffer_to_string(&buf, 1), " Enter Select");
    }

    #[test]
    fn test_status_bar_hint_styles() {
        let config = test_config();
        let buf = render_widget(&StatusBar::new(), RENDER_WIDTH, 2);

        assert_eq!(buf[(1, 1)].fg, config.selection_fg);
        assert_eq!(buf[(40, 1)].fg, config.muted_fg);
    }

    #[test]
    fn test_status_bar_ascii_separator() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 2));
        StatusBar::new().render(buf.area, &mut buf, &test_config_ascii());

        assert_eq!(buffer_to_string(&buf, 0), "-----");
    }

    #[test]
    fn test_status_bar_too_short() {
        let buf = render_widget(&StatusBar::new(), RENDER_WIDTH, 1);

        assert_buffer(&buf, &[""]);
    }

    #[test]
    fn test_key_hint_with_style() {
        let hint = KeyHint::with_style("Esc", "Back", KeyHintStyle::Important);
        assert_eq!(hint.key, "Esc");
        assert_eq!(hint.action, "Back");
        assert_eq!(hint.style, KeyHintStyle::Important);
    }

    #[test]
    fn test_status_bar_preferred_height() {
        assert_eq!(StatusBar::new().preferred_height(), Some(2));
    }
}

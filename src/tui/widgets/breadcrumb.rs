/// Breadcrumb widget - displays the titles of the pages on the navigation stack
///
/// Format: "▸ Settings ▸ Kitchen ▸ Tariff"

use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;
use crate::tui::widgets::RenderableWidget;

const UNICODE_SEPARATOR: &str = " ▸ ";
const ASCII_SEPARATOR: &str = " > ";
const ELLIPSIS: &str = "...";

#[derive(Debug)]
pub struct Breadcrumb {
    /// Page titles, root first
    pub items: Vec<String>,
}

impl Breadcrumb {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    fn separator(config: &DisplayConfig) -> &'static str {
        if config.use_unicode {
            UNICODE_SEPARATOR
        } else {
            ASCII_SEPARATOR
        }
    }

    /// Segments to draw, eliding the middle items when the trail is too wide
    fn segments(&self, width: usize, separator: &str) -> Vec<String> {
        let icon = separator.trim_start();
        let full = format!("{}{}", icon, self.items.join(separator));
        if full.width() <= width {
            return self.items.clone();
        }

        if let Some(last) = self.items.last() {
            let needed = icon.width() + ELLIPSIS.len() + separator.width() + last.width();
            if needed <= width {
                return vec![ELLIPSIS.to_string(), last.clone()];
            }
        }
        Vec::new()
    }
}

impl RenderableWidget for Breadcrumb {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if self.items.is_empty() || area.width == 0 || area.height == 0 {
            return;
        }

        let separator = Self::separator(config);
        let segments = self.segments(area.width as usize, separator);
        if segments.is_empty() {
            return;
        }

        let icon = separator.trim_start();
        buf.set_string(area.x, area.y, icon, Style::default());
        let mut x = area.x + icon.width() as u16;

        let last = segments.len() - 1;
        for (idx, item) in segments.iter().enumerate() {
            if idx > 0 {
                buf.set_string(x, area.y, separator, Style::default());
                x += separator.width() as u16;
            }
            let style = if idx == last {
                Style::default().fg(config.selection_fg)
            } else {
                Style::default()
            };
            buf.set_string(x, area.y, item, style);
            x += item.width() as u16;
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(1)
    }
}

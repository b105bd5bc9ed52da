/// Settings page widget - the sections of the page on top of the stack
///
/// Each section renders as a header line, one line per row and an optional
/// footer, with a blank line between sections. The view scrolls so the row
/// under the cursor stays visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use super::{render_setting_row, row_label};
use crate::config::DisplayConfig;
use crate::presentation::{IndexPath, Row, SettingsController};
use crate::tui::state::ViewState;
use crate::tui::widgets::RenderableWidget;

const MARGIN: u16 = 1;

enum PageLine {
    Header(String),
    Row(IndexPath, Row),
    Footer(String),
    Blank,
}

pub struct SettingsPage<'a> {
    pub controller: &'a SettingsController,
    pub view: &'a ViewState,
}

impl<'a> SettingsPage<'a> {
    pub fn new(controller: &'a SettingsController, view: &'a ViewState) -> Self {
        Self { controller, view }
    }

    fn lines(&self) -> Vec<PageLine> {
        let mut lines = Vec::new();
        let Ok(sections) = self.controller.section_count() else {
            return lines;
        };

        for section in 0..sections {
            if section > 0 {
                lines.push(PageLine::Blank);
            }
            if let Ok(header) = self.controller.section_header(section) {
                if !header.is_empty() {
                    lines.push(PageLine::Header(header.to_string()));
                }
            }
            let count = self.controller.row_count(section).unwrap_or(0);
            for row in 0..count {
                let path = IndexPath::new(section, row);
                if let Ok(projected) = self.controller.row(path) {
                    lines.push(PageLine::Row(path, projected));
                }
            }
            if let Ok(Some(footer)) = self.controller.section_footer(section) {
                lines.push(PageLine::Footer(footer.to_string()));
            }
        }
        lines
    }

    /// First line to draw so the cursor row fits in `height` lines
    fn scroll_offset(lines: &[PageLine], cursor: Option<IndexPath>, height: usize) -> usize {
        let Some(cursor) = cursor else {
            return 0;
        };
        let position = lines
            .iter()
            .position(|line| matches!(line, PageLine::Row(path, _) if *path == cursor));
        match position {
            Some(idx) if idx >= height => idx + 1 - height,
            _ => 0,
        }
    }
}

impl RenderableWidget for SettingsPage<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.lines();
        let title_width = lines
            .iter()
            .filter_map(|line| match line {
                PageLine::Row(_, row) => Some(row_label(row).width()),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let offset = Self::scroll_offset(&lines, self.view.cursor, area.height as usize);
        let header_style = Style::default()
            .fg(config.header_fg)
            .add_modifier(Modifier::BOLD);
        let footer_style = Style::default().fg(config.muted_fg);

        let mut y = area.y;
        for line in lines.iter().skip(offset) {
            if y >= area.bottom() {
                break;
            }
            match line {
                PageLine::Header(text) => {
                    buf.set_string(area.x + MARGIN, y, text, header_style);
                }
                PageLine::Row(path, row) => {
                    let is_selected = self.view.cursor == Some(*path);
                    let edit_buffer = self
                        .view
                        .editing
                        .as_ref()
                        .filter(|edit| edit.path == *path)
                        .map(|edit| edit.buffer.as_str());
                    render_setting_row(
                        row,
                        is_selected,
                        edit_buffer,
                        title_width,
                        MARGIN,
                        area,
                        y,
                        buf,
                        config,
                    );
                }
                PageLine::Footer(text) => {
                    buf.set_string(area.x + MARGIN + 2, y, text, footer_style);
                }
                PageLine::Blank => {}
            }
            y += 1;
        }
    }
}

/// Widget-based rendering for the settings host
///
/// Widgets render themselves directly to a ratatui Buffer. Small value
/// renderers live under `settings` and are composed into rows and pages.

#[cfg(test)]
pub mod testing;

pub mod breadcrumb;
pub mod settings;
pub mod status_bar;

pub use breadcrumb::Breadcrumb;
pub use settings::SettingsPage;
pub use status_bar::StatusBar;

use crate::config::DisplayConfig;
use ratatui::{buffer::Buffer, layout::Rect};

/// Core trait for renderable widgets
///
/// Widgets render themselves directly to a ratatui Buffer, avoiding string-based
/// intermediate representations.
pub trait RenderableWidget {
    /// Render this widget into the provided buffer
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig);

    /// Get the preferred height of this widget
    ///
    /// Returns None if the widget can adapt to any height.
    fn preferred_height(&self) -> Option<u16> {
        None
    }
}

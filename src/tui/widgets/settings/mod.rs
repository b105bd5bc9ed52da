/// Settings row renderers
///
/// Small, focused renderers for each kind of row value:
/// - Switch: checkbox ([✔] or [ ])
/// - Slider: bar with the current value
/// - Text field: text with optional edit cursor
/// - Options button: dropdown indicator with the selected title
/// - Option: radio marker
/// - Screen: disclosure arrow

pub mod bool_value;
pub mod list_value;
pub mod page;
pub mod setting_row;
pub mod slider_value;
pub mod string_value;

pub use bool_value::render_bool_value;
pub use list_value::{render_disclosure, render_list_value, render_option_marker};
pub use page::SettingsPage;
pub use setting_row::{render_setting_row, row_label};
pub use slider_value::render_slider_value;
pub use string_value::render_string_value;

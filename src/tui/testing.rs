//! General test utilities for TUI tests.
//!
//! Provides the buffer assertions and the sample tree shared by the host
//! tests. For widget-specific rendering helpers, see
//! `crate::tui::widgets::testing`.

use ratatui::buffer::Buffer;

use crate::node::{OptionItem, OptionsButton, OptionsSection, Screen, Section, Slider, Switch, TextField, TextOnly};
use crate::presentation::SettingsController;
use crate::settings::Settings;
use crate::storage::{shared, MemoryStorage};

/// Constant for general rendering width
pub const RENDER_WIDTH: u16 = 80;

/// Controller over a small tree with one row of each common kind
///
/// Root "Settings":
/// - "Lights" (footer): Hall switch, Volume slider 0..10, Tariff options
///   button (Day/Night), Account screen with a "Login" section (User,
///   secure Password)
/// - "Mode" options section: Home/Away
/// - "About": static Version
pub fn sample_controller() -> SettingsController {
    let main = Screen::build("Settings", || {
        vec![
            Section::build("Lights", || {
                vec![
                    Switch::new("hall", "Hall").into(),
                    Slider::new("volume", "Volume")
                        .with_range(0.0, 10.0)
                        .snap_to_ints(true)
                        .with_default(5.0)
                        .into(),
                    OptionsButton::build("tariff", "Tariff", || {
                        vec![OptionItem::new("Day", 0), OptionItem::new("Night", 1)]
                    })
                    .into(),
                    Screen::build("Account", || {
                        vec![Section::build("Login", || {
                            vec![
                                TextField::new("user", "User").into(),
                                TextField::new("password", "Password").secure(true).into(),
                            ]
                        })
                        .into()]
                    })
                    .into(),
                ]
            })
            .with_footer("Applies to every room")
            .into(),
            OptionsSection::build("mode", "Mode", || {
                vec![OptionItem::new("Home", 0), OptionItem::new("Away", 1)]
            })
            .into(),
            Section::build("About", || vec![TextOnly::new("Version", "1.0").into()]).into(),
        ]
    });
    SettingsController::new(Settings::from_screen(shared(MemoryStorage::new()), main))
}

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

/// Helper for buffer assertions
pub fn assert_buffer(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_lines(buf);

    assert_eq!(
        actual.len(),
        expected.len(),
        "Buffer height mismatch: expected {} lines, got {}",
        expected.len(),
        actual.len()
    );
    for (i, expected_line) in expected.iter().enumerate() {
        assert_eq!(
            actual[i].trim_end(),
            expected_line.trim_end(),
            "Line {} mismatch:\nExpected: '{}'\nActual:   '{}'",
            i,
            expected_line,
            actual[i]
        );
    }
}

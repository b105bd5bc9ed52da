// Module declarations
pub mod widgets;

pub mod action;
pub mod keys;
pub mod reducer;
pub mod runtime;
pub mod state;

#[cfg(test)]
pub mod testing;

pub use action::Action;
pub use keys::key_to_action;
pub use reducer::reduce;
pub use runtime::Runtime;
pub use state::ViewState;

use std::io;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;

use crate::config::{Config, DisplayConfig};
use crate::loader::{MessageHook, ScreenDescription};
use crate::presentation::SettingsController;
use crate::settings::Settings;
use crate::storage::StorageHandle;
use widgets::{Breadcrumb, RenderableWidget, SettingsPage, StatusBar};

/// Draw the whole host: breadcrumb, current page and status bar
pub fn render(runtime: &Runtime, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
    let [crumb_area, page_area, status_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(area);

    let controller = runtime.controller();
    let view = runtime.view();

    let items = controller
        .breadcrumb()
        .map(|titles| titles.into_iter().map(str::to_string).collect())
        .unwrap_or_default();
    Breadcrumb::new(items).render(crumb_area, buf, config);

    SettingsPage::new(controller, view).render(page_area, buf, config);

    let status_bar = if view.is_editing() {
        StatusBar::editing()
    } else {
        StatusBar::new()
    };
    status_bar
        .with_status(view.status.clone())
        .render(status_area, buf, config);
}

/// Build the tree and a runtime whose status bar shows click messages
fn build_runtime(tree: &ScreenDescription, storage: StorageHandle) -> Result<Runtime> {
    // Click messages from the tree go through the same channel as key actions
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let message_tx = action_tx.clone();
    let hook: MessageHook = Rc::new(move |message: &str| {
        let _ = message_tx.send(Action::ShowMessage(message.to_string()));
    });

    let main = tree.build(Some(&hook))?;
    let settings = Settings::from_screen(storage, main);
    Ok(Runtime::with_channel(SettingsController::new(settings), action_tx, action_rx))
}

/// Main entry point for TUI mode
pub async fn run(config: Config, tree: ScreenDescription, storage: StorageHandle) -> Result<()> {
    let mut runtime = build_runtime(&tree, storage)?;
    let display = config.theme.display();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut runtime, &display);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &mut Runtime,
    display: &DisplayConfig,
) -> Result<()> {
    loop {
        // Process queued actions FIRST so callbacks and reloads show up in this frame
        let actions_processed = runtime.process_actions();
        if actions_processed > 0 {
            tracing::debug!("LOOP: Processed {} actions", actions_processed);
        }

        terminal.draw(|f| {
            let area = f.area();
            render(runtime, area, f.buffer_mut(), display);
        })?;

        if actions_processed > 0 {
            continue;
        }

        // Poll for keyboard events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let Some(action) = key_to_action(key, runtime.view()) else {
                    continue;
                };
                if matches!(action, Action::Quit) {
                    tracing::debug!("ACTION: Quitting");
                    break;
                }
                runtime.dispatch(action);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{parse_tree, DEMO_TREE};
    use crate::storage::{shared, MemoryStorage};
    use crate::tui::testing::{assert_buffer, buffer_lines, sample_controller};
    use crate::tui::widgets::testing::test_config;

    fn demo_runtime() -> Runtime {
        let tree = parse_tree(DEMO_TREE).unwrap();
        build_runtime(&tree, shared(MemoryStorage::new())).unwrap()
    }

    #[test]
    fn test_render_root() {
        let runtime = Runtime::new(sample_controller());
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 8));

        render(&runtime, buf.area, &mut buf, &test_config());

        assert_buffer(
            &buf,
            &[
                "▸ Settings",
                "",
                " Lights",
                " ► Hall    [ ]",
                "   Volume  [█████░░░░░] 5",
                "   Tariff  ▼ Day",
                "──────────────────────────────────────────────────",
                " Enter Select  ←/→ Adjust  Esc Back  q Quit",
            ],
        );
    }

    #[test]
    fn test_render_nested_page_with_status() {
        let mut runtime = Runtime::new(sample_controller());
        runtime.dispatch(Action::MoveDown);
        runtime.dispatch(Action::MoveDown);
        runtime.dispatch(Action::Activate);
        runtime.process_actions();
        runtime.dispatch(Action::ShowMessage("Pick a tariff".to_string()));
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 6));

        render(&runtime, buf.area, &mut buf, &test_config());

        assert_buffer(
            &buf,
            &[
                "▸ Settings ▸ Tariff",
                "",
                " ► Day   (•)",
                "   Night ( )",
                "────────────────────────────────────────",
                " Pick a tariff",
            ],
        );
    }

    #[test]
    fn test_demo_slider_shows_value_icons() {
        let mut runtime = demo_runtime();
        // Tariff, Main breaker, then the Kitchen screen
        runtime.dispatch(Action::MoveDown);
        runtime.dispatch(Action::MoveDown);
        runtime.dispatch(Action::Activate);
        runtime.process_actions();
        let mut buf = Buffer::empty(Rect::new(0, 0, 100, 12));

        render(&runtime, buf.area, &mut buf, &Config::default().theme.display());

        let lines = buffer_lines(&buf);
        assert!(lines[0].contains("Kitchen"));
        let dimmer = lines
            .iter()
            .find(|line| line.contains("Dimmer"))
            .expect("dimmer row rendered");
        assert!(dimmer.contains("dim ["));
        assert!(dimmer.contains("] bright 0"));
    }

    #[test]
    fn test_demo_click_message_reaches_status_bar() {
        let mut runtime = demo_runtime();
        // Licenses is the last focusable row
        for _ in 0..20 {
            runtime.dispatch(Action::MoveDown);
        }
        runtime.dispatch(Action::Activate);
        runtime.process_actions();

        assert_eq!(
            runtime.view().status.as_deref(),
            Some("Released under the MIT license")
        );
    }
}

//! Projects a settings tree onto pages of sections and rows, and turns row
//! interactions into model updates, navigation and host effects.
//!
//! The controller keeps a stack of pages with the root screen at the bottom.
//! Each pushed page is recorded as the index path of the row that opened it
//! and is resolved against the live tree on every access, so counts and rows
//! always reflect the values currently in storage.

use tracing::debug;

use crate::error::{SettingsError, SettingsResult};
use crate::node::{Node, OptionsButton, Screen, SectionNode};
use crate::settings::Settings;

pub mod effect;
pub mod row;


pub use effect::Effect;
pub use row::{is_selectable, project, Row, RowDetail, SECURE_MASK};

/// Coordinates of a visible row on the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

/// New value for an inline control
#[derive(Debug, Clone, PartialEq)]
pub enum ValueChange {
    Bool(bool),
    Number(f32),
    Text(String),
}

/// One page of the navigation stack
///
/// An options page is synthesized from an `OptionsButton`: one untitled
/// section listing the button's options, titled like the button.
#[derive(Debug, Clone, Copy)]
pub enum Page<'a> {
    Screen(&'a Screen),
    Options(&'a OptionsButton),
}

impl<'a> Page<'a> {
    pub fn title(&self) -> &'a str {
        match *self {
            Page::Screen(screen) => &screen.base.title,
            Page::Options(button) => &button.base.title,
        }
    }

    pub fn section_count(&self) -> usize {
        match *self {
            Page::Screen(screen) => screen.sections().len(),
            Page::Options(_) => 1,
        }
    }

    /// The section node, for screen pages only
    fn section_node(&self, section: usize) -> SettingsResult<Option<&'a SectionNode>> {
        match *self {
            Page::Screen(screen) => screen
                .section(section)
                .map(Some)
                .ok_or(SettingsError::SectionOutOfRange(section)),
            Page::Options(_) if section == 0 => Ok(None),
            Page::Options(_) => Err(SettingsError::SectionOutOfRange(section)),
        }
    }

    pub fn header(&self, section: usize) -> SettingsResult<&'a str> {
        Ok(self
            .section_node(section)?
            .map(SectionNode::title)
            .unwrap_or(""))
    }

    pub fn footer(&self, section: usize) -> SettingsResult<Option<&'a str>> {
        Ok(self.section_node(section)?.and_then(SectionNode::footer))
    }

    /// Rows currently visible in `section`
    pub fn rows(&self, section: usize) -> SettingsResult<&'a [Node]> {
        match (*self, self.section_node(section)?) {
            (_, Some(node)) => Ok(node.visible_items()),
            (Page::Options(button), None) => Ok(button.options()),
            (Page::Screen(_), None) => Err(SettingsError::SectionOutOfRange(section)),
        }
    }

    pub fn node(&self, path: IndexPath) -> SettingsResult<&'a Node> {
        self.rows(path.section)?
            .get(path.row)
            .ok_or(SettingsError::RowOutOfRange {
                section: path.section,
                row: path.row,
            })
    }

    /// True for the switch leading a toggle section
    fn is_toggle_switch(&self, path: IndexPath) -> bool {
        matches!(
            self.section_node(path.section),
            Ok(Some(SectionNode::Toggle(_)))
        ) && path.row == 0
    }
}

enum Transition {
    Push(IndexPath),
    Pop,
    Stay,
}

/// Presentation controller over a settings root
#[derive(Debug)]
pub struct SettingsController {
    settings: Settings,
    /// Origins of pushed pages; the root screen sits below them
    stack: Vec<IndexPath>,
}

impl SettingsController {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            stack: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the root screen and return to it
    pub fn set_main(&mut self, main: Screen) -> Effect {
        debug!("NAV: Replacing root screen with '{}'", main.base.title);
        self.settings.set_main(main);
        self.stack.clear();
        Effect::ReloadData
    }

    /// Number of pages on the stack, root included
    pub fn depth(&self) -> usize {
        self.stack.len() + 1
    }

    pub fn is_at_root(&self) -> bool {
        self.stack.is_empty()
    }

    /// The page at the top of the stack
    pub fn page(&self) -> SettingsResult<Page<'_>> {
        self.page_at(self.stack.len())
    }

    fn page_at(&self, level: usize) -> SettingsResult<Page<'_>> {
        let mut page = Page::Screen(self.settings.main());
        for (i, origin) in self.stack.iter().take(level).enumerate() {
            page = match page.node(*origin) {
                Ok(Node::Screen(screen)) => Page::Screen(screen),
                Ok(Node::OptionsButton(button)) => Page::Options(button),
                _ => return Err(SettingsError::StaleStackEntry(i + 1)),
            };
        }
        Ok(page)
    }

    pub fn title(&self) -> SettingsResult<&str> {
        Ok(self.page()?.title())
    }

    /// Titles of every page from the root to the current one
    pub fn breadcrumb(&self) -> SettingsResult<Vec<&str>> {
        (0..=self.stack.len())
            .map(|level| self.page_at(level).map(|page| page.title()))
            .collect()
    }

    pub fn section_count(&self) -> SettingsResult<usize> {
        Ok(self.page()?.section_count())
    }

    pub fn row_count(&self, section: usize) -> SettingsResult<usize> {
        Ok(self.page()?.rows(section)?.len())
    }

    pub fn section_header(&self, section: usize) -> SettingsResult<&str> {
        self.page()?.header(section)
    }

    pub fn section_footer(&self, section: usize) -> SettingsResult<Option<&str>> {
        self.page()?.footer(section)
    }

    pub fn node_at(&self, path: IndexPath) -> SettingsResult<&Node> {
        self.page()?.node(path)
    }

    pub fn row(&self, path: IndexPath) -> SettingsResult<Row> {
        Ok(project(self.node_at(path)?))
    }

    pub fn is_selectable(&self, path: IndexPath) -> SettingsResult<bool> {
        Ok(is_selectable(self.node_at(path)?))
    }

    /// Apply the selection transition for the row at `path`
    ///
    /// Screens and options buttons push a page; options are selected and pop
    /// when they navigate back. The node's click callback, if any, follows the
    /// transition as a deferred effect.
    pub fn select(&mut self, path: IndexPath) -> SettingsResult<Effect> {
        let node = self.node_at(path)?;
        if !is_selectable(node) {
            debug!("NAV: Row {:?} ('{}') is not selectable", path, node.title());
            return Ok(Effect::None);
        }

        let clicked = node.base().on_clicked.clone();
        let transition = match node {
            Node::Screen(screen) => {
                debug!("NAV: Pushing screen '{}'", screen.base.title);
                Transition::Push(path)
            }
            Node::OptionsButton(button) => {
                debug!("NAV: Pushing options page for '{}'", button.key());
                Transition::Push(path)
            }
            Node::Option(option) => {
                option.select()?;
                debug!(
                    "NAV: Selected option {} for '{}'",
                    option.option_id(),
                    option.container_key()?
                );
                if option.navigates_back() {
                    Transition::Pop
                } else {
                    Transition::Stay
                }
            }
            _ => Transition::Stay,
        };

        let mut effects = vec![Effect::ReloadData];
        match transition {
            Transition::Push(origin) => self.stack.push(origin),
            Transition::Pop => effects.push(self.back()),
            Transition::Stay => {}
        }
        if let Some(callback) = clicked {
            effects.push(Effect::Clicked(callback));
        }
        Ok(Effect::batch(effects))
    }

    /// Write a new value through the inline control at `path`
    pub fn change_value(&mut self, path: IndexPath, change: ValueChange) -> SettingsResult<Effect> {
        let page = self.page()?;
        let node = page.node(path)?;
        if node.base().disabled {
            debug!("NAV: Ignoring change to disabled row '{}'", node.title());
            return Ok(Effect::None);
        }

        match (node, change) {
            (Node::Switch(switch), ValueChange::Bool(on)) => {
                switch.set_value(on);
                if page.is_toggle_switch(path) {
                    debug!("NAV: Toggle '{}' set to {}", switch.key(), on);
                    Ok(Effect::ReloadSection(path.section))
                } else {
                    Ok(Effect::ReloadRow(path))
                }
            }
            (Node::Slider(slider), ValueChange::Number(value)) => {
                slider.set_value(value);
                Ok(Effect::ReloadRow(path))
            }
            (Node::TextField(field), ValueChange::Text(text)) => {
                field.set_value(text);
                Ok(Effect::ReloadRow(path))
            }
            (node, _) => Err(SettingsError::ValueKindMismatch {
                title: node.title().to_string(),
                expected: accepted_kind(node),
            }),
        }
    }

    /// Drag the slider at `path` to `value`
    ///
    /// The value is snapped first when the slider snaps to integers. Nothing is
    /// written when the result equals the current value.
    pub fn slide(&mut self, path: IndexPath, value: f32) -> SettingsResult<Effect> {
        let node = self.node_at(path)?;
        let Node::Slider(slider) = node else {
            return Err(SettingsError::ValueKindMismatch {
                title: node.title().to_string(),
                expected: accepted_kind(node),
            });
        };

        let value = slider.snapped(value);
        if value == slider.value() {
            return Ok(Effect::None);
        }
        self.change_value(path, ValueChange::Number(value))
    }

    /// Pop the current page; the row that opened it is reloaded
    pub fn back(&mut self) -> Effect {
        match self.stack.pop() {
            Some(origin) => {
                debug!("NAV: Popped back to depth {}", self.depth());
                Effect::ReloadRow(origin)
            }
            None => {
                debug!("NAV: Already at root");
                Effect::None
            }
        }
    }
}

/// Name of the value kind a row's inline control accepts
fn accepted_kind(node: &Node) -> &'static str {
    match node {
        Node::Switch(_) => "bool",
        Node::Slider(_) => "number",
        Node::TextField(_) => "text",
        _ => "no",
    }
}

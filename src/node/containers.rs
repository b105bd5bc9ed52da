/// Container nodes
///
/// Containers can be composed two ways that produce the same tree: a nested
/// builder closure (`Screen::build`, `Section::build`, ...) or incremental
/// `with` / `include` calls on an existing container.
use super::items::{OptionItem, Switch};
use super::{Node, NodeBase, Titled};
use crate::storage::StorageHandle;

/// Ordered group of rows with an optional footer
#[derive(Debug, Clone)]
pub struct Section {
    pub(crate) base: NodeBase,
    items: Vec<Node>,
    footer: Option<String>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            base: NodeBase::new(title),
            items: Vec::new(),
            footer: None,
        }
    }

    pub fn build(title: impl Into<String>, nodes: impl FnOnce() -> Vec<Node>) -> Self {
        let mut section = Self::new(title);
        section.items = nodes();
        section
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Append a node
    pub fn with(&mut self, node: impl Into<Node>) -> &mut Self {
        self.items.push(node.into());
        self
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn bind(&mut self, storage: &StorageHandle) {
        self.base.bind(storage);
        for item in &mut self.items {
            item.bind(storage);
        }
    }
}

/// Section whose rows are the options of a single key
///
/// Options stay on the page when chosen.
#[derive(Debug, Clone)]
pub struct OptionsSection {
    pub(crate) section: Section,
    key: String,
}

impl OptionsSection {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            section: Section::new(title),
            key: key.into(),
        }
    }

    pub fn build(
        key: impl Into<String>,
        title: impl Into<String>,
        options: impl FnOnce() -> Vec<OptionItem>,
    ) -> Self {
        let mut section = Self::new(key, title);
        for option in options() {
            section.with(option);
        }
        section
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.section.footer = Some(footer.into());
        self
    }

    /// Attach an option to this section
    pub fn with(&mut self, mut option: OptionItem) -> &mut Self {
        option.attach(&self.key, false);
        self.section.items.push(Node::Option(option));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn items(&self) -> &[Node] {
        self.section.items()
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionItem> {
        self.section.items.iter().filter_map(Node::as_option)
    }

    pub fn footer(&self) -> Option<&str> {
        self.section.footer()
    }

    /// The option whose id matches the stored value, if any
    pub fn selected_option(&self) -> Option<&OptionItem> {
        self.options().find(|o| o.is_selected().unwrap_or(false))
    }

    pub(crate) fn bind(&mut self, storage: &StorageHandle) {
        self.section.bind(storage);
    }
}

/// Row that opens a page listing its options
///
/// Options chosen on that page pop back to the button.
#[derive(Debug, Clone)]
pub struct OptionsButton {
    pub(crate) base: NodeBase,
    key: String,
    options: Vec<Node>,
}

impl OptionsButton {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            base: NodeBase::new(title),
            key: key.into(),
            options: Vec::new(),
        }
    }

    pub fn build(
        key: impl Into<String>,
        title: impl Into<String>,
        options: impl FnOnce() -> Vec<OptionItem>,
    ) -> Self {
        let mut button = Self::new(key, title);
        for option in options() {
            button.with(option);
        }
        button
    }

    /// Attach an option to this button
    pub fn with(&mut self, mut option: OptionItem) -> &mut Self {
        option.attach(&self.key, true);
        self.options.push(Node::Option(option));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Options as nodes, in the order they are listed on the options page
    pub fn options(&self) -> &[Node] {
        &self.options
    }

    pub fn selected_option(&self) -> Option<&OptionItem> {
        self.options
            .iter()
            .filter_map(Node::as_option)
            .find(|o| o.is_selected().unwrap_or(false))
    }

    /// Title of the selected option, empty when nothing matches
    pub fn selected_option_title(&self) -> String {
        self.selected_option()
            .map(|o| o.title().to_string())
            .unwrap_or_default()
    }

    pub(crate) fn bind(&mut self, storage: &StorageHandle) {
        self.base.bind(storage);
        for option in &mut self.options {
            option.bind(storage);
        }
    }
}

/// Section led by a switch that hides the remaining rows while off
#[derive(Debug, Clone)]
pub struct ToggleSection {
    pub(crate) section: Section,
}

impl ToggleSection {
    pub fn new(
        title: impl Into<String>,
        toggle_key: impl Into<String>,
        toggle_title: impl Into<String>,
        default_toggled: bool,
    ) -> Self {
        let mut section = Section::new(title);
        section.with(Switch::new(toggle_key, toggle_title).with_default(default_toggled));
        Self { section }
    }

    pub fn build(
        title: impl Into<String>,
        toggle_key: impl Into<String>,
        toggle_title: impl Into<String>,
        default_toggled: bool,
        nodes: impl FnOnce() -> Vec<Node>,
    ) -> Self {
        let mut section = Self::new(title, toggle_key, toggle_title, default_toggled);
        section.section.items.extend(nodes());
        section
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.section.footer = Some(footer.into());
        self
    }

    /// Append a row after the toggle switch
    pub fn with(&mut self, node: impl Into<Node>) -> &mut Self {
        self.section.with(node);
        self
    }

    pub fn toggle_switch(&self) -> Option<&Switch> {
        match self.section.items.first() {
            Some(Node::Switch(switch)) => Some(switch),
            _ => None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.toggle_switch().map(Switch::value).unwrap_or(false)
    }

    /// Every declared row, the switch first, regardless of visibility
    pub fn items(&self) -> &[Node] {
        self.section.items()
    }

    pub fn footer(&self) -> Option<&str> {
        self.section.footer()
    }

    pub(crate) fn bind(&mut self, storage: &StorageHandle) {
        self.section.bind(storage);
    }
}

/// One section of a screen
#[derive(Debug, Clone)]
pub enum SectionNode {
    Plain(Section),
    Options(OptionsSection),
    Toggle(ToggleSection),
}

impl SectionNode {
    pub fn base(&self) -> &NodeBase {
        match self {
            SectionNode::Plain(s) => s.base(),
            SectionNode::Options(s) => s.base(),
            SectionNode::Toggle(s) => s.base(),
        }
    }

    pub fn title(&self) -> &str {
        &self.base().title
    }

    pub fn footer(&self) -> Option<&str> {
        match self {
            SectionNode::Plain(s) => s.footer(),
            SectionNode::Options(s) => s.footer(),
            SectionNode::Toggle(s) => s.footer(),
        }
    }

    /// Every declared row, including rows hidden by a toggle
    pub fn items(&self) -> &[Node] {
        match self {
            SectionNode::Plain(s) => s.items(),
            SectionNode::Options(s) => s.items(),
            SectionNode::Toggle(s) => s.items(),
        }
    }

    /// Rows currently shown, derived from the stored toggle value
    pub fn visible_items(&self) -> &[Node] {
        &self.items()[..visible_item_count(self)]
    }

    pub fn visible_item(&self, row: usize) -> Option<&Node> {
        self.visible_items().get(row)
    }

    pub(crate) fn bind(&mut self, storage: &StorageHandle) {
        match self {
            SectionNode::Plain(s) => s.bind(storage),
            SectionNode::Options(s) => s.bind(storage),
            SectionNode::Toggle(s) => s.bind(storage),
        }
    }

    pub fn is_fully_bound(&self) -> bool {
        self.base().is_bound() && self.items().iter().all(Node::is_fully_bound)
    }
}

/// Number of rows a section shows given the values currently in storage
///
/// A toggle section shows only its switch while off.
pub fn visible_item_count(section: &SectionNode) -> usize {
    match section {
        SectionNode::Plain(s) => s.len(),
        SectionNode::Options(s) => s.items().len(),
        SectionNode::Toggle(s) => {
            let total = s.items().len();
            if s.is_on() {
                total
            } else {
                total.min(1)
            }
        }
    }
}

impl From<Section> for SectionNode {
    fn from(s: Section) -> Self {
        SectionNode::Plain(s)
    }
}

impl From<OptionsSection> for SectionNode {
    fn from(s: OptionsSection) -> Self {
        SectionNode::Options(s)
    }
}

impl From<ToggleSection> for SectionNode {
    fn from(s: ToggleSection) -> Self {
        SectionNode::Toggle(s)
    }
}

impl From<SectionNode> for Node {
    fn from(s: SectionNode) -> Self {
        match s {
            SectionNode::Plain(s) => Node::Section(s),
            SectionNode::Options(s) => Node::OptionsSection(s),
            SectionNode::Toggle(s) => Node::ToggleSection(s),
        }
    }
}

/// One navigable page of sections
#[derive(Debug, Clone)]
pub struct Screen {
    pub(crate) base: NodeBase,
    sections: Vec<SectionNode>,
}

impl Screen {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            base: NodeBase::new(title),
            sections: Vec::new(),
        }
    }

    pub fn build(title: impl Into<String>, sections: impl FnOnce() -> Vec<SectionNode>) -> Self {
        let mut screen = Self::new(title);
        screen.sections = sections();
        screen
    }

    /// Append a section
    pub fn include(&mut self, section: impl Into<SectionNode>) -> &mut Self {
        self.sections.push(section.into());
        self
    }

    pub fn sections(&self) -> &[SectionNode] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&SectionNode> {
        self.sections.get(index)
    }

    pub(crate) fn bind(&mut self, storage: &StorageHandle) {
        self.base.bind(storage);
        for section in &mut self.sections {
            section.bind(storage);
        }
    }

    pub fn is_fully_bound(&self) -> bool {
        self.base.is_bound() && self.sections.iter().all(SectionNode::is_fully_bound)
    }
}

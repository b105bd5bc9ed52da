//! Typed tree of setting nodes.
//!
//! Leaves carry a storage key and a default; their value lives in the bound
//! storage backend. Containers own their children. Structure is fixed once
//! built, only stored values change afterwards.

use std::fmt;
use std::rc::Rc;

use ratatui::style::Color;

use crate::storage::{SettingsStorage, StorageHandle};

pub mod containers;
pub mod items;
pub mod outline;

pub use containers::{
    visible_item_count, OptionsButton, OptionsSection, Screen, Section, SectionNode, ToggleSection,
};
pub use items::{OptionItem, Slider, Switch, TextField, TextOnly};
pub use outline::{outline, OutlineLine};

/// Callback invoked after a row is selected
pub type ClickedCallback = Rc<dyn Fn()>;

/// Callback invoked after a leaf value is written, with the effective key
pub type ValueChanged<T> = Rc<dyn Fn(&str, &T)>;

/// Per-node text style override
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub fg: Option<Color>,
    pub bold: bool,
}

/// Metadata shared by every node
#[derive(Clone, Default)]
pub struct NodeBase {
    pub title: String,
    pub subtitle: Option<String>,
    /// Icon reference, resolved by the host
    pub icon: Option<String>,
    pub style: Option<TextStyle>,
    pub on_clicked: Option<ClickedCallback>,
    pub disabled: bool,
    storage: Option<StorageHandle>,
}

impl NodeBase {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn storage(&self) -> Option<&StorageHandle> {
        self.storage.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.storage.is_some()
    }

    pub(crate) fn bind(&mut self, storage: &StorageHandle) {
        self.storage = Some(Rc::clone(storage));
    }

    /// Run a read against the bound storage; `None` when unbound
    pub(crate) fn read<T>(&self, f: impl FnOnce(&dyn SettingsStorage) -> Option<T>) -> Option<T> {
        let storage = self.storage.as_ref()?;
        let guard = storage.borrow();
        f(&*guard)
    }

    /// Run a write against the bound storage
    ///
    /// Returns false (and drops the write) when the node is unbound.
    pub(crate) fn write(&self, key: &str, f: impl FnOnce(&mut dyn SettingsStorage)) -> bool {
        match &self.storage {
            Some(storage) => {
                let mut guard = storage.borrow_mut();
                f(&mut *guard);
                true
            }
            None => {
                tracing::trace!(
                    "STORAGE: Dropping write to '{}' from unbound node '{}'",
                    key,
                    self.title
                );
                false
            }
        }
    }
}

impl fmt::Debug for NodeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeBase")
            .field("title", &self.title)
            .field("subtitle", &self.subtitle)
            .field("icon", &self.icon)
            .field("style", &self.style)
            .field("on_clicked", &self.on_clicked.is_some())
            .field("disabled", &self.disabled)
            .field("bound", &self.storage.is_some())
            .finish()
    }
}

/// Builder-style access to the shared node metadata
pub trait Titled: Sized {
    fn base(&self) -> &NodeBase;
    fn base_mut(&mut self) -> &mut NodeBase;

    fn title(&self) -> &str {
        &self.base().title
    }

    fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.base_mut().subtitle = Some(subtitle.into());
        self
    }

    fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.base_mut().icon = Some(icon.into());
        self
    }

    fn with_style(mut self, style: TextStyle) -> Self {
        self.base_mut().style = Some(style);
        self
    }

    fn on_clicked(mut self, f: impl Fn() + 'static) -> Self {
        self.base_mut().on_clicked = Some(Rc::new(f));
        self
    }

    fn disabled(mut self, disabled: bool) -> Self {
        self.base_mut().disabled = disabled;
        self
    }
}

macro_rules! impl_titled {
    ($($ty:ty => $($field:ident).+;)*) => {
        $(
            impl Titled for $ty {
                fn base(&self) -> &NodeBase {
                    &self.$($field).+
                }

                fn base_mut(&mut self) -> &mut NodeBase {
                    &mut self.$($field).+
                }
            }
        )*
    };
}

impl_titled! {
    Switch => base;
    Slider => base;
    TextField => base;
    OptionItem => base;
    TextOnly => base;
    Section => base;
    Screen => base;
    OptionsButton => base;
    OptionsSection => section.base;
    ToggleSection => section.base;
}

/// Any element of the settings tree
#[derive(Debug, Clone)]
pub enum Node {
    Screen(Screen),
    Section(Section),
    Switch(Switch),
    Slider(Slider),
    Option(OptionItem),
    OptionsButton(OptionsButton),
    OptionsSection(OptionsSection),
    ToggleSection(ToggleSection),
    TextField(TextField),
    TextOnly(TextOnly),
}

impl Node {
    pub fn base(&self) -> &NodeBase {
        match self {
            Node::Screen(n) => n.base(),
            Node::Section(n) => n.base(),
            Node::Switch(n) => n.base(),
            Node::Slider(n) => n.base(),
            Node::Option(n) => n.base(),
            Node::OptionsButton(n) => n.base(),
            Node::OptionsSection(n) => n.base(),
            Node::ToggleSection(n) => n.base(),
            Node::TextField(n) => n.base(),
            Node::TextOnly(n) => n.base(),
        }
    }

    pub fn title(&self) -> &str {
        &self.base().title
    }

    /// Storage key for keyed nodes
    ///
    /// Options report their container key, or `None` when unattached.
    pub fn key(&self) -> Option<&str> {
        match self {
            Node::Switch(n) => Some(n.key()),
            Node::Slider(n) => Some(n.key()),
            Node::TextField(n) => Some(n.key()),
            Node::Option(n) => n.container_key().ok(),
            Node::OptionsButton(n) => Some(n.key()),
            Node::OptionsSection(n) => Some(n.key()),
            Node::ToggleSection(n) => n.toggle_switch().map(Switch::key),
            Node::Screen(_) | Node::Section(_) | Node::TextOnly(_) => None,
        }
    }

    /// Short lowercase name of the node kind, used in logs and outlines
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Screen(_) => "screen",
            Node::Section(_) => "section",
            Node::Switch(_) => "switch",
            Node::Slider(_) => "slider",
            Node::Option(_) => "option",
            Node::OptionsButton(_) => "options_button",
            Node::OptionsSection(_) => "options_section",
            Node::ToggleSection(_) => "toggle_section",
            Node::TextField(_) => "text_field",
            Node::TextOnly(_) => "text_only",
        }
    }

    pub fn as_option(&self) -> Option<&OptionItem> {
        match self {
            Node::Option(o) => Some(o),
            _ => None,
        }
    }

    /// Bind `storage` into this node and everything below it
    pub fn bind(&mut self, storage: &StorageHandle) {
        match self {
            Node::Screen(n) => n.bind(storage),
            Node::Section(n) => n.bind(storage),
            Node::Switch(n) => n.base_mut().bind(storage),
            Node::Slider(n) => n.base_mut().bind(storage),
            Node::Option(n) => n.base_mut().bind(storage),
            Node::OptionsButton(n) => n.bind(storage),
            Node::OptionsSection(n) => n.bind(storage),
            Node::ToggleSection(n) => n.bind(storage),
            Node::TextField(n) => n.base_mut().bind(storage),
            Node::TextOnly(n) => n.base_mut().bind(storage),
        }
    }

    /// True if this node and every descendant holds a storage handle
    pub fn is_fully_bound(&self) -> bool {
        if !self.base().is_bound() {
            return false;
        }
        match self {
            Node::Screen(n) => n.sections().iter().all(SectionNode::is_fully_bound),
            Node::Section(n) => n.items().iter().all(Node::is_fully_bound),
            Node::OptionsSection(n) => n.items().iter().all(Node::is_fully_bound),
            Node::ToggleSection(n) => n.items().iter().all(Node::is_fully_bound),
            Node::OptionsButton(n) => n.options().iter().all(Node::is_fully_bound),
            Node::Switch(_)
            | Node::Slider(_)
            | Node::Option(_)
            | Node::TextField(_)
            | Node::TextOnly(_) => true,
        }
    }
}

macro_rules! impl_from_for_node {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(n: $ty) -> Self {
                    Node::$variant(n)
                }
            }
        )*
    };
}

impl_from_for_node! {
    Screen => Screen,
    Section => Section,
    Switch => Switch,
    Slider => Slider,
    OptionItem => Option,
    OptionsButton => OptionsButton,
    OptionsSection => OptionsSection,
    ToggleSection => ToggleSection,
    TextField => TextField,
    TextOnly => TextOnly,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{shared, MemoryStorage};

    #[test]
    fn test_titled_builders_set_base_fields() {
        let switch = Switch::new("wifi", "Wi-Fi")
            .with_subtitle("Wireless")
            .with_icon("wifi-icon")
            .with_style(TextStyle {
                fg: Some(Color::Cyan),
                bold: true,
            })
            .disabled(true);

        assert_eq!(switch.title(), "Wi-Fi");
        assert_eq!(switch.base().subtitle.as_deref(), Some("Wireless"));
        assert_eq!(switch.base().icon.as_deref(), Some("wifi-icon"));
        assert_eq!(switch.base().style.and_then(|s| s.fg), Some(Color::Cyan));
        assert!(switch.base().disabled);
    }

    #[test]
    fn test_node_key_and_kind() {
        let node: Node = Slider::new("vol", "Volume").into();
        assert_eq!(node.key(), Some("vol"));
        assert_eq!(node.kind_name(), "slider");

        let node: Node = TextOnly::new("Version", "1.0").into();
        assert_eq!(node.key(), None);
        assert_eq!(node.kind_name(), "text_only");
    }

    #[test]
    fn test_unattached_option_has_no_key() {
        let node: Node = OptionItem::new("Day", 1).into();
        assert_eq!(node.key(), None);
    }

    #[test]
    fn test_bind_reaches_nested_nodes() {
        let mut node: Node = Screen::build("Root", || {
            vec![Section::build("General", || {
                vec![
                    Switch::new("a", "A").into(),
                    OptionsButton::build("tariff", "Tariff", || {
                        vec![OptionItem::new("Day", 1), OptionItem::new("Night", 2)]
                    })
                    .into(),
                ]
            })
            .into()]
        })
        .into();

        assert!(!node.is_fully_bound());
        node.bind(&shared(MemoryStorage::new()));
        assert!(node.is_fully_bound());
    }

    #[test]
    fn test_node_base_debug_hides_callback() {
        let text = TextOnly::new("About", "").on_clicked(|| {});
        let debug = format!("{:?}", text.base());
        assert!(debug.contains("on_clicked: true"));
    }
}

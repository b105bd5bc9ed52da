//! TOML tree descriptions
//!
//! A description mirrors the builder API one-to-one: every section and item
//! carries a `kind` tag and the fields of the matching constructor. Building a
//! description yields exactly the tree the builder calls would.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::config::parse_color;
use crate::node::{
    Node, OptionItem, OptionsButton, OptionsSection, Screen, Section, SectionNode, Slider, Switch,
    TextField, TextOnly, TextStyle, Titled, ToggleSection,
};

/// Tree shown when no tree file is configured
pub const DEMO_TREE: &str = include_str!("../demos/home.toml");

/// Receives the `message` of a clicked text row
pub type MessageHook = Rc<dyn Fn(&str)>;

/// Fields every node accepts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommonFields {
    pub title: String,
    pub subtitle: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub bold: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreenDescription {
    #[serde(flatten)]
    pub common: CommonFields,
    #[serde(default)]
    pub sections: Vec<SectionDescription>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionDescription {
    Plain {
        #[serde(flatten)]
        common: CommonFields,
        footer: Option<String>,
        #[serde(default)]
        items: Vec<ItemDescription>,
    },
    Options {
        #[serde(flatten)]
        common: CommonFields,
        key: String,
        footer: Option<String>,
        #[serde(default)]
        options: Vec<OptionDescription>,
    },
    Toggle {
        #[serde(flatten)]
        common: CommonFields,
        footer: Option<String>,
        toggle_key: String,
        toggle_title: String,
        #[serde(default)]
        default_toggled: bool,
        #[serde(default)]
        items: Vec<ItemDescription>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionDescription {
    #[serde(flatten)]
    pub common: CommonFields,
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemDescription {
    Switch {
        #[serde(flatten)]
        common: CommonFields,
        key: String,
        #[serde(default)]
        default: bool,
    },
    Slider {
        #[serde(flatten)]
        common: CommonFields,
        key: String,
        #[serde(default)]
        default: f32,
        min: Option<f32>,
        max: Option<f32>,
        #[serde(default)]
        snap_to_ints: bool,
        min_icon: Option<String>,
        max_icon: Option<String>,
    },
    TextField {
        #[serde(flatten)]
        common: CommonFields,
        key: String,
        #[serde(default)]
        default: String,
        #[serde(default)]
        secure: bool,
        placeholder: Option<String>,
    },
    TextOnly {
        #[serde(flatten)]
        common: CommonFields,
        #[serde(default)]
        text: String,
        #[serde(default)]
        clickable: bool,
        /// Passed to the message hook when the row is clicked
        message: Option<String>,
    },
    OptionsButton {
        #[serde(flatten)]
        common: CommonFields,
        key: String,
        #[serde(default)]
        options: Vec<OptionDescription>,
    },
    Screen(ScreenDescription),
    Section {
        #[serde(flatten)]
        common: CommonFields,
        footer: Option<String>,
        #[serde(default)]
        items: Vec<ItemDescription>,
    },
}

/// Read and parse a tree description file
pub fn read_tree(path: &Path) -> Result<ScreenDescription> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tree file {}", path.display()))?;
    parse_tree(&content).with_context(|| format!("Failed to parse tree file {}", path.display()))
}

pub fn parse_tree(content: &str) -> Result<ScreenDescription> {
    let description: ScreenDescription = toml::from_str(content)?;
    tracing::debug!(
        "LOADER: Parsed tree '{}' with {} sections",
        description.common.title,
        description.sections.len()
    );
    Ok(description)
}

impl ScreenDescription {
    /// Build the described screen
    ///
    /// `hook` receives the message of clickable text rows; without one the
    /// message is only logged.
    pub fn build(&self, hook: Option<&MessageHook>) -> Result<Screen> {
        let mut screen = apply_common(Screen::new(&self.common.title), &self.common)?;
        for section in &self.sections {
            screen.include(section.build(hook)?);
        }
        Ok(screen)
    }
}

impl SectionDescription {
    fn build(&self, hook: Option<&MessageHook>) -> Result<SectionNode> {
        let section = match self {
            SectionDescription::Plain {
                common,
                footer,
                items,
            } => SectionNode::Plain(build_section(common, footer, items, hook)?),
            SectionDescription::Options {
                common,
                key,
                footer,
                options,
            } => {
                let mut section = apply_common(OptionsSection::new(key, &common.title), common)?;
                if let Some(footer) = footer {
                    section = section.with_footer(footer);
                }
                for option in options {
                    section.with(option.build()?);
                }
                SectionNode::Options(section)
            }
            SectionDescription::Toggle {
                common,
                footer,
                toggle_key,
                toggle_title,
                default_toggled,
                items,
            } => {
                let mut section = apply_common(
                    ToggleSection::new(&common.title, toggle_key, toggle_title, *default_toggled),
                    common,
                )?;
                if let Some(footer) = footer {
                    section = section.with_footer(footer);
                }
                for item in items {
                    section.with(item.build(hook)?);
                }
                SectionNode::Toggle(section)
            }
        };
        Ok(section)
    }
}

impl OptionDescription {
    fn build(&self) -> Result<OptionItem> {
        apply_common(OptionItem::new(&self.common.title, self.id), &self.common)
    }
}

impl ItemDescription {
    fn build(&self, hook: Option<&MessageHook>) -> Result<Node> {
        let node = match self {
            ItemDescription::Switch {
                common,
                key,
                default,
            } => apply_common(Switch::new(key, &common.title).with_default(*default), common)?.into(),
            ItemDescription::Slider {
                common,
                key,
                default,
                min,
                max,
                snap_to_ints,
                min_icon,
                max_icon,
            } => {
                let mut slider = Slider::new(key, &common.title)
                    .with_default(*default)
                    .snap_to_ints(*snap_to_ints);
                let minimum = min.unwrap_or(slider.minimum_value());
                let maximum = max.unwrap_or(slider.maximum_value());
                if minimum > maximum {
                    bail!("Slider '{}' has minimum {} above maximum {}", key, minimum, maximum);
                }
                slider = slider.with_range(minimum, maximum);
                if min_icon.is_some() || max_icon.is_some() {
                    slider = slider.with_value_icons(
                        min_icon.clone().unwrap_or_default(),
                        max_icon.clone().unwrap_or_default(),
                    );
                }
                apply_common(slider, common)?.into()
            }
            ItemDescription::TextField {
                common,
                key,
                default,
                secure,
                placeholder,
            } => {
                let mut field = TextField::new(key, &common.title)
                    .with_default(default)
                    .secure(*secure);
                if let Some(placeholder) = placeholder {
                    field = field.with_placeholder(placeholder);
                }
                apply_common(field, common)?.into()
            }
            ItemDescription::TextOnly {
                common,
                text,
                clickable,
                message,
            } => {
                let mut row = TextOnly::new(&common.title, text).clickable(*clickable);
                if let Some(message) = message {
                    row = row.on_clicked(message_callback(message.clone(), hook.cloned()));
                }
                apply_common(row, common)?.into()
            }
            ItemDescription::OptionsButton {
                common,
                key,
                options,
            } => {
                let mut button = apply_common(OptionsButton::new(key, &common.title), common)?;
                for option in options {
                    button.with(option.build()?);
                }
                button.into()
            }
            ItemDescription::Screen(screen) => screen.build(hook)?.into(),
            ItemDescription::Section {
                common,
                footer,
                items,
            } => build_section(common, footer, items, hook)?.into(),
        };
        Ok(node)
    }
}

fn build_section(
    common: &CommonFields,
    footer: &Option<String>,
    items: &[ItemDescription],
    hook: Option<&MessageHook>,
) -> Result<Section> {
    let mut section = apply_common(Section::new(&common.title), common)?;
    if let Some(footer) = footer {
        section = section.with_footer(footer);
    }
    for item in items {
        section.with(item.build(hook)?);
    }
    Ok(section)
}

fn message_callback(message: String, hook: Option<MessageHook>) -> impl Fn() + 'static {
    move || match &hook {
        Some(hook) => hook(&message),
        None => tracing::info!("CLICK: {}", message),
    }
}

/// Apply the shared metadata fields to a freshly built node
fn apply_common<T: Titled>(mut node: T, common: &CommonFields) -> Result<T> {
    if let Some(subtitle) = &common.subtitle {
        node = node.with_subtitle(subtitle);
    }
    if let Some(icon) = &common.icon {
        node = node.with_icon(icon);
    }
    if common.color.is_some() || common.bold {
        let fg = match &common.color {
            Some(color) => Some(
                parse_color(color)
                    .with_context(|| format!("Invalid color '{}' on '{}'", color, common.title))?,
            ),
            None => None,
        };
        node = node.with_style(TextStyle {
            fg,
            bold: common.bold,
        });
    }
    Ok(node.disabled(common.disabled))
}

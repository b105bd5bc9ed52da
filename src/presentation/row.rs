use crate::node::{Node, TextStyle};

/// Display projection of a single node
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub title: String,
    pub subtitle: Option<String>,
    pub icon: Option<String>,
    pub style: Option<TextStyle>,
    pub disabled: bool,
    pub selectable: bool,
    pub detail: RowDetail,
}

/// Kind-specific part of a row
#[derive(Debug, Clone, PartialEq)]
pub enum RowDetail {
    Switch {
        on: bool,
    },
    /// `value` is already clamped to the bounds and snapped
    Slider {
        value: f32,
        minimum: f32,
        maximum: f32,
        snap_to_ints: bool,
        minimum_icon: Option<String>,
        maximum_icon: Option<String>,
    },
    /// `text` is masked when the field is secure
    TextField {
        text: String,
        placeholder: Option<String>,
        secure: bool,
    },
    Option {
        selected: bool,
    },
    OptionsButton {
        selected: String,
    },
    /// Row opens a nested screen
    Disclosure,
    Text(String),
    /// Container nested inside a section
    ///
    /// Display-only: the row shows the child count and cannot be selected, so
    /// the children are never reached from the host. Put editable rows in a
    /// nested `Screen` instead.
    Group {
        len: usize,
    },
}

/// Mask character used for secure text
pub const SECURE_MASK: char = '•';

/// Whether selecting `node` does anything beyond its inline control
pub fn is_selectable(node: &Node) -> bool {
    if node.base().disabled {
        return false;
    }
    match node {
        Node::Screen(_) | Node::OptionsButton(_) | Node::Option(_) => true,
        Node::TextOnly(text) => text.is_clickable(),
        Node::Section(_)
        | Node::Switch(_)
        | Node::Slider(_)
        | Node::OptionsSection(_)
        | Node::ToggleSection(_)
        | Node::TextField(_) => false,
    }
}

/// Project `node` and its current stored value into a row
pub fn project(node: &Node) -> Row {
    let base = node.base();
    Row {
        title: base.title.clone(),
        subtitle: base.subtitle.clone(),
        icon: base.icon.clone(),
        style: base.style,
        disabled: base.disabled,
        selectable: is_selectable(node),
        detail: detail(node),
    }
}

fn detail(node: &Node) -> RowDetail {
    match node {
        Node::Switch(switch) => RowDetail::Switch { on: switch.value() },
        Node::Slider(slider) => RowDetail::Slider {
            value: slider.display_value(),
            minimum: slider.minimum_value(),
            maximum: slider.maximum_value(),
            snap_to_ints: slider.snaps_to_ints(),
            minimum_icon: slider.value_icons().0.map(str::to_string),
            maximum_icon: slider.value_icons().1.map(str::to_string),
        },
        Node::TextField(field) => {
            let value = field.value();
            let text = if field.is_secure() {
                SECURE_MASK.to_string().repeat(value.chars().count())
            } else {
                value
            };
            RowDetail::TextField {
                text,
                placeholder: field.placeholder().map(str::to_string),
                secure: field.is_secure(),
            }
        }
        Node::Option(option) => RowDetail::Option {
            selected: option.is_selected().unwrap_or(false),
        },
        Node::OptionsButton(button) => RowDetail::OptionsButton {
            selected: button.selected_option_title(),
        },
        Node::Screen(_) => RowDetail::Disclosure,
        Node::TextOnly(text) => RowDetail::Text(text.value().to_string()),
        Node::Section(section) => RowDetail::Group { len: section.len() },
        Node::OptionsSection(section) => RowDetail::Group {
            len: section.items().len(),
        },
        Node::ToggleSection(section) => RowDetail::Group {
            len: section.items().len(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{
        OptionItem, OptionsButton, Screen, Section, Slider, Switch, TextField, TextOnly, Titled,
    };
    use crate::storage::{shared, MemoryStorage, SettingsStorage};

    #[test]
    fn test_selectability_by_kind() {
        assert!(is_selectable(&Screen::new("S").into()));
        assert!(is_selectable(&OptionsButton::new("k", "K").into()));
        assert!(is_selectable(&OptionItem::new("A", 1).into()));
        assert!(!is_selectable(&Switch::new("s", "S").into()));
        assert!(!is_selectable(&Slider::new("v", "V").into()));
        assert!(!is_selectable(&TextField::new("t", "T").into()));
        assert!(!is_selectable(&TextOnly::new("About", "").into()));
        assert!(is_selectable(&TextOnly::new("About", "").clickable(true).into()));
    }

    #[test]
    fn test_nested_section_is_a_display_only_group() {
        let node: Node = Section::build("Inner", || vec![Switch::new("s", "S").into()]).into();

        let row = project(&node);

        assert_eq!(row.detail, RowDetail::Group { len: 1 });
        assert!(!row.selectable);
    }

    #[test]
    fn test_disabled_rows_are_not_selectable() {
        let node: Node = Screen::new("S").disabled(true).into();
        let row = project(&node);
        assert!(row.disabled);
        assert!(!row.selectable);
    }

    #[test]
    fn test_secure_text_is_masked() {
        let storage = shared(MemoryStorage::new());
        let mut node: Node = TextField::new("pw", "Password")
            .secure(true)
            .with_placeholder("required")
            .into();
        node.bind(&storage);
        storage.borrow_mut().write_text("pw", Some("hunter2".to_string()));

        assert_eq!(
            project(&node).detail,
            RowDetail::TextField {
                text: "•••••••".to_string(),
                placeholder: Some("required".to_string()),
                secure: true,
            }
        );
    }

    #[test]
    fn test_slider_row_is_clamped() {
        let storage = shared(MemoryStorage::new());
        let mut node: Node = Slider::new("v", "V").with_range(0.0, 10.0).into();
        node.bind(&storage);
        storage.borrow_mut().write_number("v", Some(42.0));

        let RowDetail::Slider { value, maximum, .. } = project(&node).detail else {
            panic!("expected slider detail");
        };
        assert_eq!(value, 10.0);
        assert_eq!(maximum, 10.0);
    }

    #[test]
    fn test_slider_row_carries_value_icons() {
        let node: Node = Slider::new("dimmer", "Dimmer")
            .with_range(0.0, 7.0)
            .with_value_icons("dim", "bright")
            .into();

        assert_eq!(
            project(&node).detail,
            RowDetail::Slider {
                value: 0.0,
                minimum: 0.0,
                maximum: 7.0,
                snap_to_ints: false,
                minimum_icon: Some("dim".to_string()),
                maximum_icon: Some("bright".to_string()),
            }
        );
    }

    #[test]
    fn test_base_fields_copied() {
        let node: Node = Switch::new("s", "Sound")
            .with_subtitle("Alerts")
            .with_icon("bell")
            .into();
        let row = project(&node);
        assert_eq!(row.title, "Sound");
        assert_eq!(row.subtitle.as_deref(), Some("Alerts"));
        assert_eq!(row.icon.as_deref(), Some("bell"));
        assert_eq!(row.detail, RowDetail::Switch { on: false });
    }
}

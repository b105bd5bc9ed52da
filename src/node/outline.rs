/// Flattened, printable view of a settings tree
///
/// Used by the `show` command and to compare trees built in different ways.
use std::fmt;

use super::{Node, Screen, SectionNode, Titled};

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineLine {
    pub depth: usize,
    pub kind: &'static str,
    pub title: String,
    pub key: Option<String>,
    pub value: Option<String>,
}

impl fmt::Display for OutlineLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] {}", "  ".repeat(self.depth), self.kind, self.title)?;
        if let Some(key) = &self.key {
            write!(f, " ({})", key)?;
        }
        if let Some(value) = &self.value {
            write!(f, " = {}", value)?;
        }
        Ok(())
    }
}

/// Walk `screen` depth-first, hidden rows included
pub fn outline(screen: &Screen) -> Vec<OutlineLine> {
    let mut lines = Vec::new();
    push_screen(screen, 0, &mut lines);
    lines
}

fn push_screen(screen: &Screen, depth: usize, lines: &mut Vec<OutlineLine>) {
    lines.push(OutlineLine {
        depth,
        kind: "screen",
        title: screen.title().to_string(),
        key: None,
        value: None,
    });
    for section in screen.sections() {
        push_section(section, depth + 1, lines);
    }
}

fn push_section(section: &SectionNode, depth: usize, lines: &mut Vec<OutlineLine>) {
    let (kind, key) = match section {
        SectionNode::Plain(_) => ("section", None),
        SectionNode::Options(s) => ("options_section", Some(s.key())),
        SectionNode::Toggle(_) => ("toggle_section", None),
    };
    push_group(
        kind,
        key,
        section.title(),
        section.footer(),
        section.items(),
        depth,
        lines,
    );
}

fn push_group(
    kind: &'static str,
    key: Option<&str>,
    title: &str,
    footer: Option<&str>,
    items: &[Node],
    depth: usize,
    lines: &mut Vec<OutlineLine>,
) {
    lines.push(OutlineLine {
        depth,
        kind,
        title: title.to_string(),
        key: key.map(str::to_string),
        value: footer.map(|f| format!("footer {:?}", f)),
    });
    for item in items {
        push_node(item, depth + 1, lines);
    }
}

fn push_node(node: &Node, depth: usize, lines: &mut Vec<OutlineLine>) {
    match node {
        Node::Screen(screen) => push_screen(screen, depth, lines),
        Node::Section(s) => push_group("section", None, s.title(), s.footer(), s.items(), depth, lines),
        Node::OptionsSection(s) => push_group(
            "options_section",
            Some(s.key()),
            s.title(),
            s.footer(),
            s.items(),
            depth,
            lines,
        ),
        Node::ToggleSection(s) => push_group(
            "toggle_section",
            None,
            s.title(),
            s.footer(),
            s.items(),
            depth,
            lines,
        ),
        Node::OptionsButton(button) => {
            lines.push(leaf_line(node, depth, Some(button.selected_option_title())));
            for option in button.options() {
                push_node(option, depth + 1, lines);
            }
        }
        Node::Switch(n) => lines.push(leaf_line(node, depth, Some(n.value().to_string()))),
        Node::Slider(n) => lines.push(leaf_line(node, depth, Some(n.value().to_string()))),
        Node::TextField(n) => {
            let value = if n.is_secure() {
                "•".repeat(n.value().chars().count())
            } else {
                format!("{:?}", n.value())
            };
            lines.push(leaf_line(node, depth, Some(value)));
        }
        Node::Option(n) => {
            let value = match n.is_selected() {
                Ok(true) => format!("#{} selected", n.option_id()),
                Ok(false) => format!("#{}", n.option_id()),
                Err(_) => format!("#{} unattached", n.option_id()),
            };
            lines.push(leaf_line(node, depth, Some(value)));
        }
        Node::TextOnly(n) => lines.push(leaf_line(node, depth, Some(n.value().to_string()))),
    }
}

fn leaf_line(node: &Node, depth: usize, value: Option<String>) -> OutlineLine {
    OutlineLine {
        depth,
        kind: node.kind_name(),
        title: node.title().to_string(),
        key: node.key().map(str::to_string),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{OptionItem, OptionsButton, Section, Switch, TextField};

    #[test]
    fn test_outline_lists_every_node() {
        let screen = Screen::build("Root", || {
            vec![Section::build("General", || {
                vec![
                    Switch::new("wifi", "Wi-Fi").with_default(true).into(),
                    OptionsButton::build("tariff", "Tariff", || {
                        vec![OptionItem::new("Day", 1)]
                    })
                    .into(),
                ]
            })
            .into()]
        });

        let lines: Vec<String> = outline(&screen).iter().map(|l| l.to_string()).collect();

        assert_eq!(
            lines,
            vec![
                "[screen] Root",
                "  [section] General",
                "    [switch] Wi-Fi (wifi) = true",
                "    [options_button] Tariff (tariff) = ",
                "      [option] Day (tariff) = #1",
            ]
        );
    }

    #[test]
    fn test_outline_masks_secure_text() {
        let screen = Screen::build("Root", || {
            vec![Section::build("Admin", || {
                vec![TextField::new("pw", "Password")
                    .secure(true)
                    .with_default("abc")
                    .into()]
            })
            .into()]
        });

        let lines = outline(&screen);
        assert_eq!(lines[2].value.as_deref(), Some("•••"));
    }
}

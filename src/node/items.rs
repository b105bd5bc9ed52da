/// Leaf settings
///
/// Every leaf reads `storage[key] ?? default` and writes through to storage
/// before invoking its change callback. Unbound leaves read their default and
/// drop writes.
use std::fmt;
use std::rc::Rc;

use super::{NodeBase, ValueChanged};
use crate::error::{SettingsError, SettingsResult};

fn notify<T>(callback: &Option<ValueChanged<T>>, key: &str, value: &T) {
    if let Some(cb) = callback {
        cb(key, value);
    }
}

/// Boolean leaf
#[derive(Clone)]
pub struct Switch {
    pub(crate) base: NodeBase,
    key: String,
    default_value: bool,
    on_value_changed: Option<ValueChanged<bool>>,
}

impl Switch {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            base: NodeBase::new(title),
            key: key.into(),
            default_value: false,
            on_value_changed: None,
        }
    }

    pub fn with_default(mut self, value: bool) -> Self {
        self.default_value = value;
        self
    }

    pub fn on_value_changed(mut self, f: impl Fn(&str, &bool) + 'static) -> Self {
        self.on_value_changed = Some(Rc::new(f));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> bool {
        self.default_value
    }

    pub fn value(&self) -> bool {
        self.base
            .read(|s| s.read_bool(&self.key))
            .unwrap_or(self.default_value)
    }

    pub fn set_value(&self, value: bool) {
        if self.base.write(&self.key, |s| s.write_bool(&self.key, Some(value))) {
            notify(&self.on_value_changed, &self.key, &value);
        }
    }
}

impl fmt::Debug for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Switch")
            .field("base", &self.base)
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .finish()
    }
}

/// Floating-point leaf with display bounds
///
/// Values are persisted as `f64` and narrowed to `f32` on read. The bounds are
/// only applied by [`Slider::display_value`]; storage may hold anything.
#[derive(Clone)]
pub struct Slider {
    pub(crate) base: NodeBase,
    key: String,
    default_value: f32,
    minimum_value: f32,
    maximum_value: f32,
    snap_to_ints: bool,
    minimum_value_icon: Option<String>,
    maximum_value_icon: Option<String>,
    on_value_changed: Option<ValueChanged<f32>>,
}

impl Slider {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            base: NodeBase::new(title),
            key: key.into(),
            default_value: 0.0,
            minimum_value: 0.0,
            maximum_value: 100.0,
            snap_to_ints: false,
            minimum_value_icon: None,
            maximum_value_icon: None,
            on_value_changed: None,
        }
    }

    pub fn with_default(mut self, value: f32) -> Self {
        self.default_value = value;
        self
    }

    pub fn with_range(mut self, minimum: f32, maximum: f32) -> Self {
        self.minimum_value = minimum;
        self.maximum_value = maximum;
        self
    }

    pub fn snap_to_ints(mut self, snap: bool) -> Self {
        self.snap_to_ints = snap;
        self
    }

    pub fn with_value_icons(mut self, minimum: impl Into<String>, maximum: impl Into<String>) -> Self {
        self.minimum_value_icon = Some(minimum.into());
        self.maximum_value_icon = Some(maximum.into());
        self
    }

    pub fn on_value_changed(mut self, f: impl Fn(&str, &f32) + 'static) -> Self {
        self.on_value_changed = Some(Rc::new(f));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    pub fn minimum_value(&self) -> f32 {
        self.minimum_value
    }

    pub fn maximum_value(&self) -> f32 {
        self.maximum_value
    }

    pub fn snaps_to_ints(&self) -> bool {
        self.snap_to_ints
    }

    pub fn value_icons(&self) -> (Option<&str>, Option<&str>) {
        (
            self.minimum_value_icon.as_deref(),
            self.maximum_value_icon.as_deref(),
        )
    }

    pub fn value(&self) -> f32 {
        self.base
            .read(|s| s.read_number(&self.key))
            .map(|n| n as f32)
            .unwrap_or(self.default_value)
    }

    pub fn set_value(&self, value: f32) {
        let stored = f64::from(value);
        if self.base.write(&self.key, |s| s.write_number(&self.key, Some(stored))) {
            notify(&self.on_value_changed, &self.key, &value);
        }
    }

    /// Apply the rounding policy to a raw control value
    pub fn snapped(&self, value: f32) -> f32 {
        if self.snap_to_ints {
            value.round()
        } else {
            value
        }
    }

    /// Current value clamped to the bounds and snapped, as shown to the user
    pub fn display_value(&self) -> f32 {
        let clamped = self.value().max(self.minimum_value).min(self.maximum_value);
        self.snapped(clamped)
    }
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("base", &self.base)
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .field("minimum_value", &self.minimum_value)
            .field("maximum_value", &self.maximum_value)
            .field("snap_to_ints", &self.snap_to_ints)
            .field("minimum_value_icon", &self.minimum_value_icon)
            .field("maximum_value_icon", &self.maximum_value_icon)
            .finish()
    }
}

/// Text entry leaf
#[derive(Clone)]
pub struct TextField {
    pub(crate) base: NodeBase,
    key: String,
    default_value: String,
    secure_text_entry: bool,
    placeholder: Option<String>,
    on_value_changed: Option<ValueChanged<String>>,
}

impl TextField {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            base: NodeBase::new(title),
            key: key.into(),
            default_value: String::new(),
            secure_text_entry: false,
            placeholder: None,
            on_value_changed: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure_text_entry = secure;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn on_value_changed(mut self, f: impl Fn(&str, &String) + 'static) -> Self {
        self.on_value_changed = Some(Rc::new(f));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn is_secure(&self) -> bool {
        self.secure_text_entry
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn value(&self) -> String {
        self.base
            .read(|s| s.read_text(&self.key))
            .unwrap_or_else(|| self.default_value.clone())
    }

    pub fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        if self
            .base
            .write(&self.key, |s| s.write_text(&self.key, Some(value.clone())))
        {
            notify(&self.on_value_changed, &self.key, &value);
        }
    }
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("base", &self.base)
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .field("secure_text_entry", &self.secure_text_entry)
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

/// One choice of an options container
///
/// An option has no key of its own: it writes its id under the key of the
/// container it was attached to.
#[derive(Clone)]
pub struct OptionItem {
    pub(crate) base: NodeBase,
    option_id: i64,
    default_value: i64,
    container_key: Option<String>,
    navigate_back: bool,
    on_value_changed: Option<ValueChanged<i64>>,
}

impl OptionItem {
    pub fn new(title: impl Into<String>, option_id: i64) -> Self {
        Self {
            base: NodeBase::new(title),
            option_id,
            default_value: 0,
            container_key: None,
            navigate_back: false,
            on_value_changed: None,
        }
    }

    pub fn with_default(mut self, value: i64) -> Self {
        self.default_value = value;
        self
    }

    pub fn on_value_changed(mut self, f: impl Fn(&str, &i64) + 'static) -> Self {
        self.on_value_changed = Some(Rc::new(f));
        self
    }

    pub(crate) fn attach(&mut self, container_key: &str, navigate_back: bool) {
        self.container_key = Some(container_key.to_string());
        self.navigate_back = navigate_back;
    }

    pub fn option_id(&self) -> i64 {
        self.option_id
    }

    pub fn default_value(&self) -> i64 {
        self.default_value
    }

    /// Whether selecting this option should pop the page it is shown on
    pub fn navigates_back(&self) -> bool {
        self.navigate_back
    }

    pub fn container_key(&self) -> SettingsResult<&str> {
        self.container_key
            .as_deref()
            .ok_or_else(|| SettingsError::ContainerNotAttached {
                title: self.base.title.clone(),
            })
    }

    pub fn value(&self) -> SettingsResult<i64> {
        let key = self.container_key()?;
        Ok(self
            .base
            .read(|s| s.read_number(key))
            .map(|n| n as i64)
            .unwrap_or(self.default_value))
    }

    pub fn set_value(&self, value: i64) -> SettingsResult<()> {
        let key = self.container_key()?;
        if self.base.write(key, |s| s.write_number(key, Some(value as f64))) {
            notify(&self.on_value_changed, key, &value);
        }
        Ok(())
    }

    pub fn is_selected(&self) -> SettingsResult<bool> {
        Ok(self.value()? == self.option_id)
    }

    /// Make this option the container's current choice
    pub fn select(&self) -> SettingsResult<()> {
        self.set_value(self.option_id)
    }
}

impl fmt::Debug for OptionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionItem")
            .field("base", &self.base)
            .field("option_id", &self.option_id)
            .field("default_value", &self.default_value)
            .field("container_key", &self.container_key)
            .field("navigate_back", &self.navigate_back)
            .finish()
    }
}

/// Display-only leaf; its value never changes
#[derive(Debug, Clone)]
pub struct TextOnly {
    pub(crate) base: NodeBase,
    text: String,
    clickable: bool,
}

impl TextOnly {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            base: NodeBase::new(title),
            text: text.into(),
            clickable: false,
        }
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    /// Ignored; kept so every leaf accepts writes uniformly
    pub fn set_value(&self, _value: impl Into<String>) {
        tracing::trace!("STORAGE: Ignoring write to text-only row '{}'", self.base.title);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::node::{Node, OptionsSection, SectionNode, Titled};
    use crate::storage::{shared, MemoryStorage, SettingsStorage, StorageHandle};

    fn bound<T: Titled>(mut node: T, storage: &StorageHandle) -> T {
        node.base_mut().bind(storage);
        node
    }

    #[test]
    fn test_unwritten_keys_read_defaults() {
        let storage = shared(MemoryStorage::new());

        let switch = bound(Switch::new("s", "S").with_default(true), &storage);
        let slider = bound(Slider::new("v", "V").with_default(5.0), &storage);
        let field = bound(TextField::new("t", "T").with_default("abc"), &storage);
        let text = bound(TextOnly::new("About", "1.0"), &storage);

        assert!(switch.value());
        assert_eq!(slider.value(), 5.0);
        assert_eq!(field.value(), "abc");
        assert_eq!(text.value(), "1.0");
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let storage = shared(MemoryStorage::new());

        let switch = bound(Switch::new("s", "S"), &storage);
        let slider = bound(Slider::new("v", "V"), &storage);
        let field = bound(TextField::new("t", "T"), &storage);

        switch.set_value(true);
        slider.set_value(42.5);
        field.set_value("hello");

        assert!(switch.value());
        assert_eq!(slider.value(), 42.5);
        assert_eq!(field.value(), "hello");
    }

    #[test]
    fn test_text_only_ignores_writes() {
        let storage = shared(MemoryStorage::new());
        let text = bound(TextOnly::new("Version", "1.0.0"), &storage);

        text.set_value("2.0.0");

        assert_eq!(text.value(), "1.0.0");
    }

    #[test]
    fn test_unbound_read_returns_default() {
        let switch = Switch::new("s", "S").with_default(true);
        assert!(switch.value());
    }

    #[test]
    fn test_unbound_write_is_dropped() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let switch = Switch::new("s", "S").on_value_changed(move |_, _| {
            counter.set(counter.get() + 1);
        });

        switch.set_value(true);

        assert!(!switch.value());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_set_value_invokes_callback_with_key() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let storage = shared(MemoryStorage::new());
        let field = bound(
            TextField::new("name", "Name").on_value_changed(move |k, v| {
                sink.borrow_mut().push((k.to_string(), v.clone()));
            }),
            &storage,
        );

        field.set_value("den");

        assert_eq!(
            *seen.borrow(),
            vec![("name".to_string(), "den".to_string())]
        );
    }

    #[test]
    fn test_switch_callback_receives_key_and_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let storage = shared(MemoryStorage::new());
        let switch = bound(
            Switch::new("lights", "Lights").on_value_changed(move |k, v| {
                sink.borrow_mut().push((k.to_string(), *v));
            }),
            &storage,
        );

        switch.set_value(true);
        switch.set_value(false);

        assert_eq!(
            *seen.borrow(),
            vec![("lights".to_string(), true), ("lights".to_string(), false)]
        );
    }

    #[test]
    fn test_slider_callback_receives_key_and_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let storage = shared(MemoryStorage::new());
        let slider = bound(
            Slider::new("volume", "Volume").on_value_changed(move |k, v| {
                sink.borrow_mut().push((k.to_string(), *v));
            }),
            &storage,
        );

        slider.set_value(7.5);

        assert_eq!(*seen.borrow(), vec![("volume".to_string(), 7.5)]);
    }

    #[test]
    fn test_option_callback_uses_container_key_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let options: Vec<OptionItem> = (1..=3)
            .map(|id| {
                let sink = Rc::clone(&seen);
                OptionItem::new(format!("Option {}", id), id).on_value_changed(move |k, v| {
                    sink.borrow_mut().push((k.to_string(), *v));
                })
            })
            .collect();
        let storage = shared(MemoryStorage::new());
        let mut section: SectionNode = OptionsSection::build("alarm", "Alarm", || options).into();
        section.bind(&storage);

        let chosen = section
            .items()
            .iter()
            .filter_map(Node::as_option)
            .find(|o| o.option_id() == 2)
            .unwrap();
        chosen.select().unwrap();

        assert_eq!(*seen.borrow(), vec![("alarm".to_string(), 2)]);
        assert_eq!(storage.borrow().read_number("alarm"), Some(2.0));
    }

    #[test]
    fn test_slider_persists_as_f64() {
        let storage = shared(MemoryStorage::new());
        let slider = bound(Slider::new("v", "V"), &storage);

        slider.set_value(0.1);

        let stored = storage.borrow().read_number("v").unwrap();
        assert_eq!(stored, f64::from(0.1f32));
        assert_eq!(slider.value(), 0.1f32);
    }

    #[test]
    fn test_slider_display_value_clamps_and_snaps() {
        let storage = shared(MemoryStorage::new());
        let slider = bound(
            Slider::new("v", "V").with_range(0.0, 10.0).snap_to_ints(true),
            &storage,
        );

        storage.borrow_mut().write_number("v", Some(25.0));
        assert_eq!(slider.display_value(), 10.0);
        // Out-of-range values stay in storage untouched
        assert_eq!(slider.value(), 25.0);

        storage.borrow_mut().write_number("v", Some(3.6));
        assert_eq!(slider.display_value(), 4.0);

        storage.borrow_mut().write_number("v", Some(-2.0));
        assert_eq!(slider.display_value(), 0.0);
    }

    #[test]
    fn test_slider_snapped_rounds_half_away_from_zero() {
        let slider = Slider::new("v", "V").snap_to_ints(true);
        assert_eq!(slider.snapped(7.4), 7.0);
        assert_eq!(slider.snapped(7.5), 8.0);
        assert_eq!(slider.snapped(-2.5), -3.0);

        let free = Slider::new("v", "V");
        assert_eq!(free.snapped(7.4), 7.4);
    }

    #[test]
    fn test_unattached_option_reports_error() {
        let storage = shared(MemoryStorage::new());
        let option = bound(OptionItem::new("Day", 1), &storage);

        assert_eq!(
            option.value(),
            Err(SettingsError::ContainerNotAttached {
                title: "Day".to_string()
            })
        );
        assert!(option.select().is_err());
        assert!(option.is_selected().is_err());
    }

    #[test]
    fn test_attached_option_writes_container_key() {
        let storage = shared(MemoryStorage::new());
        let mut option = bound(OptionItem::new("Night", 2), &storage);
        option.attach("tariff", true);

        option.select().unwrap();

        assert_eq!(storage.borrow().read_number("tariff"), Some(2.0));
        assert!(option.is_selected().unwrap());
        assert!(option.navigates_back());
    }
}

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::node::{Screen, SectionNode};
use crate::storage::StorageHandle;

/// Root of a settings tree
///
/// Owns the storage handle and the main screen. Construction binds the storage
/// into every node below the main screen, so nothing reached through a
/// `Settings` is ever unbound.
pub struct Settings {
    main: Screen,
    storage: StorageHandle,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("main", &self.main)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Build a root screen from a title and a list of sections
    pub fn new(storage: StorageHandle, title: impl Into<String>, sections: Vec<SectionNode>) -> Self {
        Self::from_screen(storage, Screen::build(title, || sections))
    }

    /// Build a root screen from a title and a section-building closure
    pub fn build(
        storage: StorageHandle,
        title: impl Into<String>,
        sections: impl FnOnce() -> Vec<SectionNode>,
    ) -> Self {
        Self::from_screen(storage, Screen::build(title, sections))
    }

    /// Use a pre-built root screen
    pub fn from_screen(storage: StorageHandle, main: Screen) -> Self {
        let mut settings = Self { main, storage };
        settings.bind_storage();
        settings
    }

    pub fn main(&self) -> &Screen {
        &self.main
    }

    pub fn storage(&self) -> &StorageHandle {
        &self.storage
    }

    /// Replace the main screen and bind storage into it
    pub fn set_main(&mut self, main: Screen) {
        self.main = main;
        self.bind_storage();
    }

    /// Bind the root's storage into every node again
    ///
    /// Idempotent: stored values are never touched.
    pub fn bind_storage(&mut self) {
        debug!("SETTINGS: Binding storage into '{}'", self.main.base.title);
        let storage = Rc::clone(&self.storage);
        self.main.bind(&storage);
    }
}

pub mod config;
pub mod error;
pub mod loader;
pub mod node;
pub mod presentation;
pub mod settings;
pub mod storage;
pub mod tui;

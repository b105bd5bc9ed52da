use std::fmt;

use super::IndexPath;
use crate::node::ClickedCallback;

/// Follow-up work produced by a controller operation
///
/// Reloads tell the host which part of the current page to redraw. `Clicked`
/// carries a node's click callback, which the host must run on its loop after
/// the transition that produced it.
#[derive(Clone)]
pub enum Effect {
    None,
    ReloadData,
    ReloadSection(usize),
    ReloadRow(IndexPath),
    Clicked(ClickedCallback),
    Batch(Vec<Effect>),
}

impl Effect {
    /// Combine effects, dropping `None` and unwrapping single-element batches
    pub fn batch(effects: Vec<Effect>) -> Effect {
        let mut effects: Vec<Effect> = effects.into_iter().filter(|e| !e.is_none()).collect();
        match effects.len() {
            0 => Effect::None,
            1 => effects.remove(0),
            _ => Effect::Batch(effects),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Every non-batch effect, in order
    pub fn flatten(self) -> Vec<Effect> {
        match self {
            Effect::None => Vec::new(),
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::flatten).collect(),
            other => vec![other],
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => write!(f, "None"),
            Effect::ReloadData => write!(f, "ReloadData"),
            Effect::ReloadSection(section) => write!(f, "ReloadSection({})", section),
            Effect::ReloadRow(path) => write!(f, "ReloadRow({:?})", path),
            Effect::Clicked(_) => write!(f, "Clicked(..)"),
            Effect::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
        }
    }
}

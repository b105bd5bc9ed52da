use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::action::Action;
use super::reducer::{clamp_cursor, reduce};
use super::state::ViewState;
use crate::presentation::{Effect, SettingsController};

/// Settings host runtime - owns the controller and drives it through actions
///
/// The Runtime is responsible for:
/// - Owning the controller and the host view state
/// - Dispatching actions through the reducer
/// - Turning controller effects into follow-up actions, so click callbacks
///   run after the transition that produced them
pub struct Runtime {
    controller: SettingsController,
    view: ViewState,

    /// Channel for dispatching actions
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl Runtime {
    pub fn new(controller: SettingsController) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self::with_channel(controller, action_tx, action_rx)
    }

    /// Create a runtime over an existing channel
    ///
    /// Used when node hooks need a sender before the tree is built.
    pub fn with_channel(
        controller: SettingsController,
        action_tx: mpsc::UnboundedSender<Action>,
        action_rx: mpsc::UnboundedReceiver<Action>,
    ) -> Self {
        let mut view = ViewState::default();
        clamp_cursor(&controller, &mut view);
        Self {
            controller,
            view,
            action_tx,
            action_rx,
        }
    }

    pub fn controller(&self) -> &SettingsController {
        &self.controller
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Run an action through the reducer and execute the resulting effect
    pub fn dispatch(&mut self, action: Action) {
        trace!("ACTION: Dispatching {:?}", action);
        let effect = reduce(&mut self.controller, &mut self.view, action);
        self.execute_effect(effect);
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::ReloadData | Effect::ReloadSection(_) | Effect::ReloadRow(_) => {
                trace!("EFFECT: {:?}", effect);
                let _ = self.action_tx.send(Action::Reload);
            }
            Effect::Clicked(callback) => {
                debug!("EFFECT: Queueing click callback");
                let _ = self.action_tx.send(Action::RunCallback(callback));
            }
            Effect::Batch(effects) => {
                for e in effects {
                    self.execute_effect(e);
                }
            }
        }
    }

    /// Process all pending actions in the queue
    ///
    /// Returns the number of actions processed
    pub fn process_actions(&mut self) -> usize {
        let mut count = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            count += 1;
        }
        count
    }

    /// Get a sender for dispatching actions from external sources
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }
}

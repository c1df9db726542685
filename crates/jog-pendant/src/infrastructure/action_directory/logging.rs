//! Directory whose actions only log.
//!
//! Useful for bench-testing a pendant and its mapping table without a
//! machine or front end attached.

use std::collections::HashMap;
use std::sync::Arc;

use jog_core::CommandRole;
use tracing::info;

use crate::application::command_table::{Action, ActionDirectory, ActionHandle};

/// An always-enabled action that logs each invocation.
pub struct LoggingAction {
    role: CommandRole,
}

impl Action for LoggingAction {
    fn is_enabled(&self) -> bool {
        true
    }

    fn perform(&self) {
        info!(command = %self.role, "command performed");
    }
}

/// Resolves every [`CommandRole`] action id to a [`LoggingAction`].
pub struct LoggingActionDirectory {
    actions: HashMap<&'static str, ActionHandle>,
}

impl LoggingActionDirectory {
    pub fn new() -> Self {
        let actions = CommandRole::ALL
            .into_iter()
            .map(|role| {
                let handle: ActionHandle = Arc::new(LoggingAction { role });
                (role.action_id(), handle)
            })
            .collect();
        Self { actions }
    }
}

impl Default for LoggingActionDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionDirectory for LoggingActionDirectory {
    fn resolve(&self, action_id: &str) -> Option<ActionHandle> {
        self.actions.get(action_id).cloned()
    }
}

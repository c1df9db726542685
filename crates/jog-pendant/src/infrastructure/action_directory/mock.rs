//! Recording action directory for tests.
//!
//! Every registered action counts its invocations and appends its id to a
//! journal shared by the whole directory, so tests can assert both how often
//! and in which order commands ran.  Availability can be delayed by a number
//! of lookups to exercise the start-up retry loop.

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc, Mutex,
};

use jog_core::CommandRole;

use crate::application::command_table::{Action, ActionDirectory, ActionHandle};

/// An action that records how often it was performed.
pub struct RecordingAction {
    action_id: String,
    enabled: AtomicBool,
    performed: AtomicU32,
    journal: Arc<Mutex<Vec<String>>>,
}

impl RecordingAction {
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn performed_count(&self) -> u32 {
        self.performed.load(Ordering::SeqCst)
    }
}

impl Action for RecordingAction {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn perform(&self) {
        self.performed.fetch_add(1, Ordering::SeqCst);
        self.journal
            .lock()
            .expect("lock poisoned")
            .push(self.action_id.clone());
    }
}

/// A mock [`ActionDirectory`] backed by [`RecordingAction`]s.
#[derive(Default)]
pub struct MockActionDirectory {
    actions: Mutex<HashMap<String, Arc<RecordingAction>>>,
    /// Remaining lookups that must miss before an id becomes visible.
    delayed: Mutex<HashMap<String, u32>>,
    lookups: AtomicU32,
    journal: Arc<Mutex<Vec<String>>>,
}

impl MockActionDirectory {
    /// Creates an empty directory; nothing resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory with an enabled action for every [`CommandRole`].
    pub fn with_all_commands() -> Self {
        let directory = Self::new();
        for role in CommandRole::ALL {
            directory.register(role.action_id());
        }
        directory
    }

    /// Registers an enabled action under `action_id` and returns it.
    pub fn register(&self, action_id: &str) -> Arc<RecordingAction> {
        let action = Arc::new(RecordingAction {
            action_id: action_id.to_string(),
            enabled: AtomicBool::new(true),
            performed: AtomicU32::new(0),
            journal: Arc::clone(&self.journal),
        });
        self.actions
            .lock()
            .expect("lock poisoned")
            .insert(action_id.to_string(), Arc::clone(&action));
        action
    }

    pub fn unregister(&self, action_id: &str) {
        self.actions.lock().expect("lock poisoned").remove(action_id);
    }

    /// Makes the next `misses` lookups of `action_id` return `None`.
    pub fn delay_availability(&self, action_id: &str, misses: u32) {
        self.delayed
            .lock()
            .expect("lock poisoned")
            .insert(action_id.to_string(), misses);
    }

    /// Returns the action registered for `role`, if any.
    pub fn action(&self, role: CommandRole) -> Option<Arc<RecordingAction>> {
        self.actions
            .lock()
            .expect("lock poisoned")
            .get(role.action_id())
            .cloned()
    }

    pub fn set_enabled(&self, role: CommandRole, enabled: bool) {
        if let Some(action) = self.action(role) {
            action.set_enabled(enabled);
        }
    }

    /// Number of times the action for `role` was performed.
    pub fn performed(&self, role: CommandRole) -> u32 {
        self.action(role).map_or(0, |a| a.performed_count())
    }

    /// Total number of `resolve` calls so far.
    pub fn lookup_count(&self) -> u32 {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Roles performed so far, in order.  Ids that are not command roles are
    /// skipped.
    pub fn performed_roles(&self) -> Vec<CommandRole> {
        self.journal
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter_map(|id| CommandRole::from_action_id(id))
            .collect()
    }

    /// Total number of performed actions across all roles.
    pub fn total_performed(&self) -> usize {
        self.journal.lock().expect("lock poisoned").len()
    }
}

impl ActionDirectory for MockActionDirectory {
    fn resolve(&self, action_id: &str) -> Option<ActionHandle> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        {
            let mut delayed = self.delayed.lock().expect("lock poisoned");
            if let Some(misses) = delayed.get_mut(action_id) {
                if *misses > 0 {
                    *misses -= 1;
                    return None;
                }
            }
        }

        let actions = self.actions.lock().expect("lock poisoned");
        actions
            .get(action_id)
            .map(|a| Arc::clone(a) as ActionHandle)
    }
}

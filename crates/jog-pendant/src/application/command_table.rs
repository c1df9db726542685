//! Command table: one resolved action handle per [`CommandRole`].
//!
//! The front end registers its actions asynchronously while it boots, so a
//! role may not be resolvable yet when the pendant session starts.  Each role
//! is therefore polled at a fixed interval until the directory returns a
//! handle.  By default there is no upper bound: an action that never appears
//! stalls start-up indefinitely.  A cap can be set through [`RetryPolicy`].
//!
//! # Architecture
//!
//! The directory and the handles are traits.  The infrastructure layer
//! provides a logging directory for dry runs and a recording directory for
//! tests; an embedding front end supplies its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use jog_core::CommandRole;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Default interval between directory lookups.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(20);

/// An invocable front-end command.
#[cfg_attr(test, mockall::automock)]
pub trait Action: Send + Sync {
    /// Whether the command can run right now (e.g. `false` while the machine
    /// is disconnected).
    fn is_enabled(&self) -> bool;

    /// Runs the command once.  Failures are the front end's concern.
    fn perform(&self);
}

/// Shared reference to a resolved action.
pub type ActionHandle = Arc<dyn Action>;

/// Resolves action ids to handles.
pub trait ActionDirectory: Send + Sync {
    /// Returns the handle for `action_id`, or `None` if it is not registered
    /// (yet).
    fn resolve(&self, action_id: &str) -> Option<ActionHandle>;
}

/// Error type for command resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("action {action_id} for {role} still unavailable after {attempts} attempts")]
    Unavailable {
        role: CommandRole,
        action_id: &'static str,
        attempts: u32,
    },
    #[error("command resolution cancelled by shutdown")]
    Cancelled,
}

/// How long to keep polling the directory for each role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_RETRY_INTERVAL,
            max_attempts: None,
        }
    }
}

/// Fully resolved, immutable mapping from role to handle.
pub struct CommandTable {
    /// Indexed by [`CommandRole::index`]; always `CommandRole::COUNT` long.
    handles: Vec<ActionHandle>,
}

impl CommandTable {
    /// Resolves every role, blocking per role until the directory has it.
    ///
    /// `running` is checked before every attempt so that a shutdown request
    /// ends the wait.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Cancelled`] when `running` is cleared, or
    /// [`ResolveError::Unavailable`] when `policy.max_attempts` is exhausted.
    pub fn resolve(
        directory: &dyn ActionDirectory,
        policy: &RetryPolicy,
        running: &AtomicBool,
    ) -> Result<Self, ResolveError> {
        let mut handles = Vec::with_capacity(CommandRole::COUNT);
        for role in CommandRole::ALL {
            handles.push(wait_for_action(directory, role, policy, running)?);
        }
        info!("resolved {} pendant commands", handles.len());
        Ok(Self { handles })
    }

    /// Builds a table from a closure, without a directory.
    pub fn from_fn<F>(mut handle_for: F) -> Self
    where
        F: FnMut(CommandRole) -> ActionHandle,
    {
        Self {
            handles: CommandRole::ALL.into_iter().map(&mut handle_for).collect(),
        }
    }

    pub fn handle(&self, role: CommandRole) -> &ActionHandle {
        &self.handles[role.index()]
    }

    /// Performs `role` `times` times in a row if its handle is enabled.
    ///
    /// A disabled handle is skipped without error.  Returns how many times
    /// the action actually ran.
    pub fn invoke(&self, role: CommandRole, times: u32) -> u32 {
        let handle = self.handle(role);
        if !handle.is_enabled() {
            trace!(command = %role, "command disabled, skipped");
            return 0;
        }
        for _ in 0..times {
            handle.perform();
        }
        debug!(command = %role, times, "command invoked");
        times
    }
}

fn wait_for_action(
    directory: &dyn ActionDirectory,
    role: CommandRole,
    policy: &RetryPolicy,
    running: &AtomicBool,
) -> Result<ActionHandle, ResolveError> {
    let action_id = role.action_id();
    info!(command = %role, "waiting for action {action_id}");

    let mut attempts = 0u32;
    loop {
        if !running.load(Ordering::Acquire) {
            return Err(ResolveError::Cancelled);
        }
        attempts = attempts.saturating_add(1);
        if let Some(handle) = directory.resolve(action_id) {
            debug!(command = %role, attempts, "action resolved");
            return Ok(handle);
        }
        if policy.max_attempts.is_some_and(|max| attempts >= max) {
            return Err(ResolveError::Unavailable {
                role,
                action_id,
                attempts,
            });
        }
        std::thread::sleep(policy.interval);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::action_directory::mock::MockActionDirectory;

    fn fast_policy(max_attempts: Option<u32>) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_millis(1),
            max_attempts,
        }
    }

    fn idle_action() -> ActionHandle {
        Arc::new(MockAction::new())
    }

    #[test]
    fn test_resolve_succeeds_when_all_actions_registered() {
        // Arrange
        let directory = MockActionDirectory::with_all_commands();
        let running = AtomicBool::new(true);

        // Act
        let table = CommandTable::resolve(&directory, &fast_policy(None), &running);

        // Assert
        assert!(table.is_ok());
        assert_eq!(directory.lookup_count(), CommandRole::COUNT as u32);
    }

    #[test]
    fn test_resolve_retries_until_action_appears() {
        // Arrange
        let directory = MockActionDirectory::with_all_commands();
        directory.delay_availability(CommandRole::JogZMinus.action_id(), 3);
        let running = AtomicBool::new(true);

        // Act
        let table = CommandTable::resolve(&directory, &fast_policy(None), &running);

        // Assert – three misses, then the hit
        assert!(table.is_ok());
        assert_eq!(directory.lookup_count(), CommandRole::COUNT as u32 + 3);
    }

    #[test]
    fn test_resolve_gives_up_after_max_attempts() {
        // Arrange
        let directory = MockActionDirectory::with_all_commands();
        directory.unregister(CommandRole::FeedOverrideReset.action_id());
        let running = AtomicBool::new(true);

        // Act
        let result = CommandTable::resolve(&directory, &fast_policy(Some(5)), &running);

        // Assert
        match result {
            Err(ResolveError::Unavailable { role, attempts, .. }) => {
                assert_eq!(role, CommandRole::FeedOverrideReset);
                assert_eq!(attempts, 5);
            }
            other => panic!("expected Unavailable, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_resolve_is_cancelled_when_not_running() {
        // Arrange
        let directory = MockActionDirectory::new();
        let running = AtomicBool::new(false);

        // Act
        let result = CommandTable::resolve(&directory, &fast_policy(None), &running);

        // Assert – no lookups at all once shutdown was requested
        assert!(matches!(result, Err(ResolveError::Cancelled)));
        assert_eq!(directory.lookup_count(), 0);
    }

    #[test]
    fn test_invoke_performs_action_requested_number_of_times() {
        // Arrange
        let mut home = MockAction::new();
        home.expect_is_enabled().times(1).return_const(true);
        home.expect_perform().times(4).return_const(());
        let home: ActionHandle = Arc::new(home);
        let table = CommandTable::from_fn(|role| {
            if role == CommandRole::Home {
                Arc::clone(&home)
            } else {
                idle_action()
            }
        });

        // Act
        let performed = table.invoke(CommandRole::Home, 4);

        // Assert
        assert_eq!(performed, 4);
    }

    #[test]
    fn test_invoke_skips_disabled_action() {
        // Arrange
        let mut stop = MockAction::new();
        stop.expect_is_enabled().times(1).return_const(false);
        stop.expect_perform().never();
        let stop: ActionHandle = Arc::new(stop);
        let table = CommandTable::from_fn(|role| {
            if role == CommandRole::Stop {
                Arc::clone(&stop)
            } else {
                idle_action()
            }
        });

        // Act
        let performed = table.invoke(CommandRole::Stop, 1);

        // Assert
        assert_eq!(performed, 0);
    }

    #[test]
    fn test_default_retry_policy_is_unbounded_20ms() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.interval, Duration::from_millis(20));
        assert_eq!(policy.max_attempts, None);
    }
}

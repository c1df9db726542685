//! ControllerSession: owns the pendant worker thread.
//!
//! # Lifecycle
//!
//! ```text
//! start()
//!  ├─ no device named `device_name`  → disabled session, nothing spawned
//!  └─ spawn "jog-pendant" worker
//!       ├─ wait for start-up gate (ready signal or warm-up delay)
//!       ├─ CommandTable::resolve    (blocks per role until available)
//!       └─ poll loop                (poll → drain → interpret, per device)
//! stop()
//!  └─ clear `running`, wait up to `shutdown_grace`, then return regardless
//! ```
//!
//! The worker owns the devices, the interpreter and the command table, so
//! none of them is shared.  The only cross-thread state is the `running`
//! flag and the completion channel used for the bounded wait in `stop()`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Receiver, RecvTimeoutError, Sender},
    Arc,
};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use jog_core::mapping::muhi;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::command_table::{ActionDirectory, CommandTable, ResolveError, RetryPolicy};
use super::interpret_events::{EventInterpreter, PendantMappings};
use crate::infrastructure::device_source::{DeviceEnvironment, InputDevice};

/// Default fallback delay before resolving commands.
pub const DEFAULT_WARM_UP: Duration = Duration::from_secs(8);

/// Default sleep between full device sweeps.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Default upper bound on how long `stop()` waits for the worker.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Granularity at which waits re-check the `running` flag.
const STOP_CHECK_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for session start-up.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to spawn pendant worker: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Sending half of a directory-ready signal; held by whoever populates the
/// action directory.
#[derive(Debug)]
pub struct ReadyNotifier(Sender<()>);

impl ReadyNotifier {
    /// Signals that the directory has finished registering its actions.
    pub fn notify(self) {
        // The session may already be gone; nothing to do then.
        let _ = self.0.send(());
    }
}

/// Receiving half of a directory-ready signal; consumed by the session.
#[derive(Debug)]
pub struct ReadySignal(Receiver<()>);

/// Creates a connected notifier/signal pair.
pub fn ready_channel() -> (ReadyNotifier, ReadySignal) {
    let (tx, rx) = mpsc::channel();
    (ReadyNotifier(tx), ReadySignal(rx))
}

/// What the worker waits for before resolving commands.
#[derive(Debug)]
pub enum StartupGate {
    /// Wait until the directory reports it is ready.
    Ready(ReadySignal),
    /// Sleep for a fixed time.  A workaround for directories that cannot
    /// signal readiness; it does not guarantee the actions are registered.
    WarmUp(Duration),
}

/// Tunables for a session.
#[derive(Debug)]
pub struct SessionOptions {
    /// Only devices reporting exactly this name are used.
    pub device_name: String,
    pub startup: StartupGate,
    pub retry: RetryPolicy,
    /// Sleep between sweeps; zero busy-polls.
    pub poll_interval: Duration,
    pub shutdown_grace: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            device_name: muhi::DEVICE_NAME.to_string(),
            startup: StartupGate::WarmUp(DEFAULT_WARM_UP),
            retry: RetryPolicy::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

/// Result of [`ControllerSession::stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The session was disabled or already stopped.
    NotRunning,
    /// The worker exited within the grace period.
    Stopped,
    /// The worker was still busy when the grace period ran out; it was
    /// detached and will exit on its own once its current call returns.
    TimedOut,
}

struct Worker {
    handle: JoinHandle<()>,
    /// Disconnects when the worker thread ends (normally or by panic).
    done: Receiver<()>,
}

/// A running (or disabled) pendant session.
pub struct ControllerSession {
    running: Arc<AtomicBool>,
    worker: Option<Worker>,
    shutdown_grace: Duration,
}

impl ControllerSession {
    /// Looks for matching devices and, if any are attached, starts the worker.
    ///
    /// Finding no device is not an error: the returned session is simply
    /// disabled (see [`is_enabled`](Self::is_enabled)).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Spawn`] if the worker thread cannot be created.
    pub fn start(
        environment: &dyn DeviceEnvironment,
        directory: Arc<dyn ActionDirectory>,
        mappings: PendantMappings,
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        let devices: Vec<Box<dyn InputDevice>> = environment
            .list_devices()
            .into_iter()
            .filter(|device| device.name() == options.device_name)
            .collect();

        if devices.is_empty() {
            info!(
                device = %options.device_name,
                "no pendant found; controller disabled"
            );
            return Ok(Self {
                running: Arc::new(AtomicBool::new(false)),
                worker: None,
                shutdown_grace: options.shutdown_grace,
            });
        }
        info!(
            device = %options.device_name,
            count = devices.len(),
            "pendant found"
        );
        if mappings.buttons.is_empty() {
            warn!("button table is empty; only axes will be handled");
        } else {
            debug!(buttons = mappings.buttons.len(), "button table loaded");
        }

        let running = Arc::new(AtomicBool::new(true));
        let (done_tx, done_rx) = mpsc::channel();
        let worker_running = Arc::clone(&running);
        let SessionOptions {
            startup,
            retry,
            poll_interval,
            shutdown_grace,
            ..
        } = options;

        let handle = std::thread::Builder::new()
            .name("jog-pendant".to_string())
            .spawn(move || {
                // Both dropped when this closure returns or unwinds, the flag
                // first so `stop()` never sees a finished worker as running.
                let _done = done_tx;
                let _clear = ClearOnExit(&worker_running);
                run_worker(
                    devices,
                    directory,
                    mappings,
                    startup,
                    retry,
                    poll_interval,
                    &worker_running,
                );
            })
            .map_err(SessionError::Spawn)?;

        Ok(Self {
            running,
            worker: Some(Worker {
                handle,
                done: done_rx,
            }),
            shutdown_grace,
        })
    }

    /// `true` if a worker was started (a matching device was found).
    pub fn is_enabled(&self) -> bool {
        self.worker.is_some()
    }

    /// `true` while the worker has not exited or been asked to stop.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Asks the worker to stop and waits for it, at most `shutdown_grace`.
    ///
    /// Never blocks longer than the grace period, even if the worker is stuck
    /// inside a directory lookup or a command invocation.  Safe to call more
    /// than once.
    pub fn stop(&mut self) -> StopOutcome {
        let Some(worker) = self.worker.take() else {
            return StopOutcome::NotRunning;
        };
        self.running.store(false, Ordering::Release);

        match worker.done.recv_timeout(self.shutdown_grace) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if worker.handle.join().is_err() {
                    error!("pendant worker panicked");
                }
                info!("pendant session stopped");
                StopOutcome::Stopped
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    grace_ms = self.shutdown_grace.as_millis() as u64,
                    "pendant worker did not exit in time; detaching"
                );
                StopOutcome::TimedOut
            }
        }
    }
}

impl Drop for ControllerSession {
    fn drop(&mut self) {
        self.stop();
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

/// Clears the running flag when the worker ends, including by panic.
struct ClearOnExit<'a>(&'a AtomicBool);

impl Drop for ClearOnExit<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn run_worker(
    mut devices: Vec<Box<dyn InputDevice>>,
    directory: Arc<dyn ActionDirectory>,
    mappings: PendantMappings,
    startup: StartupGate,
    retry: RetryPolicy,
    poll_interval: Duration,
    running: &AtomicBool,
) {
    if !wait_for_startup(startup, running) {
        info!("pendant session stopped during start-up");
        return;
    }

    let commands = match CommandTable::resolve(directory.as_ref(), &retry, running) {
        Ok(commands) => commands,
        Err(ResolveError::Cancelled) => {
            info!("pendant session stopped while resolving commands");
            return;
        }
        Err(e) => {
            error!("{e}; pendant controller disabled");
            return;
        }
    };

    let mut interpreter = EventInterpreter::new(mappings, commands);
    info!("pendant controller running");

    while running.load(Ordering::Acquire) {
        sweep_devices(&mut devices, &mut interpreter);
        if !poll_interval.is_zero() {
            std::thread::sleep(poll_interval);
        }
    }

    let stats = interpreter.stats();
    info!(
        events = stats.events,
        rejected = stats.rejected,
        noise = stats.noise,
        invocations = stats.invocations,
        "pendant controller finished"
    );
}

/// Returns `false` if the session was stopped while waiting.
fn wait_for_startup(startup: StartupGate, running: &AtomicBool) -> bool {
    match startup {
        StartupGate::WarmUp(delay) => {
            info!(delay_ms = delay.as_millis() as u64, "warming up before resolving commands");
            let deadline = Instant::now() + delay;
            while running.load(Ordering::Acquire) {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                std::thread::sleep(remaining.min(STOP_CHECK_INTERVAL));
            }
        }
        StartupGate::Ready(ReadySignal(rx)) => loop {
            if !running.load(Ordering::Acquire) {
                break;
            }
            match rx.recv_timeout(STOP_CHECK_INTERVAL) {
                Ok(()) => {
                    info!("action directory ready");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("ready notifier dropped without signalling; continuing start-up");
                    break;
                }
            }
        },
    }
    running.load(Ordering::Acquire)
}

/// Polls every device once and feeds its events to the interpreter.
///
/// Returns the number of events handled.  Device and interpretation failures
/// are logged and so is a panicking action; none of them stops the sweep.
pub(crate) fn sweep_devices(
    devices: &mut [Box<dyn InputDevice>],
    interpreter: &mut EventInterpreter,
) -> usize {
    let mut handled = 0;
    for device in devices.iter_mut() {
        if let Err(e) = device.poll() {
            warn!(device = %device.name(), "poll failed: {e}");
            continue;
        }
        for event in device.drain_events() {
            handled += 1;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| interpreter.handle_event(event)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(device = %device.name(), "dropped input: {e}"),
                Err(payload) => error!(
                    device = %device.name(),
                    ?event,
                    "command panicked: {}",
                    panic_message(payload.as_ref())
                ),
            }
        }
    }
    if handled > 0 {
        debug!(handled, "sweep complete");
    }
    handled
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::action_directory::mock::MockActionDirectory;
    use crate::infrastructure::device_source::{
        mock::{MockDevice, MockDeviceHandle},
        StaticDeviceEnvironment,
    };
    use jog_core::{AxisId, CommandRole, RawEvent};

    fn make_interpreter() -> (EventInterpreter, Arc<MockActionDirectory>) {
        let directory = Arc::new(MockActionDirectory::with_all_commands());
        let running = AtomicBool::new(true);
        let commands =
            CommandTable::resolve(directory.as_ref(), &RetryPolicy::default(), &running).unwrap();
        (
            EventInterpreter::new(PendantMappings::default(), commands),
            directory,
        )
    }

    fn boxed(device: MockDevice) -> Box<dyn InputDevice> {
        Box::new(device)
    }

    fn quick_options(startup: StartupGate) -> SessionOptions {
        SessionOptions {
            startup,
            retry: RetryPolicy {
                interval: Duration::from_millis(1),
                max_attempts: None,
            },
            poll_interval: Duration::from_millis(1),
            shutdown_grace: Duration::from_secs(2),
            ..SessionOptions::default()
        }
    }

    fn wait_until<F: Fn() -> bool>(condition: F) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        false
    }

    // ── sweep_devices ─────────────────────────────────────────────────────────

    #[test]
    fn test_sweep_feeds_events_in_arrival_order() {
        // Arrange
        let (mut interpreter, dir) = make_interpreter();
        let (device, handle) = MockDevice::new("MUHI");
        handle.inject_all([
            RawEvent::Button { id: 7, value: 1.0 },
            RawEvent::Axis { id: AxisId::X, value: 2.0 },
            RawEvent::Button { id: 2, value: 1.0 },
            RawEvent::Axis { id: AxisId::X, value: -1.0 },
        ]);
        let mut devices = vec![boxed(device)];

        // Act
        let handled = sweep_devices(&mut devices, &mut interpreter);

        // Assert
        assert_eq!(handled, 4);
        assert_eq!(
            dir.performed_roles(),
            vec![CommandRole::JogXPlus, CommandRole::JogXPlus, CommandRole::JogYMinus]
        );
    }

    #[test]
    fn test_sweep_continues_after_bad_event_and_failed_device() {
        // Arrange
        let (mut interpreter, dir) = make_interpreter();
        let (broken, broken_handle) = MockDevice::new("MUHI");
        broken_handle.fail_next_polls(1);
        broken_handle.inject(RawEvent::Button { id: 8, value: 1.0 });
        let (healthy, healthy_handle) = MockDevice::new("MUHI");
        healthy_handle.inject_all([
            RawEvent::Button { id: 99, value: 1.0 },
            RawEvent::Button { id: 8, value: 1.0 },
        ]);
        let mut devices = vec![boxed(broken), boxed(healthy)];

        // Act
        let first = sweep_devices(&mut devices, &mut interpreter);
        let second = sweep_devices(&mut devices, &mut interpreter);

        // Assert – healthy device handled in sweep 1, broken one catches up in sweep 2
        assert_eq!(first, 2);
        assert_eq!(second, 1);
        assert_eq!(dir.performed(CommandRole::Home), 2);
    }

    #[test]
    fn test_sweep_interleaves_devices_in_list_order() {
        let (mut interpreter, dir) = make_interpreter();
        let (a, a_handle) = MockDevice::new("MUHI");
        let (b, b_handle) = MockDevice::new("MUHI");
        b_handle.inject(RawEvent::Button { id: 10, value: 1.0 });
        a_handle.inject(RawEvent::Button { id: 12, value: 1.0 });
        let mut devices = vec![boxed(a), boxed(b)];

        sweep_devices(&mut devices, &mut interpreter);

        assert_eq!(
            dir.performed_roles(),
            vec![CommandRole::Start, CommandRole::Stop]
        );
    }

    // ── Session lifecycle ─────────────────────────────────────────────────────

    fn start_with_device(
        name: &str,
        directory: Arc<MockActionDirectory>,
        options: SessionOptions,
    ) -> (ControllerSession, MockDeviceHandle) {
        let (device, handle) = MockDevice::new(name);
        let env = StaticDeviceEnvironment::new(vec![boxed(device)]);
        let session =
            ControllerSession::start(&env, directory, PendantMappings::default(), options)
                .expect("spawn");
        (session, handle)
    }

    #[test]
    fn test_session_without_matching_device_is_disabled() {
        // Arrange
        let directory = Arc::new(MockActionDirectory::with_all_commands());

        // Act
        let (mut session, handle) = start_with_device(
            "Gamepad",
            Arc::clone(&directory),
            quick_options(StartupGate::WarmUp(Duration::ZERO)),
        );

        // Assert
        assert!(!session.is_enabled());
        assert!(!session.is_running());
        assert_eq!(handle.poll_count(), 0);
        assert_eq!(directory.lookup_count(), 0);
        assert_eq!(session.stop(), StopOutcome::NotRunning);
    }

    #[test]
    fn test_session_processes_events_after_ready_signal() {
        // Arrange
        let directory = Arc::new(MockActionDirectory::with_all_commands());
        let (notifier, signal) = ready_channel();
        let (mut session, handle) = start_with_device(
            "MUHI",
            Arc::clone(&directory),
            quick_options(StartupGate::Ready(signal)),
        );
        assert!(session.is_enabled());

        // Act
        notifier.notify();
        handle.inject_all([
            RawEvent::Button { id: 7, value: 1.0 },
            RawEvent::Axis { id: AxisId::X, value: 1.05 },
        ]);

        // Assert
        assert!(wait_until(|| directory.performed(CommandRole::JogXPlus) == 1));
        assert_eq!(session.stop(), StopOutcome::Stopped);
        assert!(!session.is_running());
    }

    #[test]
    fn test_session_does_not_resolve_before_ready_signal() {
        // Arrange
        let directory = Arc::new(MockActionDirectory::with_all_commands());
        let (_notifier, signal) = ready_channel();
        let (mut session, _) = start_with_device(
            "MUHI",
            Arc::clone(&directory),
            quick_options(StartupGate::Ready(signal)),
        );

        // Act
        std::thread::sleep(Duration::from_millis(100));

        // Assert
        assert_eq!(directory.lookup_count(), 0);
        assert_eq!(session.stop(), StopOutcome::Stopped);
    }

    #[test]
    fn test_dropped_ready_notifier_counts_as_ready() {
        let directory = Arc::new(MockActionDirectory::with_all_commands());
        let (notifier, signal) = ready_channel();
        drop(notifier);

        let (mut session, handle) = start_with_device(
            "MUHI",
            Arc::clone(&directory),
            quick_options(StartupGate::Ready(signal)),
        );
        handle.inject(RawEvent::Button { id: 8, value: 1.0 });

        assert!(wait_until(|| directory.performed(CommandRole::Home) == 1));
        session.stop();
    }

    #[test]
    fn test_stop_during_warm_up_returns_promptly() {
        // Arrange
        let directory = Arc::new(MockActionDirectory::with_all_commands());
        let (mut session, _) = start_with_device(
            "MUHI",
            Arc::clone(&directory),
            quick_options(StartupGate::WarmUp(Duration::from_secs(60))),
        );

        // Act
        let started = Instant::now();
        let outcome = session.stop();

        // Assert
        assert_eq!(outcome, StopOutcome::Stopped);
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(directory.lookup_count(), 0);
    }

    #[test]
    fn test_stop_while_blocked_resolving_commands() {
        // Arrange – one action never appears
        let directory = Arc::new(MockActionDirectory::with_all_commands());
        directory.unregister(CommandRole::FeedOverrideFineMinus.action_id());
        let (mut session, _) = start_with_device(
            "MUHI",
            Arc::clone(&directory),
            quick_options(StartupGate::WarmUp(Duration::ZERO)),
        );
        assert!(wait_until(|| directory.lookup_count() > CommandRole::COUNT as u32));

        // Act
        let started = Instant::now();
        let outcome = session.stop();

        // Assert
        assert_eq!(outcome, StopOutcome::Stopped);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_worker_exits_when_resolution_gives_up() {
        let directory = Arc::new(MockActionDirectory::new());
        let mut options = quick_options(StartupGate::WarmUp(Duration::ZERO));
        options.retry.max_attempts = Some(3);

        let (mut session, _) = start_with_device("MUHI", Arc::clone(&directory), options);

        assert!(wait_until(|| !session.is_running()));
        assert_eq!(directory.lookup_count(), 3);
        assert_eq!(session.stop(), StopOutcome::Stopped);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let directory = Arc::new(MockActionDirectory::with_all_commands());
        let (mut session, _) = start_with_device(
            "MUHI",
            directory,
            quick_options(StartupGate::WarmUp(Duration::ZERO)),
        );

        assert_eq!(session.stop(), StopOutcome::Stopped);
        assert_eq!(session.stop(), StopOutcome::NotRunning);
    }

    #[test]
    fn test_default_options_match_pendant_defaults() {
        let options = SessionOptions::default();
        assert_eq!(options.device_name, "MUHI");
        assert!(matches!(options.startup, StartupGate::WarmUp(d) if d == Duration::from_secs(8)));
        assert_eq!(options.shutdown_grace, Duration::from_secs(10));
        assert_eq!(options.retry, RetryPolicy::default());
    }

    // ── Panicking actions ─────────────────────────────────────────────────────

    use crate::application::command_table::{Action, ActionHandle, MockAction};

    struct PanickingAction;

    impl Action for PanickingAction {
        fn is_enabled(&self) -> bool {
            true
        }

        fn perform(&self) {
            panic!("front end blew up");
        }
    }

    /// Hands out a panicking action for Home and delegates everything else.
    struct PanicOnHome {
        inner: Arc<MockActionDirectory>,
    }

    impl ActionDirectory for PanicOnHome {
        fn resolve(&self, action_id: &str) -> Option<ActionHandle> {
            if action_id == CommandRole::Home.action_id() {
                Some(Arc::new(PanickingAction))
            } else {
                self.inner.resolve(action_id)
            }
        }
    }

    struct PanickingDirectory;

    impl ActionDirectory for PanickingDirectory {
        fn resolve(&self, _action_id: &str) -> Option<ActionHandle> {
            panic!("directory unavailable");
        }
    }

    #[test]
    fn test_sweep_survives_panicking_action() {
        // Arrange – Home panics, every other command is a quiet mock
        let commands = CommandTable::from_fn(|role| {
            if role == CommandRole::Home {
                return Arc::new(PanickingAction) as ActionHandle;
            }
            let mut action = MockAction::new();
            action.expect_is_enabled().return_const(true);
            action.expect_perform().return_const(());
            Arc::new(action)
        });
        let mut interpreter = EventInterpreter::new(PendantMappings::default(), commands);
        let (device, handle) = MockDevice::new("MUHI");
        handle.inject_all([
            RawEvent::Button { id: 8, value: 1.0 },
            RawEvent::Button { id: 7, value: 1.0 },
            RawEvent::Axis { id: AxisId::X, value: 2.0 },
        ]);
        let mut devices = vec![boxed(device)];

        // Act
        let handled = sweep_devices(&mut devices, &mut interpreter);

        // Assert
        assert_eq!(handled, 3);
        assert_eq!(interpreter.selected_axis(), jog_core::SelectedAxis::X);
        assert_eq!(interpreter.stats().invocations, 2);
    }

    #[test]
    fn test_session_keeps_running_after_action_panics() {
        // Arrange
        let recorder = Arc::new(MockActionDirectory::with_all_commands());
        let directory = Arc::new(PanicOnHome {
            inner: Arc::clone(&recorder),
        });
        let (device, handle) = MockDevice::new("MUHI");
        let env = StaticDeviceEnvironment::new(vec![boxed(device)]);
        let mut session = ControllerSession::start(
            &env,
            directory,
            PendantMappings::default(),
            quick_options(StartupGate::WarmUp(Duration::ZERO)),
        )
        .expect("spawn");

        // Act
        handle.inject(RawEvent::Button { id: 8, value: 1.0 });
        handle.inject_all([
            RawEvent::Button { id: 7, value: 1.0 },
            RawEvent::Axis { id: AxisId::X, value: 2.0 },
        ]);

        // Assert
        assert!(wait_until(|| recorder.performed(CommandRole::JogXPlus) == 2));
        assert!(session.is_running());
        assert_eq!(session.stop(), StopOutcome::Stopped);
    }

    #[test]
    fn test_worker_panic_clears_running_flag() {
        // Arrange
        let (device, _handle) = MockDevice::new("MUHI");
        let env = StaticDeviceEnvironment::new(vec![boxed(device)]);

        // Act
        let mut session = ControllerSession::start(
            &env,
            Arc::new(PanickingDirectory),
            PendantMappings::default(),
            quick_options(StartupGate::WarmUp(Duration::ZERO)),
        )
        .expect("spawn");

        // Assert
        assert!(wait_until(|| !session.is_running()));
        assert_eq!(session.stop(), StopOutcome::Stopped);
    }
}

//! EventInterpreter: turns raw pendant events into front-end commands.
//!
//! This is the heart of the pendant controller.  It receives raw events from
//! the session's poll loop, looks each id up in the [`ButtonMap`]/[`AxisMap`],
//! keeps the selected axis and step size, quantizes wheel ticks, and invokes
//! commands through the [`CommandTable`].
//!
//! # Architecture
//!
//! The interpreter owns all of its mutable state and is moved into the
//! session's worker thread, so nothing here is locked.  It depends only on
//! `jog_core` tables and the command table's traits; tests drive it with
//! hand-built events and a recording directory.
//!
//! # Failure policy
//!
//! [`EventInterpreter::handle_event`] returns an [`InterpretError`] for input
//! it does not understand.  The error describes a dropped event, not a
//! broken interpreter: the caller logs it and carries on with the next event.

use jog_core::mapping::{ButtonAction, Trigger};
use jog_core::{
    AxisId, AxisMap, AxisRole, ButtonId, ButtonMap, ButtonRole, CommandRole, Direction, RawEvent,
    SelectedAxis, StepSize, TickDelta,
};
use thiserror::Error;
use tracing::{debug, info, trace};

use super::command_table::CommandTable;

/// An event the interpreter dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretError {
    #[error("unknown button {0}")]
    UnknownButton(ButtonId),
    #[error("button {id} ({role:?}) reported unexpected value {value}")]
    UnexpectedButtonValue {
        id: ButtonId,
        role: ButtonRole,
        value: f32,
    },
    #[error("axis {axis} reported non-finite value {value}")]
    NonFiniteAxisValue { axis: AxisId, value: f32 },
}

/// The button and axis tables for one pendant model.
#[derive(Debug, Clone, PartialEq)]
pub struct PendantMappings {
    pub buttons: ButtonMap,
    pub axes: AxisMap,
}

impl Default for PendantMappings {
    fn default() -> Self {
        Self {
            buttons: ButtonMap::muhi(),
            axes: AxisMap::muhi(),
        }
    }
}

/// Running totals, reported when a session ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterStats {
    /// Every event handed to the interpreter.
    pub events: u64,
    /// Events rejected with an [`InterpretError`].
    pub rejected: u64,
    /// Axis events discarded by the dead zone.
    pub noise: u64,
    /// Actions actually performed (repeats counted individually).
    pub invocations: u64,
}

/// The event interpreter.
pub struct EventInterpreter {
    buttons: ButtonMap,
    axes: AxisMap,
    commands: CommandTable,
    selected_axis: SelectedAxis,
    step_size: Option<StepSize>,
    stats: InterpreterStats,
}

impl EventInterpreter {
    /// Creates an interpreter with no axis and no step size selected.
    pub fn new(mappings: PendantMappings, commands: CommandTable) -> Self {
        Self {
            buttons: mappings.buttons,
            axes: mappings.axes,
            commands,
            selected_axis: SelectedAxis::None,
            step_size: None,
            stats: InterpreterStats::default(),
        }
    }

    pub fn selected_axis(&self) -> SelectedAxis {
        self.selected_axis
    }

    /// The last step size chosen on the pendant, `None` until one is chosen.
    pub fn step_size(&self) -> Option<StepSize> {
        self.step_size
    }

    pub fn stats(&self) -> InterpreterStats {
        self.stats
    }

    /// Handles one raw event.
    ///
    /// # Errors
    ///
    /// Returns an [`InterpretError`] when the event is dropped as unknown or
    /// malformed input.  No state changes and no commands run in that case.
    pub fn handle_event(&mut self, event: RawEvent) -> Result<(), InterpretError> {
        self.stats.events += 1;
        let result = match event {
            RawEvent::Button { id, value } => self.handle_button(id, value),
            RawEvent::Axis { id, value } => self.handle_axis(id, value),
        };
        if result.is_err() {
            self.stats.rejected += 1;
        }
        result
    }

    // ── Private event handlers ────────────────────────────────────────────────

    fn handle_button(&mut self, id: ButtonId, value: f32) -> Result<(), InterpretError> {
        let (role, label) = match self.buttons.get(id) {
            Some(entry) => (entry.role, entry.label.clone()),
            None => return Err(InterpretError::UnknownButton(id)),
        };
        let label = label.as_deref().unwrap_or("-");

        let pressed = if value == 1.0 {
            true
        } else if value == 0.0 {
            false
        } else {
            return Err(InterpretError::UnexpectedButtonValue { id, role, value });
        };

        let Some(action) = role.action(pressed) else {
            trace!(button = id, label, "release ignored");
            return Ok(());
        };

        match action {
            ButtonAction::Invoke(command) => {
                info!(button = id, label, "button: {command}");
                self.invoke(command, 1);
            }
            ButtonAction::SelectStep(size) => {
                if role.trigger() == Trigger::Toggle {
                    info!(button = id, label, pressed, "step select: {size}");
                } else {
                    info!(button = id, label, "step select: {size}");
                }
                self.step_size = Some(size);
                self.invoke(size.select_command(), 1);
            }
            ButtonAction::SelectAxis(axis) => {
                info!(button = id, label, "axis select: {axis}");
                self.selected_axis = axis;
            }
            ButtonAction::Log => {
                info!(button = id, label, "reserved button pressed");
            }
        }
        Ok(())
    }

    fn handle_axis(&mut self, axis: AxisId, value: f32) -> Result<(), InterpretError> {
        let Some(role) = self.axes.get(axis) else {
            trace!(%axis, value, "unbound axis");
            return Ok(());
        };
        if !value.is_finite() {
            return Err(InterpretError::NonFiniteAxisValue { axis, value });
        }
        let Some(delta) = TickDelta::from_axis_value(value) else {
            // Boot noise: the pendant reports ~-0.0078 on every axis at start-up.
            self.stats.noise += 1;
            return Ok(());
        };

        let command = match role {
            AxisRole::Wheel => match self.selected_axis.jog_command(delta.direction) {
                Some(command) => command,
                None => {
                    debug!(
                        selected = %self.selected_axis,
                        ticks = delta.count,
                        "wheel moved with no jog axis bound"
                    );
                    return Ok(());
                }
            },
            AxisRole::FeedOverride => match delta.direction {
                Direction::Positive => CommandRole::FeedOverrideFinePlus,
                Direction::Negative => CommandRole::FeedOverrideFineMinus,
            },
        };
        self.invoke(command, delta.count);
        Ok(())
    }

    fn invoke(&mut self, command: CommandRole, times: u32) {
        let performed = self.commands.invoke(command, times);
        self.stats.invocations += u64::from(performed);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

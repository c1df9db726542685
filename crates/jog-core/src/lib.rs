//! # jog-core
//!
//! Shared domain library for the jog pendant controller: selection state
//! types, command roles, wheel-tick quantization, raw input event types, and
//! the tables that map physical button/axis ids to semantic roles.
//!
//! This crate has no threads, no I/O and no dependency on any device or
//! motion-control front end.  The `jog-pendant` crate builds the event
//! interpreter and session on top of it.
//!
//! # Architecture overview
//!
//! A jog pendant (hand wheel) is a small USB controller with a rotary wheel,
//! a feed-override knob and a handful of buttons.  The operator picks an axis
//! and a step size with buttons, then turns the wheel to jog the machine.
//!
//! - **`domain`** – The pure vocabulary: which axis is selected, which step
//!   size is active, which front-end command a role invokes, and how a raw
//!   wheel value becomes a direction plus a repeat count.
//!
//! - **`input`** – Raw events exactly as the device reports them.
//!
//! - **`mapping`** – Declarative tables from `(event class, id)` to a role.
//!   The default table describes the "MUHI" pendant.

pub mod domain;
pub mod input;
pub mod mapping;

pub use domain::command::CommandRole;
pub use domain::selection::{SelectedAxis, StepSize};
pub use domain::ticks::{Direction, TickDelta};
pub use input::{AxisId, ButtonId, RawEvent};
pub use mapping::{AxisMap, AxisRole, ButtonMap, ButtonRole, MappingError};

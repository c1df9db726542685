//! Application layer of the pendant controller.
//!
//! Use cases in this layer orchestrate `jog_core` domain types and depend
//! only on traits for the outside world (action directory, input devices).
//!
//! # Sub-modules
//!
//! - **`command_table`** – Resolves every command role to an action handle
//!   once at start-up, retrying until the front end has registered them, and
//!   invokes handles with a repeat count.
//!
//! - **`interpret_events`** – The event interpreter.  Classifies each raw
//!   event, keeps the axis/step selection, quantizes wheel ticks and invokes
//!   commands.  Runs on every event the pendant produces.
//!
//! - **`controller_session`** – Owns the worker thread: readiness wait,
//!   command resolution, the poll loop, and bounded shutdown.

pub mod command_table;
pub mod controller_session;
pub mod interpret_events;

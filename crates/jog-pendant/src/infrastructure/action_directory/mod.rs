//! Action directory adapters.
//!
//! The real directory belongs to the motion-control front end that embeds
//! the pendant session; it implements
//! [`ActionDirectory`](crate::application::command_table::ActionDirectory)
//! directly.  This module ships two stand-ins:
//!
//! - [`logging::LoggingActionDirectory`] resolves every known command id to an
//!   action that only writes a log line.  The binary uses it for dry runs.
//! - [`mock::MockActionDirectory`] records every invocation for tests.

pub mod logging;
pub mod mock;

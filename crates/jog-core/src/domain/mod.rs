//! Domain vocabulary for jog pendant input.
//!
//! Everything here is plain data and pure functions.  The interpreter in
//! `jog-pendant` owns the mutable state; these types only describe it.

pub mod command;
pub mod selection;
pub mod ticks;

//! Axis and step-size selection.
//!
//! Both values are chosen with dedicated pendant buttons and read by the
//! wheel handler.  Neither type knows about physical button ids; that
//! association lives in [`crate::mapping`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::command::CommandRole;
use super::ticks::Direction;

/// The machine axis the hand wheel currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectedAxis {
    X,
    Y,
    Z,
    /// Rotary axis.  Selectable on the pendant but not bound to any jog command.
    A,
    /// No axis selected yet; wheel ticks are ignored.
    #[default]
    None,
}

impl SelectedAxis {
    /// Returns the jog command for this axis in `direction`, or `None` when
    /// the axis has no bound jog commands (`A` and `None`).
    pub fn jog_command(self, direction: Direction) -> Option<CommandRole> {
        let (plus, minus) = match self {
            SelectedAxis::X => (CommandRole::JogXPlus, CommandRole::JogXMinus),
            SelectedAxis::Y => (CommandRole::JogYPlus, CommandRole::JogYMinus),
            SelectedAxis::Z => (CommandRole::JogZPlus, CommandRole::JogZMinus),
            SelectedAxis::A | SelectedAxis::None => return None,
        };
        Some(match direction {
            Direction::Positive => plus,
            Direction::Negative => minus,
        })
    }
}

impl fmt::Display for SelectedAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectedAxis::X => "X",
            SelectedAxis::Y => "Y",
            SelectedAxis::Z => "Z",
            SelectedAxis::A => "A",
            SelectedAxis::None => "none",
        };
        f.write_str(s)
    }
}

/// Jog step size selected on the pendant.
///
/// The interpreter never tracks the resulting distance itself; it only
/// invokes the matching "set jog size" command and the front end applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepSize {
    Ten,
    One,
    OneTenth,
    OneHundredth,
}

impl StepSize {
    /// The command that makes this step size active in the front end.
    pub fn select_command(self) -> CommandRole {
        match self {
            StepSize::Ten => CommandRole::StepSizeTen,
            StepSize::One => CommandRole::StepSizeOne,
            StepSize::OneTenth => CommandRole::StepSizeOneTenth,
            StepSize::OneHundredth => CommandRole::StepSizeOneHundredth,
        }
    }
}

impl fmt::Display for StepSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepSize::Ten => "10",
            StepSize::One => "1",
            StepSize::OneTenth => "0.1",
            StepSize::OneHundredth => "0.01",
        };
        f.write_str(s)
    }
}
